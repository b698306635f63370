use serde_json::Value;

use crate::error::{ApiError, Result};

/// The keys every forecast entry must carry, in rendering order.
pub const REQUIRED_KEYS: [&str; 9] = [
    "year",
    "investment",
    "amcCost",
    "revenue",
    "savings",
    "totalRevenueSavings",
    "cumulativeTotalCost",
    "netProfitLoss",
    "cumulativeProfitLoss",
];

/// Checks that every entry carries all required keys.
///
/// First-error-wins: the scan stops at the first missing key and rejects
/// the whole request. Callers must not aggregate violations.
pub fn validate_entries(entries: &[Value]) -> Result<()> {
    for entry in entries {
        for key in REQUIRED_KEYS {
            if entry.get(key).is_none() {
                return Err(ApiError::MissingKey(key.to_string()));
            }
        }
    }
    Ok(())
}

/// Renders the forecast entries into the per-year summary block, one line
/// per entry in input order, joined with single newlines.
pub fn render_summary(entries: &[Value]) -> Result<String> {
    let lines = entries
        .iter()
        .map(render_entry)
        .collect::<Result<Vec<String>>>()?;

    Ok(lines.join("\n"))
}

fn render_entry(entry: &Value) -> Result<String> {
    Ok(format!(
        "Year {}: Investment = ${:.2}, AMC Cost = ${:.2}, Revenue = ${:.2}, Cost Savings = ${:.2}, \
         Total Revenue & Savings = ${:.2}, Cumulative Cost = ${:.2}, Net Profit/Loss = ${:.2}, \
         Cumulative Profit/Loss = ${:.2}",
        year_token(entry),
        required_number(entry, "investment")?,
        required_number(entry, "amcCost")?,
        required_number(entry, "revenue")?,
        required_number(entry, "savings")?,
        required_number(entry, "totalRevenueSavings")?,
        required_number(entry, "cumulativeTotalCost")?,
        required_number(entry, "netProfitLoss")?,
        required_number(entry, "cumulativeProfitLoss")?,
    ))
}

/// `year` is echoed as its raw JSON token (1 stays "1", 1.5 stays "1.5").
fn year_token(entry: &Value) -> String {
    entry.get("year").cloned().unwrap_or(Value::Null).to_string()
}

fn required_number(entry: &Value, key: &str) -> Result<f64> {
    entry
        .get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| ApiError::Internal(format!("Non-numeric value for key: {key}")))
}
