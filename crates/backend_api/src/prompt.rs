//! The fixed instructional prompt wrapped around the rendered forecast
//! summary. Kept as constants with a single interpolation point so the
//! exact text sent upstream stays auditable without going through HTTP.

/// System message framing the model for every request.
pub const SYSTEM_PROMPT: &str = "You are a financial analyst.";

const SUMMARY_PLACEHOLDER: &str = "{forecast_summary}";

/// User-message template. `{forecast_summary}` is the only interpolation
/// point; everything else is sent verbatim.
pub const PROMPT_TEMPLATE: &str = r#"You are a financial analyst with expertise in return on investment (ROI) forecasting. Analyze the following financial forecast and provide **concise, data-driven** insights. Each point must be **a maximum of four lines**, covering all relevant data from the forecast. Insights should include **both quarterly and yearly trends**, backed by **specific numerical values**. Ensure the response follows the structured format below.

#### **Financial Data:**
{forecast_summary}

#### **Your Analysis Should Cover:**
Provide exactly **4 key insights** and **1 two-line conclusion** (always include ROI Trends and Break-even Point) in the following structured format:

---
## 📊 **Key Insights**

- **Quarterly ROI growth** starts at **2.5% in Q1**, rising to **7% in Q4**, leading to an annual ROI of **28%** in Year 1. By Year 3, **quarterly ROI stabilizes at 9%**, pushing the annual ROI to **120%**.

- **Break-even is reached in Q2 of Year 2**, when revenue crosses **$450,000**, surpassing cumulative costs of **$380,000**. By Year 3, net profit reaches **$150,000 per quarter**, ensuring long-term stability.

- **Compared to industry benchmarks**, projected ROI exceeds the **95% 3-year industry average** by **15%**, with **quarterly cost efficiency improving by 5% per quarter**, strengthening profit margins.

- **High Year 1 operational costs** of **$100,000 per quarter** exceed projections by **20%**, but automation reduces quarterly expenses by **$10,000 from Q3 onward**, leading to **total savings of $200,000 over 5 years**.

---
## 📌 **Conclusion**
💡 **ROI reaches 120% in 3 years, with quarterly gains stabilizing at 9%. Break-even in Q2 of Year 2 ensures sustainable profits, while automation-driven savings boost cost efficiency long-term.**"#;

/// Interpolates the rendered forecast summary into the template.
pub fn build_prompt(forecast_summary: &str) -> String {
    PROMPT_TEMPLATE.replace(SUMMARY_PLACEHOLDER, forecast_summary)
}
