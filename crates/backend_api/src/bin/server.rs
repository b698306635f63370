use ai_client::{AzureOpenAiClient, AzureOpenAiConfig};
use backend_api::{run_server, AzureObservationGenerator, GeneratorState};
use std::sync::Arc;
use std::{env, path::PathBuf};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Required Azure configuration: a missing variable aborts startup.
    let config = AzureOpenAiConfig::from_env()?;

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "5000".to_string())
        .parse()
        .unwrap_or(5000);
    let static_dir_raw = env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string());
    // Declared for deployment parity with the frontend; not used in routing.
    let frontend_url = env::var("FRONTEND_URL").ok();

    // Resolve the static dir: if absolute keep it, else try workspace root then cwd.
    let crate_root = env::current_dir()?;
    let workspace_root = find_workspace_root().unwrap_or_else(|| crate_root.clone());
    let static_dir = resolve_with_fallback(&static_dir_raw, &[&workspace_root, &crate_root]);

    println!("Forecast Insight API Server");
    println!("===========================");
    println!("Deployment: {}", config.deployment);
    println!("Static dir (resolved): {}", static_dir.display());
    println!("Listening on: {}:{}", host, port);
    if let Some(url) = &frontend_url {
        println!("Frontend URL: {}", url);
    }
    println!();

    // Pre-flight checks
    if !static_dir.join("index.html").exists() {
        eprintln!(
            "[WARN] entry page not found at: {}",
            static_dir.join("index.html").display()
        );
        eprintln!("       Continuing; static routes will 404 until the file exists.");
    }

    // A client that fails construction is a per-request 500, not a crash:
    // every request fails identically until redeployed with valid config.
    let generator: GeneratorState = match AzureOpenAiClient::new(config) {
        Ok(client) => Some(Arc::new(AzureObservationGenerator::new(client))),
        Err(e) => {
            eprintln!("Error initializing Azure OpenAI client: {e:#}");
            None
        }
    };

    // Start the server
    run_server(generator, static_dir, &host, port).await?;

    Ok(())
}

/// Find the Cargo workspace root by traversing up until a Cargo.toml that contains a [workspace] section.
fn find_workspace_root() -> Option<PathBuf> {
    let mut dir = env::current_dir().ok()?;
    for _ in 0..10 {
        // safety limit
        let candidate = dir.join("Cargo.toml");
        if candidate.exists() {
            if let Ok(content) = std::fs::read_to_string(&candidate) {
                if content.contains("[workspace]") {
                    return Some(dir.clone());
                }
            }
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Resolve a raw path string against a list of base directories, returning the first existing match, or the first constructed path.
fn resolve_with_fallback(raw: &str, bases: &[&PathBuf]) -> PathBuf {
    let input = PathBuf::from(raw);
    if input.is_absolute() {
        return input;
    }
    for base in bases {
        let candidate = base.join(&input);
        if candidate.exists() {
            return candidate;
        }
    }
    // If none exist yet (maybe created later), just use the first base.
    match bases.first() {
        Some(base) => base.join(input),
        None => input,
    }
}
