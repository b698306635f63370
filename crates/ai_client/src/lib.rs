use anyhow::{anyhow, Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

/// Configuration for talking to an Azure OpenAI chat deployment.
///
/// All four values are required: the service is not usable without a key,
/// an endpoint, a deployment name and an API version.
#[derive(Debug, Clone)]
pub struct AzureOpenAiConfig {
    pub api_key: String,
    pub endpoint: String,
    pub deployment: String,
    pub api_version: String,
}

impl AzureOpenAiConfig {
    /// Loads config from env vars:
    /// - `AZURE_OPENAI_API_KEY`
    /// - `AZURE_OPENAI_ENDPOINT`
    /// - `AZURE_DEPLOYMENT_NAME`
    /// - `AZURE_API_VERSION`
    ///
    /// Every variable is required; a missing one is an error naming it.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: required_env("AZURE_OPENAI_API_KEY")?,
            endpoint: required_env("AZURE_OPENAI_ENDPOINT")?,
            deployment: required_env("AZURE_DEPLOYMENT_NAME")?,
            api_version: required_env("AZURE_API_VERSION")?,
        })
    }
}

fn required_env(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| anyhow!("Missing required environment variable: {name}"))
}

/// Minimal Azure OpenAI chat-completions client.
#[derive(Debug, Clone)]
pub struct AzureOpenAiClient {
    http: Client,
    endpoint: Url,
    deployment: String,
    api_version: String,
}

impl AzureOpenAiClient {
    pub fn new(config: AzureOpenAiConfig) -> Result<Self> {
        let endpoint = validate_endpoint_url(&config.endpoint)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "api-key",
            HeaderValue::from_str(&config.api_key)
                .context("AZURE_OPENAI_API_KEY contains invalid header characters")?,
        );

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            endpoint,
            deployment: config.deployment,
            api_version: config.api_version,
        })
    }

    /// Single-turn chat call: one system message framing the model, one user
    /// message carrying the prompt. Returns the first choice's content,
    /// trimmed.
    pub async fn chat(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let endpoint = chat_completions_url(&self.endpoint, &self.deployment)?;

        let request = ChatCompletionsRequest {
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
        };

        let response: ChatCompletionsResponse = self
            .http
            .post(endpoint.clone())
            .query(&[("api-version", self.api_version.as_str())])
            .json(&request)
            .send()
            .await
            .with_context(|| format!("POST {endpoint} failed"))?
            .error_for_status()
            .with_context(|| format!("POST {endpoint} returned non-success status"))?
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {endpoint}"))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .map(|message| message.content)
            .ok_or_else(|| anyhow!("Azure OpenAI response had no message content"))?;

        Ok(content.trim().to_string())
    }
}

fn validate_endpoint_url(endpoint: &str) -> Result<Url> {
    let mut url = Url::parse(endpoint)
        .with_context(|| format!("Invalid AZURE_OPENAI_ENDPOINT: {endpoint}"))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(anyhow!(
                "Unsupported scheme '{other}' for AZURE_OPENAI_ENDPOINT (use https://<resource>.openai.azure.com)"
            ))
        }
    }

    if url.host_str().is_none() {
        return Err(anyhow!("AZURE_OPENAI_ENDPOINT is missing a host"));
    }

    // Url::join drops the last path segment without this.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

fn chat_completions_url(endpoint: &Url, deployment: &str) -> Result<Url> {
    endpoint
        .join(&format!("openai/deployments/{deployment}/chat/completions"))
        .context("Failed to build Azure OpenAI chat completions URL")
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionsRequest {
    messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<Message>,
}
