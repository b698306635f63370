use async_trait::async_trait;
use std::sync::Arc;

use ai_client::AzureOpenAiClient;

/// Seam in front of the chat-completion provider.
/// This abstraction keeps handlers testable without a live deployment.
#[async_trait]
pub trait ObservationGenerator: Send + Sync {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> anyhow::Result<String>;
}

/// Shared handler state. `None` is the startup sentinel for a generation
/// client that failed construction; it is never set again after startup.
pub type GeneratorState = Option<Arc<dyn ObservationGenerator>>;

/// Azure OpenAI-backed implementation.
pub struct AzureObservationGenerator {
    client: AzureOpenAiClient,
}

impl AzureObservationGenerator {
    pub fn new(client: AzureOpenAiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObservationGenerator for AzureObservationGenerator {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> anyhow::Result<String> {
        self.client.chat(system_prompt, user_prompt).await
    }
}
