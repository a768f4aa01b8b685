use async_trait::async_trait;
use common::SignalError;

/// A backend that turns one prompt into raw model text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, SignalError>;
}
