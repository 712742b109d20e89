pub mod gemini;

use crate::{error::LlmError, types::Source};

/// Raw reply from a search-grounded model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelReply {
    pub text: String,
    pub sources: Vec<Source>,
}

#[async_trait::async_trait]
pub trait Llm: Send + Sync {
    async fn generate_grounded(&self, prompt: &str) -> Result<ModelReply, LlmError>;
}

pub use gemini::GeminiClient;
