#![allow(dead_code)]

use std::sync::Arc;
use tokio::sync::Notify;
use veritas_rs::llm::{Llm, ModelReply};
use veritas_rs::types::Source;
use veritas_rs::LlmError;

pub struct FakeModel {
    // maps each prompt to a canned reply
    pub handler: Box<dyn Fn(&str) -> Result<ModelReply, LlmError> + Send + Sync>,
}

impl FakeModel {
    pub fn replying(text: &'static str, sources: Vec<Source>) -> Self {
        Self {
            handler: Box::new(move |_: &str| Ok(ModelReply { text: text.to_string(), sources: sources.clone() })),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            handler: Box::new(move |_: &str| Err(LlmError::Status { status, body: "upstream said no".into() })),
        }
    }
}

#[async_trait::async_trait]
impl Llm for FakeModel {
    async fn generate_grounded(&self, prompt: &str) -> Result<ModelReply, LlmError> {
        (self.handler)(prompt)
    }
}

/// Holds every request until `release` is notified.
pub struct GatedModel {
    pub started: Arc<Notify>,
    pub release: Arc<Notify>,
}

#[async_trait::async_trait]
impl Llm for GatedModel {
    async fn generate_grounded(&self, _prompt: &str) -> Result<ModelReply, LlmError> {
        self.started.notify_one();
        self.release.notified().await;
        Ok(ModelReply { text: "VERDICT: TRUE\nEventually.".into(), sources: vec![] })
    }
}
