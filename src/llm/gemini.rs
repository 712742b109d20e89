// src/llm/gemini.rs
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::Client;
use serde::Deserialize;
use std::num::NonZeroU32;
use std::time::Duration;

use super::{Llm, ModelReply};
use crate::{error::LlmError, types::Source};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
struct WebChunk {
    uri: Option<String>,
    title: Option<String>,
}

pub struct GeminiClient {
    http: Client,
    key: String,
    model: String,
    base_url: String,
    limiter: DefaultDirectRateLimiter,
}

impl GeminiClient {
    pub fn new(
        key: String,
        model: String,
        base_url: Option<String>,
        qps: u32,
        timeout_ms: u64,
    ) -> Result<Self, LlmError> {
        let http = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(LlmError::Client)?;
        let qps = NonZeroU32::new(qps).unwrap_or(nonzero!(1u32));
        let limiter = RateLimiter::direct(Quota::per_second(qps));
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Ok(Self { http, key, model, base_url, limiter })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait::async_trait]
impl Llm for GeminiClient {
    async fn generate_grounded(&self, prompt: &str) -> Result<ModelReply, LlmError> {
        self.limiter.until_ready().await;
        tracing::debug!(model = %self.model, "sending grounded generateContent request");
        let resp = self.http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.key)
            .json(&serde_json::json!({
                "contents": [{ "parts": [{ "text": prompt }] }],
                "tools": [{ "google_search": {} }],
            }))
            .send().await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(LlmError::Status { status: status.as_u16(), body });
        }
        reply_from_body(&body)
    }
}

/// Text is every text part of the first candidate, concatenated. Grounding
/// chunks without a web uri are skipped.
fn reply_from_body(body: &str) -> Result<ModelReply, LlmError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)?;
    let Some(first) = parsed.candidates.into_iter().next() else {
        return Err(LlmError::MissingText);
    };

    let texts: Vec<String> = first
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if texts.is_empty() {
        return Err(LlmError::MissingText);
    }

    let sources = first
        .grounding_metadata
        .map(|m| m.grounding_chunks)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|chunk| {
            let web = chunk.web?;
            Some(Source::new(web.uri?, web.title.unwrap_or_default()))
        })
        .collect();

    Ok(ModelReply { text: texts.concat(), sources })
}
