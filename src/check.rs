use std::sync::Arc;

use crate::error::ServiceError;
use crate::llm::{Llm, ModelReply};
use crate::types::FactCheckResult;
use crate::verdict::{parse_verdict, ParsedVerdict};

pub fn build_check_prompt(claim: &str) -> String {
    format!(
        "Analyze the following statement for its factual accuracy. Begin your response with one of \
the following verdicts on a single line: \"VERDICT: TRUE\", \"VERDICT: FALSE\", or \"VERDICT: MIXED\". \
After the verdict, provide a concise but detailed explanation of your findings, citing the information \
you discovered. Statement: \"{claim}\""
    )
}

#[derive(Clone)]
pub struct FactCheckClient {
    model: Arc<dyn Llm>,
}

impl FactCheckClient {
    pub fn new(model: Arc<dyn Llm>) -> Self {
        Self { model }
    }

    /// One grounded round trip; no retries.
    pub async fn check(&self, claim: &str) -> Result<FactCheckResult, ServiceError> {
        let prompt = build_check_prompt(claim);
        let ModelReply { text, sources } = self.model.generate_grounded(&prompt).await.map_err(|e| {
            tracing::error!(error = %e, "fact-check request failed");
            ServiceError::from(e)
        })?;

        let ParsedVerdict { verdict, explanation } = parse_verdict(&text);
        tracing::info!(?verdict, sources = sources.len(), "fact-check complete");
        Ok(FactCheckResult { verdict, explanation, sources })
    }
}
