use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    True,
    False,
    Mixed, // also the fallback when the reply has no usable verdict line
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSource {
    pub uri: String,
    #[serde(default)]
    pub title: String,
}

/// A grounding citation, stored in the same `{ "web": { uri, title } }` shape
/// the model service returns it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub web: WebSource,
}

impl Source {
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self { web: WebSource { uri: uri.into(), title: title.into() } }
    }

    pub fn uri(&self) -> &str {
        &self.web.uri
    }

    /// Title when present, otherwise the uri.
    pub fn label(&self) -> &str {
        if self.web.title.trim().is_empty() { &self.web.uri } else { &self.web.title }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactCheckResult {
    pub verdict: Verdict,
    pub explanation: String,
    #[serde(default)]
    pub sources: Vec<Source>, // service order, no dedup
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub original_claim: String,
    pub result: FactCheckResult,
}

impl HistoryEntry {
    pub fn new(claim: impl Into<String>, result: FactCheckResult) -> Self {
        Self { original_claim: claim.into(), result }
    }
}

/// Shells call this before spending a request on a claim.
pub fn is_blank_claim(claim: &str) -> bool {
    claim.trim().is_empty()
}
