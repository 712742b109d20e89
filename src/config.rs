use anyhow::{bail, Result};
use std::path::PathBuf;
use std::sync::Arc;

use crate::llm::gemini::{GeminiClient, DEFAULT_MODEL};
use crate::storage::FileStorage;

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: Option<String>,
    pub timeout_ms: u64,
    pub qps: u32,
    pub data_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
            timeout_ms: 30_000,
            qps: 2,
            data_dir: PathBuf::from("./data"),
        }
    }
}

/// Rejects empty keys and copy-pasted placeholders like `AIza...`.
pub fn valid_api_key(key: &str) -> bool {
    let trimmed = key.trim();
    !trimmed.is_empty() && !trimmed.contains("...")
}

impl Settings {
    pub fn api_key(&self) -> Result<&str> {
        match self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            Some(key) if valid_api_key(key) => Ok(key),
            Some(_) => bail!("GEMINI_API_KEY looks like a placeholder; set a real key"),
            None => bail!("no API key configured; set GEMINI_API_KEY or pass --api-key"),
        }
    }

    pub fn gemini_client(&self) -> Result<GeminiClient> {
        let key = self.api_key()?.to_string();
        Ok(GeminiClient::new(
            key,
            self.model.clone(),
            self.base_url.clone(),
            self.qps,
            self.timeout_ms,
        )?)
    }

    pub fn storage(&self) -> Result<Arc<FileStorage>> {
        Ok(Arc::new(FileStorage::open(&self.data_dir)?))
    }
}
