use thiserror::Error;

pub const SERVICE_FAILURE_MESSAGE: &str =
    "Failed to get a response from the fact-checking service. Please try again.";

/// Failures talking to the grounded model.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status} from model service: {body}")]
    Status { status: u16, body: String },

    #[error("malformed model response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("model response has no text")]
    MissingText,
}

/// The single failure a check can surface to a shell.
#[derive(Debug, Error)]
#[error("{}", SERVICE_FAILURE_MESSAGE)]
pub struct ServiceError {
    #[source]
    cause: LlmError,
}

impl ServiceError {
    pub fn inner(&self) -> &LlmError {
        &self.cause
    }
}

impl From<LlmError> for ServiceError {
    fn from(cause: LlmError) -> Self {
        Self { cause }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}
