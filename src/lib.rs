pub mod check;
pub mod config;
pub mod error;
pub mod history;
pub mod llm;
pub mod render;
pub mod server;
pub mod storage;
pub mod types;
pub mod verdict;

pub use check::FactCheckClient;
pub use error::{LlmError, ServiceError, StorageError};
pub use history::HistoryStore;
pub use types::{FactCheckResult, HistoryEntry, Source, Verdict, WebSource};
