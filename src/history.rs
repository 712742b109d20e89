use std::io;
use std::sync::Arc;

use crate::error::StorageError;
use crate::storage::Storage;
use crate::types::HistoryEntry;

pub const HISTORY_KEY: &str = "factCheckHistory";

/// Past checks, most recent first, one entry per claim text.
pub struct HistoryStore {
    storage: Arc<dyn Storage>,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Reads the durable record. A missing, unreadable or corrupt record
    /// yields an empty store; a corrupt one is also dropped from storage.
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let entries = match storage.get(HISTORY_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(error = %e, "discarding unparseable history record");
                    discard(storage.as_ref());
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(StorageError::Io(e)) if e.kind() == io::ErrorKind::InvalidData => {
                tracing::warn!(error = %e, "discarding undecodable history record");
                discard(storage.as_ref());
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "history record unreadable, starting empty");
                Vec::new()
            }
        };
        Self { storage, entries }
    }

    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces any entry for the same claim and moves it to the front.
    /// The in-memory list is updated even if persisting fails.
    pub fn add(&mut self, entry: HistoryEntry) -> Result<(), StorageError> {
        self.entries.retain(|e| e.original_claim != entry.original_claim);
        self.entries.insert(0, entry);
        self.persist()
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.entries.clear();
        self.persist()
    }

    fn persist(&self) -> Result<(), StorageError> {
        if self.entries.is_empty() {
            return self.storage.remove(HISTORY_KEY);
        }
        let raw = serde_json::to_string(&self.entries)?;
        self.storage.set(HISTORY_KEY, &raw)
    }
}

fn discard(storage: &dyn Storage) {
    if let Err(e) = storage.remove(HISTORY_KEY) {
        tracing::warn!(error = %e, "could not remove corrupt history record");
    }
}
