//! Durable key-value storage for small pieces of client state
//!
//! The search service only needs string values under string keys (the query
//! history lives under [`crate::history::HISTORY_KEY`]). Two backends:
//! - [`FileStore`]: one JSON file per key in a data directory, atomic writes
//! - [`MemoryStore`]: process-local map, for tests and ephemeral sessions
//!
//! Default data directory: `$CHAT_SEARCH_HOME`, else the platform data dir
//! - macOS: `~/Library/Application Support/chat-search/`
//! - Linux: `~/.local/share/chat-search/`
//! - Windows: `%APPDATA%\chat-search\`

pub mod file;
pub mod memory;

use std::io;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// String key-value persistence, injected into the search service
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
