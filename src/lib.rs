//! Chat Search - keyword and semantic search over exported AI chat conversations
//!
//! This library searches an in-memory collection of conversations. It supports:
//!
//! - Parsing free-text queries with `"exact phrases"`, `-excluded` terms and
//!   informational `AND`/`OR`/`NOT` operators
//! - Structural filtering by date range, role, model, attachments and length
//! - Relevance scoring, a word-overlap semantic mode and `<mark>` highlighting
//! - Sorting, pagination and neighbouring-message context for each hit
//! - A persisted, deduplicated history of recent queries with suggestions
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use chat_search::{SearchConfig, SearchService, load_conversations};
//! use chat_search::models::SearchOptions;
//! use chat_search::storage::MemoryStore;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let conversations = load_conversations(Path::new("export.json"))?;
//! let service = SearchService::new(Arc::new(MemoryStore::new()), SearchConfig::default());
//! let options = SearchOptions::default();
//! let results = service.search(&conversations, "\"error handling\" rust", &options).await;
//! println!("{} results", results.len());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod filters;
pub mod history;
pub mod loaders;
pub mod models;
pub mod query;
pub mod search;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use config::SearchConfig;
pub use loaders::load_conversations;
pub use models::{Conversation, Message, SearchResult};
pub use query::parse_query;
pub use search::SearchService;
pub use utils::format_path_with_tilde;
