//! Persisted search history and autocomplete suggestions
//!
//! # Error Handling Strategy
//!
//! History is a convenience, never a reason to fail a search:
//!
//! - **Read failures**: a missing, unreadable or corrupt stored value is logged
//!   and the history starts empty
//! - **Write failures**: logged; the in-memory history keeps the change and the
//!   next successful write catches the store up
//!
//! Nothing here returns an error to the caller.

pub mod suggestions;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::storage::KeyValueStore;

pub use suggestions::COMMON_TERMS;

/// Storage key holding the JSON array of past queries, oldest first
pub const HISTORY_KEY: &str = "search-history";

/// Default number of distinct queries kept
pub const MAX_HISTORY: usize = 50;

pub struct SearchHistory {
    entries: Vec<String>,
    limit: usize,
    store: Arc<dyn KeyValueStore>,
}

impl SearchHistory {
    /// Read the persisted history, degrading to empty on any failure
    pub fn load(store: Arc<dyn KeyValueStore>, limit: usize) -> Self {
        let mut entries = match store.get(HISTORY_KEY) {
            Ok(Some(json)) => serde_json::from_str::<Vec<String>>(&json).unwrap_or_else(|e| {
                warn!("Ignoring corrupt search history: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to load search history: {}", e);
                Vec::new()
            }
        };

        // A larger stored list (e.g. from a bigger limit) keeps its newest entries
        if entries.len() > limit {
            entries.drain(..entries.len() - limit);
        }

        debug!(entries = entries.len(), "loaded search history");
        Self { entries, limit, store }
    }

    /// Entries oldest first
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a query as the most recent entry, moving it if already present
    pub fn add(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        self.entries.retain(|existing| existing != query);
        self.entries.push(query.to_string());

        if self.entries.len() > self.limit {
            let overflow = self.entries.len() - self.limit;
            self.entries.drain(..overflow);
        }

        self.persist();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = self.store.remove(HISTORY_KEY) {
            warn!("Failed to clear search history: {}", e);
        }
    }

    /// Up to `max_total` suggestions: matching history first (newest first,
    /// at most `max_history`), then built-in common terms
    pub fn suggestions(&self, query: &str, max_history: usize, max_total: usize) -> Vec<String> {
        suggestions::suggest(&self.entries, query, max_history, max_total)
    }

    fn persist(&self) {
        let json = match serde_json::to_string(&self.entries) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to encode search history: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(HISTORY_KEY, &json) {
            warn!("Failed to save search history: {}", e);
        }
    }
}
