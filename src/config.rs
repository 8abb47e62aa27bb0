use serde::{Deserialize, Serialize};

use crate::history::MAX_HISTORY;
use crate::search::scorer::SEMANTIC_THRESHOLD;

/// Tunables for [`crate::SearchService`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Distinct queries kept in history
    pub history_limit: usize,
    /// History entries offered before common terms
    pub history_suggestions: usize,
    pub max_suggestions: usize,
    /// Semantic matches scoring below this are discarded
    pub semantic_threshold: f64,
    /// HTML-escape message content before inserting `<mark>` tags
    pub escape_highlights: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            history_limit: MAX_HISTORY,
            history_suggestions: 3,
            max_suggestions: 5,
            semantic_threshold: SEMANTIC_THRESHOLD,
            escape_highlights: true,
        }
    }
}
