//! Search service facade.
//!
//! [`SearchService`] composes the pipeline
//!
//! ```text
//! query -> parse -> candidate filter -> score -> sort/paginate -> results
//! ```
//!
//! and owns the query history. It holds no process-wide state: construct one
//! with the storage backend it should persist history into.
//!
//! `search` and `semantic_search` are `async` so callers can await them the
//! same way they would await a remote or indexed backend. Today they run
//! synchronously and complete on first poll.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use super::assemble::{Scored, assemble};
use super::scorer::{KeywordScorer, highlight, semantic_score, words};
use crate::config::SearchConfig;
use crate::filters::collect_candidates;
use crate::history::SearchHistory;
use crate::models::{Conversation, SearchOptions, SearchResult};
use crate::query::parse_query;
use crate::storage::KeyValueStore;

pub struct SearchService {
    config: SearchConfig,
    history: Mutex<SearchHistory>,
}

impl SearchService {
    /// Create a service, loading history from `store`
    pub fn new(store: Arc<dyn KeyValueStore>, config: SearchConfig) -> Self {
        let history = SearchHistory::load(store, config.history_limit);
        Self { config, history: Mutex::new(history) }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Keyword search with phrases, exclusions and additive scoring
    ///
    /// Non-blank queries are recorded in history.
    pub async fn search(
        &self,
        conversations: &[Conversation],
        query: &str,
        options: &SearchOptions,
    ) -> Vec<SearchResult> {
        self.add_to_search_history(query);

        let parsed = parse_query(query);
        if !parsed.has_positive_terms() {
            return Vec::new();
        }

        let scorer = KeywordScorer::new(&parsed);
        let scored: Vec<Scored<'_>> = collect_candidates(conversations, options.filters.as_ref())
            .into_iter()
            .filter_map(|candidate| {
                scorer.score(&candidate.message.content).map(|score| Scored { candidate, score })
            })
            .collect();

        debug!(
            query,
            matches = scored.len(),
            operators = parsed.operators.len(),
            "keyword search"
        );

        let needles = parsed.needles();
        let escape = self.config.escape_highlights;
        assemble(scored, options, |content| highlight(content, &needles, escape))
    }

    /// Word-overlap search; matches scoring below the configured threshold are dropped
    pub async fn semantic_search(
        &self,
        conversations: &[Conversation],
        query: &str,
        options: &SearchOptions,
    ) -> Vec<SearchResult> {
        let query_words = words(query);
        if query_words.is_empty() {
            return Vec::new();
        }

        let threshold = self.config.semantic_threshold;
        let scored: Vec<Scored<'_>> = collect_candidates(conversations, options.filters.as_ref())
            .into_iter()
            .filter_map(|candidate| {
                let score = semantic_score(&candidate.message.content, &query_words);
                (score >= threshold).then_some(Scored { candidate, score })
            })
            .collect();

        debug!(query, matches = scored.len(), threshold, "semantic search");

        let needles: Vec<&str> = query_words.iter().map(String::as_str).collect();
        let escape = self.config.escape_highlights;
        assemble(scored, options, |content| highlight(content, &needles, escape))
    }

    pub fn add_to_search_history(&self, query: &str) {
        self.history.lock().add(query);
    }

    /// Past queries, oldest first
    pub fn search_history(&self) -> Vec<String> {
        self.history.lock().entries().to_vec()
    }

    pub fn clear_search_history(&self) {
        self.history.lock().clear();
    }

    pub fn get_search_suggestions(&self, query: &str) -> Vec<String> {
        self.history.lock().suggestions(
            query,
            self.config.history_suggestions,
            self.config.max_suggestions,
        )
    }
}
