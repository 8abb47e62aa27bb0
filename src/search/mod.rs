//! Matching, scoring and result assembly.
//!
//! - [`scorer`] - keyword and semantic scoring plus `<mark>` highlighting
//! - [`assemble`] - context attachment, sorting and pagination
//! - [`service`] - the [`SearchService`] facade tying the pipeline together

pub mod assemble;
pub mod scorer;
pub mod service;

pub use scorer::{KeywordScorer, highlight, score_message, semantic_score};
pub use service::SearchService;
