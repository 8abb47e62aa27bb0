pub mod apply;

pub use apply::{Candidate, collect_candidates};
