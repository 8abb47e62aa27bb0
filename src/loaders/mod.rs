//! Conversation export loaders
//!
//! # Error Handling Strategy
//!
//! Loading follows a **graceful degradation** approach:
//!
//! - **Individual record failures**: Malformed conversations (a JSONL line or an array
//!   element) are logged and skipped so one bad record does not block the rest.
//!
//! - **Catastrophic failure detection**: If >50% of records fail to parse, or if >100
//!   consecutive records fail, the file is rejected as corrupted.
//!
//! - **Directory loads**: Each file is parsed independently; the load fails only when
//!   more than half of the discovered files fail.
//!
//! - **Error propagation**: Uses `anyhow::Result` with context. Callers report errors,
//!   they do not match on them.

pub mod deserializers;
pub mod discovery;
pub mod export;

pub use discovery::{discover_export_files, load_conversations};
pub use export::parse_export_file;
