use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::{info, warn};

use crate::models::Conversation;
use crate::utils::validate_file_size;

const MAX_CONSECUTIVE_ERRORS: usize = 100;

/// Tracks per-record parse outcomes and enforces failure thresholds
struct ParseTally<'a> {
    path: &'a Path,
    conversations: Vec<Conversation>,
    skipped: usize,
    total: usize,
    consecutive_errors: usize,
}

impl<'a> ParseTally<'a> {
    fn new(path: &'a Path) -> Self {
        Self { path, conversations: Vec::new(), skipped: 0, total: 0, consecutive_errors: 0 }
    }

    fn record(&mut self, position: usize, parsed: serde_json::Result<Conversation>) -> Result<()> {
        self.total += 1;
        match parsed {
            Ok(conversation) => {
                self.conversations.push(conversation);
                self.consecutive_errors = 0; // Reset on success
            }
            Err(e) => {
                warn!("Failed to parse record {} in {}: {}", position, self.path.display(), e);
                self.skipped += 1;
                self.consecutive_errors += 1;

                if self.consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                    bail!(
                        "Too many consecutive parse errors ({}) in {} - file may be corrupted",
                        self.consecutive_errors,
                        self.path.display()
                    );
                }
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<Vec<Conversation>> {
        if self.total > 0 {
            let failure_rate = (self.skipped as f64) / (self.total as f64);
            if failure_rate > 0.5 {
                bail!(
                    "Too many parse failures in {}: {} of {} records failed ({:.1}%)",
                    self.path.display(),
                    self.skipped,
                    self.total,
                    failure_rate * 100.0
                );
            }
        }

        if self.skipped > 0 {
            info!(
                "Parsed {}: {} conversations ({} skipped)",
                self.path.display(),
                self.conversations.len(),
                self.skipped
            );
        }

        Ok(self.conversations)
    }
}

/// Parse a conversation export file
///
/// Accepted layouts:
/// - a JSON array of conversations
/// - a JSON object with a `conversations` array (the app's export envelope)
/// - a single conversation object
/// - JSONL, one conversation per line
///
/// Malformed records are logged and skipped. Returns an error if more than 50%
/// of records fail or 100 fail in a row.
pub fn parse_export_file(path: &Path) -> Result<Vec<Conversation>> {
    // Open file and validate size before reading it into memory
    let mut file = File::open(path)
        .with_context(|| format!("Failed to open export file: {}", path.display()))?;
    validate_file_size(&file, path)?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .with_context(|| format!("Failed to read export file: {}", path.display()))?;

    parse_export_str(&content, path)
}

fn parse_export_str(content: &str, path: &Path) -> Result<Vec<Conversation>> {
    let mut tally = ParseTally::new(path);

    if content.trim().is_empty() {
        return tally.finish();
    }

    match serde_json::from_str::<Value>(content) {
        Ok(Value::Array(records)) => {
            for (i, record) in records.into_iter().enumerate() {
                tally.record(i + 1, serde_json::from_value(record))?;
            }
        }
        Ok(Value::Object(mut envelope)) => match envelope.remove("conversations") {
            Some(Value::Array(records)) => {
                for (i, record) in records.into_iter().enumerate() {
                    tally.record(i + 1, serde_json::from_value(record))?;
                }
            }
            Some(_) => bail!("'conversations' in {} is not an array", path.display()),
            None => tally.record(1, serde_json::from_value(Value::Object(envelope)))?,
        },
        Ok(_) => bail!("Unsupported export layout in {}", path.display()),
        // Not a single JSON document: treat as JSONL
        Err(_) => {
            for (line_num, line) in content.lines().enumerate() {
                // Skip empty lines
                if line.trim().is_empty() {
                    continue;
                }
                tally.record(line_num + 1, serde_json::from_str(line))?;
            }
        }
    }

    tally.finish()
}
