use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::export::parse_export_file;
use crate::models::Conversation;

const EXPORT_EXTENSIONS: &[&str] = &["json", "jsonl"];

fn is_export_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EXPORT_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

/// Find export files under `dir`, sorted for deterministic load order
pub fn discover_export_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("Not a directory: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                continue;
            }
        };
        if entry.file_type().is_file() && is_export_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// Load conversations from an export file or a directory of export files
///
/// Directory loads tolerate individual bad files but fail when more than half
/// of them cannot be parsed. Messages are put back in timestamp order and
/// conversations are returned most recently updated first.
pub fn load_conversations(path: &Path) -> Result<Vec<Conversation>> {
    let mut conversations = if path.is_dir() {
        load_directory(path)?
    } else {
        parse_export_file(path)
            .with_context(|| format!("Failed to load conversations from {}", path.display()))?
    };

    for conversation in &mut conversations {
        if !conversation.messages.is_sorted_by_key(|m| m.timestamp) {
            debug!(conversation = %conversation.id, "reordering messages by timestamp");
            conversation.messages.sort_by_key(|m| m.timestamp);
        }
    }

    conversations.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    Ok(conversations)
}

fn load_directory(dir: &Path) -> Result<Vec<Conversation>> {
    let files = discover_export_files(dir)?;
    let mut conversations = Vec::new();
    let mut files_success = 0;
    let mut files_failed = 0;

    for file in &files {
        match parse_export_file(file) {
            Ok(mut parsed) => {
                files_success += 1;
                conversations.append(&mut parsed);
            }
            Err(e) => {
                files_failed += 1;
                warn!("Failed to parse export file {}: {}", file.display(), e);
            }
        }
    }

    // Check error rate and fail if >50% of files failed
    let total_files = files_success + files_failed;
    if total_files > 0 {
        let failure_rate = files_failed as f64 / total_files as f64;
        if failure_rate > 0.5 {
            bail!(
                "Loading failed: {}/{} export files failed to parse ({}% failure rate)",
                files_failed,
                total_files,
                (failure_rate * 100.0) as u32
            );
        }
    }

    info!(
        "Loaded {} conversations ({} files parsed, {} failed)",
        conversations.len(),
        files_success,
        files_failed
    );

    Ok(conversations)
}
