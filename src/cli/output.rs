use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{Conversation, Role, SearchResult};
use crate::search::highlight;
use crate::utils::{format_path_with_tilde, sanitize, truncate_chars};

const PREVIEW_CHARS: usize = 200;

/// One-line terminal preview of a message with `needles` marked
///
/// Works on the raw content: sanitized, cut to length, then marked without
/// HTML escaping, so no tag or entity is ever split.
fn preview(content: &str, needles: &[&str]) -> String {
    let line = truncate_chars(&sanitize(content, true), PREVIEW_CHARS);
    highlight(&line, needles, false)
}

/// Print results; `needles` are the strings to mark in the human preview
pub fn print_results(results: &[SearchResult], needles: &[&str], json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(results).context("Failed to serialize results")?;
        println!("{}", out);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results");
        return Ok(());
    }

    for (i, result) in results.iter().enumerate() {
        println!(
            "[{}] {} | {} | {} | score {}",
            i + 1,
            sanitize(&result.conversation_title, true),
            result.message.role.as_str(),
            result.message.timestamp.format("%Y-%m-%d %H:%M"),
            format_score(result.relevance_score)
        );
        println!("    {}", preview(&result.message.content, needles));
    }

    Ok(())
}

/// Whole-number scores print without decimals, ratios with two
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 { format!("{}", score as i64) } else { format!("{:.2}", score) }
}

pub fn print_history(entries: &[String]) {
    if entries.is_empty() {
        println!("No search history");
        return;
    }
    for (i, entry) in entries.iter().rev().enumerate() {
        println!("{:>3}. {}", i + 1, sanitize(entry, true));
    }
}

pub fn print_stats(conversations: &[Conversation], source: &Path) {
    let messages = conversations.iter().flat_map(|c| c.messages.iter());
    let total_messages = messages.clone().count();
    let count_role = |role: Role| messages.clone().filter(|m| m.role == role).count();
    let user_messages = count_role(Role::User);
    let assistant_messages = count_role(Role::Assistant);
    let system_messages = count_role(Role::System);
    let with_attachments = messages.clone().filter(|m| m.has_attachments()).count();

    let mut models: BTreeMap<&str, usize> = BTreeMap::new();
    for conversation in conversations {
        *models.entry(conversation.model.as_str()).or_default() += 1;
    }

    println!("Conversation Statistics");
    println!("=======================");
    println!("Conversations: {}", conversations.len());
    println!("Total messages: {}", total_messages);
    println!("  User messages: {}", user_messages);
    println!("  Assistant messages: {}", assistant_messages);
    println!("  System messages: {}", system_messages);
    println!("  With attachments: {}", with_attachments);
    println!();
    println!("Source: {}", format_path_with_tilde(source));

    if !models.is_empty() {
        println!("Models:");
        for (model, count) in &models {
            println!("  {}: {}", sanitize(model, true), count);
        }
    }

    if let Some(oldest) = messages.clone().map(|m| m.timestamp).min() {
        println!("Oldest message: {}", oldest.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(newest) = messages.map(|m| m.timestamp).max() {
        println!("Newest message: {}", newest.format("%Y-%m-%d %H:%M:%S"));
    }
}
