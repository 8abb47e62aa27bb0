/// Built-in terms offered when history has too few matches
pub const COMMON_TERMS: &[&str] = &[
    "javascript",
    "python",
    "rust",
    "react",
    "typescript",
    "api",
    "database",
    "function",
    "error",
    "debug",
    "performance",
    "security",
    "testing",
    "deployment",
    "algorithm",
    "machine learning",
];

/// Build suggestions for `query` from `history` (oldest first)
pub(crate) fn suggest(
    history: &[String],
    query: &str,
    max_history: usize,
    max_total: usize,
) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut out: Vec<String> = history
        .iter()
        .rev()
        .filter(|entry| entry.to_lowercase().contains(&needle))
        .take(max_history.min(max_total))
        .cloned()
        .collect();

    for term in COMMON_TERMS {
        if out.len() >= max_total {
            break;
        }
        if term.contains(&needle) && !out.iter().any(|s| s.eq_ignore_ascii_case(term)) {
            out.push((*term).to_string());
        }
    }

    out
}
