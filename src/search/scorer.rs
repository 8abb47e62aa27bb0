//! Relevance scoring and match highlighting.
//!
//! Keyword scoring is additive: each exact phrase present in a message adds
//! [`PHRASE_WEIGHT`], each free term present adds [`TERM_WEIGHT`]. A message
//! containing any excluded term is dropped no matter how high it scored.
//! All comparisons are case-insensitive substring checks.
//!
//! Semantic scoring is a word-overlap ratio, not an embedding similarity.

use regex::RegexBuilder;
use tracing::warn;

use crate::query::ParsedQuery;

pub const PHRASE_WEIGHT: f64 = 10.0;
pub const TERM_WEIGHT: f64 = 5.0;

/// Default cutoff below which semantic matches are discarded
pub const SEMANTIC_THRESHOLD: f64 = 0.3;

/// Lower-cased view of a parsed query, built once per search
#[derive(Debug, Clone)]
pub struct KeywordScorer {
    phrases: Vec<String>,
    terms: Vec<String>,
    excludes: Vec<String>,
}

impl KeywordScorer {
    pub fn new(query: &ParsedQuery) -> Self {
        let lower = |items: &[String]| items.iter().map(|s| s.to_lowercase()).collect();
        Self {
            phrases: lower(&query.exact_phrases),
            terms: lower(&query.terms),
            excludes: lower(&query.exclude_terms),
        }
    }

    /// Score one message body; `None` means the message is not a result
    pub fn score(&self, content: &str) -> Option<f64> {
        let haystack = content.to_lowercase();

        if self.excludes.iter().any(|term| haystack.contains(term.as_str())) {
            return None;
        }

        let phrase_hits = self.phrases.iter().filter(|p| haystack.contains(p.as_str())).count();
        let term_hits = self.terms.iter().filter(|t| haystack.contains(t.as_str())).count();

        let score = phrase_hits as f64 * PHRASE_WEIGHT + term_hits as f64 * TERM_WEIGHT;
        (score > 0.0).then_some(score)
    }
}

/// Score `content` against `query` in one shot
pub fn score_message(content: &str, query: &ParsedQuery) -> Option<f64> {
    KeywordScorer::new(query).score(content)
}

/// Split text into lower-cased whitespace-delimited words
pub fn words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Fraction of query words that overlap (substring either way) with some content word
pub fn semantic_score(content: &str, query_words: &[String]) -> f64 {
    if query_words.is_empty() {
        return 0.0;
    }

    let content_words = words(content);
    let matched = query_words
        .iter()
        .filter(|qw| {
            content_words.iter().any(|cw| cw.contains(qw.as_str()) || qw.contains(cw.as_str()))
        })
        .count();

    matched as f64 / query_words.len() as f64
}

/// Append `text` to `out` with HTML special characters escaped
fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

fn push_segment(out: &mut String, text: &str, escape: bool) {
    if escape {
        push_escaped(out, text);
    } else {
        out.push_str(text);
    }
}

/// Wrap every case-insensitive occurrence of any needle in `<mark>` tags
///
/// Longer needles win where they overlap. With `escape` set, text outside and
/// inside the marks is HTML-escaped so the output is safe to render as markup.
pub fn highlight(content: &str, needles: &[&str], escape: bool) -> String {
    let mut sorted: Vec<&str> = needles.iter().copied().filter(|n| !n.is_empty()).collect();
    sorted.sort_by_key(|n| std::cmp::Reverse(n.len()));
    sorted.dedup();

    let mut out = String::with_capacity(content.len() + 16);

    if sorted.is_empty() {
        push_segment(&mut out, content, escape);
        return out;
    }

    let pattern = sorted.iter().map(|n| regex::escape(n)).collect::<Vec<_>>().join("|");
    let regex = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(regex) => regex,
        Err(e) => {
            warn!("Failed to build highlight pattern: {}", e);
            push_segment(&mut out, content, escape);
            return out;
        }
    };

    let mut last = 0;
    for m in regex.find_iter(content) {
        push_segment(&mut out, &content[last..m.start()], escape);
        out.push_str("<mark>");
        push_segment(&mut out, m.as_str(), escape);
        out.push_str("</mark>");
        last = m.end();
    }
    push_segment(&mut out, &content[last..], escape);

    out
}
