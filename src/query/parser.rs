//! Search query parser.
//!
//! Splits a raw query string into a [`ParsedQuery`]. Parsing is total: every
//! input produces a value and nothing is rejected.
//!
//! # Syntax
//!
//! ```text
//! "exact phrase"   matched verbatim (case-insensitive)
//! -word            excluded term, disqualifies any message containing it
//! AND | OR | NOT   operators (case-insensitive), recorded but not applied
//! word             free term
//! ```
//!
//! # Extraction order
//!
//! 1. Quoted phrases are pulled out first and replaced by a space
//! 2. Remaining `-word` tokens become excluded terms
//! 3. Operator keywords are removed
//! 4. Whatever is left splits on whitespace into free terms
//!
//! Because phrases go first, `-"exact phrase"` yields the phrase and a bare
//! `-`, which is discarded.
//!
//! # Examples
//!
//! ```rust
//! # use chat_search::query::parser::parse_query;
//! let query = parse_query("\"quick\" fox -dog");
//! assert_eq!(query.terms, vec!["fox"]);
//! assert_eq!(query.exact_phrases, vec!["quick"]);
//! assert_eq!(query.exclude_terms, vec!["dog"]);
//! ```

use super::ast::{BooleanOperator, ParsedQuery};

/// Remove every complete `"..."` span from `input`, collecting the inner text.
///
/// An unmatched trailing quote is left in the returned remainder untouched.
fn extract_phrases(input: &str, phrases: &mut Vec<String>) -> String {
    let mut remainder = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find('"') {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('"') else {
            break;
        };

        remainder.push_str(&rest[..open]);
        remainder.push(' ');

        let phrase = &after_open[..close];
        if !phrase.trim().is_empty() {
            phrases.push(phrase.to_string());
        }

        rest = &after_open[close + 1..];
    }

    remainder.push_str(rest);
    remainder
}

/// Parse a raw query string
///
/// Examples:
/// - `fox` → one term
/// - `"quick brown" fox` → one phrase, one term
/// - `fox -dog` → one term, one exclusion
/// - `cat AND dog` → two terms, operator recorded
pub fn parse_query(input: &str) -> ParsedQuery {
    let mut query = ParsedQuery::new();

    if input.trim().is_empty() {
        return query;
    }

    let remainder = extract_phrases(input, &mut query.exact_phrases);

    for word in remainder.split_whitespace() {
        if let Some(excluded) = word.strip_prefix('-') {
            // A bare "-" carries nothing to exclude
            if !excluded.is_empty() {
                query.exclude_terms.push(excluded.to_string());
            }
            continue;
        }

        if let Some(operator) = BooleanOperator::from_keyword(word) {
            query.operators.push(operator);
            continue;
        }

        query.terms.push(word.to_string());
    }

    query
}
