use std::fmt;

use serde::{Deserialize, Serialize};

/// Boolean keywords recognised in a query.
///
/// They are collected for display but do not change how terms combine:
/// every query scores as an additive sum over phrases and terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BooleanOperator {
    And,
    Or,
    Not,
}

impl BooleanOperator {
    /// Case-insensitive keyword lookup
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.to_uppercase().as_str() {
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "NOT" => Some(Self::Not),
            _ => None,
        }
    }
}

impl fmt::Display for BooleanOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
        };
        f.write_str(keyword)
    }
}

/// A raw query split into its parts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuery {
    pub terms: Vec<String>,
    pub exact_phrases: Vec<String>,
    pub exclude_terms: Vec<String>,
    pub operators: Vec<BooleanOperator>,
}

impl ParsedQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
            && self.exact_phrases.is_empty()
            && self.exclude_terms.is_empty()
            && self.operators.is_empty()
    }

    /// True when the query has anything that can produce a positive score
    pub fn has_positive_terms(&self) -> bool {
        !self.terms.is_empty() || !self.exact_phrases.is_empty()
    }

    /// Phrases followed by terms, the strings worth highlighting
    pub fn needles(&self) -> Vec<&str> {
        self.exact_phrases.iter().chain(self.terms.iter()).map(String::as_str).collect()
    }
}
