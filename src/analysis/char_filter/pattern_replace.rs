//! Regex replacement char filter.

use std::sync::LazyLock;

use regex::Regex;

use super::CharFilter;
use crate::error::{Result, SentimentError};

/// Punctuation removed by the lexical phase.
pub const SENTENCE_PUNCTUATION_PATTERN: &str = r"[.,!?;:]";

/// Compiled once at first use; the pattern is a constant character class.
static SENTENCE_PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(SENTENCE_PUNCTUATION_PATTERN).expect("punctuation pattern is a valid regex")
});

/// A char filter that replaces characters matching a regex pattern.
#[derive(Clone, Debug)]
pub struct PatternReplaceCharFilter {
    pattern: Regex,
    replacement: String,
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)
                .map_err(|e| SentimentError::analysis(format!("Invalid regex pattern: {e}")))?,
            replacement: replacement.to_string(),
        })
    }

    /// Filter that deletes `. , ! ? ; :` without inserting whitespace.
    pub fn strip_punctuation() -> Self {
        Self {
            pattern: SENTENCE_PUNCTUATION.clone(),
            replacement: String::new(),
        }
    }

    /// Get the regex pattern used by this filter.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, self.replacement.as_str())
            .into_owned()
    }

    fn name(&self) -> &'static str {
        "pattern_replace"
    }
}
