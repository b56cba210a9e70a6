//! Syntax analysis: the second phase of the sentiment compiler.
//!
//! This is a plausibility check rather than a grammar. A sentence is valid when,
//! after trimming surrounding whitespace, it has more than two
//! whitespace-separated words and ends with `.`, `!` or `?`. Both sub-checks
//! are reported so a caller can explain the verdict.
//!
//! # Examples
//!
//! ```
//! use sentiment_compiler::syntax::check_syntax;
//!
//! let verdict = check_syntax("The movie was extremely good and inspiring.");
//! assert!(verdict.valid);
//! assert_eq!(verdict.word_count, 7);
//!
//! assert!(!check_syntax("Hi there").valid);
//! ```

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SentimentError};

static DEFAULT_SYNTAX_VALIDATOR: LazyLock<SyntaxValidator> =
    LazyLock::new(SyntaxValidator::default);

/// Check a sentence with the default rules.
pub fn check_syntax(sentence: &str) -> SyntaxVerdict {
    DEFAULT_SYNTAX_VALIDATOR.check(sentence)
}

/// Rules applied by the syntax validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxRules {
    /// The word count must be strictly greater than this.
    pub min_words_exclusive: usize,
    /// Accepted final characters of the trimmed sentence.
    pub terminal_punctuation: Vec<char>,
}

impl Default for SyntaxRules {
    fn default() -> Self {
        Self {
            min_words_exclusive: 2,
            terminal_punctuation: vec!['.', '!', '?'],
        }
    }
}

impl SyntaxRules {
    /// Validate the rules.
    pub fn validate(&self) -> Result<()> {
        if self.terminal_punctuation.is_empty() {
            return Err(SentimentError::config(
                "terminal_punctuation must contain at least one character",
            ));
        }
        if let Some(c) = self
            .terminal_punctuation
            .iter()
            .find(|c| c.is_whitespace())
        {
            return Err(SentimentError::config(format!(
                "terminal_punctuation cannot contain whitespace ({c:?}); the sentence is trimmed first"
            )));
        }
        Ok(())
    }
}

/// Outcome of the syntax phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxVerdict {
    /// Logical AND of both sub-checks
    pub valid: bool,
    /// Number of whitespace-separated words in the trimmed sentence
    pub word_count: usize,
    /// Whether the word count exceeds the minimum
    pub word_count_ok: bool,
    /// Final character of the trimmed sentence, if any
    pub terminal_char: Option<char>,
    /// Whether the final character is accepted terminal punctuation
    pub terminal_punctuation_ok: bool,
}

/// The syntax phase validator.
#[derive(Debug, Clone, Default)]
pub struct SyntaxValidator {
    rules: SyntaxRules,
}

impl SyntaxValidator {
    /// Create a validator with the default rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with custom rules.
    pub fn with_rules(rules: SyntaxRules) -> Result<Self> {
        rules.validate()?;
        Ok(Self { rules })
    }

    /// Get the rules used by this validator.
    pub fn rules(&self) -> &SyntaxRules {
        &self.rules
    }

    /// Check a sentence. Never fails.
    pub fn check(&self, sentence: &str) -> SyntaxVerdict {
        let trimmed = sentence.trim();

        let word_count = trimmed.split_whitespace().count();
        let word_count_ok = word_count > self.rules.min_words_exclusive;

        let terminal_char = trimmed.chars().next_back();
        let terminal_punctuation_ok =
            terminal_char.is_some_and(|c| self.rules.terminal_punctuation.contains(&c));

        SyntaxVerdict {
            valid: word_count_ok && terminal_punctuation_ok,
            word_count,
            word_count_ok,
            terminal_char,
            terminal_punctuation_ok,
        }
    }
}
