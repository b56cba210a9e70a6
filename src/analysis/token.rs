//! Token types for lexical analysis.
//!
//! A [`Token`] is a single normalized word flowing through the analysis
//! pipeline. Filters either drop tokens or mark them as stopped with a
//! [`StopReason`], which lets the same pipeline produce both the final token
//! sequence and a full word-by-word breakdown.
//!
//! # Examples
//!
//! ```
//! use sentiment_compiler::analysis::token::{StopReason, Token};
//!
//! let token = Token::new("movie", 0);
//! assert_eq!(token.text, "movie");
//! assert!(!token.is_stopped());
//!
//! let token = Token::new("the", 1).stop(StopReason::StopWord);
//! assert_eq!(token.stop_reason(), Some(StopReason::StopWord));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A token represents a single word after tokenization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the word in the normalized sentence (0-based)
    pub position: usize,

    /// Why a filter marked this token as stopped, if it did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopped: Option<StopReason>,
}

/// Reason a token was excluded from the final token sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The word is a member of the stop-word set
    StopWord,
    /// The word is a single character (or empty)
    TooShort,
}

impl StopReason {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            StopReason::StopWord => "stop word",
            StopReason::TooShort => "too short",
        }
    }
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            stopped: None,
        }
    }

    /// Length of the token in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Mark this token as stopped.
    pub fn stop(mut self, reason: StopReason) -> Self {
        self.stopped = Some(reason);
        self
    }

    /// Check if this token is stopped.
    pub fn is_stopped(&self) -> bool {
        self.stopped.is_some()
    }

    /// Why this token was stopped.
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stopped
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;
