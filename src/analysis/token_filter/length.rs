//! Length filter implementation.

use super::Filter;
use crate::analysis::token::{StopReason, Token, TokenStream};

/// A filter that drops tokens shorter than a minimum number of characters.
#[derive(Clone, Debug)]
pub struct LengthFilter {
    min_chars: usize,
    remove_stopped: bool,
}

impl LengthFilter {
    /// Create a filter that keeps tokens of at least `min_chars` characters.
    pub fn new(min_chars: usize) -> Self {
        LengthFilter {
            min_chars,
            remove_stopped: true,
        }
    }

    /// Set whether to remove short tokens entirely or just mark them as stopped.
    pub fn remove_stopped(mut self, remove: bool) -> Self {
        self.remove_stopped = remove;
        self
    }

    /// Minimum length in characters.
    pub fn min_chars(&self) -> usize {
        self.min_chars
    }
}

impl Default for LengthFilter {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Filter for LengthFilter {
    fn filter(&self, tokens: TokenStream) -> TokenStream {
        let filtered_tokens: Vec<Token> = tokens
            .filter_map(|token| {
                if token.is_stopped() || token.char_len() >= self.min_chars {
                    Some(token)
                } else if self.remove_stopped {
                    None
                } else {
                    Some(token.stop(StopReason::TooShort))
                }
            })
            .collect();

        Box::new(filtered_tokens.into_iter())
    }

    fn name(&self) -> &'static str {
        "length"
    }
}
