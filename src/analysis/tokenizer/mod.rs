//! Tokenizer implementations for lexical analysis.

use crate::analysis::token::TokenStream;

/// Trait for tokenizers that convert text into tokens.
///
/// Tokenization is total: malformed input yields fewer tokens, never an error.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> TokenStream;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod whitespace;

pub use whitespace::WhitespaceTokenizer;
