//! Lexical analysis: the first phase of the sentiment compiler.
//!
//! This module provides tokenization, character normalization and token
//! filtering, assembled into the [`LexicalAnalyzer`] pipeline.

pub mod analyzer;
pub mod char_filter;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::{Analyzer, LexicalAnalyzer, LexicalBreakdown, tokenize};
pub use token::{StopReason, Token, TokenStream};
