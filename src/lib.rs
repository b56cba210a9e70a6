//! # sentiment-compiler
//!
//! Sentiment analysis of a single sentence, staged like a compiler.
//!
//! ## Phases
//!
//! - Lexical analysis: lowercase, strip sentence punctuation, split on
//!   whitespace, drop short words and stop words
//! - Syntax analysis: a structural plausibility check on word count and
//!   terminal punctuation
//! - Semantic analysis: polarity and score from a pluggable classifier,
//!   validated against the threshold rule
//!
//! A lexicon-update contract validates user-supplied word scores before they
//! reach a collaborator.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
#[cfg(feature = "gemini")]
pub mod gemini;
pub mod lexicon;
pub mod pipeline;
pub mod sentiment;
pub mod syntax;

pub mod prelude {
    pub use crate::analysis::{LexicalAnalyzer, Token, tokenize};
    pub use crate::config::CompilerConfig;
    pub use crate::error::{Result, SentimentError};
    pub use crate::lexicon::{
        LexiconAck, LexiconEntry, LexiconUpdater, SentimentLexicon, update_lexicon,
    };
    pub use crate::pipeline::{AnalysisReport, AnalysisSession, SentimentCompiler};
    pub use crate::sentiment::{
        ClassifierResponse, InconsistencyPolicy, LexiconClassifier, SentimentClassifier,
        SentimentPolarity, SentimentResult,
    };
    pub use crate::syntax::{SyntaxVerdict, check_syntax};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
