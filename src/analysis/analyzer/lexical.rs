//! Lexical analyzer: the first phase of the sentiment compiler.
//!
//! The phase is a fixed pipeline:
//!
//! 1. lowercase the whole sentence
//! 2. remove `. , ! ? ; :` (no space is inserted)
//! 3. split on runs of whitespace
//! 4. drop words of one character or less, then drop stop words
//!
//! Output order follows the sentence; duplicates are kept.
//!
//! # Examples
//!
//! ```
//! use sentiment_compiler::analysis::analyzer::LexicalAnalyzer;
//!
//! let analyzer = LexicalAnalyzer::new();
//! let words = analyzer.tokenize_words("The movie was extremely good and inspiring.");
//! assert_eq!(words, vec!["movie", "extremely", "good", "inspiring"]);
//! ```

use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::{LowercaseCharFilter, PatternReplaceCharFilter};
use crate::analysis::token::{StopReason, Token, TokenStream};
use crate::analysis::token_filter::{LengthFilter, StopFilter};
use crate::analysis::tokenizer::WhitespaceTokenizer;

/// Minimum token length in characters.
pub const MIN_TOKEN_CHARS: usize = 2;

static DEFAULT_LEXICAL_ANALYZER: LazyLock<LexicalAnalyzer> = LazyLock::new(LexicalAnalyzer::new);

/// Tokenize a sentence with the default lexical analyzer.
pub fn tokenize(sentence: &str) -> Vec<Token> {
    DEFAULT_LEXICAL_ANALYZER.tokenize(sentence)
}

/// Every normalized word of a sentence together with its fate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexicalBreakdown {
    /// The sentence after lowercasing and punctuation removal
    pub normalized: String,
    /// All words in order; excluded words carry a stop reason
    pub words: Vec<Token>,
}

impl LexicalBreakdown {
    /// Words that survived filtering, in order.
    pub fn kept(&self) -> impl Iterator<Item = &Token> {
        self.words.iter().filter(|t| !t.is_stopped())
    }

    /// Number of words excluded for the given reason.
    pub fn count_stopped(&self, reason: StopReason) -> usize {
        self.words
            .iter()
            .filter(|t| t.stop_reason() == Some(reason))
            .count()
    }
}

/// The lexical phase analyzer.
#[derive(Clone, Debug)]
pub struct LexicalAnalyzer {
    pipeline: PipelineAnalyzer,
    breakdown: PipelineAnalyzer,
}

impl LexicalAnalyzer {
    /// Create an analyzer with the default English stop words.
    pub fn new() -> Self {
        Self::with_stop_filter(StopFilter::new())
    }

    /// Create an analyzer with a custom stop filter.
    pub fn with_stop_filter(stop_filter: StopFilter) -> Self {
        let base = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::strip_punctuation()));

        let pipeline = base
            .clone()
            .add_filter(Arc::new(LengthFilter::new(MIN_TOKEN_CHARS)))
            .add_filter(Arc::new(stop_filter.clone().remove_stopped(true)))
            .with_name("lexical");

        let breakdown = base
            .add_filter(Arc::new(
                LengthFilter::new(MIN_TOKEN_CHARS).remove_stopped(false),
            ))
            .add_filter(Arc::new(stop_filter.remove_stopped(false)))
            .with_name("lexical_breakdown");

        LexicalAnalyzer {
            pipeline,
            breakdown,
        }
    }

    /// Tokenize a sentence into its filtered token sequence.
    pub fn tokenize(&self, sentence: &str) -> Vec<Token> {
        self.pipeline.analyze(sentence).collect()
    }

    /// Tokenize a sentence and return only the token texts.
    pub fn tokenize_words(&self, sentence: &str) -> Vec<String> {
        self.pipeline.analyze(sentence).map(|t| t.text).collect()
    }

    /// Show every normalized word and whether it was kept.
    pub fn breakdown(&self, sentence: &str) -> LexicalBreakdown {
        LexicalBreakdown {
            normalized: self.breakdown.normalize(sentence),
            words: self.breakdown.analyze(sentence).collect(),
        }
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for LexicalAnalyzer {
    fn analyze(&self, text: &str) -> TokenStream {
        self.pipeline.analyze(text)
    }

    fn name(&self) -> &'static str {
        "lexical"
    }
}
