//! Analyzer implementations that combine tokenizers and filters.

mod analyzer;
mod lexical;
mod pipeline;

pub use analyzer::Analyzer;
pub use lexical::{LexicalAnalyzer, LexicalBreakdown, MIN_TOKEN_CHARS, tokenize};
pub use pipeline::PipelineAnalyzer;
