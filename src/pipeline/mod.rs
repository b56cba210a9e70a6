//! Aggregation of the three phases into one analysis.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use sentiment_compiler::pipeline::SentimentCompiler;
//! use sentiment_compiler::sentiment::{LexiconClassifier, SentimentPolarity};
//!
//! # tokio_test::block_on(async {
//! let compiler = SentimentCompiler::new(Arc::new(LexiconClassifier::new()));
//! let report = compiler
//!     .analyze("The movie was extremely good and inspiring.")
//!     .await
//!     .unwrap();
//!
//! assert_eq!(report.tokens, vec!["movie", "extremely", "good", "inspiring"]);
//! assert!(report.syntax.valid);
//! assert_eq!(report.sentiment.polarity, SentimentPolarity::Positive);
//! # });
//! ```

pub mod compiler;
pub mod report;
pub mod session;

pub use compiler::SentimentCompiler;
pub use report::{AnalysisReport, SentimentOutcome, StagedAnalysis};
pub use session::AnalysisSession;
