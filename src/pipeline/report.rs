//! Results produced by the sentiment compiler.

use serde::{Deserialize, Serialize};

use crate::analysis::Token;
use crate::error::{Result, SentimentError};
use crate::sentiment::{ContractInconsistency, SentimentResult, ValidatedSentiment};
use crate::syntax::SyntaxVerdict;

/// The aggregated outcome of all three phases for one sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// The sentence as submitted
    pub sentence: String,
    /// Surviving tokens in sentence order
    pub tokens: Vec<String>,
    /// Verdict of the syntax phase
    pub syntax: SyntaxVerdict,
    /// Polarity and score (`sentimentPolarity` / `sentimentScore` on the wire)
    #[serde(flatten)]
    pub sentiment: SentimentResult,
    /// Set when the classifier's label disagreed with its score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inconsistency: Option<ContractInconsistency>,
    /// Whether the semantic classifier was called
    pub classifier_invoked: bool,
}

/// Result of the semantic phase.
#[derive(Debug)]
pub enum SentimentOutcome {
    /// No tokens survived the lexical phase; the result is Neutral/0.
    Skipped,
    /// The classifier answered and the answer passed contract validation.
    Classified(ValidatedSentiment),
    /// The classifier failed; token and syntax results are still valid.
    Failed(SentimentError),
}

impl SentimentOutcome {
    /// The sentiment, if the phase did not fail.
    pub fn result(&self) -> Option<SentimentResult> {
        match self {
            SentimentOutcome::Skipped => Some(SentimentResult::neutral()),
            SentimentOutcome::Classified(validated) => Some(validated.result),
            SentimentOutcome::Failed(_) => None,
        }
    }

    /// Check if the semantic phase failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, SentimentOutcome::Failed(_))
    }
}

/// Per-phase results, available even when the semantic phase failed.
#[derive(Debug)]
pub struct StagedAnalysis {
    pub sentence: String,
    pub tokens: Vec<Token>,
    pub syntax: SyntaxVerdict,
    pub sentiment: SentimentOutcome,
}

impl StagedAnalysis {
    /// Token texts in order.
    pub fn token_words(&self) -> Vec<String> {
        self.tokens.iter().map(|t| t.text.clone()).collect()
    }

    /// Collapse into a report, failing if the semantic phase failed.
    pub fn into_report(self) -> Result<AnalysisReport> {
        let tokens = self.token_words();
        let (sentiment, inconsistency, classifier_invoked) = match self.sentiment {
            SentimentOutcome::Skipped => (SentimentResult::neutral(), None, false),
            SentimentOutcome::Classified(validated) => {
                (validated.result, validated.inconsistency, true)
            }
            SentimentOutcome::Failed(e) => return Err(e),
        };

        Ok(AnalysisReport {
            sentence: self.sentence,
            tokens,
            syntax: self.syntax,
            sentiment,
            inconsistency,
            classifier_invoked,
        })
    }
}
