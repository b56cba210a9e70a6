//! Sentiment polarity, score and the threshold rule tying them together.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SentimentError};

/// Scores strictly above this are positive.
pub const POSITIVE_THRESHOLD: f64 = 0.3;

/// Scores strictly below this are negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.3;

/// The discrete sentiment label. This set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentPolarity {
    Positive,
    Negative,
    Neutral,
}

impl SentimentPolarity {
    /// Label a score by the threshold rule.
    ///
    /// `score > 0.3` is positive, `score < -0.3` is negative, anything in
    /// between (inclusive) is neutral.
    pub fn from_score(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            SentimentPolarity::Positive
        } else if score < NEGATIVE_THRESHOLD {
            SentimentPolarity::Negative
        } else {
            SentimentPolarity::Neutral
        }
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentPolarity::Positive => "Positive",
            SentimentPolarity::Negative => "Negative",
            SentimentPolarity::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for SentimentPolarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentPolarity {
    type Err = SentimentError;

    /// Parse a wire label. Matching is exact.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Positive" => Ok(SentimentPolarity::Positive),
            "Negative" => Ok(SentimentPolarity::Negative),
            "Neutral" => Ok(SentimentPolarity::Neutral),
            other => Err(SentimentError::classifier_unavailable(format!(
                "polarity {other:?} is not one of Positive, Negative, Neutral"
            ))),
        }
    }
}

/// Check that a score is a finite number in [-1, 1].
pub fn check_score_range(score: f64) -> bool {
    score.is_finite() && (-1.0..=1.0).contains(&score)
}

/// A polarity and score pair that satisfies the threshold rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    #[serde(rename = "sentimentPolarity")]
    pub polarity: SentimentPolarity,
    #[serde(rename = "sentimentScore")]
    pub score: f64,
}

impl SentimentResult {
    /// The result used when there are no tokens to classify.
    pub fn neutral() -> Self {
        SentimentResult {
            polarity: SentimentPolarity::Neutral,
            score: 0.0,
        }
    }

    /// Build a result from a score, labelling it by the threshold rule.
    pub fn from_score(score: f64) -> Result<Self> {
        if !check_score_range(score) {
            return Err(SentimentError::classifier_unavailable(format!(
                "score {score} is outside [-1, 1]"
            )));
        }
        Ok(SentimentResult {
            polarity: SentimentPolarity::from_score(score),
            score,
        })
    }

    /// Whether the label agrees with the score.
    pub fn is_consistent(&self) -> bool {
        SentimentPolarity::from_score(self.score) == self.polarity
    }
}

impl Default for SentimentResult {
    fn default() -> Self {
        Self::neutral()
    }
}
