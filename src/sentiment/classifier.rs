//! The semantic classifier contract.
//!
//! The classifier is an external collaborator: ordered token strings go in, a
//! JSON-shaped object with `sentimentPolarity` and `sentimentScore` comes out.
//! The collaborator may be slow, may fail, and may return a label that
//! disagrees with its score. [`validate_response`] is the consumer-side check
//! that turns a raw [`ClassifierResponse`] into a trusted [`SentimentResult`].
//!
//! # Examples
//!
//! ```
//! use async_trait::async_trait;
//! use sentiment_compiler::error::Result;
//! use sentiment_compiler::sentiment::{ClassifierResponse, SentimentClassifier};
//!
//! struct AlwaysNeutral;
//!
//! #[async_trait]
//! impl SentimentClassifier for AlwaysNeutral {
//!     async fn classify(&self, _tokens: &[String]) -> Result<ClassifierResponse> {
//!         Ok(ClassifierResponse::new("Neutral", 0.0))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "always-neutral"
//!     }
//! }
//! ```

use async_trait::async_trait;
use clap::ValueEnum;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SentimentError};
use crate::sentiment::polarity::{SentimentPolarity, SentimentResult, check_score_range};

/// Trait for semantic classifiers.
///
/// Implementations are only ever called with a non-empty token sequence.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Classify an ordered, non-empty token sequence.
    async fn classify(&self, tokens: &[String]) -> Result<ClassifierResponse>;

    /// Get the name/identifier of this classifier.
    fn name(&self) -> &str {
        "unknown"
    }
}

/// Raw classifier payload as received on the wire.
///
/// Both fields are optional so that a missing field is detected by
/// [`validate_response`] instead of failing somewhere in deserialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_polarity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<f64>,
}

impl ClassifierResponse {
    /// Create a complete response.
    pub fn new<S: Into<String>>(polarity: S, score: f64) -> Self {
        ClassifierResponse {
            sentiment_polarity: Some(polarity.into()),
            sentiment_score: Some(score),
        }
    }

    /// Parse a response from JSON text. Malformed JSON means the classifier is unavailable.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| {
            SentimentError::classifier_unavailable(format!(
                "malformed classifier payload: {e}. Payload: {text}"
            ))
        })
    }
}

impl From<SentimentResult> for ClassifierResponse {
    fn from(result: SentimentResult) -> Self {
        ClassifierResponse::new(result.polarity.as_str(), result.score)
    }
}

/// How to resolve a label that disagrees with its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum InconsistencyPolicy {
    /// Keep the score and relabel it by the threshold rule
    #[default]
    TrustScore,
    /// Keep the classifier's label and score as reported
    TrustLabel,
    /// Fail the semantic phase
    Reject,
}

/// A label/score disagreement detected in a classifier response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContractInconsistency {
    /// Label returned by the classifier
    pub reported: SentimentPolarity,
    /// Label implied by the score
    pub expected: SentimentPolarity,
    /// Score returned by the classifier
    pub score: f64,
    /// How the disagreement was resolved
    pub resolution: InconsistencyPolicy,
}

impl std::fmt::Display for ContractInconsistency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "classifier labelled score {} as {} but the threshold rule says {}",
            self.score, self.reported, self.expected
        )
    }
}

/// A classifier result that passed contract validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidatedSentiment {
    pub result: SentimentResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inconsistency: Option<ContractInconsistency>,
}

/// Validate a raw classifier response against the contract.
///
/// Missing fields, an unknown label and an out-of-range score are
/// [`SentimentError::ClassifierUnavailable`]. A label that disagrees with the
/// score is resolved by `policy`.
pub fn validate_response(
    response: ClassifierResponse,
    policy: InconsistencyPolicy,
) -> Result<ValidatedSentiment> {
    let label = response.sentiment_polarity.ok_or_else(|| {
        SentimentError::classifier_unavailable("payload is missing sentimentPolarity")
    })?;
    let score = response.sentiment_score.ok_or_else(|| {
        SentimentError::classifier_unavailable("payload is missing sentimentScore")
    })?;

    let reported: SentimentPolarity = label.parse()?;
    if !check_score_range(score) {
        return Err(SentimentError::classifier_unavailable(format!(
            "sentimentScore {score} is outside [-1, 1]"
        )));
    }

    let expected = SentimentPolarity::from_score(score);
    if reported == expected {
        return Ok(ValidatedSentiment {
            result: SentimentResult {
                polarity: reported,
                score,
            },
            inconsistency: None,
        });
    }

    let inconsistency = ContractInconsistency {
        reported,
        expected,
        score,
        resolution: policy,
    };
    warn!("{inconsistency} (policy: {policy:?})");

    let polarity = match policy {
        InconsistencyPolicy::TrustScore => expected,
        InconsistencyPolicy::TrustLabel => reported,
        InconsistencyPolicy::Reject => {
            return Err(SentimentError::contract_inconsistency(
                inconsistency.to_string(),
            ));
        }
    };

    Ok(ValidatedSentiment {
        result: SentimentResult { polarity, score },
        inconsistency: Some(inconsistency),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consistent_response() {
        let validated = validate_response(
            ClassifierResponse::new("Positive", 0.8),
            InconsistencyPolicy::default(),
        )
        .unwrap();

        assert_eq!(validated.result.polarity, SentimentPolarity::Positive);
        assert_eq!(validated.result.score, 0.8);
        assert!(validated.inconsistency.is_none());
    }

    #[test]
    fn test_inconsistent_response_trust_score() {
        let validated = validate_response(
            ClassifierResponse::new("Positive", 0.1),
            InconsistencyPolicy::TrustScore,
        )
        .unwrap();

        assert_eq!(validated.result.polarity, SentimentPolarity::Neutral);
        assert_eq!(validated.result.score, 0.1);
        let inconsistency = validated.inconsistency.unwrap();
        assert_eq!(inconsistency.reported, SentimentPolarity::Positive);
        assert_eq!(inconsistency.expected, SentimentPolarity::Neutral);
    }

    #[test]
    fn test_inconsistent_response_trust_label() {
        let validated = validate_response(
            ClassifierResponse::new("Positive", 0.1),
            InconsistencyPolicy::TrustLabel,
        )
        .unwrap();

        assert_eq!(validated.result.polarity, SentimentPolarity::Positive);
        assert!(validated.inconsistency.is_some());
    }

    #[test]
    fn test_inconsistent_response_reject() {
        let result = validate_response(
            ClassifierResponse::new("Negative", 0.9),
            InconsistencyPolicy::Reject,
        );
        assert!(matches!(result, Err(SentimentError::ContractInconsistency(_))));
    }

    #[test]
    fn test_malformed_responses() {
        let cases = vec![
            ClassifierResponse {
                sentiment_polarity: None,
                sentiment_score: Some(0.5),
            },
            ClassifierResponse {
                sentiment_polarity: Some("Positive".to_string()),
                sentiment_score: None,
            },
            ClassifierResponse::new("Ecstatic", 0.9),
            ClassifierResponse::new("Positive", 1.5),
            ClassifierResponse::new("Neutral", f64::NAN),
        ];

        for response in cases {
            let result = validate_response(response.clone(), InconsistencyPolicy::TrustLabel);
            assert!(
                matches!(result, Err(SentimentError::ClassifierUnavailable(_))),
                "{response:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_from_json() {
        let response =
            ClassifierResponse::from_json(r#"{"sentimentPolarity":"Negative","sentimentScore":-0.7}"#)
                .unwrap();
        assert_eq!(response, ClassifierResponse::new("Negative", -0.7));

        let partial = ClassifierResponse::from_json(r#"{"sentimentScore":0.2}"#).unwrap();
        assert!(partial.sentiment_polarity.is_none());

        let broken = ClassifierResponse::from_json("not json");
        assert!(matches!(broken, Err(SentimentError::ClassifierUnavailable(_))));

        let wrong_type = ClassifierResponse::from_json(r#"{"sentimentScore":"high"}"#);
        assert!(wrong_type.is_err());
    }

    #[test]
    fn test_policy_serde_names() {
        let json = serde_json::to_string(&InconsistencyPolicy::TrustScore).unwrap();
        assert_eq!(json, r#""trust-score""#);
        let policy: InconsistencyPolicy = serde_json::from_str(r#""reject""#).unwrap();
        assert_eq!(policy, InconsistencyPolicy::Reject);
    }
}
