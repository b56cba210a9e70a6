//! Local lexicon-backed classifier.
//!
//! Scores a token sequence by looking each token up in a [`SentimentLexicon`]
//! and averaging the hits. Intensifiers scale and negations flip the next
//! scored token. Tokens without an entry are ignored; with no hits at all the
//! score is 0.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::error::Result;
use crate::lexicon::SentimentLexicon;
use crate::sentiment::classifier::{ClassifierResponse, SentimentClassifier};
use crate::sentiment::polarity::SentimentResult;

const DEFAULT_INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.5),
    ("extremely", 2.0),
    ("really", 1.3),
    ("incredibly", 1.8),
    ("highly", 1.5),
    ("truly", 1.3),
    ("absolutely", 1.8),
    ("slightly", 0.5),
    ("somewhat", 0.7),
    ("barely", 0.4),
];

const DEFAULT_NEGATIONS: &[&str] = &[
    "not", "no", "never", "nor", "neither", "nothing", "nobody", "cannot", "cant", "can't",
    "dont", "don't", "doesnt", "doesn't", "didnt", "didn't", "isnt", "isn't", "wasnt", "wasn't",
    "wont", "won't", "hardly",
];

/// A classifier that averages lexicon scores.
pub struct LexiconClassifier {
    lexicon: Arc<SentimentLexicon>,
    intensifiers: HashMap<String, f64>,
    negations: Vec<String>,
}

impl LexiconClassifier {
    /// Create a classifier over the built-in English lexicon.
    pub fn new() -> Self {
        Self::with_lexicon(Arc::new(SentimentLexicon::with_default_entries()))
    }

    /// Create a classifier over a shared lexicon.
    ///
    /// Updates applied to the lexicon are visible to the next classification.
    pub fn with_lexicon(lexicon: Arc<SentimentLexicon>) -> Self {
        LexiconClassifier {
            lexicon,
            intensifiers: DEFAULT_INTENSIFIERS
                .iter()
                .map(|&(w, m)| (w.to_string(), m))
                .collect(),
            negations: DEFAULT_NEGATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Get the lexicon consulted by this classifier.
    pub fn lexicon(&self) -> &Arc<SentimentLexicon> {
        &self.lexicon
    }

    /// Score tokens without going through the async contract.
    ///
    /// Fails with `ClassifierUnavailable` if the average is not a score in
    /// [-1, 1].
    pub fn score(&self, tokens: &[String]) -> Result<SentimentResult> {
        let lexicon = self.lexicon.snapshot();

        let mut multiplier: f64 = 1.0;
        let mut hits: Vec<f64> = Vec::new();
        for token in tokens {
            if let Some(m) = self.intensifiers.get(token) {
                multiplier *= m;
            } else if self.negations.iter().any(|n| n == token) {
                multiplier = -multiplier;
            } else if let Some(score) = lexicon.get(token) {
                hits.push((score * multiplier).clamp(-1.0, 1.0));
                multiplier = 1.0;
            }
        }

        let score = if hits.is_empty() {
            0.0
        } else {
            (hits.iter().sum::<f64>() / hits.len() as f64).clamp(-1.0, 1.0)
        };
        debug!(
            "Lexicon classifier scored {} of {} tokens: {score:.3}",
            hits.len(),
            tokens.len()
        );

        SentimentResult::from_score(score)
    }
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SentimentClassifier for LexiconClassifier {
    async fn classify(&self, tokens: &[String]) -> Result<ClassifierResponse> {
        Ok(self.score(tokens)?.into())
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}
