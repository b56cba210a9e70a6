//! Semantic phase: polarity, the classifier contract and a local classifier.

pub mod classifier;
pub mod lexicon_classifier;
pub mod polarity;

pub use classifier::{
    ClassifierResponse, ContractInconsistency, InconsistencyPolicy, SentimentClassifier,
    ValidatedSentiment, validate_response,
};
pub use lexicon_classifier::LexiconClassifier;
pub use polarity::{
    NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD, SentimentPolarity, SentimentResult, check_score_range,
};
