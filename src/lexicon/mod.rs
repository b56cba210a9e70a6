//! The lexicon-update contract.
//!
//! A [`LexiconEntry`] is validated locally before it is handed to a
//! [`LexiconUpdater`]; invalid entries never reach the collaborator. How the
//! collaborator stores the entry, and whether any classifier consults it, is
//! up to the implementation.
//!
//! # Examples
//!
//! ```
//! use sentiment_compiler::lexicon::{LexiconEntry, SentimentLexicon, update_lexicon};
//!
//! # async fn example() -> sentiment_compiler::error::Result<()> {
//! let lexicon = SentimentLexicon::new();
//! let ack = update_lexicon(&lexicon, &LexiconEntry::new("awesome", 0.9)).await?;
//! assert!(ack.accepted);
//!
//! assert!(update_lexicon(&lexicon, &LexiconEntry::new("go2", 0.5)).await.is_err());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SentimentError};

pub mod table;

pub use table::SentimentLexicon;

/// Minimum word length accepted by lexicon validation.
pub const MIN_WORD_CHARS: usize = 2;

/// A word and the sentiment score a user wants associated with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub word: String,
    #[serde(rename = "sentimentScore")]
    pub score: f64,
}

impl LexiconEntry {
    /// Create an entry. Nothing is validated until [`validate`](Self::validate).
    pub fn new<S: Into<String>>(word: S, score: f64) -> Self {
        LexiconEntry {
            word: word.into(),
            score,
        }
    }

    /// Validate the entry: an ASCII-alphabetic word of at least two letters and
    /// a finite score in [-1, 1].
    pub fn validate(&self) -> Result<()> {
        if self.word.is_empty() {
            return Err(SentimentError::validation("Word must not be empty."));
        }
        if !self.word.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(SentimentError::validation(format!(
                "Word must contain only letters (got {:?}).",
                self.word
            )));
        }
        if self.word.len() < MIN_WORD_CHARS {
            return Err(SentimentError::validation(format!(
                "Word must be at least {MIN_WORD_CHARS} characters."
            )));
        }
        if self.score.is_nan() {
            return Err(SentimentError::validation("Score must be a number."));
        }
        if self.score < -1.0 {
            return Err(SentimentError::validation("Score must be at least -1."));
        }
        if self.score > 1.0 {
            return Err(SentimentError::validation("Score must be at most 1."));
        }
        Ok(())
    }

    /// Parse a `WORD=SCORE` pair, as accepted on the command line.
    pub fn parse_pair(pair: &str) -> Result<Self> {
        let (word, score) = pair.split_once('=').ok_or_else(|| {
            SentimentError::validation(format!("expected WORD=SCORE, got {pair:?}"))
        })?;
        let score: f64 = score.trim().parse().map_err(|_| {
            SentimentError::validation(format!("score {:?} is not a number", score.trim()))
        })?;
        Ok(LexiconEntry::new(word.trim(), score))
    }
}

/// Acknowledgment returned by a lexicon updater.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconAck {
    #[serde(rename = "success")]
    pub accepted: bool,
    pub message: String,
}

impl LexiconAck {
    /// Create an accepted acknowledgment.
    pub fn accepted<S: Into<String>>(message: S) -> Self {
        LexiconAck {
            accepted: true,
            message: message.into(),
        }
    }

    /// Create a declined acknowledgment.
    pub fn declined<S: Into<String>>(message: S) -> Self {
        LexiconAck {
            accepted: false,
            message: message.into(),
        }
    }
}

/// Trait for collaborators that record lexicon entries.
///
/// Implementations only ever see entries that passed [`LexiconEntry::validate`].
#[async_trait]
pub trait LexiconUpdater: Send + Sync {
    /// Record or incorporate an entry.
    async fn update(&self, entry: &LexiconEntry) -> Result<LexiconAck>;

    /// Get the name/identifier of this updater.
    fn name(&self) -> &str {
        "unknown"
    }
}

/// Validate an entry and dispatch it to the updater.
///
/// The updater's acknowledgment is returned verbatim.
pub async fn update_lexicon(
    updater: &dyn LexiconUpdater,
    entry: &LexiconEntry,
) -> Result<LexiconAck> {
    if let Err(e) = entry.validate() {
        debug!("Rejected lexicon entry {:?}: {e}", entry.word);
        return Err(e);
    }

    let ack = updater.update(entry).await?;
    info!(
        "Lexicon updater '{}' {} {:?} => {}: {}",
        updater.name(),
        if ack.accepted { "accepted" } else { "declined" },
        entry.word,
        entry.score,
        ack.message
    );
    Ok(ack)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct CountingUpdater {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LexiconUpdater for CountingUpdater {
        async fn update(&self, entry: &LexiconEntry) -> Result<LexiconAck> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(LexiconAck::accepted(format!("Recorded {}.", entry.word)))
        }
    }

    #[test]
    fn test_validation_boundary() {
        assert!(LexiconEntry::new("go2", 0.5).validate().is_err());
        assert!(LexiconEntry::new("g", 0.5).validate().is_err());
        assert!(LexiconEntry::new("", 0.5).validate().is_err());
        assert!(LexiconEntry::new("awesome", 1.5).validate().is_err());
        assert!(LexiconEntry::new("awesome", -1.01).validate().is_err());
        assert!(LexiconEntry::new("awesome", f64::NAN).validate().is_err());
        assert!(LexiconEntry::new("two words", 0.1).validate().is_err());
        assert!(LexiconEntry::new("café", 0.1).validate().is_err());

        assert!(LexiconEntry::new("awesome", 1.0).validate().is_ok());
        assert!(LexiconEntry::new("Awful", -1.0).validate().is_ok());
        assert!(LexiconEntry::new("ok", 0.0).validate().is_ok());
    }

    #[test]
    fn test_validation_messages() {
        let err = LexiconEntry::new("awesome", 1.5).validate().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Score must be at most 1.");

        let err = LexiconEntry::new("g", 0.0).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Word must be at least 2 characters."
        );
    }

    #[test]
    fn test_parse_pair() {
        let entry = LexiconEntry::parse_pair("awesome=0.9").unwrap();
        assert_eq!(entry, LexiconEntry::new("awesome", 0.9));

        let entry = LexiconEntry::parse_pair(" meh = -0.1 ").unwrap();
        assert_eq!(entry, LexiconEntry::new("meh", -0.1));

        assert!(LexiconEntry::parse_pair("awesome").is_err());
        assert!(LexiconEntry::parse_pair("awesome=high").is_err());
    }

    #[test]
    fn test_wire_format() {
        let entry: LexiconEntry =
            serde_json::from_str(r#"{"word":"awesome","sentimentScore":0.9}"#).unwrap();
        assert_eq!(entry, LexiconEntry::new("awesome", 0.9));

        let ack: LexiconAck =
            serde_json::from_str(r#"{"success":true,"message":"Updated."}"#).unwrap();
        assert!(ack.accepted);
        assert_eq!(ack.message, "Updated.");
    }

    #[tokio::test]
    async fn test_invalid_entries_never_reach_the_updater() {
        let updater = CountingUpdater {
            calls: AtomicUsize::new(0),
        };

        for entry in [
            LexiconEntry::new("go2", 0.5),
            LexiconEntry::new("g", 0.5),
            LexiconEntry::new("awesome", 1.5),
        ] {
            let result = update_lexicon(&updater, &entry).await;
            assert!(matches!(result, Err(SentimentError::Validation(_))));
        }
        assert_eq!(updater.calls.load(Ordering::SeqCst), 0);

        let ack = update_lexicon(&updater, &LexiconEntry::new("awesome", 0.9))
            .await
            .unwrap();
        assert_eq!(ack, LexiconAck::accepted("Recorded awesome."));
        assert_eq!(updater.calls.load(Ordering::SeqCst), 1);
    }
}
