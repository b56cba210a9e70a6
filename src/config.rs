//! Configuration for the sentiment compiler.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SentimentError};
use crate::lexicon::LexiconEntry;
use crate::sentiment::InconsistencyPolicy;
use crate::syntax::SyntaxRules;

/// Configuration for a [`SentimentCompiler`](crate::pipeline::SentimentCompiler)
/// and the applications built around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Rules for the syntax phase.
    pub syntax: SyntaxRules,

    /// How to resolve a classifier label that disagrees with its score.
    pub inconsistency_policy: InconsistencyPolicy,

    /// Timeout for a single classifier call in milliseconds.
    /// If None, the call may take as long as the collaborator needs.
    pub classifier_timeout_ms: Option<u64>,

    /// Number of sentences analyzed concurrently in batch mode.
    pub batch_concurrency: usize,

    /// Extra entries seeded into the local lexicon.
    pub lexicon: Vec<LexiconEntry>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            syntax: SyntaxRules::default(),
            inconsistency_policy: InconsistencyPolicy::default(),
            classifier_timeout_ms: None,
            batch_concurrency: 4,
            lexicon: Vec::new(),
        }
    }
}

impl CompilerConfig {
    /// Load a configuration from a JSON file. Missing keys take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            SentimentError::config(format!("cannot open {}: {e}", path.display()))
        })?;
        let config: CompilerConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: CompilerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.syntax.validate()?;

        if self.batch_concurrency == 0 {
            return Err(SentimentError::config("batch_concurrency must be at least 1"));
        }
        if self.classifier_timeout_ms == Some(0) {
            return Err(SentimentError::config(
                "classifier_timeout_ms must be positive; omit it to disable the timeout",
            ));
        }
        for entry in &self.lexicon {
            entry.validate().map_err(|e| {
                SentimentError::config(format!("lexicon entry {:?}: {e}", entry.word))
            })?;
        }
        Ok(())
    }

    /// The classifier timeout as a [`Duration`].
    pub fn classifier_timeout(&self) -> Option<Duration> {
        self.classifier_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = CompilerConfig::default();
        assert_eq!(config.syntax.min_words_exclusive, 2);
        assert_eq!(config.syntax.terminal_punctuation, vec!['.', '!', '?']);
        assert_eq!(config.inconsistency_policy, InconsistencyPolicy::TrustScore);
        assert_eq!(config.classifier_timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = CompilerConfig::from_json_str(
            r#"{"inconsistency_policy":"reject","classifier_timeout_ms":250}"#,
        )
        .unwrap();
        assert_eq!(config.inconsistency_policy, InconsistencyPolicy::Reject);
        assert_eq!(config.classifier_timeout(), Some(Duration::from_millis(250)));
        assert_eq!(config.batch_concurrency, 4);
        assert_eq!(config.syntax, SyntaxRules::default());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(CompilerConfig::from_json_str(r#"{"batch_concurrency":0}"#).is_err());
        assert!(CompilerConfig::from_json_str(r#"{"classifier_timeout_ms":0}"#).is_err());
        assert!(
            CompilerConfig::from_json_str(r#"{"syntax":{"terminal_punctuation":[]}}"#).is_err()
        );

        let err = CompilerConfig::from_json_str(
            r#"{"lexicon":[{"word":"go2","sentimentScore":0.5}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SentimentError::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"syntax":{{"min_words_exclusive":3}},"lexicon":[{{"word":"rad","sentimentScore":0.8}}]}}"#
        )
        .unwrap();

        let config = CompilerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.syntax.min_words_exclusive, 3);
        assert_eq!(config.syntax.terminal_punctuation, vec!['.', '!', '?']);
        assert_eq!(config.lexicon, vec![LexiconEntry::new("rad", 0.8)]);
    }

    #[test]
    fn test_missing_file() {
        let result = CompilerConfig::from_file("/nonexistent/sentiment.json");
        assert!(matches!(result, Err(SentimentError::Config(_))));
    }
}
