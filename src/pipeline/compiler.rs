//! The three-phase sentiment compiler.
//!
//! The lexical and syntax phases only read the sentence, so they run side by
//! side. The semantic phase is the single suspension point: the classifier is
//! awaited once per sentence, never for an empty token sequence, and never
//! retried.

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::analysis::{LexicalAnalyzer, Token};
use crate::config::CompilerConfig;
use crate::error::{Result, SentimentError};
use crate::pipeline::report::{AnalysisReport, SentimentOutcome, StagedAnalysis};
use crate::sentiment::{
    InconsistencyPolicy, SentimentClassifier, ValidatedSentiment, validate_response,
};
use crate::syntax::{SyntaxValidator, SyntaxVerdict};

/// Runs a sentence through tokenization, syntax validation and
/// classification.
pub struct SentimentCompiler {
    lexical: LexicalAnalyzer,
    syntax: SyntaxValidator,
    classifier: Arc<dyn SentimentClassifier>,
    policy: InconsistencyPolicy,
    timeout: Option<Duration>,
}

impl SentimentCompiler {
    /// Create a compiler with default rules around the given classifier.
    pub fn new(classifier: Arc<dyn SentimentClassifier>) -> Self {
        SentimentCompiler {
            lexical: LexicalAnalyzer::new(),
            syntax: SyntaxValidator::new(),
            classifier,
            policy: InconsistencyPolicy::default(),
            timeout: None,
        }
    }

    /// Create a compiler from a configuration.
    pub fn with_config(
        config: &CompilerConfig,
        classifier: Arc<dyn SentimentClassifier>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(classifier)
            .with_syntax_validator(SyntaxValidator::with_rules(config.syntax.clone())?)
            .with_policy(config.inconsistency_policy)
            .with_timeout(config.classifier_timeout()))
    }

    /// Set the inconsistency policy.
    pub fn with_policy(mut self, policy: InconsistencyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the classifier timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the lexical analyzer.
    pub fn with_lexical_analyzer(mut self, lexical: LexicalAnalyzer) -> Self {
        self.lexical = lexical;
        self
    }

    /// Replace the syntax validator.
    pub fn with_syntax_validator(mut self, syntax: SyntaxValidator) -> Self {
        self.syntax = syntax;
        self
    }

    pub fn lexical(&self) -> &LexicalAnalyzer {
        &self.lexical
    }

    pub fn syntax(&self) -> &SyntaxValidator {
        &self.syntax
    }

    pub fn classifier(&self) -> &Arc<dyn SentimentClassifier> {
        &self.classifier
    }

    pub fn policy(&self) -> InconsistencyPolicy {
        self.policy
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Run the lexical and syntax phases.
    ///
    /// Both phases are pure and run inline on the calling task.
    pub fn front_end(&self, sentence: &str) -> (Vec<Token>, SyntaxVerdict) {
        let start = Instant::now();
        let tokens = self.lexical.tokenize(sentence);
        let verdict = self.syntax.check(sentence);
        debug!(
            "Front end produced {} tokens (syntax valid: {}) in {:?}",
            tokens.len(),
            verdict.valid,
            start.elapsed()
        );
        (tokens, verdict)
    }

    /// Run all phases, keeping token and syntax results if classification fails.
    pub async fn analyze_staged(&self, sentence: &str) -> StagedAnalysis {
        let (tokens, syntax) = self.front_end(sentence);

        let sentiment = if tokens.is_empty() {
            debug!("No tokens survived the lexical phase; skipping the classifier");
            SentimentOutcome::Skipped
        } else {
            let words: Vec<String> = tokens.iter().map(|t| t.text.clone()).collect();
            match self.classify(&words).await {
                Ok(validated) => SentimentOutcome::Classified(validated),
                Err(e) => {
                    warn!("Semantic phase failed: {e}");
                    SentimentOutcome::Failed(e)
                }
            }
        };

        StagedAnalysis {
            sentence: sentence.to_string(),
            tokens,
            syntax,
            sentiment,
        }
    }

    /// Run all phases. Fails only if the classifier fails.
    pub async fn analyze(&self, sentence: &str) -> Result<AnalysisReport> {
        self.analyze_staged(sentence).await.into_report()
    }

    async fn classify(&self, words: &[String]) -> Result<ValidatedSentiment> {
        let name = self.classifier.name();
        debug!("Invoking classifier '{name}' with {} tokens", words.len());
        let start = Instant::now();

        let call = self.classifier.classify(words);
        let response = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                SentimentError::timeout(format!(
                    "classifier '{name}' gave no response within {}ms",
                    limit.as_millis()
                ))
            })?,
            None => call.await,
        }
        .map_err(|e| match e {
            SentimentError::ClassifierUnavailable(_) => e,
            other => SentimentError::classifier_unavailable(format!(
                "classifier '{name}' failed: {other}"
            )),
        })?;

        debug!("Classifier '{name}' answered in {:?}", start.elapsed());
        validate_response(response, self.policy)
    }
}

impl std::fmt::Debug for SentimentCompiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentCompiler")
            .field("lexical", &self.lexical)
            .field("syntax", &self.syntax)
            .field("classifier", &self.classifier.name())
            .field("policy", &self.policy)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::sentiment::{ClassifierResponse, LexiconClassifier, SentimentPolarity};

    struct FixedClassifier {
        response: ClassifierResponse,
        calls: AtomicUsize,
    }

    impl FixedClassifier {
        fn new(response: ClassifierResponse) -> Arc<Self> {
            Arc::new(FixedClassifier {
                response,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl SentimentClassifier for FixedClassifier {
        async fn classify(&self, _tokens: &[String]) -> Result<ClassifierResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    struct BrokenClassifier;

    #[async_trait]
    impl SentimentClassifier for BrokenClassifier {
        async fn classify(&self, _tokens: &[String]) -> Result<ClassifierResponse> {
            Err(SentimentError::other("socket closed"))
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    struct SlowClassifier;

    #[async_trait]
    impl SentimentClassifier for SlowClassifier {
        async fn classify(&self, _tokens: &[String]) -> Result<ClassifierResponse> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(ClassifierResponse::new("Neutral", 0.0))
        }
    }

    #[tokio::test]
    async fn test_analyze_with_local_classifier() {
        let compiler = SentimentCompiler::new(Arc::new(LexiconClassifier::new()));
        let report = compiler
            .analyze("The movie was extremely good and inspiring.")
            .await
            .unwrap();

        assert_eq!(report.tokens, vec!["movie", "extremely", "good", "inspiring"]);
        assert!(report.syntax.valid);
        assert_eq!(report.sentiment.polarity, SentimentPolarity::Positive);
        assert!(report.classifier_invoked);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_front_end_runs_on_calling_task() {
        let compiler = SentimentCompiler::new(Arc::new(LexiconClassifier::new()));
        let sentence = "What a great day!";

        let (tokens, verdict) = compiler.front_end(sentence);
        assert_eq!(tokens, compiler.lexical().tokenize(sentence));
        assert_eq!(verdict, compiler.syntax().check(sentence));

        let staged = compiler.analyze_staged(sentence).await;
        assert_eq!(staged.tokens, tokens);
        assert_eq!(staged.syntax, verdict);
    }

    #[tokio::test]
    async fn test_empty_tokens_skip_classifier() {
        let classifier = FixedClassifier::new(ClassifierResponse::new("Positive", 0.9));
        let compiler = SentimentCompiler::new(classifier.clone());

        for sentence in ["", "   ", "The and was.", "a b c"] {
            let report = compiler.analyze(sentence).await.unwrap();
            assert!(report.tokens.is_empty());
            assert_eq!(report.sentiment.polarity, SentimentPolarity::Neutral);
            assert_eq!(report.sentiment.score, 0.0);
            assert!(!report.classifier_invoked);
        }
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_classifier_failure_keeps_front_end_results() {
        let compiler = SentimentCompiler::new(Arc::new(BrokenClassifier));
        let staged = compiler.analyze_staged("What a great day!").await;

        assert_eq!(staged.token_words(), vec!["great", "day"]);
        assert!(staged.syntax.valid);
        match &staged.sentiment {
            SentimentOutcome::Failed(SentimentError::ClassifierUnavailable(msg)) => {
                assert!(msg.contains("broken"));
                assert!(msg.contains("socket closed"));
            }
            other => panic!("expected a classifier failure, got {other:?}"),
        }

        let err = compiler.analyze("What a great day!").await.unwrap_err();
        assert!(err.is_classifier_failure());
    }

    #[tokio::test]
    async fn test_timeout_becomes_classifier_unavailable() {
        let compiler = SentimentCompiler::new(Arc::new(SlowClassifier))
            .with_timeout(Some(Duration::from_millis(20)));

        let err = compiler.analyze("Slow answers are annoying.").await.unwrap_err();
        match err {
            SentimentError::ClassifierUnavailable(msg) => assert!(msg.starts_with("Timeout")),
            other => panic!("expected a timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_inconsistent_label_policies() {
        let sentence = "Fine enough film.";
        let response = ClassifierResponse::new("Positive", 0.1);

        let compiler = SentimentCompiler::new(FixedClassifier::new(response.clone()));
        let report = compiler.analyze(sentence).await.unwrap();
        assert_eq!(report.sentiment.polarity, SentimentPolarity::Neutral);
        assert!(report.inconsistency.is_some());

        let compiler = SentimentCompiler::new(FixedClassifier::new(response))
            .with_policy(InconsistencyPolicy::Reject);
        let err = compiler.analyze(sentence).await.unwrap_err();
        assert!(matches!(err, SentimentError::ContractInconsistency(_)));
    }

    #[tokio::test]
    async fn test_with_config() {
        let config = CompilerConfig::from_json_str(
            r#"{"syntax":{"min_words_exclusive":0},"inconsistency_policy":"trust-label","classifier_timeout_ms":100}"#,
        )
        .unwrap();
        let compiler =
            SentimentCompiler::with_config(&config, Arc::new(LexiconClassifier::new())).unwrap();

        assert_eq!(compiler.policy(), InconsistencyPolicy::TrustLabel);
        assert_eq!(compiler.timeout(), Some(Duration::from_millis(100)));
        assert!(compiler.analyze("Bad!").await.unwrap().syntax.valid);
    }
}
