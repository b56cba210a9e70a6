//! End-to-end scenarios for the three phases and the lexicon contract.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use sentiment_compiler::analysis::tokenize;
use sentiment_compiler::error::{Result, SentimentError};
use sentiment_compiler::lexicon::{LexiconAck, LexiconEntry, LexiconUpdater, update_lexicon};
use sentiment_compiler::pipeline::{SentimentCompiler, SentimentOutcome};
use sentiment_compiler::sentiment::{
    ClassifierResponse, InconsistencyPolicy, SentimentClassifier, SentimentPolarity,
};
use sentiment_compiler::syntax::check_syntax;

/// Records every call and returns a fixed response.
struct ScriptedClassifier {
    response: ClassifierResponse,
    calls: AtomicUsize,
    last_tokens: parking_lot::Mutex<Vec<String>>,
}

impl ScriptedClassifier {
    fn new(response: ClassifierResponse) -> Arc<Self> {
        Arc::new(ScriptedClassifier {
            response,
            calls: AtomicUsize::new(0),
            last_tokens: parking_lot::Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SentimentClassifier for ScriptedClassifier {
    async fn classify(&self, tokens: &[String]) -> Result<ClassifierResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_tokens.lock() = tokens.to_vec();
        Ok(self.response.clone())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

struct EchoUpdater {
    calls: AtomicUsize,
}

#[async_trait]
impl LexiconUpdater for EchoUpdater {
    async fn update(&self, entry: &LexiconEntry) -> Result<LexiconAck> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(LexiconAck::accepted(format!(
            "Lexicon updated: {} = {}",
            entry.word, entry.score
        )))
    }
}

#[tokio::test]
async fn test_movie_sentence_through_all_phases() -> Result<()> {
    let sentence = "The movie was extremely good and inspiring.";
    let classifier = ScriptedClassifier::new(ClassifierResponse::new("Positive", 0.8));
    let compiler = SentimentCompiler::new(classifier.clone());

    let report = compiler.analyze(sentence).await?;

    for stop_word in ["the", "was", "and"] {
        assert!(!report.tokens.iter().any(|t| t == stop_word));
    }
    assert!(report.tokens.iter().all(|t| !t.contains('.')));
    assert_eq!(report.tokens, vec!["movie", "extremely", "good", "inspiring"]);

    assert_eq!(report.syntax.word_count, 7);
    assert!(report.syntax.word_count_ok);
    assert!(report.syntax.terminal_punctuation_ok);
    assert!(report.syntax.valid);

    assert_eq!(report.sentiment.polarity, SentimentPolarity::Positive);
    assert_eq!(report.sentiment.score, 0.8);
    assert_eq!(classifier.calls(), 1);
    assert_eq!(*classifier.last_tokens.lock(), report.tokens);

    Ok(())
}

#[tokio::test]
async fn test_empty_sentence_defaults_to_neutral() -> Result<()> {
    let classifier = ScriptedClassifier::new(ClassifierResponse::new("Negative", -0.9));
    let compiler = SentimentCompiler::new(classifier.clone());

    let report = compiler.analyze("").await?;

    assert!(report.tokens.is_empty());
    assert!(!report.syntax.valid);
    assert_eq!(report.syntax.word_count, 0);
    assert!(!report.syntax.terminal_punctuation_ok);
    assert_eq!(report.sentiment.polarity, SentimentPolarity::Neutral);
    assert_eq!(report.sentiment.score, 0.0);
    assert!(!report.classifier_invoked);
    assert_eq!(classifier.calls(), 0);

    Ok(())
}

#[test]
fn test_single_word_fails_word_count() {
    for sentence in ["Bad", "Bad.", "Bad!"] {
        let verdict = check_syntax(sentence);
        assert_eq!(verdict.word_count, 1);
        assert!(!verdict.word_count_ok);
        assert!(!verdict.valid);
    }
}

#[test]
fn test_two_words_without_punctuation() {
    let verdict = check_syntax("Hi there");
    assert_eq!(verdict.word_count, 2);
    assert!(!verdict.word_count_ok);
    assert!(!verdict.terminal_punctuation_ok);
    assert!(!verdict.valid);

    let tokens: Vec<String> = tokenize("Hi there").into_iter().map(|t| t.text).collect();
    assert_eq!(tokens, vec!["hi"]);
}

#[tokio::test]
async fn test_label_disagreeing_with_score() -> Result<()> {
    let sentence = "Fine enough film.";

    let classifier = ScriptedClassifier::new(ClassifierResponse::new("Positive", 0.1));
    let compiler = SentimentCompiler::new(classifier);
    let staged = compiler.analyze_staged(sentence).await;
    match &staged.sentiment {
        SentimentOutcome::Classified(validated) => {
            let inconsistency = validated.inconsistency.expect("inconsistency is reported");
            assert_eq!(inconsistency.reported, SentimentPolarity::Positive);
            assert_eq!(inconsistency.expected, SentimentPolarity::Neutral);
            assert_eq!(validated.result.polarity, SentimentPolarity::Neutral);
            assert!(validated.result.is_consistent());
        }
        other => panic!("expected a classified outcome, got {other:?}"),
    }

    let classifier = ScriptedClassifier::new(ClassifierResponse::new("Positive", 0.1));
    let compiler = SentimentCompiler::new(classifier).with_policy(InconsistencyPolicy::Reject);
    let staged = compiler.analyze_staged(sentence).await;
    assert!(matches!(
        staged.sentiment,
        SentimentOutcome::Failed(SentimentError::ContractInconsistency(_))
    ));
    assert_eq!(staged.token_words(), vec!["fine", "enough", "film"]);

    Ok(())
}

#[tokio::test]
async fn test_valid_lexicon_entry_is_forwarded() -> Result<()> {
    let updater = EchoUpdater {
        calls: AtomicUsize::new(0),
    };

    let ack = update_lexicon(&updater, &LexiconEntry::new("awesome", 0.9)).await?;

    assert!(ack.accepted);
    assert_eq!(ack.message, "Lexicon updated: awesome = 0.9");
    assert_eq!(updater.calls.load(Ordering::SeqCst), 1);

    Ok(())
}

#[tokio::test]
async fn test_malformed_classifier_payload_is_not_masked() -> Result<()> {
    let cases = [
        ClassifierResponse {
            sentiment_polarity: None,
            sentiment_score: Some(0.5),
        },
        ClassifierResponse::new("Mixed", 0.0),
        ClassifierResponse::new("Positive", 1.7),
    ];

    for response in cases {
        let compiler = SentimentCompiler::new(ScriptedClassifier::new(response));
        let staged = compiler.analyze_staged("Surprisingly decent sequel!").await;

        assert_eq!(staged.token_words(), vec!["surprisingly", "decent", "sequel"]);
        assert!(staged.syntax.valid);
        assert!(staged.sentiment.result().is_none());
        assert!(matches!(
            staged.sentiment,
            SentimentOutcome::Failed(SentimentError::ClassifierUnavailable(_))
        ));
    }

    Ok(())
}
