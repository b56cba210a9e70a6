//! Command implementations for the sentiment compiler CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use log::{debug, info};
use tokio::runtime::Runtime;

use crate::analysis::LexicalAnalyzer;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::CompilerConfig;
use crate::error::{Result, SentimentError};
use crate::lexicon::{LexiconEntry, LexiconUpdater, SentimentLexicon, update_lexicon};
use crate::pipeline::{SentimentCompiler, SentimentOutcome};
use crate::sentiment::{LexiconClassifier, SentimentClassifier};

/// Execute a CLI command.
pub fn execute_command(args: SentimentArgs) -> Result<()> {
    let config = load_config(&args)?;

    match &args.command {
        Command::Analyze(sentence_args) => {
            with_runtime(analyze(&sentence_args.sentence, &config, &args))
        }
        Command::Tokenize(sentence_args) => tokenize(&sentence_args.sentence, &args),
        Command::CheckSyntax(sentence_args) => {
            check_syntax(&sentence_args.sentence, &config, &args)
        }
        Command::UpdateLexicon(update_args) => {
            with_runtime(update(update_args.clone(), &config, &args))
        }
        Command::Batch(batch_args) => with_runtime(batch(batch_args.clone(), &config, &args)),
    }
}

fn with_runtime<F: Future<Output = Result<()>>>(future: F) -> Result<()> {
    let runtime = Runtime::new()?;
    runtime.block_on(future)
}

/// Load the configuration file, then apply command line overrides.
pub fn load_config(args: &SentimentArgs) -> Result<CompilerConfig> {
    let mut config = match &args.config {
        Some(path) => {
            debug!("Loading configuration from: {}", path.display());
            CompilerConfig::from_file(path)?
        }
        None => CompilerConfig::default(),
    };

    if let Some(policy) = args.policy {
        config.inconsistency_policy = policy;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.classifier_timeout_ms = Some(timeout_ms);
    }
    for pair in &args.lexicon {
        config.lexicon.push(LexiconEntry::parse_pair(pair)?);
    }
    if let Command::Batch(BatchArgs {
        concurrency: Some(concurrency),
        ..
    }) = &args.command
    {
        config.batch_concurrency = *concurrency;
    }

    config.validate()?;
    Ok(config)
}

fn build_lexicon(config: &CompilerConfig) -> Result<Arc<SentimentLexicon>> {
    let lexicon = SentimentLexicon::with_default_entries();
    lexicon.extend(config.lexicon.iter().cloned())?;
    Ok(Arc::new(lexicon))
}

fn build_classifier(
    args: &SentimentArgs,
    lexicon: &Arc<SentimentLexicon>,
) -> Result<Arc<dyn SentimentClassifier>> {
    match args.classifier {
        ClassifierKind::Local => Ok(Arc::new(LexiconClassifier::with_lexicon(Arc::clone(
            lexicon,
        )))),
        #[cfg(feature = "gemini")]
        ClassifierKind::Gemini => Ok(Arc::new(crate::gemini::GeminiClassifier::new(
            crate::gemini::GeminiClient::from_env()?,
        ))),
        #[cfg(not(feature = "gemini"))]
        ClassifierKind::Gemini => Err(gemini_unavailable()),
    }
}

fn build_updater(
    args: &SentimentArgs,
    lexicon: Arc<SentimentLexicon>,
) -> Result<Arc<dyn LexiconUpdater>> {
    match args.classifier {
        ClassifierKind::Local => Ok(lexicon),
        #[cfg(feature = "gemini")]
        ClassifierKind::Gemini => Ok(Arc::new(crate::gemini::GeminiLexiconUpdater::new(
            crate::gemini::GeminiClient::from_env()?,
        ))),
        #[cfg(not(feature = "gemini"))]
        ClassifierKind::Gemini => Err(gemini_unavailable()),
    }
}

#[cfg(not(feature = "gemini"))]
fn gemini_unavailable() -> SentimentError {
    SentimentError::config("this binary was built without the `gemini` feature")
}

fn build_compiler(args: &SentimentArgs, config: &CompilerConfig) -> Result<SentimentCompiler> {
    let lexicon = build_lexicon(config)?;
    let classifier = build_classifier(args, &lexicon)?;
    info!(
        "Using classifier '{}' with policy {:?}",
        classifier.name(),
        config.inconsistency_policy
    );
    SentimentCompiler::with_config(config, classifier)
}

/// Run all three phases on one sentence.
async fn analyze(sentence: &str, config: &CompilerConfig, args: &SentimentArgs) -> Result<()> {
    let compiler = build_compiler(args, config)?;
    let staged = compiler.analyze_staged(sentence).await;

    output_result("Analysis", &AnalysisView::from(&staged), args)?;

    // The front-end results are already printed; still report the failure.
    match staged.sentiment {
        SentimentOutcome::Failed(e) => Err(e),
        _ => Ok(()),
    }
}

/// Show the lexical phase word by word.
fn tokenize(sentence: &str, args: &SentimentArgs) -> Result<()> {
    let breakdown = LexicalAnalyzer::new().breakdown(sentence);
    output_result("Lexical analysis", &breakdown, args)
}

/// Show the syntax phase verdict.
fn check_syntax(sentence: &str, config: &CompilerConfig, args: &SentimentArgs) -> Result<()> {
    let validator = crate::syntax::SyntaxValidator::with_rules(config.syntax.clone())?;
    output_result("Syntax analysis", &validator.check(sentence), args)
}

/// Validate an entry and hand it to the lexicon updater.
async fn update(
    update_args: UpdateLexiconArgs,
    config: &CompilerConfig,
    args: &SentimentArgs,
) -> Result<()> {
    let updater = build_updater(args, build_lexicon(config)?)?;
    let entry = LexiconEntry::new(update_args.word, update_args.score);
    let ack = update_lexicon(updater.as_ref(), &entry).await?;
    output_result("Lexicon update", &ack, args)
}

/// Analyze one sentence per input line with bounded concurrency.
async fn batch(batch_args: BatchArgs, config: &CompilerConfig, args: &SentimentArgs) -> Result<()> {
    let reader: Box<dyn BufRead> = if batch_args.reads_stdin() {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(&batch_args.input)?))
    };

    let mut sentences = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if batch_args.skip_blank && line.trim().is_empty() {
            continue;
        }
        sentences.push(line);
    }
    info!(
        "Analyzing {} sentences with concurrency {}",
        sentences.len(),
        config.batch_concurrency
    );

    let compiler = build_compiler(args, config)?;
    let compiler = &compiler;
    let start_time = Instant::now();

    let results: Vec<AnalysisView> = stream::iter(sentences)
        .map(|sentence| async move {
            let staged = compiler.analyze_staged(&sentence).await;
            AnalysisView::from(&staged)
        })
        .buffered(config.batch_concurrency)
        .collect()
        .await;

    let failed = results.iter().filter(|v| v.error.is_some()).count();
    let summary = BatchResults {
        total: results.len(),
        failed,
        duration_ms: start_time.elapsed().as_millis() as u64,
        results,
    };

    output_result("Batch analysis", &summary, args)
}
