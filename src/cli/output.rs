//! Output formatting for CLI commands.

use serde::Serialize;

use crate::analysis::{LexicalBreakdown, StopReason};
use crate::cli::args::{OutputFormat, SentimentArgs};
use crate::error::Result;
use crate::lexicon::LexiconAck;
use crate::pipeline::{SentimentOutcome, StagedAnalysis};
use crate::sentiment::{ContractInconsistency, SentimentPolarity};
use crate::syntax::SyntaxVerdict;

/// Types that can print themselves for a human reader.
pub trait HumanOutput {
    fn print_human(&self, args: &SentimentArgs);
}

/// Per-phase view of one analysis, including a failed semantic phase.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisView {
    pub sentence: String,
    pub tokens: Vec<String>,
    pub syntax: SyntaxVerdict,
    #[serde(rename = "sentimentPolarity", skip_serializing_if = "Option::is_none")]
    pub polarity: Option<SentimentPolarity>,
    #[serde(rename = "sentimentScore", skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inconsistency: Option<ContractInconsistency>,
    pub classifier_invoked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&StagedAnalysis> for AnalysisView {
    fn from(staged: &StagedAnalysis) -> Self {
        let result = staged.sentiment.result();
        let (inconsistency, classifier_invoked, error) = match &staged.sentiment {
            SentimentOutcome::Skipped => (None, false, None),
            SentimentOutcome::Classified(validated) => (validated.inconsistency, true, None),
            SentimentOutcome::Failed(e) => (None, true, Some(e.to_string())),
        };

        AnalysisView {
            sentence: staged.sentence.clone(),
            tokens: staged.token_words(),
            syntax: staged.syntax.clone(),
            polarity: result.map(|r| r.polarity),
            score: result.map(|r| r.score),
            inconsistency,
            classifier_invoked,
            error,
        }
    }
}

/// Result structure for batch analysis.
#[derive(Debug, Serialize)]
pub struct BatchResults {
    pub results: Vec<AnalysisView>,
    pub total: usize,
    pub failed: usize,
    pub duration_ms: u64,
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &SentimentArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            result.print_human(args);
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &SentimentArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

fn describe_syntax(verdict: &SyntaxVerdict) -> String {
    let terminal = match verdict.terminal_char {
        Some(c) => format!("ends with {c:?}"),
        None => "no final character".to_string(),
    };
    format!(
        "{} ({} words: {}, {}: {})",
        if verdict.valid { "valid" } else { "invalid" },
        verdict.word_count,
        if verdict.word_count_ok { "ok" } else { "too few" },
        terminal,
        if verdict.terminal_punctuation_ok {
            "ok"
        } else {
            "not terminal punctuation"
        }
    )
}

fn describe_sentiment(view: &AnalysisView) -> String {
    match (&view.error, view.polarity, view.score) {
        (Some(error), _, _) => format!("failed: {error}"),
        (None, Some(polarity), Some(score)) if !view.classifier_invoked => {
            format!("{polarity} ({score:.3}, no tokens to classify)")
        }
        (None, Some(polarity), Some(score)) => format!("{polarity} ({score:.3})"),
        _ => "unavailable".to_string(),
    }
}

impl HumanOutput for AnalysisView {
    fn print_human(&self, args: &SentimentArgs) {
        println!("Sentence: {}", self.sentence);
        println!("─────────");
        if self.tokens.is_empty() {
            println!("Lexical:  no tokens");
        } else {
            println!(
                "Lexical:  {} tokens: {}",
                self.tokens.len(),
                self.tokens.join(", ")
            );
        }
        println!("Syntax:   {}", describe_syntax(&self.syntax));
        println!("Semantic: {}", describe_sentiment(self));

        if let Some(inconsistency) = &self.inconsistency {
            println!("Warning:  {inconsistency} (resolved by {:?})", inconsistency.resolution);
        }
        if args.verbosity() > 1 {
            println!("Classifier invoked: {}", self.classifier_invoked);
        }
    }
}

impl HumanOutput for LexicalBreakdown {
    fn print_human(&self, args: &SentimentArgs) {
        println!("Normalized: {}", self.normalized);
        println!();
        for word in &self.words {
            let status = match word.stop_reason() {
                None => "kept",
                Some(StopReason::StopWord) => "stop word",
                Some(StopReason::TooShort) => "too short",
            };
            println!("{:>3}  {:<20} {status}", word.position, word.text);
        }

        if args.verbosity() > 0 {
            println!();
            println!(
                "{} kept, {} stop words, {} too short",
                self.kept().count(),
                self.count_stopped(StopReason::StopWord),
                self.count_stopped(StopReason::TooShort)
            );
        }
    }
}

impl HumanOutput for SyntaxVerdict {
    fn print_human(&self, _args: &SentimentArgs) {
        println!("Syntax: {}", describe_syntax(self));
    }
}

impl HumanOutput for LexiconAck {
    fn print_human(&self, _args: &SentimentArgs) {
        let status = if self.accepted { "accepted" } else { "declined" };
        println!("Lexicon update {status}: {}", self.message);
    }
}

impl HumanOutput for BatchResults {
    fn print_human(&self, args: &SentimentArgs) {
        for (i, view) in self.results.iter().enumerate() {
            let syntax = if view.syntax.valid { "valid" } else { "invalid" };
            println!(
                "{:>4}  [{syntax:<7}] {:<32} {}",
                i + 1,
                describe_sentiment(view),
                view.sentence
            );
        }

        if args.verbosity() > 0 {
            println!();
            println!(
                "Analyzed {} sentences ({} failed) in {}ms",
                self.total, self.failed, self.duration_ms
            );
        }
    }
}
