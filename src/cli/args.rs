//! Command line argument parsing for the sentiment compiler CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::sentiment::InconsistencyPolicy;

/// sentiment-compiler - Staged sentiment analysis of sentences
#[derive(Parser, Debug, Clone)]
#[command(name = "sentiment-compiler")]
#[command(about = "Lexical, syntax and semantic analysis of a sentence's sentiment")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SentimentArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Semantic classifier backend
    #[arg(long, default_value = "local", global = true)]
    pub classifier: ClassifierKind,

    /// How to resolve a classifier label that disagrees with its score
    #[arg(long, global = true)]
    pub policy: Option<InconsistencyPolicy>,

    /// Classifier timeout in milliseconds
    #[arg(long, value_name = "MILLIS", global = true)]
    pub timeout_ms: Option<u64>,

    /// Seed the local lexicon (repeatable)
    #[arg(long = "lexicon", value_name = "WORD=SCORE", global = true)]
    pub lexicon: Vec<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SentimentArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run all three phases on a sentence
    Analyze(SentenceArgs),

    /// Run the lexical phase and show every word's fate
    Tokenize(SentenceArgs),

    /// Run the syntax phase
    #[command(name = "check-syntax")]
    CheckSyntax(SentenceArgs),

    /// Validate a lexicon entry and hand it to the lexicon updater
    #[command(name = "update-lexicon")]
    UpdateLexicon(UpdateLexiconArgs),

    /// Analyze one sentence per line of a file
    Batch(BatchArgs),
}

/// Arguments for commands that take a single sentence
#[derive(Parser, Debug, Clone)]
pub struct SentenceArgs {
    /// The sentence to analyze
    #[arg(value_name = "SENTENCE")]
    pub sentence: String,
}

/// Arguments for updating the lexicon
#[derive(Parser, Debug, Clone)]
pub struct UpdateLexiconArgs {
    /// Word to add or update
    #[arg(short, long)]
    pub word: String,

    /// Sentiment score between -1 and 1
    #[arg(short, long, allow_negative_numbers = true)]
    pub score: f64,
}

/// Arguments for batch analysis
#[derive(Parser, Debug, Clone)]
pub struct BatchArgs {
    /// Input file with one sentence per line ("-" for stdin)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Number of sentences analyzed concurrently (overrides the config file)
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,

    /// Skip blank lines instead of analyzing them
    #[arg(long)]
    pub skip_blank: bool,
}

impl BatchArgs {
    /// Whether input comes from stdin
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }
}

/// Semantic classifier backends
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierKind {
    /// Built-in lexicon classifier
    Local,
    /// Gemini API (requires the `gemini` feature)
    Gemini,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
