//! Interactive analysis session.
//!
//! A session tracks the most recent submission. When a newer sentence is
//! submitted while an older one is still waiting on the classifier, the older
//! request resolves to [`SentimentError::OperationCancelled`] so its result can
//! never be shown against the newer sentence.

use std::sync::Arc;

use log::debug;
use tokio::sync::watch;

use crate::error::{Result, SentimentError};
use crate::pipeline::compiler::SentimentCompiler;
use crate::pipeline::report::AnalysisReport;

/// A sequence of submissions where only the latest one may complete.
pub struct AnalysisSession {
    compiler: Arc<SentimentCompiler>,
    generation: watch::Sender<u64>,
}

impl AnalysisSession {
    /// Create a session around a compiler.
    pub fn new(compiler: Arc<SentimentCompiler>) -> Self {
        let (generation, _) = watch::channel(0);
        AnalysisSession {
            compiler,
            generation,
        }
    }

    pub fn compiler(&self) -> &Arc<SentimentCompiler> {
        &self.compiler
    }

    /// Number of sentences submitted so far.
    pub fn generation(&self) -> u64 {
        *self.generation.borrow()
    }

    /// Analyze a sentence, superseding any submission still in flight.
    pub async fn submit(&self, sentence: &str) -> Result<AnalysisReport> {
        let mut generation = 0;
        self.generation.send_modify(|g| {
            *g += 1;
            generation = *g;
        });
        let mut newer = self.generation.subscribe();

        let superseded = || {
            debug!("Analysis #{generation} superseded by a newer submission");
            SentimentError::cancelled(format!(
                "analysis #{generation} was superseded by a newer sentence"
            ))
        };

        tokio::select! {
            staged = self.compiler.analyze_staged(sentence) => {
                if *self.generation.borrow() != generation {
                    return Err(superseded());
                }
                staged.into_report()
            }
            _ = newer.wait_for(|latest| *latest != generation) => Err(superseded()),
        }
    }
}

impl std::fmt::Debug for AnalysisSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisSession")
            .field("compiler", &self.compiler)
            .field("generation", &self.generation())
            .finish()
    }
}
