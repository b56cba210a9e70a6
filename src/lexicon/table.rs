//! In-memory sentiment lexicon.
//!
//! The table is replaced as a whole on every write: a writer clones the
//! current map, applies its change and swaps in the new `Arc`. Readers take a
//! snapshot and never observe a half-applied update.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};

use crate::error::Result;
use crate::lexicon::{LexiconAck, LexiconEntry, LexiconUpdater};

/// Immutable view of the lexicon at one point in time.
pub type LexiconSnapshot = Arc<HashMap<String, f64>>;

/// Built-in general-purpose English sentiment words.
const DEFAULT_ENTRIES: &[(&str, f64)] = &[
    // Positive
    ("good", 0.6),
    ("great", 0.8),
    ("excellent", 0.9),
    ("amazing", 0.9),
    ("awesome", 0.9),
    ("wonderful", 0.9),
    ("fantastic", 0.9),
    ("brilliant", 0.8),
    ("inspiring", 0.7),
    ("love", 0.8),
    ("loved", 0.8),
    ("like", 0.4),
    ("enjoy", 0.6),
    ("enjoyed", 0.6),
    ("happy", 0.7),
    ("glad", 0.5),
    ("nice", 0.5),
    ("pleasant", 0.5),
    ("beautiful", 0.7),
    ("best", 0.8),
    ("better", 0.4),
    ("fun", 0.5),
    ("perfect", 0.9),
    ("recommend", 0.6),
    ("impressive", 0.7),
    ("delightful", 0.8),
    // Negative
    ("bad", -0.6),
    ("terrible", -0.9),
    ("awful", -0.9),
    ("horrible", -0.9),
    ("poor", -0.6),
    ("worst", -0.9),
    ("worse", -0.5),
    ("hate", -0.8),
    ("hated", -0.8),
    ("boring", -0.6),
    ("sad", -0.6),
    ("angry", -0.7),
    ("disappointing", -0.7),
    ("disappointed", -0.7),
    ("annoying", -0.6),
    ("ugly", -0.6),
    ("dull", -0.5),
    ("waste", -0.7),
    ("broken", -0.6),
    ("painful", -0.7),
    ("mediocre", -0.4),
    ("fail", -0.7),
    ("failed", -0.7),
];

/// A single-writer, many-reader word→score table.
pub struct SentimentLexicon {
    table: RwLock<LexiconSnapshot>,
    write_lock: Mutex<()>,
}

impl SentimentLexicon {
    /// Create an empty lexicon.
    pub fn new() -> Self {
        Self::from_map(HashMap::new())
    }

    /// Create a lexicon with the built-in English entries.
    pub fn with_default_entries() -> Self {
        Self::from_map(
            DEFAULT_ENTRIES
                .iter()
                .map(|&(word, score)| (word.to_string(), score))
                .collect(),
        )
    }

    /// Create a lexicon from entries. Words are stored lowercase.
    ///
    /// Fails on the first entry that does not validate.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = LexiconEntry>,
    {
        let map = entries
            .into_iter()
            .map(|e| {
                e.validate()?;
                Ok((e.word.to_lowercase(), e.score))
            })
            .collect::<Result<HashMap<_, _>>>()?;
        Ok(Self::from_map(map))
    }

    fn from_map(map: HashMap<String, f64>) -> Self {
        SentimentLexicon {
            table: RwLock::new(Arc::new(map)),
            write_lock: Mutex::new(()),
        }
    }

    /// Take a consistent snapshot of the whole table.
    pub fn snapshot(&self) -> LexiconSnapshot {
        Arc::clone(&self.table.read())
    }

    /// Look up a word (case-insensitive).
    pub fn get(&self, word: &str) -> Option<f64> {
        self.table.read().get(&word.to_lowercase()).copied()
    }

    /// Insert or replace an entry, returning the previous score.
    pub fn insert(&self, entry: &LexiconEntry) -> Result<Option<f64>> {
        entry.validate()?;
        Ok(self.apply(|map| map.insert(entry.word.to_lowercase(), entry.score)))
    }

    /// Insert many entries as one atomic replacement.
    ///
    /// Nothing is written unless every entry validates.
    pub fn extend<I>(&self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = LexiconEntry>,
    {
        let entries: Vec<LexiconEntry> = entries.into_iter().collect();
        for entry in &entries {
            entry.validate()?;
        }
        self.apply(|map| {
            for entry in entries {
                map.insert(entry.word.to_lowercase(), entry.score);
            }
        });
        Ok(())
    }

    /// Remove a word, returning its score.
    pub fn remove(&self, word: &str) -> Option<f64> {
        self.apply(|map| map.remove(&word.to_lowercase()))
    }

    /// Number of words in the lexicon.
    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    /// Check if the lexicon is empty.
    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }

    /// Copy, modify and swap in the table. Writers are serialized; readers
    /// only wait for the swap itself.
    fn apply<T>(&self, change: impl FnOnce(&mut HashMap<String, f64>) -> T) -> T {
        let _writer = self.write_lock.lock();
        let mut next = HashMap::clone(&self.snapshot());
        let output = change(&mut next);
        *self.table.write() = Arc::new(next);
        output
    }
}

impl Default for SentimentLexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SentimentLexicon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentLexicon")
            .field("len", &self.len())
            .finish()
    }
}

#[async_trait]
impl LexiconUpdater for SentimentLexicon {
    async fn update(&self, entry: &LexiconEntry) -> Result<LexiconAck> {
        let message = match self.insert(entry)? {
            Some(previous) => format!(
                "Updated '{}' from {} to {}.",
                entry.word, previous, entry.score
            ),
            None => format!("Added '{}' with score {}.", entry.word, entry.score),
        };
        Ok(LexiconAck::accepted(message))
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}
