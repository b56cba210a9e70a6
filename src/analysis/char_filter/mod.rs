//! Char filters that normalize the raw sentence before tokenization.
//!
//! - [`lowercase::LowercaseCharFilter`] - Lowercases the whole sentence
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement or removal

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod pattern_replace;

pub use lowercase::LowercaseCharFilter;
pub use pattern_replace::PatternReplaceCharFilter;
