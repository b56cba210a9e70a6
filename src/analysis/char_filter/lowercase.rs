//! Lowercase char filter.

use super::CharFilter;

/// A char filter that lowercases the entire input.
///
/// Runs before tokenization so that stop-word matching is case-insensitive.
#[derive(Clone, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    /// Create a new lowercase char filter.
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, input: &str) -> String {
        if input.is_ascii() {
            input.to_ascii_lowercase()
        } else {
            input.to_lowercase()
        }
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_char_filter() {
        let filter = LowercaseCharFilter::new();
        assert_eq!(filter.filter("The Movie WAS Good."), "the movie was good.");
        assert_eq!(filter.filter("ÉCOLE Très"), "école très");
        assert_eq!(filter.filter(""), "");
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(LowercaseCharFilter::new().name(), "lowercase");
    }
}
