//! # Time Extraction
//!
//! Boundary to the natural-language date engine. The core consumes the
//! [`TimeExtractor`] trait; a regex-based extractor for common relative
//! phrases ships in [`relative`], and a richer engine can be plugged in
//! without touching the reminder core.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod relative;

use chrono::{DateTime, Utc};

pub use relative::RelativeTimeExtractor;

/// One time phrase found in the input, with the substring that produced it.
/// The substring is what the splitter cuts the text on.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeMatch {
    pub substring: String,
    pub instant: DateTime<Utc>,
}

/// Resolves time phrases in free text relative to a reference instant.
///
/// Matches must be ordered by position of first occurrence; the result may
/// be empty.
pub trait TimeExtractor: Send + Sync {
    fn extract(&self, text: &str, reference: DateTime<Utc>) -> Vec<TimeMatch>;
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Extractor that returns a canned list of matches, for command-flow
    /// tests that should not depend on phrase parsing.
    pub struct FixedExtractor(pub Vec<TimeMatch>);

    impl TimeExtractor for FixedExtractor {
        fn extract(&self, _text: &str, _reference: DateTime<Utc>) -> Vec<TimeMatch> {
            self.0.clone()
        }
    }
}
