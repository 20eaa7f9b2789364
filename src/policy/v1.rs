//! Qualifying policy v1: endorsement flag or long, question-free text.
//!
//! A node counts towards its author's tally when it is endorsed, or when it
//! is unendorsed but longer than `min_unendorsed_chars` characters and
//! contains no `question_mark`.
//!
//! Length is measured in Unicode scalar values, so accented names and
//! non-Latin text are not penalised for their UTF-8 width.

use serde::{Deserialize, Serialize};
use crate::canonical::canonical_hash_hex;
use crate::DEFAULT_POLICY_VERSION;

/// Unendorsed text must be strictly longer than this many characters.
pub const MIN_UNENDORSED_CHARS: usize = 100;

/// Character whose presence marks unendorsed text as a question.
pub const QUESTION_MARK: char = '?';

/// Length of a text in characters. Empty text has length zero.
pub fn text_length(text: &str) -> usize {
    text.chars().count()
}

/// Whether a text reads as a question.
///
/// Empty text is treated as a question, so it can never pass the
/// unendorsed rule on its own.
pub fn contains_question(text: &str, question_mark: char) -> bool {
    text.is_empty() || text.contains(question_mark)
}

/// Classify a text/flag pair with the default constants.
pub fn is_qualifying(text: &str, endorsed: bool) -> bool {
    QualifyingPolicy::default().is_qualifying(text, endorsed)
}

/// Qualifying policy version 1.
///
/// ## Parameters
///
/// - `min_unendorsed_chars`: length an unendorsed text must exceed
/// - `question_mark`: character that disqualifies unendorsed text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifyingPolicy {
    /// Policy version identifier.
    pub version: String,
    /// Unendorsed text must be strictly longer than this.
    pub min_unendorsed_chars: usize,
    /// Disqualifying character for unendorsed text.
    pub question_mark: char,
}

impl QualifyingPolicy {
    /// Get the policy ID.
    pub fn policy_id(&self) -> &str {
        &self.version
    }

    /// Decide whether a node with this text and flag counts.
    pub fn is_qualifying(&self, text: &str, endorsed: bool) -> bool {
        if endorsed {
            return true;
        }

        text_length(text) > self.min_unendorsed_chars
            && !contains_question(text, self.question_mark)
    }

    /// Compute a hash of the policy parameters.
    pub fn params_hash(&self) -> String {
        canonical_hash_hex(self)
    }

    /// Policy with a custom threshold, for tests only.
    #[cfg(test)]
    pub fn with_threshold(min_unendorsed_chars: usize) -> Self {
        Self {
            min_unendorsed_chars,
            ..Self::default()
        }
    }
}

impl Default for QualifyingPolicy {
    fn default() -> Self {
        Self {
            version: DEFAULT_POLICY_VERSION.to_string(),
            min_unendorsed_chars: MIN_UNENDORSED_CHARS,
            question_mark: QUESTION_MARK,
        }
    }
}
