//! Stop-word sets
//!
//! Wraps the `stop-words` crate lists in a lookup set. The set is loaded
//! once per pipeline instance and never mutated afterwards.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

/// An immutable set of language-specific filler tokens
#[derive(Debug, Clone)]
pub struct StopWords {
    words: FxHashSet<String>,
}

impl Default for StopWords {
    fn default() -> Self {
        Self::english()
    }
}

impl StopWords {
    pub fn english() -> Self {
        Self::for_language(LANGUAGE::English)
    }

    pub fn for_language(language: LANGUAGE) -> Self {
        Self {
            words: get(language).into_iter().collect(),
        }
    }

    /// Build a set from an explicit word list.
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Extend the set with additional words.
    pub fn with_extra(mut self, words: &[&str]) -> Self {
        for word in words {
            self.words.insert(word.to_string());
        }
        self
    }

    /// Exact-match lookup. Tokens reach this already lowercased in the full
    /// normalization pipeline; the standalone stop-word stage compares
    /// whatever casing the cell currently holds.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
