//! Free-text normalization
//!
//! The full transform lowercases, strips single-letter tokens and URLs,
//! squashes everything non-word to spaces, then tokenizes: short tokens go,
//! survivors are lemmatized, stop words go, and the rest are rejoined with
//! single spaces. Applied to already-normalized text it is a no-op as long
//! as the surviving lemmas stay above the token-length floor.

use crate::lemmatize::Lemmatizer;
use crate::stopwords::StopWords;
use regex::Regex;
use std::sync::OnceLock;

/// Tokens at or below this char count are discarded.
const MIN_TOKEN_CHARS: usize = 4;

static SINGLE_CHAR_REGEX: OnceLock<Regex> = OnceLock::new();
static URL_REGEX: OnceLock<Regex> = OnceLock::new();
static NON_WORD_REGEX: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();

fn single_char_regex() -> &'static Regex {
    SINGLE_CHAR_REGEX
        .get_or_init(|| Regex::new(r"\s+[a-zA-Z]\s+").expect("failed to compile single-char regex"))
}

fn url_regex() -> &'static Regex {
    URL_REGEX.get_or_init(|| {
        Regex::new(r"http\S+|www\S+|https\S+").expect("failed to compile url regex")
    })
}

fn non_word_regex() -> &'static Regex {
    NON_WORD_REGEX.get_or_init(|| Regex::new(r"\W").expect("failed to compile non-word regex"))
}

fn whitespace_regex() -> &'static Regex {
    WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").expect("failed to compile whitespace regex"))
}

/// Text normalizer bundling the stop-word set and lemmatizer
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    stop_words: StopWords,
    lemmatizer: Lemmatizer,
}

impl TextNormalizer {
    pub fn english() -> Self {
        Self::default()
    }

    pub fn with_parts(stop_words: StopWords, lemmatizer: Lemmatizer) -> Self {
        Self {
            stop_words,
            lemmatizer,
        }
    }

    /// The full normalization transform.
    pub fn normalize(&self, text: &str) -> String {
        let text = text.to_lowercase();
        let text = single_char_regex().replace_all(&text, " ");
        let text = url_regex().replace_all(&text, "");
        let text = non_word_regex().replace_all(&text, " ");
        let text = whitespace_regex().replace_all(&text, " ");

        text.trim()
            .split_whitespace()
            .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
            .map(|token| self.lemmatizer.lemmatize(token))
            .filter(|token| !self.stop_words.contains(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Only the stop-word step, on the cell's current whitespace tokens.
    pub fn strip_stop_words(&self, text: &str) -> String {
        text.split_whitespace()
            .filter(|token| !self.stop_words.contains(*token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Only the lemmatization step, on the cell's current whitespace tokens.
    pub fn lemmatize_tokens(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|token| self.lemmatizer.lemmatize(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
