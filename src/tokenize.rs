//! Language-aware token counting for title and body text.
//!
//! The counting rule mirrors how the warehouse's token features were first
//! computed: segment the text into words, keep only purely alphabetic tokens,
//! lowercase them, drop Spanish stop words, count what is left. Tokens are
//! never stored, only counted.
//!
//! The stop-word list ships embedded in the binary (the NLTK Spanish list) and
//! can be replaced at startup with `--stop-words`. It is loaded once into a
//! read-only [`TokenizerContext`] that the pipeline borrows for the whole run.

use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, instrument};
use unicode_segmentation::UnicodeSegmentation;

use crate::error::ScrubError;

/// NLTK Spanish stop-word list, one word per line.
static SPANISH_STOP_WORDS: &str = include_str!("../resources/stopwords_es.txt");

/// Read-only linguistic context for a cleaning run.
///
/// Holds the stop-word set used when counting significant tokens. Built once
/// in `main` and passed into the pipeline, never mutated afterwards.
#[derive(Debug)]
pub struct TokenizerContext {
    stop_words: HashSet<String>,
}

impl TokenizerContext {
    /// Context with the embedded Spanish stop-word list.
    pub fn spanish() -> Result<Self, ScrubError> {
        Self::from_list(SPANISH_STOP_WORDS)
    }

    /// Context with a stop-word list read from `path`, one word per line.
    ///
    /// An unreadable file or an empty list is fatal: counting tokens without
    /// a stop-word set would silently inflate every feature.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn from_file(path: &Path) -> Result<Self, ScrubError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ScrubError::ReadStopWords {
            path: path.to_path_buf(),
            source,
        })?;
        let ctx = Self::from_list(&raw)?;
        info!(words = ctx.stop_words.len(), "Loaded stop-word list");
        Ok(ctx)
    }

    fn from_list(raw: &str) -> Result<Self, ScrubError> {
        let stop_words: HashSet<String> = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        if stop_words.is_empty() {
            return Err(ScrubError::EmptyStopWords);
        }
        Ok(TokenizerContext { stop_words })
    }

    /// Count the significant tokens in `text`.
    ///
    /// A token is significant when it survives all three filters: it is
    /// purely alphabetic, and its lowercase form is not a stop word.
    pub fn significant_tokens(&self, text: &str) -> usize {
        let count = text
            .unicode_words()
            .filter(|word| word.chars().all(char::is_alphabetic))
            .map(str::to_lowercase)
            .filter(|word| !self.stop_words.contains(word))
            .count();
        debug!(count, "Counted significant tokens");
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> TokenizerContext {
        TokenizerContext::spanish().unwrap()
    }

    #[test]
    fn test_spanish_context_loads_embedded_list() {
        let ctx = ctx();
        assert!(ctx.stop_words.contains("de"));
        assert!(ctx.stop_words.contains("cuando"));
        assert!(!ctx.stop_words.contains("gobierno"));
    }

    #[test]
    fn test_stop_words_are_not_counted() {
        // "el" and "de" are stop words; "presidente" and "gobierno" are not.
        assert_eq!(ctx().significant_tokens("el presidente de gobierno"), 2);
    }

    #[test]
    fn test_tokens_are_lowercased_before_stop_word_check() {
        // "El" must match the lowercase stop word "el".
        assert_eq!(ctx().significant_tokens("El Presidente"), 1);
    }

    #[test]
    fn test_non_alphabetic_tokens_are_discarded() {
        assert_eq!(ctx().significant_tokens("votos 2024 50% covid19 urnas"), 2);
    }

    #[test]
    fn test_empty_text_counts_zero() {
        assert_eq!(ctx().significant_tokens(""), 0);
        assert_eq!(ctx().significant_tokens("   "), 0);
    }

    #[test]
    fn test_accented_words_count_as_alphabetic() {
        // "según" is a plain word here (not in the NLTK list), "más" is a stop word.
        assert_eq!(ctx().significant_tokens("según más encuestas"), 2);
    }

    #[test]
    fn test_count_bounded_by_word_count() {
        let text = "la reforma electoral avanza en el congreso";
        let words = text.unicode_words().count();
        assert!(ctx().significant_tokens(text) <= words);
    }

    #[test]
    fn test_empty_list_is_rejected() {
        assert!(matches!(
            TokenizerContext::from_list("\n  \n"),
            Err(ScrubError::EmptyStopWords)
        ));
    }
}
