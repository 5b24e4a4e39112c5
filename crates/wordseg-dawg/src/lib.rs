//! Prefix dictionary for wordseg.
//!
//! This crate provides a minimal DAWG (directed acyclic word graph) built
//! incrementally from sorted words. Besides membership it answers the one
//! query the segmenter needs: every dictionary word that is a prefix of a
//! given string, each with a dense canonical index that can key a side table
//! (the weighted model keeps its weights there).
//!
//! # Architecture
//!
//! - [`builder`] -- incremental construction from sorted input with suffix
//!   sharing
//! - [`dawg`] -- frozen graph with word counts for perfect hashing

pub mod builder;
pub mod dawg;

pub use builder::DawgBuilder;
pub use dawg::Dawg;

use wordseg_core::PrefixMatch;

/// Error type for DAWG construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DawgError {
    #[error("cannot add an empty word")]
    EmptyWord,
    #[error("duplicate word {word:?}")]
    Duplicate { word: String },
    #[error("word {word:?} added after {previous:?}; words must be added in sorted order")]
    OutOfOrder { previous: String, word: String },
}

/// Capability of finding every dictionary word that starts a string.
///
/// Implementations must be deterministic: the same text against the same
/// dictionary yields the same matches in the same order.
pub trait PrefixDictionary {
    /// Return every dictionary word that is a prefix of `text`, shortest
    /// first, each with its canonical index.
    fn find_prefixes<'a>(&self, text: &'a str) -> Vec<PrefixMatch<'a>>;

    /// Canonical index of `word`, or `None` if it is not in the dictionary.
    fn index_of(&self, word: &str) -> Option<usize> {
        self.find_prefixes(word)
            .into_iter()
            .find(|m| m.word.len() == word.len())
            .map(|m| m.index)
    }

    /// Number of words in the dictionary (one past the largest canonical index).
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
