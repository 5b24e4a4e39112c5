//! Shared types for the wordseg crates.
//!
//! - [`types`] -- value types passed between the dictionary, the weighted
//!   model and the segmenter
//! - [`enums`] -- per-offset node status used by the search
//! - [`character`] -- codepoint helpers over UTF-8 byte offsets

pub mod character;
pub mod enums;
pub mod types;

pub use enums::NodeStatus;
pub use types::{PrefixMatch, WordWeight};
