//! Segmentation of unspaced text (such as Chinese) into its most probable
//! sequence of words.
//!
//! Every byte offset of the input is a graph node and every dictionary word
//! starting at an offset is an edge weighted by the word's `-log2`
//! probability. The segmentation is the cheapest path from the start to the
//! end of the input, found with Dijkstra's algorithm while discovering the
//! graph lazily. Offsets where no dictionary word starts get a zero-cost
//! single-codepoint edge, and runs of such codepoints are merged into one
//! segment.
//!
//! # Architecture
//!
//! - [`model`] -- [`WordModel`] (dictionary plus weights) and the
//!   [`WeightedModel`] query trait the segmenter depends on
//! - [`segmenter`] -- the shortest-path search and path reconstruction
//! - [`loader`] -- frequency table parsing and explicit model loaders
//!
//! # Example
//!
//! ```
//! use wordseg::{Segmenter, WordModel};
//!
//! let mut model = WordModel::new();
//! for (word, freq) in [
//!     ("他", 1.0), ("儿", 1.0), ("儿子", 2.0), ("叫", 1.0), ("名", 1.0),
//!     ("名字", 2.0), ("四", 1.0), ("子", 1.0), ("字", 1.0), ("岁", 1.0),
//!     ("的", 1.0),
//! ] {
//!     model.add_word(word, freq).unwrap();
//! }
//! model.finish().unwrap();
//!
//! let segmenter = Segmenter::new(&model);
//! assert_eq!(
//!     segmenter.segment("我儿子四岁。他的名字叫Zack。"),
//!     ["我", "儿子", "四", "岁", "。", "他", "的", "名字", "叫", "Zack。"]
//! );
//! ```

pub mod loader;
pub mod model;
pub mod segmenter;

pub use loader::{BufferLoader, FileLoader, LoadError, ModelLoader};
pub use model::{ModelError, WeightedModel, WordModel};
pub use segmenter::{SearchStats, Segmenter};
pub use wordseg_core::WordWeight;
pub use wordseg_dawg::{Dawg, PrefixDictionary};
