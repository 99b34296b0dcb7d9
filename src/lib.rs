//! # jaro-winkler-trie
//!
//! One-to-many Jaro-Winkler matching over a length-indexed radix trie.
//! Finds every stored term at least as similar to a query as a threshold,
//! skipping whole subtrees whose best possible score is too low.
//!
//! ## Features
//! - Exact Jaro-Winkler scores, identical to comparing each term separately
//! - Branch-and-bound search, one pass per distinct term length
//! - Dictionary (`TrieMap`) and set (`TrieSet`, with removal) tries
//! - Sorted bulk loading
//!
//! ## Example
//! ```rust
//! use jaro_winkler_trie::JaroWinklerSimilarity;
//!
//! let matcher = JaroWinklerSimilarity::of_map([
//!     ("Ronald Alexander", 1),
//!     ("Roland Alexander", 2),
//!     ("Colleen D'Agostino", 3),
//! ]);
//!
//! let matches = matcher.match_query("Ronald Alexander", 0.95);
//! assert_eq!(matches.len(), 2);
//! assert_eq!(matches[&1], 1.0);
//! ```

mod arena;
mod bitmap;
mod constants;
mod error;
mod jaro_winkler;
mod matcher;
mod similarity;
mod trie;

pub use constants::{BOOST_FACTOR, BOOST_THRESHOLD, COMMON_PREFIX_LENGTH_LIMIT};
pub use error::{Error, Result};
pub use jaro_winkler::{similarity, similarity_unbounded, JaroWinklerSimilarity};
pub use matcher::{match_trie, match_trie_with_stats, MatchStats};
pub use similarity::{jaro, jaro_winkler, window_size};
pub use trie::{
    LengthSet, Lengths, MapChildren, MapIter, MapNode, PopulatedNodes, SetChildren, SetIter,
    SetNode, Singleton, SingletonNode, Trie, TrieMap, TrieNode, TrieSet,
};
