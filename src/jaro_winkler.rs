//! One-to-many Jaro-Winkler matching facade.

use core::hash::Hash;
use std::collections::HashMap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::matcher::match_trie_with_stats;
use crate::trie::{Singleton, Trie, TrieMap, TrieSet};

/// Matches queries against every term of a trie by Jaro-Winkler similarity.
///
/// Wraps a built [`Trie`] and an optional default threshold. All queries are
/// independent; nothing is shared or cached between them.
///
/// # Example
/// ```rust
/// use jaro_winkler_trie::JaroWinklerSimilarity;
///
/// let names = JaroWinklerSimilarity::of_set(["Ronald", "Roland", "Rolf"])
///     .with_default_threshold(0.9);
///
/// let matches = names.apply("Ronald").unwrap();
/// assert_eq!(matches.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct JaroWinklerSimilarity<T> {
    trie: T,
    default_threshold: Option<f64>,
}

impl<T: Trie> JaroWinklerSimilarity<T>
where
    T::Value: Eq + Hash,
{
    /// Wrap an already built trie, without a default threshold.
    pub fn new(trie: T) -> Self {
        Self {
            trie,
            default_threshold: None,
        }
    }

    /// Bind the threshold used by [`apply`](Self::apply).
    pub fn with_default_threshold(mut self, threshold: f64) -> Self {
        self.default_threshold = Some(threshold);
        self
    }

    #[inline]
    pub fn default_threshold(&self) -> Option<f64> {
        self.default_threshold
    }

    #[inline]
    pub fn trie(&self) -> &T {
        &self.trie
    }

    /// Terms with similarity at least `threshold` to `query`.
    ///
    /// # Returns
    /// Value of every matching term mapped to its similarity
    pub fn match_query(&self, query: &str, threshold: f64) -> HashMap<T::Value, f64> {
        let (matches, stats) = match_trie_with_stats(&self.trie, query, threshold);
        debug!(
            query_length = query.chars().count(),
            threshold,
            matches = matches.len(),
            visited = stats.visited,
            pruned = stats.pruned,
            "matched query"
        );
        matches
    }

    /// Match `query` with the default threshold.
    ///
    /// # Errors
    /// [`Error::MissingThreshold`] if no default threshold was bound
    pub fn apply(&self, query: &str) -> Result<HashMap<T::Value, f64>> {
        let threshold = self.default_threshold.ok_or(Error::MissingThreshold)?;
        Ok(self.match_query(query, threshold))
    }

    /// Match every query independently.
    ///
    /// # Returns
    /// Each distinct query mapped to its matches
    pub fn match_many<I, S>(&self, queries: I, threshold: f64) -> HashMap<String, HashMap<T::Value, f64>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        queries
            .into_iter()
            .map(|query| {
                let query = query.as_ref();
                (query.to_owned(), self.match_query(query, threshold))
            })
            .collect()
    }
}

impl<V: Clone + Eq + Hash> JaroWinklerSimilarity<TrieMap<V>> {
    /// Build a dictionary matcher reporting the value of each matched term.
    ///
    /// If a term occurs more than once, its last value is kept.
    pub fn of_map<K, I>(entries: I) -> Self
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::new(entries.into_iter().collect())
    }
}

impl JaroWinklerSimilarity<TrieSet> {
    /// Build a matcher reporting the matched terms themselves.
    pub fn of_set<S, I>(terms: I) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        Self::new(terms.into_iter().collect())
    }
}

/// Jaro-Winkler similarity of two strings, if at least `threshold`.
///
/// Runs the bounded search against a single-entry trie holding `a`, so the
/// computation stops as soon as the threshold is out of reach.
///
/// # Example
/// ```rust
/// use jaro_winkler_trie::similarity;
///
/// let score = similarity("MARTHA", "MARHTA", 0.9).unwrap();
/// assert!((score - 0.9611).abs() < 1e-4);
/// assert_eq!(similarity("MARTHA", "ZZZ", 0.9), None);
/// ```
pub fn similarity(a: &str, b: &str, threshold: f64) -> Option<f64> {
    let trie = Singleton::new(a, ());
    match_trie_with_stats(&trie, b, threshold)
        .0
        .into_values()
        .next()
}

/// Jaro-Winkler similarity of two strings, without a threshold.
pub fn similarity_unbounded(a: &str, b: &str) -> f64 {
    similarity(a, b, 0.0).unwrap_or(0.0)
}
