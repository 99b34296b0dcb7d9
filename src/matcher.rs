//! Branch-and-bound Jaro-Winkler search over a [`Trie`].
//!
//! The trie is searched once per distinct key length `L`. Along each path the
//! search pairs the term characters seen so far with query characters the way
//! the classical Jaro algorithm does, and keeps bounds on the eventual score
//! of every key below the current node:
//! - `min_common`: pairs already made, a lower bound on common characters
//! - `max_common`: `min_common` plus the pairs still possible
//! - `min_half_transpositions`: out-of-order pairs whose query position can no
//!   longer change
//! - `max_common_prefix`: shrinks at the first prefix mismatch
//!
//! Scoring these bounds gives an upper bound on the similarity of any key of
//! length `L` in the subtree. Subtrees whose bound falls below the threshold
//! are skipped entirely. At depth `L` the bounds are exact.

use core::hash::Hash;
use core::ops::AddAssign;
use std::collections::HashMap;

use tracing::trace;

use crate::constants::COMMON_PREFIX_LENGTH_LIMIT;
use crate::similarity::{jaro_winkler, window_size};
use crate::trie::{Trie, TrieNode};

/// Node counts of one search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MatchStats {
    /// Nodes whose bounds were evaluated
    pub visited: usize,

    /// Nodes whose subtree was skipped because the bound fell below the
    /// threshold
    pub pruned: usize,

    /// Populated nodes reported as matches
    pub emitted: usize,
}

impl AddAssign for MatchStats {
    fn add_assign(&mut self, other: MatchStats) {
        self.visited += other.visited;
        self.pruned += other.pruned;
        self.emitted += other.emitted;
    }
}

/// Find all keys of `trie` whose Jaro-Winkler similarity to `query` is at
/// least `threshold`.
///
/// # Arguments
/// * `trie` - Trie to search
/// * `query` - String compared against every stored key
/// * `threshold` - Minimum similarity; values outside `[0, 1]` are accepted
///
/// # Returns
/// Value of every matching key mapped to its exact similarity
///
/// # Example
/// ```rust
/// use jaro_winkler_trie::{match_trie, TrieSet};
///
/// let names: TrieSet = ["Roland", "Ronald", "Rolf"].into_iter().collect();
/// let matches = match_trie(&names, "Ronald", 0.9);
///
/// assert_eq!(matches.len(), 2);
/// assert_eq!(matches["Ronald"], 1.0);
/// ```
pub fn match_trie<T>(trie: &T, query: &str, threshold: f64) -> HashMap<T::Value, f64>
where
    T: Trie,
    T::Value: Eq + Hash,
{
    match_trie_with_stats(trie, query, threshold).0
}

/// Like [`match_trie`], also reporting how many nodes were visited and pruned.
pub fn match_trie_with_stats<T>(
    trie: &T,
    query: &str,
    threshold: f64,
) -> (HashMap<T::Value, f64>, MatchStats)
where
    T: Trie,
    T::Value: Eq + Hash,
{
    let query: Vec<char> = query.chars().collect();
    let root = trie.root();

    let mut results = HashMap::new();
    let mut total = MatchStats::default();

    for length in root.contained_lengths() {
        let mut search = Search::new(&query, length, threshold);
        search.visit(root, Branch::new(&query, length), &mut results);

        trace!(
            length,
            window = search.window,
            visited = search.stats.visited,
            pruned = search.stats.pruned,
            emitted = search.stats.emitted,
            "searched key length"
        );
        total += search.stats;
    }

    (results, total)
}

/// Search state shared by all branches of one key length.
struct Search<'q> {
    query: &'q [char],

    /// Target key length
    length: usize,

    /// Jaro window radius for the query and `length`
    window: usize,

    threshold: f64,

    /// Term characters in the order they were paired.
    ///
    /// Shared between branches: a branch only reads entries below its own
    /// `min_common`, which its siblings never overwrite.
    common_chars_term: Vec<char>,

    stats: MatchStats,
}

/// Per-path state, copied when the search forks into several children.
#[derive(Debug, Clone)]
struct Branch {
    min_common: usize,
    min_half_transpositions: usize,
    max_common_prefix: usize,

    /// Entries of `common_chars_term` already compared against the query
    checked: usize,

    /// Query positions paired with a term character
    assigned_query: Vec<bool>,
}

impl Branch {
    fn new(query: &[char], length: usize) -> Self {
        Self {
            min_common: 0,
            min_half_transpositions: 0,
            max_common_prefix: COMMON_PREFIX_LENGTH_LIMIT.min(query.len()).min(length),
            checked: 0,
            assigned_query: vec![false; query.len()],
        }
    }
}

impl<'q> Search<'q> {
    fn new(query: &'q [char], length: usize, threshold: f64) -> Self {
        Self {
            query,
            length,
            window: window_size(query.len(), length),
            threshold,
            common_chars_term: vec!['\0'; query.len().min(length)],
            stats: MatchStats::default(),
        }
    }

    /// Compare the query character at `position` against the next paired
    /// term character, if the query position is paired.
    #[inline]
    fn check_order(&self, branch: &mut Branch, position: usize) {
        if branch.assigned_query[position] {
            if self.query[position] != self.common_chars_term[branch.checked] {
                branch.min_half_transpositions += 1;
            }
            branch.checked += 1;
        }
    }

    fn visit<'a, N>(&mut self, node: N, mut branch: Branch, results: &mut HashMap<N::Value, f64>)
    where
        N: TrieNode<'a>,
        N::Value: Eq + Hash,
    {
        if !node.contains_length(self.length) {
            return;
        }
        self.stats.visited += 1;

        let query_length = self.query.len();
        let window = self.window;
        let depth = node.depth();
        let symbol = node.symbol();
        let key_length = depth + symbol.len();

        // Term positions are 1-based
        for position in depth + 1..=key_length {
            let ch = symbol[position - 1 - depth];
            let lo = (position - 1).saturating_sub(window);
            let hi = (position + window).min(query_length);

            if position <= branch.max_common_prefix && self.query[position - 1] != ch {
                branch.max_common_prefix = position - 1;
            }

            if let Some(paired) =
                (lo..hi).find(|&i| !branch.assigned_query[i] && self.query[i] == ch)
            {
                branch.assigned_query[paired] = true;
                self.common_chars_term[branch.min_common] = ch;
                branch.min_common += 1;
            }

            // Query position `lo` has left the window of every later term
            // position, so its pairing is final
            if window < position && position - window <= query_length {
                self.check_order(&mut branch, lo);
            }
        }

        let hi_total = (self.length + window).min(query_length);
        let lo = key_length.saturating_sub(window + 1);
        let assignable_query = (lo..hi_total)
            .filter(|&i| !branch.assigned_query[i])
            .count();
        let assignable_term = self.length - key_length;
        let max_common = assignable_query.min(assignable_term) + branch.min_common;

        let complete = key_length == self.length;
        if complete {
            for position in key_length.saturating_sub(window)..hi_total {
                self.check_order(&mut branch, position);
            }
        }

        let max_similarity = jaro_winkler(
            max_common,
            query_length,
            self.length,
            branch.min_half_transpositions,
            branch.max_common_prefix,
        );

        if max_similarity < self.threshold {
            self.stats.pruned += 1;
            return;
        }

        if complete {
            if node.is_populated() {
                if let Ok(value) = node.value() {
                    self.stats.emitted += 1;
                    results
                        .entry(value)
                        .and_modify(|score: &mut f64| *score = score.max(max_similarity))
                        .or_insert(max_similarity);
                }
            }
            return;
        }

        let mut children = node.children().peekable();
        while let Some(child) = children.next() {
            if children.peek().is_some() {
                self.visit(child, branch.clone(), results);
            } else {
                self.visit(child, branch, results);
                break;
            }
        }
    }
}
