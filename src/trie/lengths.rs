//! Set of key lengths present in a subtree.

use crate::bitmap;

/// Compact set of small non-negative integers backed by a growable bitmap.
///
/// Each trie node keeps one of these for the key lengths of all populated
/// nodes in its subtree, which turns "does this branch hold a key of length
/// `n`?" into a single bit test.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LengthSet {
    words: Vec<u64>,
}

impl LengthSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self { words: Vec::new() }
    }

    /// Add a length.
    ///
    /// # Returns
    /// `true` if the length was not present before
    #[inline]
    pub fn insert(&mut self, length: usize) -> bool {
        if bitmap::is_set(&self.words, length) {
            return false;
        }
        bitmap::set_bit(&mut self.words, length);
        true
    }

    /// Remove a length.
    ///
    /// # Returns
    /// `true` if the length was present
    #[inline]
    pub fn remove(&mut self, length: usize) -> bool {
        if !bitmap::is_set(&self.words, length) {
            return false;
        }
        bitmap::clear_bit(&mut self.words, length);
        bitmap::trim(&mut self.words);
        true
    }

    /// Check membership.
    ///
    /// # Performance
    /// O(1) - single bit test
    #[inline]
    pub fn contains(&self, length: usize) -> bool {
        bitmap::is_set(&self.words, length)
    }

    /// Add every length of `other`.
    #[inline]
    pub fn union_with(&mut self, other: &LengthSet) {
        bitmap::union_into(&mut self.words, &other.words);
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }

    /// Number of distinct lengths.
    #[inline]
    pub fn len(&self) -> usize {
        bitmap::count_bits(&self.words)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Lengths in ascending order.
    pub fn iter(&self) -> Lengths<'_> {
        Lengths {
            words: &self.words,
            next: bitmap::first_set_bit(&self.words),
        }
    }
}

impl FromIterator<usize> for LengthSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = LengthSet::new();
        for length in iter {
            set.insert(length);
        }
        set
    }
}

impl<'a> IntoIterator for &'a LengthSet {
    type Item = usize;
    type IntoIter = Lengths<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over a [`LengthSet`].
#[derive(Debug, Clone)]
pub struct Lengths<'a> {
    words: &'a [u64],
    next: Option<usize>,
}

impl Iterator for Lengths<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let current = self.next?;
        self.next = bitmap::next_set_bit(self.words, current);
        Some(current)
    }
}
