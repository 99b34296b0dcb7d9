//! Trie contract and its structural variants.
//!
//! Every variant is a compressed radix tree indexed by key length:
//! - [`TrieMap`] maps each stored string to a value and keeps an ordered
//!   child vector per node.
//! - [`TrieSet`] stores strings only and links children as first-child /
//!   next-sibling chains; it supports removal.
//! - [`Singleton`] holds exactly one entry and is used for two-string
//!   comparisons.
//!
//! The matcher only sees the read-only [`TrieNode`] view, so all variants are
//! interchangeable behind [`Trie`].

mod cursor;
mod iter;
mod lengths;
mod map;
mod set;
mod singleton;

pub use iter::PopulatedNodes;
pub use lengths::{LengthSet, Lengths};
pub use map::{MapChildren, MapIter, MapNode, TrieMap};
pub use set::{SetChildren, SetIter, SetNode, TrieSet};
pub use singleton::{Singleton, SingletonNode};

use crate::error::Result;

/// Arena index of the root node in every arena-backed variant.
pub(crate) const ROOT: u32 = 0;

/// Read-only view of one trie node.
///
/// Views are cheap `Copy` handles borrowing the trie for `'a`; navigation
/// through [`children`](TrieNode::children) yields further views.
pub trait TrieNode<'a>: Copy {
    /// Value returned for populated nodes.
    type Value;

    /// Iterator over the children in ascending order of their first character.
    type Children: Iterator<Item = Self>;

    /// Child nodes, ordered by the first character of their symbol.
    fn children(&self) -> Self::Children;

    /// `true` if some populated node in this subtree has a key of `length`.
    ///
    /// # Performance
    /// O(1) - bitmap lookup
    fn contains_length(&self, length: usize) -> bool;

    /// Distinct key lengths of populated nodes in this subtree, ascending.
    fn contained_lengths(&self) -> Vec<usize>;

    /// Number of characters on the path from the root down to, but not
    /// including, this node.
    fn depth(&self) -> usize;

    /// `true` if the key ending at this node is stored in the trie.
    fn is_populated(&self) -> bool;

    /// Full key from the root to this node.
    ///
    /// # Performance
    /// O(depth) - concatenates the symbols along the parent chain
    fn key(&self) -> String;

    /// Length of [`key`](TrieNode::key) in characters, without building it.
    fn key_length(&self) -> usize {
        self.depth() + self.symbol().len()
    }

    /// Characters this node contributes to every key passing through it.
    fn symbol(&self) -> &'a [char];

    /// Number of populated nodes in this subtree, inclusive.
    fn size(&self) -> usize;

    /// Value stored at this node.
    ///
    /// # Errors
    /// [`Error::NotFound`](crate::Error::NotFound) if the node is not populated
    fn value(&self) -> Result<Self::Value>;

    /// Populated nodes of this subtree in lexicographic key order.
    fn populated_nodes(&self) -> PopulatedNodes<'a, Self>
    where
        Self: Sized,
    {
        PopulatedNodes::new(*self)
    }
}

/// A trie that can be traversed from its root.
pub trait Trie {
    /// Value type reported for matched keys.
    type Value;

    /// Node view type.
    type Node<'a>: TrieNode<'a, Value = Self::Value>
    where
        Self: 'a;

    /// View of the root node. The root has depth 0 and an empty symbol.
    fn root(&self) -> Self::Node<'_>;
}

/// Number of leading characters shared by `a` and `b`.
#[inline]
pub(crate) fn common_prefix_len(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_prefix_len() {
        let abc: Vec<char> = "abc".chars().collect();
        let abd: Vec<char> = "abd".chars().collect();
        let empty: Vec<char> = Vec::new();

        assert_eq!(common_prefix_len(&abc, &abd), 2);
        assert_eq!(common_prefix_len(&abc, &abc), 3);
        assert_eq!(common_prefix_len(&abc, &abc[..1]), 1);
        assert_eq!(common_prefix_len(&abc, &empty), 0);
    }
}
