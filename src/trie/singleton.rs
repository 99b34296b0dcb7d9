//! Single-entry trie used to compare two strings.

use core::fmt;

use crate::error::{Error, Result};
use crate::trie::{Trie, TrieNode};

/// Trie holding exactly one key.
///
/// A non-empty key is stored in a single leaf below an unpopulated root; the
/// empty key is stored at the root itself. The matcher treats it like any
/// other trie, so comparing two strings runs the same bounded search as a
/// dictionary lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Singleton<V> {
    key: Vec<char>,
    value: V,
}

impl<V> Singleton<V> {
    pub fn new(key: &str, value: V) -> Self {
        Self {
            key: key.chars().collect(),
            value,
        }
    }

    /// The stored key's length in characters.
    #[inline]
    pub fn key_length(&self) -> usize {
        self.key.len()
    }
}

impl Singleton<String> {
    /// Singleton whose value is its own key.
    pub fn of(key: &str) -> Self {
        Self::new(key, key.to_owned())
    }
}

impl<V: Clone> Trie for Singleton<V> {
    type Value = V;
    type Node<'a>
        = SingletonNode<'a, V>
    where
        Self: 'a;

    fn root(&self) -> SingletonNode<'_, V> {
        SingletonNode {
            trie: self,
            leaf: false,
        }
    }
}

/// Read-only view of the root or the leaf of a [`Singleton`].
pub struct SingletonNode<'a, V> {
    trie: &'a Singleton<V>,
    leaf: bool,
}

impl<V> Clone for SingletonNode<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for SingletonNode<'_, V> {}

impl<V: fmt::Debug> fmt::Debug for SingletonNode<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingletonNode")
            .field("leaf", &self.leaf)
            .field("trie", self.trie)
            .finish()
    }
}

impl<'a, V: Clone> TrieNode<'a> for SingletonNode<'a, V> {
    type Value = V;
    type Children = core::option::IntoIter<SingletonNode<'a, V>>;

    fn children(&self) -> Self::Children {
        let leaf = (!self.leaf && !self.trie.key.is_empty()).then_some(SingletonNode {
            trie: self.trie,
            leaf: true,
        });
        leaf.into_iter()
    }

    #[inline]
    fn contains_length(&self, length: usize) -> bool {
        length == self.trie.key.len()
    }

    fn contained_lengths(&self) -> Vec<usize> {
        vec![self.trie.key.len()]
    }

    #[inline]
    fn depth(&self) -> usize {
        0
    }

    #[inline]
    fn is_populated(&self) -> bool {
        self.leaf || self.trie.key.is_empty()
    }

    fn key(&self) -> String {
        self.symbol().iter().collect()
    }

    #[inline]
    fn symbol(&self) -> &'a [char] {
        if self.leaf {
            &self.trie.key
        } else {
            &[]
        }
    }

    #[inline]
    fn size(&self) -> usize {
        1
    }

    fn value(&self) -> Result<V> {
        if self.is_populated() {
            Ok(self.trie.value.clone())
        } else {
            Err(Error::not_found(self.key()))
        }
    }
}
