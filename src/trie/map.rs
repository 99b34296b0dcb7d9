//! Dictionary variant: a compressed trie mapping strings to values.

use core::fmt;

use tracing::debug;

use crate::arena::Arena;
use crate::constants::EMPTY;
use crate::error::{Error, Result};
use crate::trie::cursor::InsertCursor;
use crate::trie::{common_prefix_len, LengthSet, Trie, TrieNode, ROOT};

/// Arena record of one [`TrieMap`] node.
///
/// # Invariants
/// - `children` sorted strictly ascending by the first character of their
///   symbol
/// - a non-root node without a value has at least two children
/// - `size` and `lengths` summarize the populated nodes of the subtree
#[derive(Debug, Clone)]
struct Entry<V> {
    /// Characters contributed by this node (empty only at the root)
    symbol: Vec<char>,

    /// Key length of the parent
    depth: usize,

    /// Stored value; `Some` exactly when the node is populated
    value: Option<V>,

    /// Populated nodes in this subtree, inclusive
    size: usize,

    /// Key lengths of populated nodes in this subtree, inclusive
    lengths: LengthSet,

    /// Parent index, `EMPTY` at the root
    parent: u32,

    /// Child indices ordered by first symbol character
    children: Vec<u32>,
}

impl<V> Entry<V> {
    fn root() -> Self {
        Entry {
            symbol: Vec::new(),
            depth: 0,
            value: None,
            size: 0,
            lengths: LengthSet::new(),
            parent: EMPTY,
            children: Vec::new(),
        }
    }

    #[inline]
    fn key_length(&self) -> usize {
        self.depth + self.symbol.len()
    }
}

/// Compressed trie mapping strings to values of type `V`.
///
/// Nodes live in an [`Arena`] and refer to each other by index. Each node keeps
/// an ordered vector of its children, so child lookup is a binary search on
/// the first character.
///
/// Keys are compared per Unicode scalar value; all lengths count `char`s.
///
/// # Example
/// ```rust
/// use jaro_winkler_trie::TrieMap;
///
/// let mut map = TrieMap::new();
/// assert_eq!(map.insert("abc", 1), None);
/// assert_eq!(map.insert("abc", 2), Some(1));
/// assert_eq!(map.get("abc"), Some(&2));
/// assert_eq!(map.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct TrieMap<V> {
    nodes: Arena<Entry<V>>,
}

impl<V> TrieMap<V> {
    /// Create an empty map holding only the root node.
    pub fn new() -> Self {
        let mut nodes = Arena::new();
        let root = nodes.alloc(Entry::root());
        debug_assert_eq!(root, ROOT);
        Self { nodes }
    }

    /// Number of stored keys.
    ///
    /// # Performance
    /// O(1) - size of the root subtree
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.get(ROOT).size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of nodes, including the root and pure branching nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Insert a key, returning the previous value if the key was present.
    ///
    /// Performs exactly one of:
    /// - overwrite the value of the node whose key equals `key`
    /// - append a new leaf below the node whose key is the longest prefix
    /// - split a node whose symbol extends past `key`, the new intermediate
    ///   node then holds the value
    /// - split a node at the point of divergence and add `key` as a sibling
    ///   branch of the remainder
    ///
    /// # Performance
    /// O(key length · log(alphabet)) - binary search per level
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        let key: Vec<char> = key.chars().collect();
        self.insert_from(ROOT, 0, &key, value).1
    }

    /// Insert many entries.
    ///
    /// Entries are sorted by key (stable, so the last of several equal keys
    /// wins) and inserted through a cursor that resumes each descent at the
    /// deepest node shared with the previous key.
    pub fn bulk_insert<K, I>(&mut self, entries: I)
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut entries: Vec<(Vec<char>, V)> = entries
            .into_iter()
            .map(|(key, value)| (key.as_ref().chars().collect(), value))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let mut cursor = InsertCursor::new();
        for (key, value) in entries {
            let (start, matched) = cursor.seek(&key);
            let (node, _) = self.insert_from(start, matched, &key, value);
            let below = self.path_between(start, node);
            cursor.advance(&key, below);
        }

        debug!(
            keys = self.len(),
            nodes = self.node_count(),
            lengths = self.nodes.get(ROOT).lengths.len(),
            "bulk loaded trie map"
        );
    }

    /// Get the value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        let key: Vec<char> = key.chars().collect();
        self.find(&key)
            .and_then(|index| self.nodes.get(index).value.as_ref())
    }

    /// Get the value stored for `key`.
    ///
    /// # Errors
    /// [`Error::NotFound`] if `key` is not stored
    pub fn value_of(&self, key: &str) -> Result<&V> {
        self.get(key).ok_or_else(|| Error::not_found(key))
    }

    /// Check if `key` is stored.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Distinct lengths of stored keys, ascending.
    pub fn contained_lengths(&self) -> Vec<usize> {
        self.nodes.get(ROOT).lengths.iter().collect()
    }

    /// Iterate `(key, value)` pairs in lexicographic key order.
    pub fn iter(&self) -> MapIter<'_, V> {
        MapIter {
            trie: self,
            stack: vec![ROOT],
        }
    }

    /// Descend from `start`, whose key is `key[..matched]`, and store `value`
    /// at the node for `key`.
    ///
    /// # Returns
    /// `(node holding key, previous value)`
    fn insert_from(&mut self, start: u32, matched: usize, key: &[char], value: V) -> (u32, Option<V>) {
        let mut current = start;
        let mut matched = matched;

        loop {
            debug_assert_eq!(self.nodes.get(current).key_length(), matched);

            if matched == key.len() {
                return (current, self.set_value(current, value));
            }

            let first = key[matched];
            match self.child_position(current, first) {
                Ok(position) => {
                    let child = self.nodes.get(current).children[position];
                    let common = common_prefix_len(&self.nodes.get(child).symbol, &key[matched..]);
                    let next = if common < self.nodes.get(child).symbol.len() {
                        self.split(current, position, common)
                    } else {
                        child
                    };
                    current = next;
                    matched += common;
                }
                Err(position) => {
                    let leaf = self.add_leaf(current, position, &key[matched..], value);
                    return (leaf, None);
                }
            }
        }
    }

    /// Store `value` at `index`, propagating size and length on first store.
    fn set_value(&mut self, index: u32, value: V) -> Option<V> {
        let previous = self.nodes.get_mut(index).value.replace(value);
        if previous.is_none() {
            let length = self.nodes.get(index).key_length();
            self.propagate_insert(index, length);
        }
        previous
    }

    /// Binary search the children of `parent` for a symbol starting with `first`.
    ///
    /// # Returns
    /// `Ok(position)` of the matching child, or `Err(position)` where a child
    /// starting with `first` would be inserted
    fn child_position(&self, parent: u32, first: char) -> core::result::Result<usize, usize> {
        self.nodes
            .get(parent)
            .children
            .binary_search_by(|&child| self.nodes.get(child).symbol[0].cmp(&first))
    }

    /// Append a populated leaf with `symbol` at `position` among the children
    /// of `parent`.
    fn add_leaf(&mut self, parent: u32, position: usize, symbol: &[char], value: V) -> u32 {
        let depth = self.nodes.get(parent).key_length();
        let leaf = self.nodes.alloc(Entry {
            symbol: symbol.to_vec(),
            depth,
            value: Some(value),
            size: 0,
            lengths: LengthSet::new(),
            parent,
            children: Vec::new(),
        });
        self.nodes.get_mut(parent).children.insert(position, leaf);
        self.propagate_insert(leaf, depth + symbol.len());
        leaf
    }

    /// Split the child at `position` of `parent` after `at` symbol characters.
    ///
    /// A new intermediate node takes the child's place and owns the child's
    /// remainder as its only child.
    ///
    /// # Returns
    /// Index of the new intermediate node
    fn split(&mut self, parent: u32, position: usize, at: usize) -> u32 {
        let child = self.nodes.get(parent).children[position];
        let (head, depth, size, lengths) = {
            let node = self.nodes.get(child);
            debug_assert!(at > 0 && at < node.symbol.len());
            (node.symbol[..at].to_vec(), node.depth, node.size, node.lengths.clone())
        };

        let middle = self.nodes.alloc(Entry {
            symbol: head,
            depth,
            value: None,
            size,
            lengths,
            parent,
            children: vec![child],
        });
        self.nodes.get_mut(parent).children[position] = middle;

        let node = self.nodes.get_mut(child);
        node.symbol.drain(..at);
        node.depth += at;
        node.parent = middle;

        middle
    }

    /// Count a newly populated key of `length` at `index` and all ancestors.
    fn propagate_insert(&mut self, index: u32, length: usize) {
        let mut current = index;
        while current != EMPTY {
            let node = self.nodes.get_mut(current);
            node.size += 1;
            node.lengths.insert(length);
            current = node.parent;
        }
    }

    /// Node whose key equals `key`, populated or not.
    fn find(&self, key: &[char]) -> Option<u32> {
        let mut current = ROOT;
        let mut matched = 0;
        while matched < key.len() {
            let position = self.child_position(current, key[matched]).ok()?;
            let child = self.nodes.get(current).children[position];
            let symbol = &self.nodes.get(child).symbol;
            if !key[matched..].starts_with(symbol) {
                return None;
            }
            matched += symbol.len();
            current = child;
        }
        Some(current)
    }

    /// `(node, key length)` pairs from just below `ancestor` down to `node`.
    fn path_between(&self, ancestor: u32, node: u32) -> Vec<(u32, usize)> {
        let mut path = Vec::new();
        let mut current = node;
        while current != ancestor {
            let entry = self.nodes.get(current);
            path.push((current, entry.key_length()));
            current = entry.parent;
        }
        path.reverse();
        path
    }

    fn key_of(&self, index: u32) -> String {
        let mut symbols = Vec::new();
        let mut current = index;
        while current != EMPTY {
            let node = self.nodes.get(current);
            symbols.push(&node.symbol);
            current = node.parent;
        }
        symbols.iter().rev().flat_map(|symbol| symbol.iter()).collect()
    }

    fn view(&self, index: u32) -> MapNode<'_, V> {
        MapNode { trie: self, index }
    }
}

impl<V> Default for TrieMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: AsRef<str>, V> FromIterator<(K, V)> for TrieMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = TrieMap::new();
        map.bulk_insert(iter);
        map
    }
}

impl<K: AsRef<str>, V> Extend<(K, V)> for TrieMap<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.bulk_insert(iter);
    }
}

impl<V: fmt::Display> fmt::Display for TrieMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str("}")
    }
}

impl<V: Clone> Trie for TrieMap<V> {
    type Value = V;
    type Node<'a>
        = MapNode<'a, V>
    where
        Self: 'a;

    fn root(&self) -> MapNode<'_, V> {
        self.view(ROOT)
    }
}

/// Read-only view of a [`TrieMap`] node.
pub struct MapNode<'a, V> {
    trie: &'a TrieMap<V>,
    index: u32,
}

impl<V> Clone for MapNode<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for MapNode<'_, V> {}

impl<V> fmt::Debug for MapNode<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapNode")
            .field("index", &self.index)
            .field("key", &self.trie.key_of(self.index))
            .finish()
    }
}

impl<'a, V> MapNode<'a, V> {
    #[inline]
    fn entry(&self) -> &'a Entry<V> {
        self.trie.nodes.get(self.index)
    }

    /// Borrow the stored value without cloning it.
    pub fn value_ref(&self) -> Option<&'a V> {
        self.entry().value.as_ref()
    }
}

impl<'a, V: Clone> TrieNode<'a> for MapNode<'a, V> {
    type Value = V;
    type Children = MapChildren<'a, V>;

    fn children(&self) -> MapChildren<'a, V> {
        MapChildren {
            trie: self.trie,
            iter: self.entry().children.iter(),
        }
    }

    #[inline]
    fn contains_length(&self, length: usize) -> bool {
        self.entry().lengths.contains(length)
    }

    fn contained_lengths(&self) -> Vec<usize> {
        self.entry().lengths.iter().collect()
    }

    #[inline]
    fn depth(&self) -> usize {
        self.entry().depth
    }

    #[inline]
    fn is_populated(&self) -> bool {
        self.entry().value.is_some()
    }

    fn key(&self) -> String {
        self.trie.key_of(self.index)
    }

    #[inline]
    fn symbol(&self) -> &'a [char] {
        &self.entry().symbol
    }

    #[inline]
    fn size(&self) -> usize {
        self.entry().size
    }

    fn value(&self) -> Result<V> {
        self.value_ref()
            .cloned()
            .ok_or_else(|| Error::not_found(self.key()))
    }
}

/// Iterator over the children of a [`MapNode`].
pub struct MapChildren<'a, V> {
    trie: &'a TrieMap<V>,
    iter: core::slice::Iter<'a, u32>,
}

impl<'a, V> Iterator for MapChildren<'a, V> {
    type Item = MapNode<'a, V>;

    fn next(&mut self) -> Option<MapNode<'a, V>> {
        self.iter.next().map(|&index| self.trie.view(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// Iterator over `(key, value)` pairs of a [`TrieMap`] in key order.
pub struct MapIter<'a, V> {
    trie: &'a TrieMap<V>,
    stack: Vec<u32>,
}

impl<'a, V> Iterator for MapIter<'a, V> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(index) = self.stack.pop() {
            let entry = self.trie.nodes.get(index);
            // Reverse so the smallest child is popped first
            self.stack.extend(entry.children.iter().rev());
            if let Some(value) = entry.value.as_ref() {
                return Some((self.trie.key_of(index), value));
            }
        }
        None
    }
}
