//! Set variant: a compressed trie of strings with removal.

use core::fmt;

use tracing::debug;

use crate::arena::Arena;
use crate::constants::EMPTY;
use crate::error::{Error, Result};
use crate::trie::cursor::InsertCursor;
use crate::trie::{common_prefix_len, LengthSet, Trie, TrieNode, ROOT};

/// Arena record of one [`TrieSet`] node.
///
/// Children form a singly linked chain starting at `first_child` and following
/// `next_sibling`, ordered ascending by the first character of their symbol.
#[derive(Debug, Clone)]
struct Link {
    /// Characters contributed by this node (empty only at the root)
    symbol: Vec<char>,

    /// Key length of the parent
    depth: usize,

    /// Whether the key ending here is stored
    contained: bool,

    /// Contained nodes in this subtree, inclusive
    size: usize,

    /// Key lengths of contained nodes in this subtree, inclusive
    lengths: LengthSet,

    /// Parent index, `EMPTY` at the root
    parent: u32,

    /// First child, `EMPTY` for leaves
    first_child: u32,

    /// Next sibling, `EMPTY` at the end of the chain
    next_sibling: u32,
}

impl Link {
    #[inline]
    fn key_length(&self) -> usize {
        self.depth + self.symbol.len()
    }
}

/// Position of a key's first character in a child chain.
enum Slot {
    /// A child starts with the character: `(predecessor, child)`
    Found(u32, u32),

    /// No child does: `(predecessor, successor)` to link a new child between
    Vacant(u32, u32),
}

/// Compressed trie storing a set of strings.
///
/// Unlike [`TrieMap`](crate::TrieMap), children are linked as first-child /
/// next-sibling chains. Child lookup is a linear scan that stops at the first
/// sibling sorting after the searched character. Keys can be removed; the
/// structure is recompressed after each removal.
///
/// # Example
/// ```rust
/// use jaro_winkler_trie::TrieSet;
///
/// let mut set = TrieSet::new();
/// assert!(set.insert("abc"));
/// assert!(!set.insert("abc"));
/// assert!(set.remove("abc"));
/// assert!(set.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct TrieSet {
    nodes: Arena<Link>,
}

impl TrieSet {
    pub fn new() -> Self {
        let mut nodes = Arena::new();
        let root = nodes.alloc(Link {
            symbol: Vec::new(),
            depth: 0,
            contained: false,
            size: 0,
            lengths: LengthSet::new(),
            parent: EMPTY,
            first_child: EMPTY,
            next_sibling: EMPTY,
        });
        debug_assert_eq!(root, ROOT);
        Self { nodes }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.get(ROOT).size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of live nodes, including the root and pure branching nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Add a key.
    ///
    /// # Returns
    /// `true` if the key was not present before
    pub fn insert(&mut self, key: &str) -> bool {
        let key: Vec<char> = key.chars().collect();
        self.insert_from(ROOT, 0, &key).1
    }

    /// Add many keys through a sorted cursor.
    pub fn bulk_insert<S, I>(&mut self, keys: I)
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        let mut keys: Vec<Vec<char>> = keys
            .into_iter()
            .map(|key| key.as_ref().chars().collect())
            .collect();
        keys.sort_unstable();
        keys.dedup();

        let mut cursor = InsertCursor::new();
        for key in keys {
            let (start, matched) = cursor.seek(&key);
            let (node, _) = self.insert_from(start, matched, &key);
            let below = self.path_between(start, node);
            cursor.advance(&key, below);
        }

        debug!(
            keys = self.len(),
            nodes = self.node_count(),
            "bulk loaded trie set"
        );
    }

    /// Remove a key.
    ///
    /// Clears the node's contained flag, then recompresses:
    /// - a childless node is unlinked from its parent, and the parent absorbs
    ///   its last remaining child if it is left uncontained with one child
    /// - a node left with a single child absorbs that child
    ///
    /// Sizes and lengths of all ancestors are updated.
    ///
    /// # Returns
    /// `true` if the key was present
    pub fn remove(&mut self, key: &str) -> bool {
        let key: Vec<char> = key.chars().collect();
        let node = match self.find(&key) {
            Some(node) if self.nodes.get(node).contained => node,
            _ => return false,
        };
        let length = key.len();

        self.nodes.get_mut(node).contained = false;
        let mut current = node;
        while current != EMPTY {
            let link = self.nodes.get_mut(current);
            link.size -= 1;
            current = link.parent;
        }

        let deepest = if node == ROOT {
            ROOT
        } else if self.nodes.get(node).first_child == EMPTY {
            let parent = self.unlink(node);
            self.nodes.free(node);
            if parent != ROOT && !self.nodes.get(parent).contained && self.has_single_child(parent) {
                self.absorb_child(parent);
            }
            parent
        } else {
            if self.has_single_child(node) {
                self.absorb_child(node);
            }
            node
        };

        self.release_length(deepest, length);
        true
    }

    /// Check if `key` is stored.
    pub fn contains(&self, key: &str) -> bool {
        let key: Vec<char> = key.chars().collect();
        self.find(&key)
            .is_some_and(|node| self.nodes.get(node).contained)
    }

    /// Distinct lengths of stored keys, ascending.
    pub fn contained_lengths(&self) -> Vec<usize> {
        self.nodes.get(ROOT).lengths.iter().collect()
    }

    /// Iterate stored keys in lexicographic order.
    pub fn iter(&self) -> SetIter<'_> {
        SetIter {
            trie: self,
            stack: vec![ROOT],
        }
    }

    fn insert_from(&mut self, start: u32, matched: usize, key: &[char]) -> (u32, bool) {
        let mut current = start;
        let mut matched = matched;

        loop {
            debug_assert_eq!(self.nodes.get(current).key_length(), matched);

            if matched == key.len() {
                if self.nodes.get(current).contained {
                    return (current, false);
                }
                self.nodes.get_mut(current).contained = true;
                self.propagate_insert(current, matched);
                return (current, true);
            }

            match self.slot(current, key[matched]) {
                Slot::Found(previous, child) => {
                    let common = common_prefix_len(&self.nodes.get(child).symbol, &key[matched..]);
                    current = if common < self.nodes.get(child).symbol.len() {
                        self.split(current, previous, child, common)
                    } else {
                        child
                    };
                    matched += common;
                }
                Slot::Vacant(previous, next) => {
                    let leaf = self.nodes.alloc(Link {
                        symbol: key[matched..].to_vec(),
                        depth: matched,
                        contained: true,
                        size: 0,
                        lengths: LengthSet::new(),
                        parent: current,
                        first_child: EMPTY,
                        next_sibling: next,
                    });
                    self.relink(current, previous, leaf);
                    self.propagate_insert(leaf, key.len());
                    return (leaf, true);
                }
            }
        }
    }

    /// Scan the child chain of `parent` for a symbol starting with `first`.
    ///
    /// The scan stops at the first child sorting after `first`.
    fn slot(&self, parent: u32, first: char) -> Slot {
        let mut previous = EMPTY;
        let mut child = self.nodes.get(parent).first_child;
        while child != EMPTY {
            let link = self.nodes.get(child);
            match link.symbol[0].cmp(&first) {
                core::cmp::Ordering::Less => {
                    previous = child;
                    child = link.next_sibling;
                }
                core::cmp::Ordering::Equal => return Slot::Found(previous, child),
                core::cmp::Ordering::Greater => break,
            }
        }
        Slot::Vacant(previous, child)
    }

    /// Point the predecessor of a chain slot (or `parent` if there is none)
    /// at `node`.
    fn relink(&mut self, parent: u32, previous: u32, node: u32) {
        if previous == EMPTY {
            self.nodes.get_mut(parent).first_child = node;
        } else {
            self.nodes.get_mut(previous).next_sibling = node;
        }
    }

    /// Split `child` after `at` symbol characters.
    ///
    /// # Returns
    /// Index of the new intermediate node, which takes `child`'s place in the
    /// chain
    fn split(&mut self, parent: u32, previous: u32, child: u32, at: usize) -> u32 {
        let (head, depth, size, lengths, next_sibling) = {
            let link = self.nodes.get(child);
            debug_assert!(at > 0 && at < link.symbol.len());
            (
                link.symbol[..at].to_vec(),
                link.depth,
                link.size,
                link.lengths.clone(),
                link.next_sibling,
            )
        };

        let middle = self.nodes.alloc(Link {
            symbol: head,
            depth,
            contained: false,
            size,
            lengths,
            parent,
            first_child: child,
            next_sibling,
        });
        self.relink(parent, previous, middle);

        let link = self.nodes.get_mut(child);
        link.symbol.drain(..at);
        link.depth += at;
        link.parent = middle;
        link.next_sibling = EMPTY;

        middle
    }

    fn propagate_insert(&mut self, index: u32, length: usize) {
        let mut current = index;
        while current != EMPTY {
            let link = self.nodes.get_mut(current);
            link.size += 1;
            link.lengths.insert(length);
            current = link.parent;
        }
    }

    /// Remove `node` from its parent's child chain.
    ///
    /// # Returns
    /// The parent of `node`
    fn unlink(&mut self, node: u32) -> u32 {
        let (parent, next) = {
            let link = self.nodes.get(node);
            (link.parent, link.next_sibling)
        };

        let mut previous = EMPTY;
        let mut current = self.nodes.get(parent).first_child;
        while current != node {
            previous = current;
            current = self.nodes.get(current).next_sibling;
        }
        self.relink(parent, previous, next);
        parent
    }

    fn has_single_child(&self, index: u32) -> bool {
        let first = self.nodes.get(index).first_child;
        first != EMPTY && self.nodes.get(first).next_sibling == EMPTY
    }

    /// Merge the only child of `index` into `index`.
    ///
    /// `index` must be uncontained, so its size and lengths equal the child's.
    fn absorb_child(&mut self, index: u32) {
        let child = self.nodes.get(index).first_child;
        let absorbed = self.nodes.free(child);
        debug_assert_eq!(absorbed.next_sibling, EMPTY);

        let mut grandchild = absorbed.first_child;
        while grandchild != EMPTY {
            let link = self.nodes.get_mut(grandchild);
            link.parent = index;
            grandchild = link.next_sibling;
        }

        let link = self.nodes.get_mut(index);
        debug_assert!(!link.contained);
        link.symbol.extend_from_slice(&absorbed.symbol);
        link.contained = absorbed.contained;
        link.size = absorbed.size;
        link.lengths = absorbed.lengths;
        link.first_child = absorbed.first_child;
    }

    /// Drop `length` from the length sets of `index` and its ancestors where
    /// no remaining key in the subtree has it.
    fn release_length(&mut self, index: u32, length: usize) {
        let mut current = index;
        while current != EMPTY {
            let still_held = {
                let link = self.nodes.get(current);
                (link.contained && link.key_length() == length)
                    || self.children_of(current).any(|child| self.nodes.get(child).lengths.contains(length))
            };
            if still_held {
                break;
            }
            let link = self.nodes.get_mut(current);
            link.lengths.remove(length);
            current = link.parent;
        }
    }

    fn children_of(&self, index: u32) -> impl Iterator<Item = u32> + '_ {
        let mut next = self.nodes.get(index).first_child;
        core::iter::from_fn(move || {
            let current = next;
            (current != EMPTY).then(|| {
                next = self.nodes.get(current).next_sibling;
                current
            })
        })
    }

    fn find(&self, key: &[char]) -> Option<u32> {
        let mut current = ROOT;
        let mut matched = 0;
        while matched < key.len() {
            let child = match self.slot(current, key[matched]) {
                Slot::Found(_, child) => child,
                Slot::Vacant(..) => return None,
            };
            let symbol = &self.nodes.get(child).symbol;
            if !key[matched..].starts_with(symbol) {
                return None;
            }
            matched += symbol.len();
            current = child;
        }
        Some(current)
    }

    fn path_between(&self, ancestor: u32, node: u32) -> Vec<(u32, usize)> {
        let mut path = Vec::new();
        let mut current = node;
        while current != ancestor {
            let link = self.nodes.get(current);
            path.push((current, link.key_length()));
            current = link.parent;
        }
        path.reverse();
        path
    }

    fn key_of(&self, index: u32) -> String {
        let mut symbols = Vec::new();
        let mut current = index;
        while current != EMPTY {
            let link = self.nodes.get(current);
            symbols.push(&link.symbol);
            current = link.parent;
        }
        symbols.iter().rev().flat_map(|symbol| symbol.iter()).collect()
    }

    fn view(&self, index: u32) -> SetNode<'_> {
        SetNode { trie: self, index }
    }
}

impl Default for TrieSet {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AsRef<str>> FromIterator<S> for TrieSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TrieSet::new();
        set.bulk_insert(iter);
        set
    }
}

impl<S: AsRef<str>> Extend<S> for TrieSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.bulk_insert(iter);
    }
}

impl fmt::Display for TrieSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, key) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&key)?;
        }
        f.write_str("]")
    }
}

impl Trie for TrieSet {
    type Value = String;
    type Node<'a>
        = SetNode<'a>
    where
        Self: 'a;

    fn root(&self) -> SetNode<'_> {
        self.view(ROOT)
    }
}

/// Read-only view of a [`TrieSet`] node. Its value is its own key.
#[derive(Clone, Copy)]
pub struct SetNode<'a> {
    trie: &'a TrieSet,
    index: u32,
}

impl fmt::Debug for SetNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetNode")
            .field("index", &self.index)
            .field("key", &self.key())
            .finish()
    }
}

impl<'a> SetNode<'a> {
    #[inline]
    fn link(&self) -> &'a Link {
        self.trie.nodes.get(self.index)
    }
}

impl<'a> TrieNode<'a> for SetNode<'a> {
    type Value = String;
    type Children = SetChildren<'a>;

    fn children(&self) -> SetChildren<'a> {
        SetChildren {
            trie: self.trie,
            next: self.link().first_child,
        }
    }

    #[inline]
    fn contains_length(&self, length: usize) -> bool {
        self.link().lengths.contains(length)
    }

    fn contained_lengths(&self) -> Vec<usize> {
        self.link().lengths.iter().collect()
    }

    #[inline]
    fn depth(&self) -> usize {
        self.link().depth
    }

    #[inline]
    fn is_populated(&self) -> bool {
        self.link().contained
    }

    fn key(&self) -> String {
        self.trie.key_of(self.index)
    }

    #[inline]
    fn symbol(&self) -> &'a [char] {
        &self.link().symbol
    }

    #[inline]
    fn size(&self) -> usize {
        self.link().size
    }

    fn value(&self) -> Result<String> {
        let key = self.key();
        if self.is_populated() {
            Ok(key)
        } else {
            Err(Error::NotFound { key })
        }
    }
}

/// Iterator over the children of a [`SetNode`], following the sibling chain.
pub struct SetChildren<'a> {
    trie: &'a TrieSet,
    next: u32,
}

impl<'a> Iterator for SetChildren<'a> {
    type Item = SetNode<'a>;

    fn next(&mut self) -> Option<SetNode<'a>> {
        if self.next == EMPTY {
            return None;
        }
        let current = self.next;
        self.next = self.trie.nodes.get(current).next_sibling;
        Some(self.trie.view(current))
    }
}

/// Iterator over the keys of a [`TrieSet`] in lexicographic order.
pub struct SetIter<'a> {
    trie: &'a TrieSet,
    stack: Vec<u32>,
}

impl Iterator for SetIter<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while let Some(index) = self.stack.pop() {
            let link = self.trie.nodes.get(index);
            // Siblings are visited after the whole subtree of this node
            if index != ROOT && link.next_sibling != EMPTY {
                self.stack.push(link.next_sibling);
            }
            if link.first_child != EMPTY {
                self.stack.push(link.first_child);
            }
            if link.contained {
                return Some(self.trie.key_of(index));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Check every structural invariant below `index`.
    fn assert_invariants(set: &TrieSet, index: u32) {
        let link = set.nodes.get(index);
        if index != ROOT {
            assert!(!link.symbol.is_empty(), "empty symbol below root");
            assert!(
                link.contained || (link.first_child != EMPTY && !set.has_single_child(index)),
                "uncompressed node {:?}",
                set.key_of(index)
            );
        }

        let mut size = usize::from(link.contained);
        let mut lengths = LengthSet::new();
        if link.contained {
            lengths.insert(link.key_length());
        }

        let mut previous_first = None;
        for child in set.children_of(index) {
            let entry = set.nodes.get(child);
            assert_eq!(entry.parent, index);
            assert_eq!(entry.depth, link.key_length());
            let first = entry.symbol[0];
            assert!(previous_first.map_or(true, |p| p < first), "unsorted siblings");
            previous_first = Some(first);

            assert_invariants(set, child);
            size += entry.size;
            lengths.union_with(&entry.lengths);
        }

        assert_eq!(link.size, size);
        assert_eq!(link.lengths, lengths);
    }

    #[test]
    fn test_insert_cases() {
        let mut set = TrieSet::new();

        // Case 1: empty set
        assert!(set.insert("xyz"));
        // Case 2: key not contained
        assert!(set.insert("abcde"));
        // Case 3: key contained without node
        assert!(set.insert("abc"));
        // Case 4: key contained with node
        assert!(!set.insert("abc"));
        // Case 5: empty string
        assert!(set.insert(""));
        // Case 6: last child
        assert!(set.insert("y"));
        // Case 7: sibling with same length
        assert!(set.insert("abcdf"));
        // Case 8: sibling with other length
        assert!(set.insert("abgh"));

        for key in ["xyz", "abcde", "abc", "", "y", "abcdf", "abgh"] {
            assert!(set.contains(key), "missing {key:?}");
        }
        assert!(!set.contains("ab"));
        assert!(!set.contains("abcd"));
        assert_eq!(set.len(), 7);
        assert_invariants(&set, ROOT);
    }

    #[test]
    fn test_bulk_insert_issue_shared_prefix() {
        let set: TrieSet = ["d", "dindy", "impasse"].into_iter().collect();

        assert!(set.contains("d"));
        assert!(set.contains("dindy"));
        assert!(set.contains("impasse"));
        assert_eq!(set.len(), 3);
        assert_invariants(&set, ROOT);
    }

    #[test]
    fn test_bulk_insert_deduplicates() {
        let set: TrieSet = ["b", "a", "b", "ab"].into_iter().collect();
        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["a", "ab", "b"]);
    }

    #[test]
    fn test_children_ordered() {
        let set: TrieSet = ["e", "c", "a", "d", "b"].into_iter().collect();
        let symbols: Vec<String> = set.root().children().map(|n| n.key()).collect();
        assert_eq!(symbols, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_remove_leaf() {
        let mut set: TrieSet = ["abc", "abd", "x"].into_iter().collect();
        let nodes = set.node_count();

        assert!(set.remove("x"));
        assert!(!set.contains("x"));
        assert_eq!(set.len(), 2);
        assert_eq!(set.node_count(), nodes - 1);
        assert_invariants(&set, ROOT);
    }

    #[test]
    fn test_remove_merges_parent() {
        let mut set: TrieSet = ["abc", "abd"].into_iter().collect();

        // Removing "abd" leaves "ab" with one child: "ab" + "c" merge
        assert!(set.remove("abd"));
        assert_invariants(&set, ROOT);

        let only = set.root().children().next().expect("one child");
        assert_eq!(only.symbol(), &['a', 'b', 'c']);
        assert!(only.is_populated());
        assert_eq!(set.node_count(), 2);
    }

    #[test]
    fn test_remove_merges_single_child() {
        let mut set: TrieSet = ["ab", "abcd"].into_iter().collect();

        assert!(set.remove("ab"));
        assert_invariants(&set, ROOT);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["abcd"]);
        assert_eq!(set.node_count(), 2);
    }

    #[test]
    fn test_remove_branching_node_keeps_children() {
        let mut set: TrieSet = ["ab", "abc", "abd"].into_iter().collect();

        assert!(set.remove("ab"));
        assert!(!set.contains("ab"));
        assert!(set.contains("abc"));
        assert!(set.contains("abd"));
        assert_eq!(set.contained_lengths(), vec![3]);
        assert_invariants(&set, ROOT);
    }

    #[test]
    fn test_remove_root_key() {
        let mut set: TrieSet = ["", "a"].into_iter().collect();

        assert!(set.remove(""));
        assert!(!set.contains(""));
        assert_eq!(set.contained_lengths(), vec![1]);
        assert_invariants(&set, ROOT);
    }

    #[test]
    fn test_remove_absent() {
        let mut set: TrieSet = ["abc", "abd"].into_iter().collect();

        assert!(!set.remove("ab"));
        assert!(!set.remove("abcd"));
        assert!(!set.remove("z"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_remove_releases_lengths() {
        let mut set: TrieSet = ["a", "bb", "cc"].into_iter().collect();

        assert!(set.remove("a"));
        assert_eq!(set.contained_lengths(), vec![2]);
        assert!(set.remove("bb"));
        assert_eq!(set.contained_lengths(), vec![2]);
        assert!(set.remove("cc"));
        assert!(set.contained_lengths().is_empty());
        assert!(set.is_empty());
        assert_eq!(set.node_count(), 1);
    }

    #[test]
    fn test_remove_inverse_of_insert() {
        let base = ["Ronald", "Roland", "Ron", "R", "Rolf", "ab", "abc"];
        for key in ["Ro", "Ronalds", "Rol", "a", "Zed", "Rona"] {
            let mut set: TrieSet = base.into_iter().collect();
            let before: Vec<String> = set.iter().collect();
            let nodes = set.node_count();

            assert!(set.insert(key));
            assert_invariants(&set, ROOT);
            assert!(set.remove(key));
            assert_invariants(&set, ROOT);

            assert_eq!(set.iter().collect::<Vec<_>>(), before, "after {key:?}");
            assert_eq!(set.node_count(), nodes, "after {key:?}");
        }
    }

    #[test]
    fn test_node_value_is_key() {
        let set: TrieSet = ["abc", "abd"].into_iter().collect();
        let ab = set.root().children().next().expect("branch node");

        assert_eq!(ab.value(), Err(Error::not_found("ab")));
        let abc = ab.children().next().expect("leaf");
        assert_eq!(abc.value(), Ok("abc".to_string()));
    }

    #[test]
    fn test_display() {
        let set: TrieSet = ["b", "a"].into_iter().collect();
        assert_eq!(set.to_string(), "[a, b]");
        assert_eq!(TrieSet::new().to_string(), "[]");
    }

    #[test]
    fn test_extend() {
        let mut set: TrieSet = ["abc"].into_iter().collect();
        set.extend(["abd", "abc", "a"]);

        assert_eq!(set.len(), 3);
        assert_invariants(&set, ROOT);
    }
}
