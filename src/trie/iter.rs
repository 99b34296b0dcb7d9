//! Depth-first traversal over populated nodes.

use core::marker::PhantomData;

use crate::trie::TrieNode;

/// Iterator over the populated nodes of a subtree.
///
/// Visits nodes in pre-order. Children are ordered by their first character
/// and a key precedes its extensions, so keys come out in lexicographic order.
///
/// # Algorithm
/// 1. Start with the subtree root pending
/// 2. Keep a stack of child iterators, one per open level
/// 3. Advance the top iterator; push the children of every visited node
/// 4. Pop exhausted iterators
///
/// # Performance
/// O(1) amortized per visited node, O(depth) stack space
pub struct PopulatedNodes<'a, N: TrieNode<'a>> {
    /// Subtree root, until it has been visited
    pending: Option<N>,

    /// One child iterator per open level
    stack: Vec<N::Children>,

    _marker: PhantomData<&'a ()>,
}

impl<'a, N: TrieNode<'a>> PopulatedNodes<'a, N> {
    pub(crate) fn new(root: N) -> Self {
        Self {
            pending: Some(root),
            stack: Vec::new(),
            _marker: PhantomData,
        }
    }
}

impl<'a, N: TrieNode<'a>> Iterator for PopulatedNodes<'a, N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        if let Some(root) = self.pending.take() {
            self.stack.push(root.children());
            if root.is_populated() {
                return Some(root);
            }
        }

        while let Some(top) = self.stack.last_mut() {
            match top.next() {
                Some(node) => {
                    self.stack.push(node.children());
                    if node.is_populated() {
                        return Some(node);
                    }
                }
                None => {
                    self.stack.pop();
                }
            }
        }

        None
    }
}
