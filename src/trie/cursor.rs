//! Insertion cursor for presorted bulk loads.

use crate::trie::{common_prefix_len, ROOT};

/// Remembers the root-to-node path of the previous insertion.
///
/// For lexicographically sorted input, consecutive keys share a prefix. The
/// next insertion can resume from the deepest node on the previous path whose
/// key is still a prefix of the new key instead of descending from the root.
#[derive(Debug)]
pub(crate) struct InsertCursor {
    /// `(node, key length)` from the root down to the last inserted node.
    path: Vec<(u32, usize)>,

    /// Previously inserted key.
    previous: Vec<char>,
}

impl InsertCursor {
    pub(crate) fn new() -> Self {
        Self {
            path: vec![(ROOT, 0)],
            previous: Vec::new(),
        }
    }

    /// Rewind to the deepest node whose key is a prefix of `key`.
    ///
    /// # Returns
    /// `(node, key length of node)` to resume the descent from
    pub(crate) fn seek(&mut self, key: &[char]) -> (u32, usize) {
        let shared = common_prefix_len(&self.previous, key);
        while self.path.len() > 1 && self.path[self.path.len() - 1].1 > shared {
            self.path.pop();
        }
        self.path[self.path.len() - 1]
    }

    /// Record the nodes below the seek position that lead to `key`.
    ///
    /// `below` lists `(node, key length)` pairs ordered from the node closest
    /// to the seek position down to the node holding `key`.
    pub(crate) fn advance(&mut self, key: &[char], below: impl IntoIterator<Item = (u32, usize)>) {
        self.path.extend(below);
        self.previous.clear();
        self.previous.extend_from_slice(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_seek_starts_at_root() {
        let mut cursor = InsertCursor::new();
        assert_eq!(cursor.seek(&chars("abc")), (ROOT, 0));
    }

    #[test]
    fn test_seek_rewinds_to_shared_prefix() {
        let mut cursor = InsertCursor::new();
        cursor.advance(&chars("abcd"), [(1, 2), (2, 4)]);

        // "abx" shares "ab" with "abcd": resume at node 1
        assert_eq!(cursor.seek(&chars("abx")), (1, 2));

        // "b" shares nothing: back at the root
        assert_eq!(cursor.seek(&chars("b")), (ROOT, 0));
    }

    #[test]
    fn test_seek_keeps_full_path_for_extension() {
        let mut cursor = InsertCursor::new();
        cursor.advance(&chars("ab"), [(1, 2)]);

        assert_eq!(cursor.seek(&chars("abc")), (1, 2));
    }
}
