//! Arena structure for trie node storage

use crate::arena::FreeList;
use crate::constants::EMPTY;

/// Generic arena for storing trie nodes.
///
/// Provides contiguous storage with O(1) access by index.
/// Released slots are tracked in a [`FreeList`] and reused by later
/// allocations, so indices of live elements never move.
///
/// # Type Parameters
/// * `T` - Element type (a trie node)
///
/// # Memory Layout
/// - Elements stored contiguously in Vec
/// - Index-based access (u32 indices, `EMPTY` is never handed out)
/// - Freed slots hold `None` until reused
///
/// # Performance
/// - Allocation: O(1) amortized
/// - Access: O(1) by index
/// - Free: O(1)
#[derive(Debug, Clone)]
pub struct Arena<T> {
    /// Storage for elements.
    ///
    /// Index in this Vec is the arena index used for references.
    elements: Vec<Option<T>>,

    /// Released indices awaiting reuse.
    free: FreeList,
}

impl<T> Arena<T> {
    /// Create a new empty arena.
    ///
    /// # Performance
    /// O(1) - creates empty Vec
    #[inline]
    pub fn new() -> Self {
        Arena {
            elements: Vec::new(),
            free: FreeList::new(),
        }
    }

    /// Store an element and return its index.
    ///
    /// Reuses the most recently freed slot when one is available.
    ///
    /// # Panics
    /// Panics if the arena would exceed `u32::MAX - 1` elements
    ///
    /// # Performance
    /// O(1) amortized - Vec push or slot reuse
    #[inline]
    pub fn alloc(&mut self, element: T) -> u32 {
        if let Some(index) = self.free.pop() {
            self.elements[index as usize] = Some(element);
            return index;
        }
        let index = self.elements.len();
        assert!(index < EMPTY as usize, "arena index space exhausted");
        self.elements.push(Some(element));
        index as u32
    }

    /// Release an element, returning it.
    ///
    /// # Panics
    /// Panics if the slot is out of bounds or already free
    #[inline]
    pub fn free(&mut self, index: u32) -> T {
        let element = self.elements[index as usize]
            .take()
            .expect("arena slot should be occupied");
        self.free.push(index);
        element
    }

    /// Get element by index.
    ///
    /// # Panics
    /// Panics if index is out of bounds or the slot was freed
    ///
    /// # Performance
    /// O(1) - direct Vec indexing
    #[inline(always)]
    pub fn get(&self, index: u32) -> &T {
        self.elements[index as usize]
            .as_ref()
            .expect("arena slot should be occupied")
    }

    /// Get mutable element by index.
    ///
    /// # Panics
    /// Panics if index is out of bounds or the slot was freed
    ///
    /// # Performance
    /// O(1) - direct Vec indexing
    #[inline(always)]
    pub fn get_mut(&mut self, index: u32) -> &mut T {
        self.elements[index as usize]
            .as_mut()
            .expect("arena slot should be occupied")
    }

    /// Get number of live elements.
    ///
    /// # Performance
    /// O(1)
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len() - self.free.len()
    }

    /// Check if arena holds no live elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_new() {
        let arena: Arena<u8> = Arena::new();
        assert_eq!(arena.len(), 0);
        assert!(arena.is_empty());
    }

    #[test]
    fn test_arena_alloc() {
        let mut arena = Arena::new();

        let idx0 = arena.alloc("a");
        assert_eq!(idx0, 0);
        assert_eq!(arena.len(), 1);

        let idx1 = arena.alloc("b");
        assert_eq!(idx1, 1);
        assert_eq!(arena.len(), 2);
        assert_eq!(*arena.get(idx1), "b");
    }

    #[test]
    fn test_arena_get_mut() {
        let mut arena = Arena::new();
        let idx = arena.alloc(1u32);

        *arena.get_mut(idx) = 42;

        assert_eq!(*arena.get(idx), 42);
    }

    #[test]
    fn test_arena_free_and_reuse() {
        let mut arena = Arena::new();
        let idx0 = arena.alloc(10);
        let idx1 = arena.alloc(11);

        assert_eq!(arena.free(idx0), 10);
        assert_eq!(arena.len(), 1);

        // Freed slot is reused before growing
        let idx2 = arena.alloc(12);
        assert_eq!(idx2, idx0);
        assert_eq!(*arena.get(idx2), 12);
        assert_eq!(*arena.get(idx1), 11);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    #[should_panic(expected = "arena slot should be occupied")]
    fn test_arena_get_freed_panics() {
        let mut arena = Arena::new();
        let idx = arena.alloc(1);
        arena.free(idx);
        arena.get(idx);
    }
}
