//! Free list of recycled arena slots.

/// LIFO stack of released arena indices.
///
/// The most recently freed slot is reused first, which keeps freshly
/// re-inserted nodes close to their former neighbours.
#[derive(Debug, Default, Clone)]
pub struct FreeList {
    slots: Vec<u32>,
}

impl FreeList {
    /// Create a new empty free list.
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Record a released slot.
    #[inline]
    pub fn push(&mut self, index: u32) {
        self.slots.push(index);
    }

    /// Take a slot for reuse, if any.
    #[inline]
    pub fn pop(&mut self) -> Option<u32> {
        self.slots.pop()
    }

    /// Number of slots awaiting reuse.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifo_reuse() {
        let mut free = FreeList::new();
        assert!(free.is_empty());

        free.push(3);
        free.push(7);
        assert_eq!(free.len(), 2);

        assert_eq!(free.pop(), Some(7));
        assert_eq!(free.pop(), Some(3));
        assert_eq!(free.pop(), None);
    }
}
