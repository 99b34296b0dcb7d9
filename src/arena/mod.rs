//! Arena storage for trie nodes.
//!
//! Nodes are addressed by stable `u32` handles instead of owning pointers, so
//! parent and sibling links are plain index lookups. Slots released by node
//! removal are recycled through a free list.

#[allow(clippy::module_inception)]
mod arena;
mod free_list;

pub use arena::Arena;
pub use free_list::FreeList;
