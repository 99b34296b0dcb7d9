//! Growable bitmap operations over `u64` words.
//!
//! Bit `i` lives in word `i / 64` at position `i % 64`. Words beyond the end of
//! the slice are implicitly zero, so readers never need to resize.

mod basic;
mod bulk;
mod search;

pub use basic::{clear_bit, is_set, set_bit, trim};
pub use bulk::union_into;
pub use search::{count_bits, first_set_bit, next_set_bit};
