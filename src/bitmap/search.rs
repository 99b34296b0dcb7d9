//! Search operations for finding set bits in bitmap.

use crate::constants::BITS_PER_WORD;

/// Find first set bit (minimum).
///
/// # Returns
/// Index of first set bit, or None if bitmap is empty
///
/// # Performance
/// O(n) words, uses TZCNT within a word
#[inline]
pub fn first_set_bit(words: &[u64]) -> Option<usize> {
    for (word_idx, &word) in words.iter().enumerate() {
        if word != 0 {
            return Some(word_idx * BITS_PER_WORD + word.trailing_zeros() as usize);
        }
    }
    None
}

/// Find next set bit after the given index.
///
/// # Arguments
/// * `words` - Bitmap words
/// * `after` - Index to search after
///
/// # Returns
/// Index of next set bit, or None if no set bits found
#[inline]
pub fn next_set_bit(words: &[u64], after: usize) -> Option<usize> {
    let start = after + 1;
    let start_word = start / BITS_PER_WORD;
    if start_word >= words.len() {
        return None;
    }

    // Check remaining bits in start word
    let masked = words[start_word] & (!0u64 << (start % BITS_PER_WORD));
    if masked != 0 {
        return Some(start_word * BITS_PER_WORD + masked.trailing_zeros() as usize);
    }

    // Check subsequent words
    first_set_bit(&words[start_word + 1..])
        .map(|bit| (start_word + 1) * BITS_PER_WORD + bit)
}

/// Count all set bits in bitmap.
///
/// # Performance
/// O(n) words, uses POPCNT
#[inline]
pub fn count_bits(words: &[u64]) -> usize {
    words.iter().map(|w| w.count_ones() as usize).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::set_bit;

    #[test]
    fn test_first_set_bit() {
        assert_eq!(first_set_bit(&[]), None);
        assert_eq!(first_set_bit(&[0, 0]), None);
        assert_eq!(first_set_bit(&[0, 0b1000]), Some(67));
    }

    #[test]
    fn test_next_set_bit() {
        let mut words = Vec::new();
        for idx in [0, 3, 63, 64, 200] {
            set_bit(&mut words, idx);
        }

        assert_eq!(next_set_bit(&words, 0), Some(3));
        assert_eq!(next_set_bit(&words, 3), Some(63));
        assert_eq!(next_set_bit(&words, 63), Some(64));
        assert_eq!(next_set_bit(&words, 64), Some(200));
        assert_eq!(next_set_bit(&words, 200), None);
        assert_eq!(next_set_bit(&words, 1_000), None);
    }

    #[test]
    fn test_count_bits() {
        let mut words = Vec::new();
        assert_eq!(count_bits(&words), 0);

        for idx in [1, 2, 100, 129] {
            set_bit(&mut words, idx);
        }
        assert_eq!(count_bits(&words), 4);
    }
}
