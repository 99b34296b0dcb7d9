//! Single-bit operations.

use crate::constants::BITS_PER_WORD;

/// Set a bit, growing the bitmap as needed.
///
/// # Arguments
/// * `words` - Bitmap words
/// * `idx` - Bit index
///
/// # Performance
/// O(1) amortized - grows by at most `idx / 64` words
#[inline]
pub fn set_bit(words: &mut Vec<u64>, idx: usize) {
    let word = idx / BITS_PER_WORD;
    let bit = idx % BITS_PER_WORD;
    if word >= words.len() {
        words.resize(word + 1, 0);
    }
    words[word] |= 1u64 << bit;
}

/// Clear a bit. Bits outside the bitmap are already clear.
///
/// # Performance
/// O(1) - direct word access
#[inline]
pub fn clear_bit(words: &mut [u64], idx: usize) {
    let word = idx / BITS_PER_WORD;
    if let Some(w) = words.get_mut(word) {
        *w &= !(1u64 << (idx % BITS_PER_WORD));
    }
}

/// Check if a bit is set.
///
/// # Returns
/// `true` if bit is set, `false` otherwise (including bits past the end)
///
/// # Performance
/// O(1) - direct word access
#[inline]
pub fn is_set(words: &[u64], idx: usize) -> bool {
    match words.get(idx / BITS_PER_WORD) {
        Some(&w) => w & (1u64 << (idx % BITS_PER_WORD)) != 0,
        None => false,
    }
}

/// Drop trailing zero words.
#[inline]
pub fn trim(words: &mut Vec<u64>) {
    while words.last() == Some(&0) {
        words.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_bit_grows() {
        let mut words = Vec::new();
        set_bit(&mut words, 0);
        assert_eq!(words, vec![1]);

        set_bit(&mut words, 130);
        assert_eq!(words.len(), 3);
        assert!(is_set(&words, 130));
        assert!(!is_set(&words, 129));
    }

    #[test]
    fn test_is_set_out_of_range() {
        let words = vec![u64::MAX];
        assert!(is_set(&words, 63));
        assert!(!is_set(&words, 64));
        assert!(!is_set(&words, 10_000));
    }

    #[test]
    fn test_clear_bit() {
        let mut words = Vec::new();
        set_bit(&mut words, 5);
        set_bit(&mut words, 70);

        clear_bit(&mut words, 5);
        assert!(!is_set(&words, 5));
        assert!(is_set(&words, 70));

        // Clearing past the end is a no-op
        clear_bit(&mut words, 500);
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn test_trim() {
        let mut words = vec![1, 0, 0];
        trim(&mut words);
        assert_eq!(words, vec![1]);

        let mut words = vec![0, 0];
        trim(&mut words);
        assert!(words.is_empty());
    }
}
