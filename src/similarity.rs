//! Jaro and Jaro-Winkler similarity from aggregate counts.
//!
//! The formulas operate on a running "half transposition" count (twice the
//! classical transposition count) so that optimistic bounds can be evaluated
//! with the same arithmetic as exact scores.

use crate::constants::{BOOST_FACTOR, BOOST_THRESHOLD, COMMON_PREFIX_LENGTH_LIMIT};

/// Jaro similarity from aggregate counts.
///
/// # Arguments
/// * `common` - Number of common characters
/// * `len1` - Length of the first string
/// * `len2` - Length of the second string
/// * `half_transpositions` - Number of common characters out of order
///
/// # Returns
/// `(m²·2/len1 + m²·2/len2 + m·2 − h) / (3·m·2)` for `m > 0`, otherwise 0.
/// Two empty strings are identical and score 1.
///
/// # Performance
/// O(1)
#[inline]
pub fn jaro(common: usize, len1: usize, len2: usize, half_transpositions: usize) -> f64 {
    if common > 0 {
        let m = common as f64;
        (m * m * 2.0 / len1 as f64 + m * m * 2.0 / len2 as f64 + m * 2.0
            - half_transpositions as f64)
            / (3.0 * m * 2.0)
    } else if len1 == 0 && len2 == 0 {
        1.0
    } else {
        0.0
    }
}

/// Jaro-Winkler similarity from aggregate counts.
///
/// Applies the prefix boost `j + l·0.1·(1 − j)` when the Jaro similarity `j`
/// reaches [`BOOST_THRESHOLD`]. The prefix length `l` is capped at
/// [`COMMON_PREFIX_LENGTH_LIMIT`].
///
/// # Arguments
/// * `common` - Number of common characters
/// * `len1` - Length of the first string
/// * `len2` - Length of the second string
/// * `half_transpositions` - Number of common characters out of order
/// * `common_prefix_length` - Length of the exactly shared prefix
///
/// # Performance
/// O(1)
#[inline]
pub fn jaro_winkler(
    common: usize,
    len1: usize,
    len2: usize,
    half_transpositions: usize,
    common_prefix_length: usize,
) -> f64 {
    let jaro = jaro(common, len1, len2, half_transpositions);
    if jaro >= BOOST_THRESHOLD {
        let prefix = common_prefix_length.min(COMMON_PREFIX_LENGTH_LIMIT) as f64;
        jaro + prefix * BOOST_FACTOR * (1.0 - jaro)
    } else {
        jaro
    }
}

/// Radius of the window in which characters may be paired as common.
///
/// `max(0, max(len1, len2) / 2 − 1)`
#[inline]
pub fn window_size(len1: usize, len2: usize) -> usize {
    (len1.max(len2) / 2).saturating_sub(1)
}
