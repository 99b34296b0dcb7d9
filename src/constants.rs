//! Core constants for Jaro-Winkler matching and arena addressing.

/// Sentinel value for an empty/null arena index.
///
/// Used to indicate:
/// - Parent of the root node
/// - End of a sibling chain in `TrieSet`
/// - Absent first child in `TrieSet`
pub const EMPTY: u32 = u32::MAX;

/// Minimum Jaro similarity required before the Winkler prefix boost applies.
pub const BOOST_THRESHOLD: f64 = 0.7;

/// Scaling factor of the Winkler prefix boost per common prefix character.
pub const BOOST_FACTOR: f64 = 0.1;

/// Maximum number of leading characters considered by the prefix boost.
pub const COMMON_PREFIX_LENGTH_LIMIT: usize = 4;

/// Number of bits per bitmap word.
pub const BITS_PER_WORD: usize = 64;
