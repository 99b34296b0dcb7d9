//! Whole-bitmap operations.

/// OR `source` into `target`, growing `target` as needed.
///
/// # Arguments
/// * `target` - Bitmap receiving the union
/// * `source` - Bitmap to merge in
///
/// # Performance
/// O(n) over `source` words
#[inline]
pub fn union_into(target: &mut Vec<u64>, source: &[u64]) {
    if target.len() < source.len() {
        target.resize(source.len(), 0);
    }
    for (t, &s) in target.iter_mut().zip(source) {
        *t |= s;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::is_set;

    #[test]
    fn test_union_into() {
        let mut target = vec![0b0011];
        let source = vec![0b0100, 0b1];

        union_into(&mut target, &source);

        assert_eq!(target, vec![0b0111, 0b1]);
        assert!(is_set(&target, 64));
    }

    #[test]
    fn test_union_into_shorter_source() {
        let mut target = vec![0, 0b10];
        union_into(&mut target, &[0b1]);
        assert_eq!(target, vec![0b1, 0b10]);
    }
}
