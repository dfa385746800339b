//! Clamp-to-edge (border-replicate) addressing.

/// Snaps a signed index onto `[0, len)`. Returns `None` only for `len == 0`.
#[inline]
pub fn clamp_index(i: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    if i < 0 {
        Some(0)
    } else {
        Some((i as usize).min(len - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::clamp_index;

    #[test]
    fn clamp_handles_negative_and_overflow() {
        assert_eq!(clamp_index(-3, 5), Some(0));
        assert_eq!(clamp_index(-1, 5), Some(0));
        assert_eq!(clamp_index(0, 5), Some(0));
        assert_eq!(clamp_index(4, 5), Some(4));
        assert_eq!(clamp_index(5, 5), Some(4));
        assert_eq!(clamp_index(99, 5), Some(4));
        assert_eq!(clamp_index(isize::MIN, 5), Some(0));
    }

    #[test]
    fn clamp_single_and_empty_axes() {
        for i in -4..=4 {
            assert_eq!(clamp_index(i, 1), Some(0));
        }
        assert_eq!(clamp_index(0, 0), None);
        assert_eq!(clamp_index(7, 0), None);
        assert_eq!(clamp_index(-1, 0), None);
    }
}
