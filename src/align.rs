//! Alignment arithmetic for the pool's bump cursors.
//!
//! Every size and offset the arena hands out or tracks is a multiple of
//! [`QUANTUM`]: twice the natural pointer width on the build target (16 bytes
//! on 64-bit platforms). This module is pure arithmetic with no allocation.

/// The alignment quantum `A`: twice the natural pointer width.
pub const QUANTUM: usize = 2 * core::mem::size_of::<usize>();

/// Rounds `n` up to the next multiple of [`QUANTUM`].
///
/// Returns `0` if `n` is `0`, and also returns `0` if rounding would
/// overflow `usize` — callers must treat a `0` result for nonzero `n` as an
/// overflow failure, per the pool's alignment policy.
#[inline]
#[must_use]
pub const fn round(n: usize) -> usize {
    let quantum = QUANTUM;
    match n.checked_add(quantum - 1) {
        Some(sum) => sum & !(quantum - 1),
        None => 0,
    }
}

/// `true` if `n` is an overflow sentinel for a nonzero request.
#[inline]
#[must_use]
pub const fn rounding_overflowed(n: usize, rounded: usize) -> bool {
    n != 0 && rounded == 0
}

/// Rounds `a + b` up to the next multiple of [`QUANTUM`], returning `None`
/// if either the addition or the rounding overflows `usize`.
#[inline]
#[must_use]
pub const fn checked_round_sum(a: usize, b: usize) -> Option<usize> {
    match a.checked_add(b) {
        Some(sum) => {
            let rounded = round(sum);
            if rounding_overflowed(sum, rounded) { None } else { Some(rounded) }
        },
        None => None,
    }
}

/// `true` if `offset` is a multiple of [`QUANTUM`].
#[inline]
#[must_use]
pub const fn is_aligned(offset: usize) -> bool {
    offset & (QUANTUM - 1) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_up_to_quantum() {
        assert_eq!(round(0), 0);
        assert_eq!(round(1), QUANTUM);
        assert_eq!(round(QUANTUM), QUANTUM);
        assert_eq!(round(QUANTUM + 1), 2 * QUANTUM);
        assert_eq!(round(100), 112);
    }

    #[test]
    fn detects_overflow() {
        let rounded = round(usize::MAX);
        assert!(rounding_overflowed(usize::MAX, rounded));
        assert!(!rounding_overflowed(0, round(0)));
    }

    #[test]
    fn checked_sum_overflow_is_none() {
        assert_eq!(checked_round_sum(0, 100), Some(112));
        assert_eq!(checked_round_sum(usize::MAX, 1), None);
        assert_eq!(checked_round_sum(16, usize::MAX - 8), None);
    }

    #[test]
    fn alignment_check() {
        assert!(is_aligned(0));
        assert!(is_aligned(QUANTUM));
        assert!(!is_aligned(1));
    }
}
