//! Geometry helpers

/// Clamp `value` into `[min, max]`.
///
/// Argument order follows the reading order of the range (`min <= value <= max`).
/// When `min > max` the result is `min`, so a degenerate range never panics
/// the way [`f64::clamp`] does.
#[inline]
pub fn clamp(min: f64, value: f64, max: f64) -> f64 {
    min.max(value.min(max))
}

/// Round to the nearest integer, with halves rounded toward positive infinity.
///
/// Unlike [`f64::round`], `-2.5` rounds to `-2`. Offsets scroll in both
/// directions, so ties must break the same way on either side of zero.
#[inline]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Whether `offset` sits exactly on a slot boundary of height `slot`.
///
/// Offsets are whole pixels once projected, so exact comparison is intended.
#[inline]
pub fn is_slot_aligned(offset: f64, slot: f64) -> bool {
    slot > 0.0 && offset % slot == 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_orders() {
        assert_eq!(clamp(-90.0, -120.0, 0.0), -90.0);
        assert_eq!(clamp(-90.0, 12.0, 0.0), 0.0);
        assert_eq!(clamp(-90.0, -45.0, 0.0), -45.0);
    }

    #[test]
    fn test_clamp_degenerate_range_prefers_min() {
        assert_eq!(clamp(2.0, 1.0, 0.0), 2.0);
    }

    #[test]
    fn test_round_half_up_ties() {
        assert_eq!(round_half_up(-64.5), -64.0);
        assert_eq!(round_half_up(64.5), 65.0);
        assert_eq!(round_half_up(-2.4), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
    }

    #[test]
    fn test_slot_alignment() {
        assert!(is_slot_aligned(-60.0, 30.0));
        assert!(is_slot_aligned(0.0, 30.0));
        assert!(!is_slot_aligned(-65.0, 30.0));
        assert!(!is_slot_aligned(0.0, 0.0));
    }
}
