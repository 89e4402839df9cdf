//! Approximate float comparison with fixed tolerances.
//!
//! The `approx` crate (re-exported from this crate) is the right tool when a
//! caller wants to pick its own epsilons; [`nearly_equal`] is the engine's
//! fixed-tolerance comparison, used where two code paths must agree on what
//! "equal" means.

/// Relative tolerance for [`nearly_equal`].
pub const TOLERANCE: f32 = 1e-5;

/// Differences below this are compared absolutely rather than relatively,
/// which keeps comparisons against zero and near-zero values meaningful.
const NORMAL: f32 = (1u32 << 23) as f32 * f32::EPSILON;

/// Whether `a` and `b` are equal up to [`TOLERANCE`].
///
/// Exactly equal values (including infinities) short-circuit. When either
/// operand is zero, or the operands are close enough that relative error
/// degenerates, the absolute difference is compared against a scaled
/// [`TOLERANCE`]; otherwise relative error is measured against
/// `min(|a| + |b|, f32::MAX)`.
pub fn nearly_equal(a: f32, b: f32) -> bool {
    if a == b {
        return true;
    }

    let diff = (a - b).abs();
    if a == 0.0 || b == 0.0 || diff < NORMAL {
        diff < NORMAL * TOLERANCE
    } else {
        diff / (a.abs() + b.abs()).min(f32::MAX) < TOLERANCE
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn exact_values_are_equal() {
        assert!(nearly_equal(0.0, 0.0));
        assert!(nearly_equal(1.5, 1.5));
        assert!(nearly_equal(f32::INFINITY, f32::INFINITY));
    }

    #[test]
    fn nearby_values_are_equal() {
        assert!(nearly_equal(1.0, 1.0 + 1e-7));
        assert!(nearly_equal(-1.0, -1.0 - 1e-7));
        assert!(nearly_equal(0.0, 1e-6));
        assert!(nearly_equal(1e6, 1e6 + 1.0));
    }

    #[test]
    fn distant_values_are_not() {
        assert!(!nearly_equal(0.0, 1.0));
        assert!(!nearly_equal(1.0, 1.1));
        assert!(!nearly_equal(1e6, 1.1e6));
        assert!(!nearly_equal(f32::NAN, f32::NAN));
    }
}
