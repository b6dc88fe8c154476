//! Comparison utilities.

use mvh_core::Real;

/// Magnitude below which a denominator is treated as zero.
pub const DEGENERACY_TOLERANCE: Real = 1e-14;

/// Return `true` if `|a - b| <= epsilon`.
#[inline]
pub fn close(a: Real, b: Real, epsilon: Real) -> bool {
    (a - b).abs() <= epsilon
}

/// Return `true` if `x` is too small (or not finite) to divide by.
#[inline]
pub fn is_negligible(x: Real) -> bool {
    !x.is_finite() || x.abs() <= DEGENERACY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_basic() {
        assert!(close(1.0, 1.0 + 1e-11, 1e-10));
        assert!(!close(1.0, 1.0 + 1e-9, 1e-10));
    }

    #[test]
    fn negligible_denominators() {
        assert!(is_negligible(0.0));
        assert!(is_negligible(-1e-16));
        assert!(is_negligible(f64::NAN));
        assert!(!is_negligible(4e-4));
    }
}
