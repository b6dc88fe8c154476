//! Validation of discrete probability vectors.

use mvh_core::{ensure, Real, Result};

/// Maximum allowed distance between `Σ p` and 1 for physical probabilities.
pub const PROBABILITY_SUM_TOLERANCE: Real = 1e-3;

/// Check that `probs` is a usable discrete distribution: non-empty, every
/// entry finite and non-negative, summing to one within `tolerance`.
pub fn validate_distribution(probs: &[Real], tolerance: Real) -> Result<()> {
    ensure!(!probs.is_empty(), "probability vector is empty");
    for (i, &p) in probs.iter().enumerate() {
        ensure!(
            p.is_finite() && p >= 0.0,
            "probability at state {i} is {p}, expected a finite non-negative value"
        );
    }
    let total: Real = probs.iter().sum();
    ensure!(
        (total - 1.0).abs() < tolerance,
        "probabilities sum to {total}, expected 1 within {tolerance}"
    );
    Ok(())
}
