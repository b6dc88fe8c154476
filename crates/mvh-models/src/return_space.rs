//! The one-period return space.
//!
//! Per-period log-returns are i.i.d. draws from a finite set. Summing many
//! of them in floating point drifts, so every log-return is multiplied by a
//! `scale_factor` and rounded to an integer *offset*; lattice nodes are sums
//! of offsets and compare exactly.
//!
//! ```text
//! log-returns  [-0.02, 0.00, 0.02]
//! scale 100 →  [-2,    0,    2   ]
//! ```

use mvh_core::{ensure, Error, GrossReturn, Offset, Real, Result};
use mvh_math::StateVector;
use num_traits::ToPrimitive;

/// Largest distance between `r · scale_factor` and its rounded offset.
pub const INTEGRALITY_TOLERANCE: Real = 1e-6;

/// Finite set of per-period log-returns together with their integer offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSpace {
    log_returns: Vec<Real>,
    scale_factor: Real,
    offsets: Vec<Offset>,
}

impl ReturnSpace {
    /// Build a return space from log-returns and a scale factor.
    ///
    /// Fails if the space is empty, the scale factor is not positive, or
    /// some `r · scale_factor` is not an integer (within
    /// [`INTEGRALITY_TOLERANCE`]).
    pub fn new(log_returns: Vec<Real>, scale_factor: Real) -> Result<Self> {
        ensure!(!log_returns.is_empty(), "return space is empty");
        ensure!(
            scale_factor.is_finite() && scale_factor > 0.0,
            "scale factor must be positive, got {scale_factor}"
        );

        let mut offsets = Vec::with_capacity(log_returns.len());
        for (j, &r) in log_returns.iter().enumerate() {
            let scaled = r * scale_factor;
            let rounded = scaled.round();
            ensure!(
                (scaled - rounded).abs() <= INTEGRALITY_TOLERANCE,
                "log-return {r} at state {j} scales to {scaled}, which is not an integer offset"
            );
            let offset = rounded.to_i64().ok_or_else(|| {
                Error::Precondition(format!(
                    "log-return {r} at state {j} overflows the offset range"
                ))
            })?;
            offsets.push(offset);
        }

        Ok(Self {
            log_returns,
            scale_factor,
            offsets,
        })
    }

    /// Symmetric, equally spaced return space
    /// `{-half_width·step, …, 0, …, half_width·step}`.
    ///
    /// This is the shape under which the lattice recombines and grows
    /// linearly in the number of steps.
    pub fn equally_spaced(step: Real, half_width: usize, scale_factor: Real) -> Result<Self> {
        ensure!(step.is_finite() && step > 0.0, "step must be positive, got {step}");
        let k = half_width as i64;
        let log_returns = (-k..=k).map(|i| i as Real * step).collect();
        Self::new(log_returns, scale_factor)
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.log_returns.len()
    }

    /// Always `false`: construction rejects an empty space.
    pub fn is_empty(&self) -> bool {
        self.log_returns.is_empty()
    }

    /// The unscaled per-period log-returns.
    pub fn log_returns(&self) -> &[Real] {
        &self.log_returns
    }

    /// Factor converting log-returns to integer offsets.
    pub fn scale_factor(&self) -> Real {
        self.scale_factor
    }

    /// Scaled integer offsets, aligned with [`log_returns`](Self::log_returns).
    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    /// Gross one-period return levels `exp(r)`.
    pub fn return_levels(&self) -> StateVector {
        StateVector::from_vec(self.log_returns.iter().map(|r| r.exp()).collect())
    }

    /// Cumulative log-return represented by a lattice offset.
    pub fn log_return_of(&self, offset: Offset) -> Real {
        offset as Real / self.scale_factor
    }

    /// Gross return `exp(offset / scale_factor)` of a lattice offset.
    pub fn growth_of(&self, offset: Offset) -> GrossReturn {
        self.log_return_of(offset).exp()
    }
}
