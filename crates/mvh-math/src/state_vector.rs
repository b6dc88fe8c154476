//! `StateVector`: one real number per state of the one-period return space.
//!
//! A thin newtype around `nalgebra::DVector<f64>`. Return levels, excess
//! returns, physical and variance-optimal probabilities, and the successor
//! values of a lattice node are all `StateVector`s over the same index set,
//! so expectations reduce to dot products.

use mvh_core::Real;
use nalgebra::DVector;
use std::ops::{Div, Index, Mul, Sub};

/// A dynamically-sized vector of `Real` values indexed by state.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector(DVector<Real>);

impl StateVector {
    /// Create a vector filled with `value`.
    pub fn from_element(n: usize, value: Real) -> Self {
        Self(DVector::from_element(n, value))
    }

    /// Create a vector from a slice.
    pub fn from_slice(data: &[Real]) -> Self {
        Self(DVector::from_column_slice(data))
    }

    /// Create a vector from a `Vec`.
    pub fn from_vec(data: Vec<Real>) -> Self {
        Self(DVector::from_vec(data))
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return `true` if there are no states.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the elements as a slice.
    pub fn as_slice(&self) -> &[Real] {
        self.0.as_slice()
    }

    /// Dot product with another vector.
    pub fn dot(&self, other: &StateVector) -> Real {
        self.0.dot(&other.0)
    }

    /// Expectation of `self` under the distribution `probs`.
    ///
    /// Same as [`dot`](Self::dot); the name documents intent at call sites.
    pub fn expectation(&self, probs: &StateVector) -> Real {
        self.dot(probs)
    }

    /// Element-wise (Hadamard) product.
    pub fn component_mul(&self, other: &StateVector) -> Self {
        Self(self.0.component_mul(&other.0))
    }

    /// Subtract `scalar` from every element.
    pub fn shift(&self, scalar: Real) -> Self {
        Self(self.0.add_scalar(-scalar))
    }

    /// Sum of all elements.
    pub fn sum(&self) -> Real {
        self.0.sum()
    }

    /// Minimum element.
    pub fn min(&self) -> Real {
        self.0.min()
    }

    /// Apply a function element-wise, returning a new vector.
    pub fn map<F: Fn(Real) -> Real>(&self, f: F) -> Self {
        Self(self.0.map(f))
    }

    /// Iterator over elements.
    pub fn iter(&self) -> impl Iterator<Item = &Real> {
        self.0.iter()
    }
}

// ── From conversions ──────────────────────────────────────────────────────────

impl From<Vec<Real>> for StateVector {
    fn from(v: Vec<Real>) -> Self {
        Self::from_vec(v)
    }
}

impl From<&[Real]> for StateVector {
    fn from(s: &[Real]) -> Self {
        Self::from_slice(s)
    }
}

// ── Index ─────────────────────────────────────────────────────────────────────

impl Index<usize> for StateVector {
    type Output = Real;
    fn index(&self, i: usize) -> &Real {
        &self.0[i]
    }
}

// ── Element-wise arithmetic ───────────────────────────────────────────────────

impl Sub for &StateVector {
    type Output = StateVector;
    fn sub(self, rhs: &StateVector) -> StateVector {
        StateVector(&self.0 - &rhs.0)
    }
}

impl Mul<Real> for &StateVector {
    type Output = StateVector;
    fn mul(self, rhs: Real) -> StateVector {
        StateVector(&self.0 * rhs)
    }
}

impl Div<Real> for &StateVector {
    type Output = StateVector;
    fn div(self, rhs: Real) -> StateVector {
        StateVector(&self.0 / rhs)
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl std::fmt::Display for StateVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}
