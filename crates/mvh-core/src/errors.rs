//! Error types for mvhedge-rs.
//!
//! Every stage of the hedging pipeline returns [`Result`]. Failures fall in
//! three families: bad inputs ([`Error::Precondition`],
//! [`Error::InvalidArgument`]), markets for which the variance-optimal
//! quantities are undefined ([`Error::DegenerateMarket`]), and broken
//! contracts between the lattice and the recursions ([`Error::MissingNode`]).
//! None of them is retryable: the computation is a pure function of its
//! inputs.

use thiserror::Error;

/// The top-level error type used throughout mvhedge-rs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Input validation failed before any computation started.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// A computed result violates its documented guarantee.
    #[error("postcondition not satisfied: {0}")]
    Postcondition(String),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A zero (or numerically zero) denominator: the asset is riskless or
    /// its excess return has no variance under the physical measure.
    #[error("degenerate market: {0}")]
    DegenerateMarket(String),

    /// A successor node required by a backward recursion is absent from the
    /// lattice. The lattice and the return space it is paired with were not
    /// built from the same scaled offsets.
    #[error("lattice invariant violated: node {offset} missing at step {step}")]
    MissingNode {
        /// Time step that was searched.
        step: usize,
        /// Scaled cumulative log-return that was not found.
        offset: i64,
    },
}

impl Error {
    /// `true` for defect-class errors (internal invariant violations) as
    /// opposed to problems with the caller's inputs.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Error::MissingNode { .. } | Error::Postcondition(_))
    }
}

/// Shorthand `Result` type used throughout mvhedge-rs.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use mvh_core::{ensure, errors::Error};
/// fn positive(x: f64) -> mvh_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Postcondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use mvh_core::{ensure_post, errors::Error};
/// fn normalise(w: &[f64]) -> mvh_core::errors::Result<Vec<f64>> {
///     let total: f64 = w.iter().sum();
///     let out: Vec<f64> = w.iter().map(|x| x / total).collect();
///     ensure_post!(out.iter().all(|x| x.is_finite()), "non-finite weight");
///     Ok(out)
/// }
/// assert!(normalise(&[1.0, 3.0]).is_ok());
/// assert!(normalise(&[0.0, 0.0]).is_err());
/// ```
#[macro_export]
macro_rules! ensure_post {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Postcondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::DegenerateMarket(...))` immediately.
///
/// # Example
/// ```
/// use mvh_core::{degenerate, errors::Error};
/// fn ratio(num: f64, den: f64) -> mvh_core::errors::Result<f64> {
///     if den == 0.0 {
///         degenerate!("zero denominator");
///     }
///     Ok(num / den)
/// }
/// assert!(matches!(ratio(1.0, 0.0), Err(Error::DegenerateMarket(_))));
/// ```
#[macro_export]
macro_rules! degenerate {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::DegenerateMarket(format!($($msg)*)))
    };
}
