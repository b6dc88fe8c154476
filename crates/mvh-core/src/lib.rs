//! # mvh-core
//!
//! Core types and error definitions for mvhedge-rs.
//!
//! This crate provides the building blocks shared across all other crates in
//! the workspace: primitive type aliases and the error hierarchy with its
//! `ensure!` / `ensure_post!` / `degenerate!` macros.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `ensure_post!` / `degenerate!` macros.
pub mod errors;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Alias used for array sizes / indices.
pub type Size = usize;

/// A probability in [0, 1].
pub type Probability = Real;

/// A price or value.
pub type Price = Real;

/// A one-period gross return (e.g. 1.001 for 0.1 % per period).
pub type GrossReturn = Real;

/// A scaled, integer-valued cumulative log-return identifying a lattice node.
pub type Offset = i64;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
