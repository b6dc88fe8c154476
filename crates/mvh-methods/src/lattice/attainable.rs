//! Attainable nodes of the recombining log-return lattice.
//!
//! Layer `t` holds every sum of `t` offsets drawn from the return space.
//! Paths that reach the same sum share a node, so an equally spaced space
//! of `n` states grows by `n − 1` nodes per step instead of `n^t`.

use mvh_core::{ensure, Error, Offset, Price, Real, Result, Size};
use mvh_models::ReturnSpace;
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Attainable scaled cumulative log-returns at each step `0..=horizon`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    layers: Vec<BTreeSet<Offset>>,
    scale_factor: Real,
}

impl Lattice {
    /// Build the lattice for `horizon` steps of `space`.
    ///
    /// Layer 0 is `{0}`; layer `t + 1` is `{x + dx : x ∈ layer t, dx ∈ offsets}`.
    pub fn build(space: &ReturnSpace, horizon: Size) -> Result<Self> {
        ensure!(!space.is_empty(), "return space is empty");
        ensure!(horizon > 0, "horizon must be at least one step");

        let mut layers = Vec::with_capacity(horizon + 1);
        let mut current: BTreeSet<Offset> = BTreeSet::from([0]);
        for t in 1..=horizon {
            let mut next = BTreeSet::new();
            for &x in &current {
                for &dx in space.offsets() {
                    let y = x.checked_add(dx).ok_or_else(|| {
                        Error::Precondition(format!(
                            "cumulative offset overflows at step {t}; reduce the scale factor"
                        ))
                    })?;
                    next.insert(y);
                }
            }
            trace!(step = t, nodes = next.len(), "lattice layer");
            layers.push(current);
            current = next;
        }
        layers.push(current);

        debug!(
            horizon,
            states = space.len(),
            terminal_nodes = layers[horizon].len(),
            "built attainable lattice"
        );
        Ok(Self {
            layers,
            scale_factor: space.scale_factor(),
        })
    }

    /// Number of time steps `T`.
    pub fn horizon(&self) -> Size {
        self.layers.len() - 1
    }

    /// Factor converting offsets back to log-returns.
    pub fn scale_factor(&self) -> Real {
        self.scale_factor
    }

    /// Attainable offsets at step `t`, or `None` past the horizon.
    pub fn layer(&self, t: Size) -> Option<&BTreeSet<Offset>> {
        self.layers.get(t)
    }

    /// Number of nodes at step `t` (zero past the horizon).
    pub fn node_count(&self, t: Size) -> Size {
        self.layer(t).map_or(0, BTreeSet::len)
    }

    /// Whether `(t, x)` is an attainable node.
    pub fn contains(&self, t: Size, x: Offset) -> bool {
        self.layer(t).is_some_and(|l| l.contains(&x))
    }

    /// Asset price `s0 · exp(x / scale_factor)` at offset `x`.
    pub fn price_at(&self, s0: Price, x: Offset) -> Price {
        s0 * (x as Real / self.scale_factor).exp()
    }

    /// All nodes `(t, x)` in increasing `t`, then increasing `x`.
    pub fn iter(&self) -> impl Iterator<Item = (Size, Offset)> + '_ {
        self.layers
            .iter()
            .enumerate()
            .flat_map(|(t, layer)| layer.iter().map(move |&x| (t, x)))
    }
}
