//! Payoffs of the terminal asset price.
//!
//! A [`Payoff`] maps the underlying price at maturity to the claim's
//! cash flow. The value-process recursion evaluates it once per terminal
//! lattice node.

use mvh_core::{Price, Real};
use std::fmt;

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionType {
    /// A call option (right to buy).
    Call,
    /// A put option (right to sell).
    Put,
}

impl OptionType {
    /// +1 for Call, −1 for Put.
    pub fn sign(self) -> Real {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

/// Base trait for payoffs.
pub trait Payoff: fmt::Debug + Send + Sync {
    /// Compute the payoff given the underlying price at maturity.
    fn value(&self, price: Price) -> Real;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> String {
        self.name().to_string()
    }
}

/// Plain vanilla payoff `max(φ(S − K), 0)`, `φ = +1` for Call, `−1` for Put.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlainVanillaPayoff {
    /// Option type.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: Price,
}

impl PlainVanillaPayoff {
    /// Create a new plain vanilla payoff.
    pub fn new(option_type: OptionType, strike: Price) -> Self {
        Self {
            option_type,
            strike,
        }
    }

    /// European call `max(S − K, 0)`.
    pub fn call(strike: Price) -> Self {
        Self::new(OptionType::Call, strike)
    }

    /// European put `max(K − S, 0)`.
    pub fn put(strike: Price) -> Self {
        Self::new(OptionType::Put, strike)
    }
}

impl Payoff for PlainVanillaPayoff {
    fn value(&self, price: Price) -> Real {
        (self.option_type.sign() * (price - self.strike)).max(0.0)
    }

    fn name(&self) -> &str {
        "Vanilla"
    }

    fn description(&self) -> String {
        format!("{} {} @ {}", self.name(), self.option_type, self.strike)
    }
}

/// Cash-or-nothing payoff: pays `cash_payoff` if `φ(S − K) > 0`, else 0.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CashOrNothingPayoff {
    /// Option type.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: Price,
    /// Fixed cash payoff.
    pub cash_payoff: Real,
}

impl CashOrNothingPayoff {
    /// Create a new cash-or-nothing payoff.
    pub fn new(option_type: OptionType, strike: Price, cash_payoff: Real) -> Self {
        Self {
            option_type,
            strike,
            cash_payoff,
        }
    }
}

impl Payoff for CashOrNothingPayoff {
    fn value(&self, price: Price) -> Real {
        if self.option_type.sign() * (price - self.strike) > 0.0 {
            self.cash_payoff
        } else {
            0.0
        }
    }

    fn name(&self) -> &str {
        "CashOrNothing"
    }
}

/// Arbitrary payoff given as a closure of the terminal price.
///
/// ```
/// use mvh_instruments::{FnPayoff, Payoff};
/// let straddle = FnPayoff::new("Straddle", |s| (s - 100.0).abs());
/// assert_eq!(straddle.value(90.0), 10.0);
/// ```
pub struct FnPayoff<F> {
    name: String,
    f: F,
}

impl<F> FnPayoff<F>
where
    F: Fn(Price) -> Real + Send + Sync,
{
    /// Wrap `f` under a display name.
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> fmt::Debug for FnPayoff<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPayoff").field("name", &self.name).finish()
    }
}

impl<F> Payoff for FnPayoff<F>
where
    F: Fn(Price) -> Real + Send + Sync,
{
    fn value(&self, price: Price) -> Real {
        (self.f)(price)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
