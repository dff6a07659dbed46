//! Edge weights and path costs with an explicit "no edge" sentinel.
//!
//! Distances are never represented with floating-point infinity. A missing
//! edge or an unreachable pair is [`Weight::Infinite`], and every arithmetic
//! or comparison involving it is defined so that relaxation can never mistake
//! an infinite route for an improvement.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// A path cost: either a finite real number or "no path".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weight {
    /// A finite cost. Never NaN when produced by this crate.
    Finite(f64),
    /// No edge / unreachable.
    #[default]
    Infinite,
}

impl Weight {
    /// Cost of the empty path.
    pub const ZERO: Weight = Weight::Finite(0.0);

    /// Converts a raw `f64` into a weight.
    ///
    /// `+inf` maps to [`Weight::Infinite`]. NaN and `-inf` have no meaning as
    /// a cost and yield `None`.
    pub fn try_from_f64(value: f64) -> Option<Self> {
        if value.is_nan() || value == f64::NEG_INFINITY {
            None
        } else if value == f64::INFINITY {
            Some(Weight::Infinite)
        } else {
            Some(Weight::Finite(value))
        }
    }

    /// Returns true for a finite cost.
    pub fn is_finite(&self) -> bool {
        matches!(self, Weight::Finite(_))
    }

    /// Returns true for the sentinel.
    pub fn is_infinite(&self) -> bool {
        matches!(self, Weight::Infinite)
    }

    /// Returns true for a finite cost below zero.
    pub fn is_negative(&self) -> bool {
        matches!(self, Weight::Finite(v) if *v < 0.0)
    }

    /// The finite value, if any.
    pub fn value(&self) -> Option<f64> {
        match self {
            Weight::Finite(v) => Some(*v),
            Weight::Infinite => None,
        }
    }

    /// Lossy conversion for reporting: the sentinel becomes `f64::INFINITY`.
    pub fn to_f64(&self) -> f64 {
        self.value().unwrap_or(f64::INFINITY)
    }
}

impl Add for Weight {
    type Output = Weight;

    /// Infinite absorbs everything. Finite sums saturate at the `f64` range
    /// so an overflow can never turn into the sentinel or into NaN.
    fn add(self, rhs: Weight) -> Weight {
        match (self, rhs) {
            (Weight::Finite(a), Weight::Finite(b)) => {
                Weight::Finite((a + b).clamp(f64::MIN, f64::MAX))
            }
            _ => Weight::Infinite,
        }
    }
}

impl PartialOrd for Weight {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Weight::Finite(a), Weight::Finite(b)) => a.partial_cmp(b),
            (Weight::Finite(_), Weight::Infinite) => Some(Ordering::Less),
            (Weight::Infinite, Weight::Finite(_)) => Some(Ordering::Greater),
            (Weight::Infinite, Weight::Infinite) => Some(Ordering::Equal),
        }
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weight::Finite(v) => write!(f, "{}", v),
            Weight::Infinite => write!(f, "∞"),
        }
    }
}
