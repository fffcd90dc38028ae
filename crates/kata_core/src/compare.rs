//! Equality policy between expected and actual values.
//!
//! Each exercise picks its own policy: integer and string exercises compare exactly, float-valued exercises
//! compare within a [`Tolerance`].

use std::fmt;
use std::sync::Arc;

/// Accepted distance between an expected and an actual float.
///
/// A value is accepted if it is within `absolute` of the expected value, or within `relative` times the
/// larger magnitude of the two.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub absolute: f64,
    pub relative: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            absolute: 1e-9,
            relative: 1e-9,
        }
    }
}

impl Tolerance {
    pub const fn absolute(epsilon: f64) -> Self {
        Self {
            absolute: epsilon,
            relative: 0.0,
        }
    }

    pub const fn relative(ratio: f64) -> Self {
        Self {
            absolute: 0.0,
            relative: ratio,
        }
    }

    pub fn accepts(&self, expected: f64, actual: f64) -> bool {
        // Covers matching infinities.
        if expected == actual {
            return true;
        }
        if expected.is_nan() || actual.is_nan() {
            return false;
        }
        let diff = (expected - actual).abs();
        diff <= self.absolute || diff <= self.relative * expected.abs().max(actual.abs())
    }
}

/// Approximate equality for values that contain floats.
pub trait Approx {
    fn approx_eq(&self, other: &Self, tolerance: Tolerance) -> bool;
}

impl Approx for f64 {
    fn approx_eq(&self, other: &Self, tolerance: Tolerance) -> bool {
        tolerance.accepts(*self, *other)
    }
}

impl Approx for f32 {
    fn approx_eq(&self, other: &Self, tolerance: Tolerance) -> bool {
        tolerance.accepts(f64::from(*self), f64::from(*other))
    }
}

impl<T: Approx> Approx for [T] {
    fn approx_eq(&self, other: &Self, tolerance: Tolerance) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.approx_eq(b, tolerance))
    }
}

impl<T: Approx> Approx for Vec<T> {
    fn approx_eq(&self, other: &Self, tolerance: Tolerance) -> bool {
        self.as_slice().approx_eq(other.as_slice(), tolerance)
    }
}

impl<T: Approx> Approx for Option<T> {
    fn approx_eq(&self, other: &Self, tolerance: Tolerance) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.approx_eq(b, tolerance),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<A: Approx, B: Approx> Approx for (A, B) {
    fn approx_eq(&self, other: &Self, tolerance: Tolerance) -> bool {
        self.0.approx_eq(&other.0, tolerance) && self.1.approx_eq(&other.1, tolerance)
    }
}

/// Which comparison a [`Matcher`] performs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Policy {
    Exact,
    Within(Tolerance),
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Exact => write!(f, "exact"),
            Policy::Within(t) => write!(f, "within (abs {:e}, rel {:e})", t.absolute, t.relative),
        }
    }
}

type EqFn<O> = dyn Fn(&O, &O) -> bool + Send + Sync;

/// Per-exercise comparison of `expected` against `actual`.
pub struct Matcher<O> {
    policy: Policy,
    eq: Arc<EqFn<O>>,
}

impl<O: PartialEq + 'static> Matcher<O> {
    pub fn exact() -> Self {
        Self {
            policy: Policy::Exact,
            eq: Arc::new(|expected: &O, actual: &O| expected == actual),
        }
    }
}

impl<O: Approx + 'static> Matcher<O> {
    pub fn within(tolerance: Tolerance) -> Self {
        Self {
            policy: Policy::Within(tolerance),
            eq: Arc::new(move |expected: &O, actual: &O| expected.approx_eq(actual, tolerance)),
        }
    }
}

impl<O> Matcher<O> {
    pub fn matches(&self, expected: &O, actual: &O) -> bool {
        (self.eq)(expected, actual)
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }
}

impl<O> Clone for Matcher<O> {
    fn clone(&self) -> Self {
        Self {
            policy: self.policy,
            eq: Arc::clone(&self.eq),
        }
    }
}

impl<O> fmt::Debug for Matcher<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher").field("policy", &self.policy).finish_non_exhaustive()
    }
}
