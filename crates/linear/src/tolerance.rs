//! Mixed absolute/relative float comparison.
//!
//! Two values are considered equal when their difference is within
//! `max(absolute, max(|a|, |b|) * relative)`. The absolute bound governs values near zero (and in
//! particular the zero-pivot test), the relative bound takes over for large magnitudes.

use nalgebra::RealField;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Per-precision default tolerance bounds.
pub trait DefaultTolerance: RealField + Copy {
    fn absolute_tolerance() -> Self;
    fn relative_tolerance() -> Self;
}

impl DefaultTolerance for f32 {
    fn absolute_tolerance() -> Self {
        1e-5
    }
    fn relative_tolerance() -> Self {
        1e-6
    }
}

impl DefaultTolerance for f64 {
    fn absolute_tolerance() -> Self {
        1e-8
    }
    fn relative_tolerance() -> Self {
        1e-9
    }
}

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance<T> {
    /// Lower bound on the tolerance, used for values close to zero
    pub absolute: T,
    /// Tolerance per unit of magnitude of the larger compared value
    pub relative: T,
}

impl<T: DefaultTolerance> Default for Tolerance<T> {
    fn default() -> Self {
        Tolerance {
            absolute: T::absolute_tolerance(),
            relative: T::relative_tolerance(),
        }
    }
}

impl<T> Tolerance<T>
where
    T: RealField + Copy,
{
    pub fn new(absolute: T, relative: T) -> Self {
        Tolerance { absolute, relative }
    }

    /// The allowed difference when comparing `a` and `b`.
    pub fn bound(&self, a: T, b: T) -> T {
        let magnitude = a.abs().max(b.abs());
        self.absolute.max(magnitude * self.relative)
    }

    pub fn is_same(&self, a: T, b: T) -> bool {
        (a - b).abs() <= self.bound(a, b)
    }

    pub fn is_zero(&self, a: T) -> bool {
        self.is_same(a, T::zero())
    }

    /// `a <= b`, with `a` slightly above `b` still accepted.
    pub fn is_lesser_equal(&self, a: T, b: T) -> bool {
        a < b + self.bound(a, b)
    }

    /// `a >= b`, with `a` slightly below `b` still accepted.
    pub fn is_greater_equal(&self, a: T, b: T) -> bool {
        a > b - self.bound(a, b)
    }
}

/// [`Tolerance::is_same`] with the default tolerance for `T`.
pub fn is_same<T: DefaultTolerance>(a: T, b: T) -> bool {
    Tolerance::default().is_same(a, b)
}

/// [`Tolerance::is_lesser_equal`] with the default tolerance for `T`.
pub fn is_lesser_equal<T: DefaultTolerance>(a: T, b: T) -> bool {
    Tolerance::default().is_lesser_equal(a, b)
}

/// [`Tolerance::is_greater_equal`] with the default tolerance for `T`.
pub fn is_greater_equal<T: DefaultTolerance>(a: T, b: T) -> bool {
    Tolerance::default().is_greater_equal(a, b)
}
