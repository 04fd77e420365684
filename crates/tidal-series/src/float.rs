//! Tidal Series Float
//!
//! Numeric element trait for series values. The value width is a generic
//! parameter; `f64` and `f32` are supported.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use num_traits::{Float, FloatConst, FromPrimitive};
use std::cmp::Ordering;
use std::fmt::Debug;

// =============================================================================
// Real
// =============================================================================

/// Floating-point element type of a series.
pub trait Real: Float + FloatConst + FromPrimitive + Debug + Default + Send + Sync + 'static {
    /// Tolerance used for near-zero cleanup and approximate equality.
    const EPS: Self;

    /// Convert from a count.
    fn from_usize_lossy(v: usize) -> Self;

    fn to_f64_lossy(self) -> f64;
}

impl Real for f64 {
    const EPS: Self = 10e-8;

    #[inline]
    fn from_usize_lossy(v: usize) -> Self {
        v as f64
    }

    #[inline]
    fn to_f64_lossy(self) -> f64 {
        self
    }
}

impl Real for f32 {
    const EPS: Self = 10e-4;

    #[inline]
    fn from_usize_lossy(v: usize) -> Self {
        v as f32
    }

    #[inline]
    fn to_f64_lossy(self) -> f64 {
        self as f64
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Round values within `eps` of zero to exactly zero.
#[inline]
pub fn fp_zero<T: Real>(v: T, eps: T) -> T {
    if v.abs() < eps {
        T::zero()
    } else {
        v
    }
}

/// Total order placing NaN after every number.
#[inline]
pub fn nan_last_cmp<T: Real>(a: &T, b: &T) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
    }
}

// =============================================================================
// Tests
// =============================================================================
