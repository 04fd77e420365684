//! Tidal Series Fill
//!
//! Missing-value filling: constant fill, forward fill (pad) and linear
//! interpolation (lerp). All fills work in place over a value slice and
//! are exposed on both `Series` and `SeriesViewMut`.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::float::Real;
use crate::series::Series;

// =============================================================================
// Slice Fills
// =============================================================================

/// Replace every NaN with `value`.
pub fn fillna<T: Real>(values: &mut [T], value: T) {
    for v in values.iter_mut().filter(|v| v.is_nan()) {
        *v = value;
    }
}

/// Forward-fill NaN runs with the most recent preceding value.
/// A leading NaN run has no preceding value and is left as is.
pub fn pad<T: Real>(values: &mut [T]) {
    let mut last: Option<T> = None;
    for v in values.iter_mut() {
        if v.is_nan() {
            if let Some(known) = last {
                *v = known;
            }
        } else {
            last = Some(*v);
        }
    }
}

/// Linearly interpolate NaN runs bounded by known values on both sides.
///
/// For a run between `left` at position `b` and `right` at position `e`,
/// position `x` becomes `left + (right - left) * (x - b) / (e - b)`.
/// Leading and trailing runs are left unfilled.
pub fn lerp<T: Real>(values: &mut [T]) {
    let mut prev_known: Option<usize> = None;
    for e in 0..values.len() {
        if values[e].is_nan() {
            continue;
        }
        if let Some(b) = prev_known {
            if e > b + 1 {
                let left = values[b];
                let right = values[e];
                let span = T::from_usize_lossy(e - b);
                for x in b + 1..e {
                    let t = T::from_usize_lossy(x - b) / span;
                    values[x] = left + (right - left) * t;
                }
            }
        }
        prev_known = Some(e);
    }
}

// =============================================================================
// Series Fills
// =============================================================================

impl<T: Real> Series<T> {
    /// Replace every NaN with `value`, in place.
    pub fn fillna(&mut self, value: T) -> &mut Self {
        fillna(self.values_mut(), value);
        self
    }

    /// Forward-fill NaN runs, in place.
    pub fn pad(&mut self) -> &mut Self {
        pad(self.values_mut());
        self
    }

    /// Linearly interpolate bounded NaN runs, in place.
    pub fn lerp(&mut self) -> &mut Self {
        lerp(self.values_mut());
        self
    }
}

// =============================================================================
// Tests
// =============================================================================
