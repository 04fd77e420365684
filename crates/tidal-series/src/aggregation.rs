//! Tidal Series Aggregation
//!
//! NaN-aware reductions of a series view to a scalar. NaN values are skipped
//! while accumulating; an empty or all-NaN input yields NaN (or `None` for
//! the arg-extrema) instead of an error.
//!
//! Any `Fn(SeriesView<T>) -> T` is an aggregate, as is every
//! `AggregateFunction` variant, so both can be handed to rolling windows and
//! resamplers.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::float::{fp_zero, nan_last_cmp, Real};
use crate::series::SeriesView;

// =============================================================================
// Aggregate Trait
// =============================================================================

/// A NaN-aware reduction of a series view to a scalar.
pub trait Aggregate<T: Real> {
    fn aggregate(&self, view: SeriesView<'_, T>) -> T;
}

impl<T: Real, F> Aggregate<T> for F
where
    F: Fn(SeriesView<'_, T>) -> T,
{
    fn aggregate(&self, view: SeriesView<'_, T>) -> T {
        self(view)
    }
}

// =============================================================================
// Aggregate Function
// =============================================================================

/// Built-in aggregation functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateFunction {
    Sum,
    Count,
    Min,
    Max,
    Mean,
    Median,
    First,
    Last,
    /// Sample standard deviation about the view's own mean (ddof 1).
    Std,
    /// Sample variance about the view's own mean (ddof 1).
    Variance,
    Skew,
}

impl AggregateFunction {
    /// Apply the aggregation to a view.
    pub fn apply<T: Real>(&self, view: SeriesView<'_, T>) -> T {
        match self {
            Self::Sum => sum(view),
            Self::Count => T::from_usize_lossy(count(view)),
            Self::Min => min(view),
            Self::Max => max(view),
            Self::Mean => mean(view),
            Self::Median => median(view),
            Self::First => first(view),
            Self::Last => last(view),
            Self::Std => std(view, mean(view), 1),
            Self::Variance => variance(view, mean(view), 1),
            Self::Skew => skew(view),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Count => "count",
            Self::Min => "min",
            Self::Max => "max",
            Self::Mean => "mean",
            Self::Median => "median",
            Self::First => "first",
            Self::Last => "last",
            Self::Std => "std",
            Self::Variance => "variance",
            Self::Skew => "skew",
        }
    }
}

impl<T: Real> Aggregate<T> for AggregateFunction {
    fn aggregate(&self, view: SeriesView<'_, T>) -> T {
        self.apply(view)
    }
}

// =============================================================================
// Primitives
// =============================================================================

/// Number of non-NaN values.
pub fn count<T: Real>(view: SeriesView<'_, T>) -> usize {
    view.values().iter().filter(|v| !v.is_nan()).count()
}

/// Sum of non-NaN values.
pub fn sum<T: Real>(view: SeriesView<'_, T>) -> T {
    let (sum, n) = view.backend().nansum(view.values());
    if n == 0 {
        return T::nan();
    }
    sum
}

/// Sum of non-NaN values divided by their count.
pub fn mean<T: Real>(view: SeriesView<'_, T>) -> T {
    let (sum, n) = view.backend().nansum(view.values());
    if n == 0 {
        return T::nan();
    }
    sum / T::from_usize_lossy(n)
}

pub fn min<T: Real>(view: SeriesView<'_, T>) -> T {
    let mut found = false;
    let mut min = T::max_value();
    for &v in view.values().iter().filter(|v| !v.is_nan()) {
        found = true;
        if v < min {
            min = v;
        }
    }
    if found {
        min
    } else {
        T::nan()
    }
}

pub fn max<T: Real>(view: SeriesView<'_, T>) -> T {
    let mut found = false;
    let mut max = T::min_value();
    for &v in view.values().iter().filter(|v| !v.is_nan()) {
        found = true;
        if v > max {
            max = v;
        }
    }
    if found {
        max
    } else {
        T::nan()
    }
}

/// Position of the first smallest non-NaN value.
pub fn argmin<T: Real>(view: SeriesView<'_, T>) -> Option<usize> {
    let mut best: Option<(usize, T)> = None;
    for (i, &v) in view.values().iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v >= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Position of the first largest non-NaN value.
pub fn argmax<T: Real>(view: SeriesView<'_, T>) -> Option<usize> {
    let mut best: Option<(usize, T)> = None;
    for (i, &v) in view.values().iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Median of the non-NaN values. The source order is left untouched.
pub fn median<T: Real>(view: SeriesView<'_, T>) -> T {
    let mut sorted: Vec<T> = view.values().to_vec();
    sorted.sort_unstable_by(nan_last_cmp);
    median_of_sorted(&sorted)
}

/// Median of a slice sorted with NaN last; trailing NaN are ignored.
pub(crate) fn median_of_sorted<T: Real>(sorted: &[T]) -> T {
    let n = sorted.iter().take_while(|v| !v.is_nan()).count();
    if n == 0 {
        return T::nan();
    }
    let mid = n / 2;
    if n % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / (T::one() + T::one())
    } else {
        sorted[mid]
    }
}

/// Mean squared deviation about a caller-supplied `mean`, divided by
/// `count - ddof`. NaN for fewer than two values or a non-positive divisor.
pub fn variance<T: Real>(view: SeriesView<'_, T>, mean: T, ddof: u32) -> T {
    let mut n = 0usize;
    let mut acc = T::zero();
    for &v in view.values().iter().filter(|v| !v.is_nan()) {
        let d = v - mean;
        acc = acc + d * d;
        n += 1;
    }
    let ddof = ddof as usize;
    if n < 2 || n <= ddof {
        return T::nan();
    }
    acc / T::from_usize_lossy(n - ddof)
}

/// Square root of [`variance`].
pub fn std<T: Real>(view: SeriesView<'_, T>, mean: T, ddof: u32) -> T {
    variance(view, mean, ddof).sqrt()
}

/// Bias-corrected Fisher-Pearson skewness of the non-NaN values.
pub fn skew<T: Real>(view: SeriesView<'_, T>) -> T {
    let n = count(view);
    if n < 3 {
        return T::nan();
    }
    let mean = mean(view);

    let mut m2 = T::zero();
    let mut m3 = T::zero();
    for &v in view.values().iter().filter(|v| !v.is_nan()) {
        let d = v - mean;
        let d2 = d * d;
        m2 = m2 + d2;
        m3 = m3 + d2 * d;
    }

    let m2 = fp_zero(m2, T::EPS);
    let m3 = fp_zero(m3, T::EPS);
    if m2 == T::zero() || m3 == T::zero() {
        return T::zero();
    }

    let nf = T::from_usize_lossy(n);
    let two = T::one() + T::one();
    let g1 = m3 / (m2.sqrt() * m2);
    nf * (nf - T::one()).sqrt() * g1 / (nf - two)
}

/// Value at the first position, NaN when empty.
pub fn first<T: Real>(view: SeriesView<'_, T>) -> T {
    view.values().first().copied().unwrap_or_else(T::nan)
}

/// Value at the last position, NaN when empty.
pub fn last<T: Real>(view: SeriesView<'_, T>) -> T {
    view.values().last().copied().unwrap_or_else(T::nan)
}

// =============================================================================
// Tests
// =============================================================================
