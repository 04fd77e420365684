//! Tidal Series Buffer
//!
//! The columnar series type: a timestamp index and a value column of equal
//! length, plus the nominal sampling period. Elementwise operations mutate
//! the receiver in place and return it for chaining; borrowed views give
//! read-only or mutable access to a sub-range of the same storage.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::exp_window::{Decay, ExpWindow};
use crate::fill;
use crate::float::Real;
use crate::kernel::Backend;
use crate::resample::Resampler;
use crate::window::Window;
use tidal_common::{Kernel, ResampleOrigin, Result, SeriesConfig, TidalError};

// =============================================================================
// Series
// =============================================================================

/// Paired timestamp/value sequences sharing a nominal sampling period.
///
/// A series built with [`Series::from_values`] has an empty index and
/// denotes a plain value vector. Index-based operations (sorting by index,
/// resampling) must not be invoked on such a series.
#[derive(Debug, Clone)]
pub struct Series<T: Real = f64> {
    period: i64,
    index: Vec<i64>,
    values: Vec<T>,
    backend: Backend,
}

impl<T: Real> PartialEq for Series<T> {
    fn eq(&self, other: &Self) -> bool {
        self.period == other.period && self.index == other.index && self.values == other.values
    }
}

impl<T: Real> Series<T> {
    /// Create a series from explicit period, index and values.
    pub fn new(period: i64, index: Vec<i64>, values: Vec<T>) -> Result<Self> {
        if period < 0 {
            return Err(TidalError::InvalidPeriod(period));
        }
        if index.len() != values.len() {
            return Err(TidalError::InvalidShape {
                index_len: index.len(),
                values_len: values.len(),
            });
        }
        Ok(Self::from_parts(period, index, values, Backend::default()))
    }

    /// Create a bare value vector with no index and period 0.
    pub fn from_values(values: Vec<T>) -> Self {
        Self::from_parts(0, Vec::new(), values, Backend::default())
    }

    pub(crate) fn from_parts(period: i64, index: Vec<i64>, values: Vec<T>, backend: Backend) -> Self {
        debug_assert!(index.is_empty() || index.len() == values.len());
        Self {
            period,
            index,
            values,
            backend,
        }
    }

    /// Select the vector kernel used by bulk operations.
    pub fn with_kernel(mut self, kernel: Kernel) -> Self {
        self.backend = Backend::new(kernel);
        self
    }

    /// Apply engine configuration to this series.
    pub fn with_config(self, config: &SeriesConfig) -> Self {
        self.with_kernel(config.kernel)
    }

    /// Decompose into period, index and values.
    pub fn into_parts(self) -> (i64, Vec<i64>, Vec<T>) {
        (self.period, self.index, self.values)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn period(&self) -> i64 {
        self.period
    }

    pub fn index(&self) -> &[i64] {
        &self.index
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns true unless this is a bare value vector.
    pub fn has_index(&self) -> bool {
        !self.index.is_empty() || self.values.is_empty()
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub(crate) fn index_vec_mut(&mut self) -> &mut Vec<i64> {
        &mut self.index
    }

    pub(crate) fn values_vec_mut(&mut self) -> &mut Vec<T> {
        &mut self.values
    }

    // -------------------------------------------------------------------------
    // Views
    // -------------------------------------------------------------------------

    /// Read-only view of the whole series.
    pub fn view(&self) -> SeriesView<'_, T> {
        SeriesView {
            period: self.period,
            index: &self.index,
            values: &self.values,
            backend: self.backend,
        }
    }

    /// Read-only view of positions `[l, r)`.
    ///
    /// # Panics
    ///
    /// Panics if `l > r` or `r > self.len()`.
    pub fn slice(&self, l: usize, r: usize) -> SeriesView<'_, T> {
        self.view().slice(l, r)
    }

    /// Mutable view of positions `[l, r)` aliasing this series' storage.
    ///
    /// # Panics
    ///
    /// Panics if `l > r` or `r > self.len()`.
    pub fn slice_mut(&mut self, l: usize, r: usize) -> SeriesViewMut<'_, T> {
        let index: &mut [i64] = if self.index.is_empty() {
            &mut []
        } else {
            &mut self.index[l..r]
        };
        SeriesViewMut {
            period: self.period,
            index,
            values: &mut self.values[l..r],
            backend: self.backend,
        }
    }

    // -------------------------------------------------------------------------
    // Elementwise Operations
    // -------------------------------------------------------------------------

    fn check_len(&self, other: &Series<T>) -> Result<()> {
        if self.len() != other.len() {
            return Err(TidalError::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(())
    }

    pub fn add(&mut self, other: &Series<T>) -> Result<&mut Self> {
        self.check_len(other)?;
        self.backend.add(&mut self.values, &other.values);
        Ok(self)
    }

    pub fn sub(&mut self, other: &Series<T>) -> Result<&mut Self> {
        self.check_len(other)?;
        self.backend.sub(&mut self.values, &other.values);
        Ok(self)
    }

    pub fn mul(&mut self, other: &Series<T>) -> Result<&mut Self> {
        self.check_len(other)?;
        self.backend.mul(&mut self.values, &other.values);
        Ok(self)
    }

    pub fn div(&mut self, other: &Series<T>) -> Result<&mut Self> {
        self.check_len(other)?;
        self.backend.div(&mut self.values, &other.values);
        Ok(self)
    }

    /// Elementwise minimum with another series.
    pub fn minimum(&mut self, other: &Series<T>) -> Result<&mut Self> {
        self.check_len(other)?;
        self.backend.minimum(&mut self.values, &other.values);
        Ok(self)
    }

    /// Elementwise maximum with another series.
    pub fn maximum(&mut self, other: &Series<T>) -> Result<&mut Self> {
        self.check_len(other)?;
        self.backend.maximum(&mut self.values, &other.values);
        Ok(self)
    }

    /// Dot product of the value columns.
    pub fn dot(&self, other: &Series<T>) -> Result<T> {
        self.check_len(other)?;
        Ok(self.backend.dot(&self.values, &other.values))
    }

    pub fn add_scalar(&mut self, v: T) -> &mut Self {
        self.backend.add_scalar(&mut self.values, v);
        self
    }

    pub fn sub_scalar(&mut self, v: T) -> &mut Self {
        self.backend.sub_scalar(&mut self.values, v);
        self
    }

    pub fn mul_scalar(&mut self, v: T) -> &mut Self {
        self.backend.mul_scalar(&mut self.values, v);
        self
    }

    pub fn div_scalar(&mut self, v: T) -> &mut Self {
        self.backend.div_scalar(&mut self.values, v);
        self
    }

    pub fn abs(&mut self) -> &mut Self {
        self.backend.abs(&mut self.values);
        self
    }

    pub fn round(&mut self) -> &mut Self {
        self.backend.round(&mut self.values);
        self
    }

    pub fn floor(&mut self) -> &mut Self {
        self.backend.floor(&mut self.values);
        self
    }

    pub fn ceil(&mut self) -> &mut Self {
        self.backend.ceil(&mut self.values);
        self
    }

    pub fn sqrt(&mut self) -> &mut Self {
        self.backend.sqrt(&mut self.values);
        self
    }

    /// Natural logarithm of every value.
    pub fn log(&mut self) -> &mut Self {
        self.backend.map(&mut self.values, |v| v.ln());
        self
    }

    pub fn exp(&mut self) -> &mut Self {
        self.backend.map(&mut self.values, |v| v.exp());
        self
    }

    /// Apply a function to every value.
    pub fn apply(&mut self, f: impl Fn(T) -> T) -> &mut Self {
        for v in self.values.iter_mut() {
            *v = f(*v);
        }
        self
    }

    // -------------------------------------------------------------------------
    // Transforms
    // -------------------------------------------------------------------------

    /// Running sum. NaN positions stay NaN and do not reset the sum.
    pub fn cumsum(&mut self) -> &mut Self {
        let mut acc = T::zero();
        for v in self.values.iter_mut() {
            if !v.is_nan() {
                acc = acc + *v;
                *v = acc;
            }
        }
        self
    }

    /// Lag difference: `v[i] - v[i - periods]`, NaN for the first `periods`.
    pub fn diff(&mut self, periods: usize) -> &mut Self {
        let n = self.values.len();
        let lag = periods.min(n);
        for i in (lag..n).rev() {
            self.values[i] = self.values[i] - self.values[i - lag];
        }
        self.values[..lag].fill(T::nan());
        self
    }

    /// Shift values right by `k` positions (left for negative `k`),
    /// filling vacated positions with NaN. The index is unchanged.
    pub fn shift(&mut self, k: isize) -> &mut Self {
        shift_values(&mut self.values, k);
        self
    }

    /// Invoke `cb(l, r)` for every window `[l, r)` of `window` consecutive
    /// positions. A series shorter than `window` yields one call covering
    /// all positions.
    pub fn roll_data(&self, window: usize, cb: impl FnMut(usize, usize)) -> Result<()> {
        if window == 0 {
            return Err(TidalError::InvalidWindow(0));
        }
        self.roll_windows(window, cb);
        Ok(())
    }

    /// [`Series::roll_data`] for a window length that is already known to
    /// be non-zero. A zero length makes no calls.
    pub(crate) fn roll_windows(&self, window: usize, mut cb: impl FnMut(usize, usize)) {
        let n = self.len();
        if window == 0 || n == 0 {
            return;
        }
        if n < window {
            cb(0, n);
            return;
        }
        for r in window..=n {
            cb(r - window, r);
        }
    }

    // -------------------------------------------------------------------------
    // Engines
    // -------------------------------------------------------------------------

    /// Rolling window of `len` positions.
    pub fn rolling(&self, len: usize) -> Result<Window<'_, T>> {
        Window::new(self, len)
    }

    /// Exponentially weighted window.
    pub fn ewm(&self, decay: Decay<T>, adjust: bool, ignore_na: bool) -> Result<ExpWindow<'_, T>> {
        ExpWindow::new(self, decay, adjust, ignore_na)
    }

    /// Resample onto a grid of period `freq`. Takes ownership so that
    /// upsampling can reuse the buffers; clone first to keep the source.
    pub fn resample(self, freq: i64, origin: ResampleOrigin) -> Result<Resampler<T>> {
        Resampler::new(self, freq, origin)
    }

    // -------------------------------------------------------------------------
    // Conversions
    // -------------------------------------------------------------------------

    pub fn index_as_f64(&self) -> Vec<f64> {
        self.index.iter().map(|&v| v as f64).collect()
    }

    pub fn index_as_f32(&self) -> Vec<f32> {
        self.index.iter().map(|&v| v as f32).collect()
    }

    pub fn index_as_i32(&self) -> Vec<i32> {
        self.index.iter().map(|&v| v as i32).collect()
    }

    pub fn values_as_f64(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.to_f64_lossy()).collect()
    }

    pub fn values_as_f32(&self) -> Vec<f32> {
        self.values.iter().map(|v| v.to_f64_lossy() as f32).collect()
    }

    /// Values truncated toward zero; NaN becomes 0.
    pub fn values_as_i64(&self) -> Vec<i64> {
        self.values.iter().map(|v| v.to_f64_lossy() as i64).collect()
    }

    /// Values truncated toward zero; NaN becomes 0.
    pub fn values_as_i32(&self) -> Vec<i32> {
        self.values.iter().map(|v| v.to_f64_lossy() as i32).collect()
    }
}

pub(crate) fn shift_values<T: Real>(values: &mut [T], k: isize) {
    let n = values.len();
    let amount = k.unsigned_abs();
    if amount >= n {
        values.fill(T::nan());
        return;
    }
    if k > 0 {
        values.copy_within(..n - amount, amount);
        values[..amount].fill(T::nan());
    } else if k < 0 {
        values.copy_within(amount.., 0);
        values[n - amount..].fill(T::nan());
    }
}

// =============================================================================
// Series View
// =============================================================================

/// Read-only view of a sub-range of a series.
#[derive(Debug, Clone, Copy)]
pub struct SeriesView<'a, T: Real = f64> {
    period: i64,
    index: &'a [i64],
    values: &'a [T],
    backend: Backend,
}

impl<'a, T: Real> SeriesView<'a, T> {
    /// View over a bare value slice, with no index.
    pub fn from_values(values: &'a [T]) -> Self {
        Self {
            period: 0,
            index: &[],
            values,
            backend: Backend::default(),
        }
    }

    pub fn period(&self) -> i64 {
        self.period
    }

    pub fn index(&self) -> &'a [i64] {
        self.index
    }

    pub fn values(&self) -> &'a [T] {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Sub-view of positions `[l, r)` relative to this view.
    ///
    /// # Panics
    ///
    /// Panics if `l > r` or `r > self.len()`.
    pub fn slice(&self, l: usize, r: usize) -> SeriesView<'a, T> {
        let index = if self.index.is_empty() {
            self.index
        } else {
            &self.index[l..r]
        };
        SeriesView {
            period: self.period,
            index,
            values: &self.values[l..r],
            backend: self.backend,
        }
    }

    /// Copy the viewed range into an owned series.
    pub fn to_series(&self) -> Series<T> {
        Series::from_parts(self.period, self.index.to_vec(), self.values.to_vec(), self.backend)
    }
}

impl<'a, T: Real> From<&'a Series<T>> for SeriesView<'a, T> {
    fn from(series: &'a Series<T>) -> Self {
        series.view()
    }
}

// =============================================================================
// Mutable Series View
// =============================================================================

/// Mutable view of a sub-range of a series. Writes go to the parent.
#[derive(Debug)]
pub struct SeriesViewMut<'a, T: Real = f64> {
    period: i64,
    index: &'a mut [i64],
    values: &'a mut [T],
    backend: Backend,
}

impl<'a, T: Real> SeriesViewMut<'a, T> {
    pub fn period(&self) -> i64 {
        self.period
    }

    pub fn index(&self) -> &[i64] {
        &*self.index
    }

    pub fn values(&self) -> &[T] {
        &*self.values
    }

    pub fn values_mut(&mut self) -> &mut [T] {
        &mut *self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reborrow as a read-only view.
    pub fn as_view(&self) -> SeriesView<'_, T> {
        SeriesView {
            period: self.period,
            index: &*self.index,
            values: &*self.values,
            backend: self.backend,
        }
    }

    pub fn add_scalar(&mut self, v: T) -> &mut Self {
        self.backend.add_scalar(self.values, v);
        self
    }

    pub fn sub_scalar(&mut self, v: T) -> &mut Self {
        self.backend.sub_scalar(self.values, v);
        self
    }

    pub fn mul_scalar(&mut self, v: T) -> &mut Self {
        self.backend.mul_scalar(self.values, v);
        self
    }

    pub fn div_scalar(&mut self, v: T) -> &mut Self {
        self.backend.div_scalar(self.values, v);
        self
    }

    pub fn apply(&mut self, f: impl Fn(T) -> T) -> &mut Self {
        for v in self.values.iter_mut() {
            *v = f(*v);
        }
        self
    }

    pub fn shift(&mut self, k: isize) -> &mut Self {
        shift_values(self.values, k);
        self
    }

    pub fn fillna(&mut self, value: T) -> &mut Self {
        fill::fillna(self.values, value);
        self
    }

    pub fn pad(&mut self) -> &mut Self {
        fill::pad(self.values);
        self
    }

    pub fn lerp(&mut self) -> &mut Self {
        fill::lerp(self.values);
        self
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const NAN: f64 = f64::NAN;

    fn series(values: &[f64]) -> Series<f64> {
        let index = (1..=values.len() as i64).collect();
        Series::new(1, index, values.to_vec()).unwrap()
    }

    fn same(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len()
            && a.iter()
                .zip(b)
                .all(|(x, y)| (x.is_nan() && y.is_nan()) || (x - y).abs() < 1e-9)
    }

    #[test]
    fn test_new_rejects_shape_mismatch() {
        let err = Series::new(1, vec![1, 2, 3], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            TidalError::InvalidShape {
                index_len: 3,
                values_len: 2
            }
        ));

        let err = Series::<f64>::new(-1, vec![], vec![]).unwrap_err();
        assert!(matches!(err, TidalError::InvalidPeriod(-1)));
    }

    #[test]
    fn test_from_values() {
        let s = Series::from_values(vec![1.0, 2.0]);
        assert_eq!(s.period(), 0);
        assert!(s.index().is_empty());
        assert_eq!(s.len(), 2);
        assert!(!s.has_index());
    }

    #[test]
    fn test_arithmetic() {
        let mut a = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let b = series(&[5.0, 4.0, 3.0, 2.0, 1.0]);

        a.add(&b).unwrap();
        assert_eq!(a.values(), &[6.0, 6.0, 6.0, 6.0, 6.0]);
        a.sub(&b).unwrap();
        assert_eq!(a.values(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
        a.mul(&b).unwrap();
        assert_eq!(a.values(), &[5.0, 8.0, 9.0, 8.0, 5.0]);
        a.div(&b).unwrap();
        assert_eq!(a.values(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_arithmetic_length_mismatch() {
        let mut a = series(&[1.0, 2.0]);
        let b = series(&[1.0]);
        assert!(matches!(
            a.add(&b),
            Err(TidalError::LengthMismatch { left: 2, right: 1 })
        ));
        assert!(a.dot(&b).is_err());
    }

    #[test]
    fn test_scalar_chaining() {
        let mut s = series(&[1.0, 2.0, 3.0]);
        s.add_scalar(1.0).mul_scalar(2.0).sub_scalar(1.0).div_scalar(3.0);
        assert_eq!(s.values(), &[1.0, 5.0 / 3.0, 7.0 / 3.0]);
    }

    #[test]
    fn test_math_functions() {
        let mut s = series(&[-1.5, 2.25, -0.5]);
        s.abs();
        assert_eq!(s.values(), &[1.5, 2.25, 0.5]);
        s.floor();
        assert_eq!(s.values(), &[1.0, 2.0, 0.0]);

        let mut s = series(&[1.0, std::f64::consts::E]);
        s.log();
        assert!(same(s.values(), &[0.0, 1.0]));

        let mut s = series(&[4.0, 9.0]);
        s.sqrt().apply(|v| v + 1.0);
        assert_eq!(s.values(), &[3.0, 4.0]);
    }

    #[test]
    fn test_dot() {
        let a = series(&[1.0, 2.0, 3.0]);
        let b = series(&[4.0, 5.0, 6.0]);
        assert_eq!(a.dot(&b).unwrap(), 32.0);
    }

    #[test]
    fn test_slice_mut_aliases_parent() {
        let mut s = series(&[1.0, NAN, 3.0, NAN, 5.0]);
        {
            let mut view = s.slice_mut(1, 4);
            assert_eq!(view.index(), &[2, 3, 4]);
            view.fillna(0.0).add_scalar(10.0);
        }
        assert_eq!(s.values(), &[1.0, 10.0, 13.0, 10.0, 5.0]);
    }

    #[test]
    fn test_slice_of_slice() {
        let s = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let view = s.slice(1, 5).slice(1, 3);
        assert_eq!(view.index(), &[3, 4]);
        assert_eq!(view.values(), &[3.0, 4.0]);
        assert_eq!(view.to_series().len(), 2);
    }

    #[test]
    fn test_cumsum_skips_nan() {
        let mut s = series(&[1.0, NAN, 2.0, 3.0]);
        s.cumsum();
        assert!(same(s.values(), &[1.0, NAN, 3.0, 6.0]));
    }

    #[test]
    fn test_diff() {
        let mut s = series(&[1.0, 1.0, 2.0, 3.0, 5.0, 8.0]);
        s.diff(1);
        assert!(same(s.values(), &[NAN, 0.0, 1.0, 1.0, 2.0, 3.0]));

        let mut s = series(&[1.0, 2.0]);
        s.diff(5);
        assert!(same(s.values(), &[NAN, NAN]));
    }

    #[test]
    fn test_shift() {
        let mut s = series(&[1.0, 1.0, 2.0, 3.0, 5.0, 8.0]);
        s.shift(3);
        assert!(same(s.values(), &[NAN, NAN, NAN, 1.0, 1.0, 2.0]));

        let mut s = series(&[1.0, 2.0, 3.0]);
        s.shift(-1);
        assert!(same(s.values(), &[2.0, 3.0, NAN]));

        let mut s = series(&[1.0, 2.0, 3.0]);
        s.shift(0);
        assert_eq!(s.values(), &[1.0, 2.0, 3.0]);

        let mut s = series(&[1.0, 2.0, 3.0]);
        s.shift(3);
        assert!(s.values().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_roll_data() {
        let s = series(&[1.0, 2.0, 3.0, 4.0]);
        let mut windows = Vec::new();
        s.roll_data(3, |l, r| windows.push((l, r))).unwrap();
        assert_eq!(windows, vec![(0, 3), (1, 4)]);

        let mut windows = Vec::new();
        s.roll_data(10, |l, r| windows.push((l, r))).unwrap();
        assert_eq!(windows, vec![(0, 4)]);

        assert!(matches!(s.roll_data(0, |_, _| {}), Err(TidalError::InvalidWindow(0))));

        let mut calls = 0;
        s.roll_windows(0, |_, _| calls += 1);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_conversions() {
        let s = series(&[1.9, -2.7, NAN]);
        assert_eq!(s.index_as_f64(), vec![1.0, 2.0, 3.0]);
        assert_eq!(s.index_as_i32(), vec![1, 2, 3]);
        assert_eq!(s.values_as_i64(), vec![1, -2, 0]);
        assert_eq!(s.values_as_f32()[0], 1.9_f32);
    }

    #[test]
    fn test_f32_series() {
        let mut s = Series::<f32>::new(1, vec![1, 2], vec![1.5, 2.5]).unwrap();
        s.mul_scalar(2.0);
        assert_eq!(s.values(), &[3.0_f32, 5.0]);
    }

    #[test]
    fn test_kernels_agree() {
        let values: Vec<f64> = (0..50).map(|i| (i as f64).sin()).collect();
        let mut a = Series::from_values(values.clone()).with_kernel(Kernel::Scalar);
        let mut b = Series::from_values(values).with_kernel(Kernel::Simd);
        a.mul_scalar(3.0).abs().sqrt();
        b.mul_scalar(3.0).abs().sqrt();
        assert_eq!(a, b);
    }
}
