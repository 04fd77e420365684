//! Tidal Series Rolling Window
//!
//! Fixed-length rolling computations. Every operation returns a new series
//! with the source's index and length; position `i` holds the aggregate of
//! the `len` values ending at `i`, and positions before the first full
//! window are NaN. A window longer than the series yields a single
//! aggregate over the whole series at the final position.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::aggregation::{self, Aggregate, AggregateFunction};
use crate::float::{nan_last_cmp, Real};
use crate::series::{Series, SeriesView};
use tidal_common::{Result, SeriesConfig, TidalError};

// =============================================================================
// Window
// =============================================================================

/// A rolling window of fixed length over a borrowed series.
#[derive(Debug, Clone, Copy)]
pub struct Window<'a, T: Real = f64> {
    len: usize,
    ddof: u32,
    source: &'a Series<T>,
}

impl<'a, T: Real> Window<'a, T> {
    /// Create a window of `len` positions. A zero length is rejected.
    pub fn new(source: &'a Series<T>, len: usize) -> Result<Self> {
        if len == 0 {
            return Err(TidalError::InvalidWindow(0));
        }
        Ok(Self {
            len,
            ddof: 1,
            source,
        })
    }

    /// Take the default degrees of freedom from configuration.
    pub fn with_config(mut self, config: &SeriesConfig) -> Self {
        self.ddof = config.rolling.ddof;
        self
    }

    /// Window length in positions.
    pub fn length(&self) -> usize {
        self.len
    }

    pub fn ddof(&self) -> u32 {
        self.ddof
    }

    pub fn source(&self) -> &'a Series<T> {
        self.source
    }

    /// A copy of the source with every value set to NaN, ready to receive
    /// per-window results.
    fn blank(&self) -> Series<T> {
        let mut out = self.source.clone();
        out.values_mut().fill(T::nan());
        out
    }

    // -------------------------------------------------------------------------
    // Generic Application
    // -------------------------------------------------------------------------

    /// Apply an aggregate to every window, writing each result at the
    /// window's last position.
    pub fn apply<A: Aggregate<T>>(&self, agg: A) -> Series<T> {
        tracing::trace!(
            "rolling apply: window {} over {} values",
            self.len,
            self.source.len()
        );

        let mut out = self.blank();
        let source = self.source;
        let values = out.values_mut();
        source.roll_windows(self.len, |l, r| {
            values[r - 1] = agg.aggregate(source.slice(l, r));
        });
        out
    }

    pub fn sum(&self) -> Series<T> {
        self.apply(AggregateFunction::Sum)
    }

    pub fn mean(&self) -> Series<T> {
        self.apply(AggregateFunction::Mean)
    }

    pub fn min(&self) -> Series<T> {
        self.apply(AggregateFunction::Min)
    }

    pub fn max(&self) -> Series<T> {
        self.apply(AggregateFunction::Max)
    }

    pub fn skew(&self) -> Series<T> {
        self.apply(AggregateFunction::Skew)
    }

    // -------------------------------------------------------------------------
    // Specialized Variants
    // -------------------------------------------------------------------------

    /// Rolling median. Each window is copied into one reused scratch buffer
    /// and sorted with NaN last.
    pub fn median(&self) -> Series<T> {
        let mut out = self.blank();
        let source = self.source.values();
        let values = out.values_mut();
        let mut scratch: Vec<T> = Vec::with_capacity(self.len.min(source.len()));

        self.source.roll_windows(self.len, |l, r| {
            scratch.clear();
            scratch.extend_from_slice(&source[l..r]);
            scratch.sort_unstable_by(nan_last_cmp);
            values[r - 1] = aggregation::median_of_sorted(&scratch);
        });
        out
    }

    /// Difference across the window span: `s[i] - s[i - (len - 1)]`.
    pub fn diff(&self) -> Series<T> {
        let mut out = self.source.clone();
        out.diff(self.len - 1);
        out
    }

    /// The source shifted right by the window length.
    pub fn shift(&self) -> Series<T> {
        let mut out = self.source.clone();
        out.shift(self.len as isize);
        out
    }

    /// Rolling standard deviation about a precomputed rolling mean `ma`.
    pub fn std(&self, ma: &Series<T>, ddof: u32) -> Result<Series<T>> {
        self.about_mean(ma, |view, mean| aggregation::std(view, mean, ddof))
    }

    /// Rolling variance about a precomputed rolling mean `ma`.
    pub fn variance(&self, ma: &Series<T>, ddof: u32) -> Result<Series<T>> {
        self.about_mean(ma, |view, mean| aggregation::variance(view, mean, ddof))
    }

    /// [`Window::std`] with the configured degrees of freedom.
    pub fn configured_std(&self, ma: &Series<T>) -> Result<Series<T>> {
        self.std(ma, self.ddof)
    }

    /// [`Window::variance`] with the configured degrees of freedom.
    pub fn configured_variance(&self, ma: &Series<T>) -> Result<Series<T>> {
        self.variance(ma, self.ddof)
    }

    fn about_mean(
        &self,
        ma: &Series<T>,
        f: impl Fn(SeriesView<'_, T>, T) -> T,
    ) -> Result<Series<T>> {
        if ma.len() != self.source.len() {
            return Err(TidalError::LengthMismatch {
                left: self.source.len(),
                right: ma.len(),
            });
        }

        let mut out = self.blank();
        let source = self.source;
        let means = ma.values();
        let values = out.values_mut();
        source.roll_windows(self.len, |l, r| {
            values[r - 1] = f(source.slice(l, r), means[r - 1]);
        });
        Ok(out)
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

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{:?} vs {:?}", actual, expected);
        for (a, e) in actual.iter().zip(expected) {
            assert!(
                (a.is_nan() && e.is_nan()) || (a - e).abs() < 1e-6,
                "{:?} vs {:?}",
                actual,
                expected
            );
        }
    }

    #[test]
    fn test_zero_length_rejected() {
        let s = series(&[1.0, 2.0]);
        assert!(matches!(s.rolling(0), Err(TidalError::InvalidWindow(0))));
    }

    #[test]
    fn test_rolling_sum_and_mean() {
        let s = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let w = s.rolling(3).unwrap();
        assert_close(w.sum().values(), &[NAN, NAN, 6.0, 9.0, 12.0]);
        assert_close(w.mean().values(), &[NAN, NAN, 2.0, 3.0, 4.0]);
        assert_eq!(w.sum().index(), s.index());
    }

    #[test]
    fn test_rolling_does_not_mutate_source() {
        let s = series(&[1.0, 2.0, 3.0]);
        let _ = s.rolling(2).unwrap().sum();
        assert_eq!(s.values(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_rolling_skips_nan() {
        let s = series(&[1.0, NAN, 3.0, 4.0]);
        let w = s.rolling(2).unwrap();
        assert_close(w.sum().values(), &[NAN, 1.0, 3.0, 7.0]);
        assert_close(w.min().values(), &[NAN, 1.0, 3.0, 3.0]);
        assert_close(w.max().values(), &[NAN, 1.0, 3.0, 4.0]);
    }

    #[test]
    fn test_window_longer_than_series() {
        let s = series(&[1.0, 2.0, 3.0]);
        let out = s.rolling(10).unwrap().sum();
        assert_close(out.values(), &[NAN, NAN, 6.0]);

        let empty = Series::<f64>::new(1, vec![], vec![]).unwrap();
        assert!(empty.rolling(3).unwrap().mean().is_empty());
    }

    #[test]
    fn test_window_of_one() {
        let s = series(&[4.0, 5.0, 6.0]);
        assert_close(s.rolling(1).unwrap().mean().values(), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_rolling_median() {
        let s = series(&[5.0, 1.0, 4.0, NAN, 2.0, 8.0]);
        let out = s.rolling(3).unwrap().median();
        assert_close(out.values(), &[NAN, NAN, 4.0, 2.5, 3.0, 5.0]);
    }

    #[test]
    fn test_rolling_skew() {
        let s = series(&[1.0, 1.0, 2.0, 1.0]);
        let out = s.rolling(3).unwrap().skew();
        assert_close(out.values(), &[NAN, NAN, 1.7320508075688787, 1.7320508075688787]);
    }

    #[test]
    fn test_rolling_apply_closure() {
        let s = series(&[3.0, 1.0, 4.0, 1.0, 5.0]);
        let range = |v: SeriesView<'_, f64>| aggregation::max(v) - aggregation::min(v);
        let out = s.rolling(2).unwrap().apply(range);
        assert_close(out.values(), &[NAN, 2.0, 3.0, 3.0, 4.0]);
    }

    #[test]
    fn test_window_diff() {
        let s = series(&[1.0, 2.0, 4.0, 7.0, 11.0]);
        assert_close(s.rolling(3).unwrap().diff().values(), &[NAN, NAN, 3.0, 5.0, 7.0]);
        assert_close(s.rolling(1).unwrap().diff().values(), &[0.0; 5]);
    }

    #[test]
    fn test_window_shift() {
        let s = series(&[1.0, 2.0, 3.0, 4.0]);
        assert_close(s.rolling(2).unwrap().shift().values(), &[NAN, NAN, 1.0, 2.0]);
        assert!(s.rolling(4).unwrap().shift().values().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_rolling_std_about_mean() {
        let s = series(&[2.0, 4.0, 6.0, 8.0]);
        let w = s.rolling(2).unwrap();
        let ma = w.mean();

        let var = w.variance(&ma, 1).unwrap();
        assert_close(var.values(), &[NAN, 2.0, 2.0, 2.0]);

        let std = w.std(&ma, 0).unwrap();
        assert_close(std.values(), &[NAN, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_rolling_std_length_mismatch() {
        let s = series(&[1.0, 2.0, 3.0]);
        let ma = series(&[1.0, 2.0]);
        let err = s.rolling(2).unwrap().std(&ma, 1).unwrap_err();
        assert!(matches!(err, TidalError::LengthMismatch { left: 3, right: 2 }));
    }

    #[test]
    fn test_configured_ddof() {
        let mut config = SeriesConfig::default();
        config.rolling.ddof = 0;

        let s = series(&[2.0, 4.0, 6.0]);
        let w = s.rolling(2).unwrap().with_config(&config);
        assert_eq!(w.ddof(), 0);
        let out = w.configured_variance(&w.mean()).unwrap();
        assert_close(out.values(), &[NAN, 1.0, 1.0]);
    }
}
