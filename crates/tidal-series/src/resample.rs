//! Tidal Series Resampler
//!
//! Re-buckets a series onto a grid of a new period. Downsampling groups the
//! source into half-open buckets `[start, start + freq)` and reduces each
//! group with an aggregate; upsampling expands the index to a dense grid and
//! leaves inserted positions as NaN for a separate interpolation pass.
//!
//! Key Features:
//! - Epoch, series-start and UTC day-start bucket alignment
//! - Partial leading buckets are aggregated, not dropped
//! - In-place grid expansion that reuses the source buffers
//! - Linear, pad or no interpolation after upsampling
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::aggregation::{Aggregate, AggregateFunction};
use crate::float::Real;
use crate::series::Series;
use tidal_common::utils::{align_down, align_down_from, ceil_div, utc_day_start};
use tidal_common::{InterpolationMethod, ResampleOrigin, Result, SeriesConfig, TidalError, TimeUnit};

// =============================================================================
// Resampler
// =============================================================================

/// Resamples an owned series to period `freq`.
#[derive(Debug, Clone)]
pub struct Resampler<T: Real = f64> {
    source: Series<T>,
    freq: i64,
    origin: ResampleOrigin,
    unit: TimeUnit,
    interpolation: InterpolationMethod,
}

impl<T: Real> Resampler<T> {
    /// Create a resampler. The period must be positive and the source must
    /// carry an index.
    pub fn new(source: Series<T>, freq: i64, origin: ResampleOrigin) -> Result<Self> {
        if freq <= 0 {
            return Err(TidalError::InvalidPeriod(freq));
        }
        if !source.has_index() {
            return Err(TidalError::InvalidShape {
                index_len: 0,
                values_len: source.len(),
            });
        }
        Ok(Self {
            source,
            freq,
            origin,
            unit: TimeUnit::default(),
            interpolation: InterpolationMethod::default(),
        })
    }

    /// Unit of the index timestamps, used for day-start alignment.
    pub fn with_time_unit(mut self, unit: TimeUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Take origin, time unit and interpolation from configuration.
    pub fn with_config(mut self, config: &SeriesConfig) -> Self {
        self.origin = config.resample.origin;
        self.unit = config.resample.time_unit;
        self.interpolation = config.resample.interpolation;
        self
    }

    pub fn freq(&self) -> i64 {
        self.freq
    }

    pub fn origin(&self) -> ResampleOrigin {
        self.origin
    }

    pub fn time_unit(&self) -> TimeUnit {
        self.unit
    }

    pub fn source(&self) -> &Series<T> {
        &self.source
    }

    /// Start of the bucket containing `point` under the origin policy.
    pub fn align(&self, point: i64) -> i64 {
        match self.origin {
            ResampleOrigin::Epoch => align_down(point, self.freq),
            ResampleOrigin::Start => point,
            ResampleOrigin::StartDay => {
                align_down_from(point, utc_day_start(point, self.unit), self.freq)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Downsampling
    // -------------------------------------------------------------------------

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

    pub fn median(&self) -> Series<T> {
        self.apply(AggregateFunction::Median)
    }

    pub fn first(&self) -> Series<T> {
        self.apply(AggregateFunction::First)
    }

    pub fn last(&self) -> Series<T> {
        self.apply(AggregateFunction::Last)
    }

    pub fn std(&self) -> Series<T> {
        self.apply(AggregateFunction::Std)
    }

    /// Reduce every bucket with `agg`. Each output sample is labelled with
    /// its bucket start; buckets inside a gap of the source aggregate an
    /// empty view.
    pub fn apply<A: Aggregate<T>>(&self, agg: A) -> Series<T> {
        let source = &self.source;
        let index = source.index();
        let n = index.len();
        if n == 0 {
            return Series::from_parts(self.freq, Vec::new(), Vec::new(), source.backend());
        }

        let mut bucket = self.align(index[0]);
        let span = index[n - 1].saturating_sub(bucket);
        let estimate = (span / self.freq).saturating_add(1).clamp(1, n as i64) as usize;
        let mut out_index = Vec::with_capacity(estimate);
        let mut out_values = Vec::with_capacity(estimate);

        let mut beg = 0;
        loop {
            // A bucket end past i64::MAX takes every remaining sample.
            let until = bucket.checked_add(self.freq);
            let mut end = beg;
            while end < n && until.map_or(true, |until| index[end] < until) {
                end += 1;
            }
            if end == beg && end >= n {
                break;
            }

            out_values.push(agg.aggregate(source.slice(beg, end)));
            out_index.push(bucket);

            beg = end;
            match until {
                Some(until) => bucket = until,
                None => break,
            }
        }

        tracing::debug!(
            "downsampled {} values into {} buckets of period {}",
            n,
            out_index.len(),
            self.freq
        );

        Series::from_parts(self.freq, out_index, out_values, source.backend())
    }

    // -------------------------------------------------------------------------
    // Upsampling
    // -------------------------------------------------------------------------

    /// Expand onto the grid `first + k * freq` covering the source range.
    /// Each sample lands in slot `ceil((t - first) / freq)`; inserted slots
    /// are NaN. When two samples share a slot the later one wins.
    pub fn upsample(self) -> Series<T> {
        let freq = self.freq;
        let backend = self.source.backend();
        let (_, mut index, mut values) = self.source.into_parts();

        let (first, last) = match (index.iter().min(), index.iter().max()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return Series::from_parts(freq, index, values, backend),
        };

        let step = freq as u64;
        let slot = |t: i64| ceil_div(t.abs_diff(first), step) as usize;
        let slots = slot(last) + 1;
        let strictly_increasing = index.windows(2).all(|w| slot(w[0]) < slot(w[1]));

        tracing::debug!(
            "upsampling {} values onto {} slots of period {} (in place: {})",
            index.len(),
            slots,
            freq,
            strictly_increasing
        );

        if strictly_increasing {
            // Slots are distinct and ascending, so slot(j) >= j: filling from
            // the back never overwrites an unread sample.
            values.resize(slots, T::nan());
            let mut next = slots;
            for j in (0..index.len()).rev() {
                let p = slot(index[j]);
                let v = values[j];
                values[p + 1..next].fill(T::nan());
                values[p] = v;
                next = p;
            }
        } else {
            tracing::warn!(
                "upsampling to period {}: samples share grid slots, allocating a new buffer",
                freq
            );
            let mut grid = vec![T::nan(); slots];
            for (&t, &v) in index.iter().zip(&values) {
                grid[slot(t)] = v;
            }
            values = grid;
        }

        index.clear();
        index.extend(
            std::iter::successors(Some(first), |t| Some(t.saturating_add(freq))).take(slots),
        );

        Series::from_parts(freq, index, values, backend)
    }

    /// Upsample, then fill the inserted NaN positions with `method`.
    pub fn interpolate(self, method: InterpolationMethod) -> Series<T> {
        let mut out = self.upsample();
        match method {
            InterpolationMethod::Linear => {
                out.lerp();
            }
            InterpolationMethod::Pad => {
                out.pad();
            }
            InterpolationMethod::None => {}
        }
        out
    }

    /// [`Resampler::interpolate`] with the configured method.
    pub fn interpolate_default(self) -> Series<T> {
        let method = self.interpolation;
        self.interpolate(method)
    }
}

// =============================================================================
// Tests
// =============================================================================
