//! Tidal Series Exponential Window
//!
//! Exponentially weighted moving statistics. The smoothing factor is
//! derived from one of four decay parameterizations and validated when the
//! window is built, so a window that exists always has `0 < alpha <= 1`.
//!
//! Key Features:
//! - Adjusted (weight-normalized) and non-adjusted recurrences
//! - Optional weight decay across missing values
//! - Source series is never mutated
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::float::Real;
use crate::series::Series;
use tidal_common::{Result, SeriesConfig, TidalError};

// =============================================================================
// Decay
// =============================================================================

/// How the smoothing factor alpha is specified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decay<T: Real = f64> {
    /// Alpha directly, `0 < alpha <= 1`.
    Alpha(T),
    /// Center of mass, `alpha = 1 / (1 + com)` for `com >= 0`.
    CenterOfMass(T),
    /// Span, `alpha = 2 / (span + 1)` for `span >= 1`.
    Span(T),
    /// Half-life, `alpha = 1 - exp(-ln 2 / halflife)` for `halflife > 0`.
    Halflife(T),
}

impl<T: Real> Decay<T> {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Alpha(_) => "alpha",
            Self::CenterOfMass(_) => "com",
            Self::Span(_) => "span",
            Self::Halflife(_) => "halflife",
        }
    }

    pub fn param(&self) -> T {
        match *self {
            Self::Alpha(v) | Self::CenterOfMass(v) | Self::Span(v) | Self::Halflife(v) => v,
        }
    }

    /// Resolve the smoothing factor, rejecting out-of-domain parameters.
    pub fn alpha(&self) -> Result<T> {
        let one = T::one();
        let p = self.param();

        // NaN fails every guard.
        let alpha = match self {
            Self::Alpha(_) if p > T::zero() && p <= one => Some(p),
            Self::CenterOfMass(_) if p >= T::zero() => Some(one / (one + p)),
            Self::Span(_) if p >= one => Some((one + one) / (p + one)),
            Self::Halflife(_) if p > T::zero() => Some(one - (-T::LN_2() / p).exp()),
            _ => None,
        };

        alpha.ok_or_else(|| TidalError::InvalidDecay {
            kind: self.kind(),
            value: p.to_f64_lossy(),
        })
    }
}

// =============================================================================
// Exponential Window
// =============================================================================

/// An exponentially weighted window over a borrowed series.
#[derive(Debug, Clone, Copy)]
pub struct ExpWindow<'a, T: Real = f64> {
    source: &'a Series<T>,
    decay: Decay<T>,
    alpha: T,
    adjust: bool,
    ignore_na: bool,
}

impl<'a, T: Real> ExpWindow<'a, T> {
    /// Build a window, validating the decay parameter.
    ///
    /// With `adjust`, each output is the weight-normalized average of all
    /// preceding values. With `ignore_na`, weights keep decaying across
    /// missing values instead of pausing.
    pub fn new(source: &'a Series<T>, decay: Decay<T>, adjust: bool, ignore_na: bool) -> Result<Self> {
        let alpha = decay.alpha()?;
        Ok(Self {
            source,
            decay,
            alpha,
            adjust,
            ignore_na,
        })
    }

    /// Build a window taking `adjust` and `ignore_na` from configuration.
    pub fn from_config(source: &'a Series<T>, decay: Decay<T>, config: &SeriesConfig) -> Result<Self> {
        Self::new(source, decay, config.ewm.adjust, config.ewm.ignore_na)
    }

    pub fn decay(&self) -> Decay<T> {
        self.decay
    }

    pub fn alpha(&self) -> T {
        self.alpha
    }

    pub fn adjust(&self) -> bool {
        self.adjust
    }

    pub fn ignore_na(&self) -> bool {
        self.ignore_na
    }

    /// Exponentially weighted mean, as a new series with the source index.
    /// Missing values carry the previous mean forward.
    pub fn mean(&self) -> Series<T> {
        let mut out = self.source.clone();
        if self.adjust {
            adjusted_mean(out.values_mut(), self.alpha, self.ignore_na);
        } else {
            plain_mean(out.values_mut(), self.alpha);
        }
        out
    }
}

// =============================================================================
// Recurrences
// =============================================================================

fn adjusted_mean<T: Real>(values: &mut [T], alpha: T, ignore_na: bool) {
    let beta = T::one() - alpha;
    let mut weight = T::one();
    let mut last = T::zero();

    for v in values.iter_mut() {
        let w = beta * weight + T::one();
        if v.is_nan() {
            if ignore_na {
                weight = w;
            }
            *v = last;
            continue;
        }
        last = last + (*v - last) / w;
        weight = w;
        *v = last;
    }
}

/// `y[t] = (1 - alpha) * y[t-1] + alpha * x[t]`, seeded with the first value
/// (or zero when the first value is missing).
fn plain_mean<T: Real>(values: &mut [T], alpha: T) {
    let Some(first) = values.first_mut() else {
        return;
    };
    if first.is_nan() {
        *first = T::zero();
    }
    let mut last = *first;
    let beta = T::one() - alpha;

    for v in values.iter_mut().skip(1) {
        if !v.is_nan() {
            last = beta * last + alpha * *v;
        }
        *v = last;
    }
}

// =============================================================================
// Tests
// =============================================================================
