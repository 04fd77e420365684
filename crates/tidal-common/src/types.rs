//! Tidal Types - Shared Enumerations
//!
//! Enumerations shared between configuration and the series engine:
//! vector kernel selection, resample origin policy, interpolation method
//! and the time unit of series timestamps.
//!
//! Every enum deserializes from a lowercase name and implements `FromStr`
//! so that configuration files and callers reject unknown names with a
//! dedicated error variant.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::error::TidalError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Vector Kernel
// =============================================================================

/// Backend used for bulk elementwise operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Kernel {
    /// Pick the best kernel the build and CPU support.
    #[default]
    Auto,
    /// Plain element-at-a-time loops.
    Scalar,
    /// Fixed-width lane chunks lowered to vector instructions.
    Simd,
}

impl Kernel {
    pub fn name(&self) -> &'static str {
        match self {
            Kernel::Auto => "auto",
            Kernel::Scalar => "scalar",
            Kernel::Simd => "simd",
        }
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kernel {
    type Err = TidalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Kernel::Auto),
            "scalar" => Ok(Kernel::Scalar),
            "simd" => Ok(Kernel::Simd),
            other => Err(TidalError::UnknownKernel(other.to_string())),
        }
    }
}

// =============================================================================
// Resample Origin
// =============================================================================

/// Policy deciding where downsampling bucket boundaries fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResampleOrigin {
    /// Boundaries at absolute multiples of the target period.
    #[default]
    Epoch,
    /// The first bucket starts at the first timestamp of the series.
    Start,
    /// Boundaries at multiples of the target period from midnight (UTC)
    /// of the first timestamp's day.
    StartDay,
}

impl ResampleOrigin {
    pub fn name(&self) -> &'static str {
        match self {
            ResampleOrigin::Epoch => "epoch",
            ResampleOrigin::Start => "start",
            ResampleOrigin::StartDay => "start_day",
        }
    }
}

impl fmt::Display for ResampleOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResampleOrigin {
    type Err = TidalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "epoch" => Ok(ResampleOrigin::Epoch),
            "start" => Ok(ResampleOrigin::Start),
            "start_day" => Ok(ResampleOrigin::StartDay),
            other => Err(TidalError::UnknownOrigin(other.to_string())),
        }
    }
}

// =============================================================================
// Interpolation Method
// =============================================================================

/// Gap-filling policy applied after upsampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMethod {
    /// Linear interpolation between bounding known values.
    #[default]
    Linear,
    /// Forward-fill with the last known value.
    Pad,
    /// Leave inserted positions as NaN.
    None,
}

impl InterpolationMethod {
    pub fn name(&self) -> &'static str {
        match self {
            InterpolationMethod::Linear => "linear",
            InterpolationMethod::Pad => "pad",
            InterpolationMethod::None => "none",
        }
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InterpolationMethod {
    type Err = TidalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(InterpolationMethod::Linear),
            "pad" => Ok(InterpolationMethod::Pad),
            "none" => Ok(InterpolationMethod::None),
            other => Err(TidalError::UnknownInterpolation(other.to_string())),
        }
    }
}

// =============================================================================
// Time Unit
// =============================================================================

/// Unit of the integer timestamps stored in a series index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Seconds,
    #[default]
    Millis,
    Micros,
    Nanos,
}

impl TimeUnit {
    /// Number of timestamp ticks in one second.
    pub const fn ticks_per_second(&self) -> i64 {
        match self {
            TimeUnit::Seconds => 1,
            TimeUnit::Millis => 1_000,
            TimeUnit::Micros => 1_000_000,
            TimeUnit::Nanos => 1_000_000_000,
        }
    }

    /// Number of timestamp ticks in one day.
    pub const fn ticks_per_day(&self) -> i64 {
        self.ticks_per_second() * 86_400
    }

    pub fn name(&self) -> &'static str {
        match self {
            TimeUnit::Seconds => "seconds",
            TimeUnit::Millis => "millis",
            TimeUnit::Micros => "micros",
            TimeUnit::Nanos => "nanos",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimeUnit {
    type Err = TidalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seconds" | "s" => Ok(TimeUnit::Seconds),
            "millis" | "ms" => Ok(TimeUnit::Millis),
            "micros" | "us" => Ok(TimeUnit::Micros),
            "nanos" | "ns" => Ok(TimeUnit::Nanos),
            other => Err(TidalError::UnknownTimeUnit(other.to_string())),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
