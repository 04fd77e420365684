//! Tidal Common - Shared Types and Utilities
//!
//! Foundational types, error handling, and configuration used across all
//! Tidal components. Provides the core abstractions that keep the series
//! engine's fatal-error and configuration behavior consistent.
//!
//! Key Features:
//! - Unified error type with shape/parameter classification
//! - Shared enums (vector kernel, resample origin, interpolation, time unit)
//! - TOML-backed engine configuration
//! - Timestamp alignment and calendar utilities
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

pub mod config;
pub mod error;
pub mod types;
pub mod utils;

pub use config::{EwmConfig, ResampleConfig, RollingConfig, SeriesConfig};
pub use error::{Result, TidalError};
pub use types::*;
