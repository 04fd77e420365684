//! Tidal Series - Time Series Numeric Engine
//!
//! Columnar time series of integer timestamps and floating-point values
//! sharing a nominal sampling period. Provides elementwise arithmetic,
//! NaN-aware aggregation, rolling and exponentially weighted windows, and
//! frequency resampling.
//!
//! Key Features:
//! - Generic over value precision (`f64` or `f32`)
//! - Borrowed views that alias the parent series' storage
//! - Pluggable aggregates: built-in functions or any closure over a view
//! - Downsampling by aggregation, upsampling with separate interpolation
//! - Optional lane-chunked vector kernel for bulk operations
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

pub mod aggregation;
pub mod exp_window;
pub mod fill;
pub mod float;
pub mod kernel;
pub mod resample;
pub mod series;
pub mod sort;
pub mod window;

pub use aggregation::{Aggregate, AggregateFunction};
pub use exp_window::{Decay, ExpWindow};
pub use float::Real;
pub use kernel::Backend;
pub use resample::Resampler;
pub use series::{Series, SeriesView, SeriesViewMut};
pub use window::Window;

pub use tidal_common::{
    InterpolationMethod, Kernel, ResampleOrigin, Result, SeriesConfig, TidalError, TimeUnit,
};
