//! Tidal Config - Configuration Structures
//!
//! Configuration types for the series engine. Supports loading from TOML
//! files and programmatic construction, with defaults matching the engine's
//! built-in behavior.
//!
//! Key Features:
//! - Vector kernel selection (auto, scalar, simd)
//! - Resample defaults (origin policy, interpolation, timestamp unit)
//! - Exponential window defaults (adjust, ignore-NA)
//! - Rolling statistics defaults (delta degrees of freedom)
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::error::{Result, TidalError};
use crate::types::{InterpolationMethod, Kernel, ResampleOrigin, TimeUnit};
use serde::{Deserialize, Serialize};
use std::path::Path;

// =============================================================================
// Resample Configuration
// =============================================================================

/// Defaults applied when resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResampleConfig {
    pub origin: ResampleOrigin,
    pub interpolation: InterpolationMethod,
    pub time_unit: TimeUnit,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            origin: ResampleOrigin::Epoch,
            interpolation: InterpolationMethod::Linear,
            time_unit: TimeUnit::Millis,
        }
    }
}

// =============================================================================
// Exponential Window Configuration
// =============================================================================

/// Defaults applied to exponentially weighted windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EwmConfig {
    pub adjust: bool,
    pub ignore_na: bool,
}

impl Default for EwmConfig {
    fn default() -> Self {
        Self {
            adjust: true,
            ignore_na: false,
        }
    }
}

// =============================================================================
// Rolling Configuration
// =============================================================================

/// Defaults applied to rolling-window statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollingConfig {
    pub ddof: u32,
}

impl Default for RollingConfig {
    fn default() -> Self {
        Self { ddof: 1 }
    }
}

// =============================================================================
// Series Configuration
// =============================================================================

/// Top-level engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SeriesConfig {
    pub kernel: Kernel,
    pub resample: ResampleConfig,
    pub ewm: EwmConfig,
    pub rolling: RollingConfig,
}

impl SeriesConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| TidalError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as a TOML document.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| TidalError::Configuration(e.to_string()))
    }

    /// Check values that the type system cannot constrain.
    pub fn validate(&self) -> Result<()> {
        if self.rolling.ddof > 1_000_000 {
            return Err(TidalError::Configuration(format!(
                "rolling.ddof is unreasonably large: {}",
                self.rolling.ddof
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SeriesConfig::default();
        assert_eq!(config.kernel, Kernel::Auto);
        assert_eq!(config.resample.origin, ResampleOrigin::Epoch);
        assert_eq!(config.resample.interpolation, InterpolationMethod::Linear);
        assert_eq!(config.resample.time_unit, TimeUnit::Millis);
        assert!(config.ewm.adjust);
        assert!(!config.ewm.ignore_na);
        assert_eq!(config.rolling.ddof, 1);
    }

    #[test]
    fn test_partial_document() {
        let config = SeriesConfig::from_toml_str(
            r#"
            kernel = "scalar"

            [resample]
            origin = "start_day"
            "#,
        )
        .unwrap();

        assert_eq!(config.kernel, Kernel::Scalar);
        assert_eq!(config.resample.origin, ResampleOrigin::StartDay);
        assert_eq!(config.resample.interpolation, InterpolationMethod::Linear);
        assert!(config.ewm.adjust);
    }

    #[test]
    fn test_unknown_origin_is_rejected() {
        let err = SeriesConfig::from_toml_str("[resample]\norigin = \"noon\"\n").unwrap_err();
        assert!(matches!(err, TidalError::Configuration(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ewm]\nadjust = false\nignore_na = true").unwrap();
        writeln!(file, "[rolling]\nddof = 0").unwrap();

        let config = SeriesConfig::from_file(file.path()).unwrap();
        assert!(!config.ewm.adjust);
        assert!(config.ewm.ignore_na);
        assert_eq!(config.rolling.ddof, 0);
    }

    #[test]
    fn test_missing_file() {
        let err = SeriesConfig::from_file("/nonexistent/tidal.toml").unwrap_err();
        assert!(matches!(err, TidalError::Io(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SeriesConfig {
            kernel: Kernel::Simd,
            resample: ResampleConfig {
                origin: ResampleOrigin::Start,
                interpolation: InterpolationMethod::Pad,
                time_unit: TimeUnit::Nanos,
            },
            ..Default::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(SeriesConfig::from_toml_str(&text).unwrap(), config);
    }
}
