//! Tidal Error - Unified Error Types
//!
//! Error handling for all Tidal operations. Fatal input errors (shape
//! mismatches, out-of-domain parameters, unknown enum names) are reported
//! through this type, while numeric degeneracy such as an all-NaN input
//! propagates as NaN and never reaches it.
//!
//! Key Features:
//! - Shape errors for mismatched index/value lengths and elementwise operands
//! - Parameter errors for periods, window lengths and decay parameters
//! - Configuration errors for unknown names and malformed TOML
//! - Seamless integration with std::io::Error
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

/// Unified error type for all Tidal operations.
#[derive(Error, Debug)]
pub enum TidalError {
    // Shape errors
    #[error("invalid shape: index has {index_len} entries but values has {values_len}")]
    InvalidShape { index_len: usize, values_len: usize },

    #[error("length mismatch: left operand has {left} values, right has {right}")]
    LengthMismatch { left: usize, right: usize },

    // Parameter errors
    #[error("invalid period: {0}")]
    InvalidPeriod(i64),

    #[error("invalid window length: {0} (must be > 0)")]
    InvalidWindow(i64),

    #[error("invalid {kind} decay parameter: {value}")]
    InvalidDecay { kind: &'static str, value: f64 },

    // Enumeration errors
    #[error("unknown resample origin: {0}")]
    UnknownOrigin(String),

    #[error("unknown interpolation method: {0}")]
    UnknownInterpolation(String),

    #[error("unknown vector kernel: {0}")]
    UnknownKernel(String),

    #[error("unknown time unit: {0}")]
    UnknownTimeUnit(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Type Aliases
// =============================================================================

/// Result type alias for Tidal operations.
pub type Result<T> = std::result::Result<T, TidalError>;

// =============================================================================
// Error Classification
// =============================================================================

impl TidalError {
    /// Returns true if the error describes mismatched sequence lengths.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            TidalError::InvalidShape { .. } | TidalError::LengthMismatch { .. }
        )
    }

    /// Returns true if a numeric parameter was outside its domain.
    pub fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            TidalError::InvalidPeriod(_)
                | TidalError::InvalidWindow(_)
                | TidalError::InvalidDecay { .. }
        )
    }

    /// Returns true if this is a user error (vs system error).
    pub fn is_user_error(&self) -> bool {
        !matches!(self, TidalError::Io(_))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let shape = TidalError::InvalidShape {
            index_len: 3,
            values_len: 2,
        };
        assert!(shape.is_shape_error());
        assert!(!shape.is_parameter_error());
        assert!(shape.is_user_error());

        let window = TidalError::InvalidWindow(0);
        assert!(window.is_parameter_error());
        assert!(!window.is_shape_error());

        let io = TidalError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        assert!(!io.is_user_error());
    }

    #[test]
    fn test_error_messages() {
        let err = TidalError::LengthMismatch { left: 4, right: 5 };
        assert_eq!(
            err.to_string(),
            "length mismatch: left operand has 4 values, right has 5"
        );

        let err = TidalError::InvalidDecay {
            kind: "span",
            value: 0.5,
        };
        assert_eq!(err.to_string(), "invalid span decay parameter: 0.5");
    }
}
