//! Error types for square construction and sample validation.

use thiserror::Error;

/// Invalid-argument errors raised before any triangulation work happens.
///
/// Once a `Square` and its `SampleValues` exist, triangulation cannot fail.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SquareError {
    /// Grid scale must be a finite value greater than zero.
    #[error("invalid grid scale {grid_scale}: must be finite and > 0")]
    InvalidGridScale {
        /// The rejected scale.
        grid_scale: f32,
    },

    /// Cell center has a NaN or infinite component.
    #[error("cell position ({x}, {y}) is not finite")]
    NonFinitePosition {
        /// X component.
        x: f32,
        /// Y component.
        y: f32,
    },

    /// A cell needs exactly one sample per corner.
    #[error("expected {expected} corner samples, got {got}")]
    InvalidSampleCount {
        /// Required number of samples.
        expected: usize,
        /// Number of samples supplied.
        got: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SquareError::InvalidGridScale { grid_scale: -1.0 };
        assert_eq!(
            err.to_string(),
            "invalid grid scale -1: must be finite and > 0"
        );

        let err = SquareError::InvalidSampleCount {
            expected: 4,
            got: 3,
        };
        assert_eq!(err.to_string(), "expected 4 corner samples, got 3");

        let err = SquareError::NonFinitePosition { x: 1.0, y: f32::NAN };
        assert_eq!(err.to_string(), "cell position (1, NaN) is not finite");
    }
}
