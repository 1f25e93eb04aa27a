//! Error types for sprite-raster operations.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sprite-raster operations.
///
/// All of these are deterministic caller errors: nothing in the crate performs
/// I/O, so there is no transient failure to retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Zero or negative dimensions for a buffer, sprite, brush or stride.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: i32,
        /// Height value.
        height: i32,
    },

    /// Source and destination regions hold different numbers of pixels.
    #[error("Size mismatch: expected {expected} pixels, got {actual}")]
    SizeMismatch {
        /// Pixel count required by the destination.
        expected: usize,
        /// Pixel count actually supplied.
        actual: usize,
    },

    /// Coordinates outside a buffer, reported by the checked accessors only.
    #[error("Pixel ({x}, {y}) is outside a {width}x{height} buffer")]
    OutOfBounds {
        /// X coordinate.
        x: i32,
        /// Y coordinate.
        y: i32,
        /// Buffer width.
        width: i32,
        /// Buffer height.
        height: i32,
    },
}

impl Error {
    /// Reject non-positive dimensions.
    pub(crate) fn check_dimensions(width: i32, height: i32) -> Result<()> {
        if width <= 0 || height <= 0 {
            return Err(Self::InvalidDimensions { width, height });
        }
        Ok(())
    }

    /// Reject a slice whose length differs from the expected pixel count.
    pub(crate) fn check_len(expected: usize, actual: usize) -> Result<()> {
        if expected != actual {
            return Err(Self::SizeMismatch { expected, actual });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDimensions {
            width: 0,
            height: 100,
        };
        assert!(err.to_string().contains("Invalid dimensions"));
    }

    #[test]
    fn test_size_mismatch() {
        let err = Error::SizeMismatch {
            expected: 10,
            actual: 20,
        };
        assert!(err.to_string().contains("10"));
        assert!(err.to_string().contains("20"));
    }

    #[test]
    fn test_check_dimensions() {
        assert!(Error::check_dimensions(1, 1).is_ok());
        assert_eq!(
            Error::check_dimensions(-3, 4),
            Err(Error::InvalidDimensions {
                width: -3,
                height: 4
            })
        );
        assert!(Error::check_dimensions(4, 0).is_err());
    }

    #[test]
    fn test_check_len() {
        assert!(Error::check_len(6, 6).is_ok());
        assert!(Error::check_len(6, 5).is_err());
    }
}
