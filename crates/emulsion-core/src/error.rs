//! Error types for raster buffer operations.

use thiserror::Error;

/// Result type alias using [`RasterError`].
pub type RasterResult<T> = std::result::Result<T, RasterError>;

/// Errors that can occur when constructing or accessing a raster view.
#[derive(Debug, Error)]
pub enum RasterError {
    /// Width or height is zero.
    #[error("invalid raster dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// Backing buffer is smaller than the dimensions require.
    #[error("buffer holds {got} bytes, {expected} required for {width}x{height} RGBA8")]
    BufferTooSmall {
        /// Bytes required (`width * height * 4`)
        expected: usize,
        /// Bytes provided
        got: usize,
        /// Raster width
        width: u32,
        /// Raster height
        height: u32,
    },

    /// Pixel coordinates are outside the raster bounds.
    #[error("pixel ({x}, {y}) out of bounds for raster {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was accessed
        x: u32,
        /// Y coordinate that was accessed
        y: u32,
        /// Raster width
        width: u32,
        /// Raster height
        height: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_dimensions() {
        let err = RasterError::BufferTooSmall {
            expected: 400,
            got: 100,
            width: 10,
            height: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("400"));
        assert!(msg.contains("10x10"));
    }
}
