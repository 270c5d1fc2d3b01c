//! LUT error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type CubeResult<T> = std::result::Result<T, CubeError>;

/// Errors that can occur while parsing or building a `.cube` LUT.
///
/// Parse errors are fatal to the single parse call and never corrupt a
/// previously parsed LUT; the caller may correct the file and retry.
#[derive(Debug, Error)]
pub enum CubeError {
    /// The file never declared `LUT_3D_SIZE`.
    #[error("missing LUT_3D_SIZE declaration")]
    MissingSize,

    /// `LUT_3D_SIZE` was not a single integer in [2, 128].
    #[error("LUT_3D_SIZE must be a single integer in [2, 128]: {0:?}")]
    InvalidSize(String),

    /// Only 3D LUTs are supported.
    #[error("1D LUTs are not supported (found {0})")]
    Unsupported1D(String),

    /// A line failed to parse as the expected number of numeric values.
    #[error("line {line}: expected {expected} numeric values: {text:?}")]
    MalformedLine {
        /// 1-based line number in the input
        line: usize,
        /// Values the line should have carried
        expected: usize,
        /// The offending line text
        text: String,
    },

    /// The accumulated data rows do not fill the cube.
    #[error("expected {expected} data rows for size {size}, found {found}")]
    SampleCountMismatch {
        /// Declared cube edge length
        size: usize,
        /// `size^3` rows required
        expected: usize,
        /// Rows actually present
        found: usize,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
