//! Film pipeline error types.
//!
//! The pipeline favors silently-safe degraded output over failure: numeric
//! controls are clamped to their declared ranges, and an unresolvable LUT
//! reference disables the LUT blend for that render instead of aborting.
//! The only hard failures are buffer-shape problems.

use thiserror::Error;

/// Result type for pipeline operations.
pub type FilmResult<T> = std::result::Result<T, FilmError>;

/// Errors that can occur when invoking the pipeline.
#[derive(Debug, Error)]
pub enum FilmError {
    /// The caller-supplied buffer is unusable (zero dimensions, too short).
    #[error(transparent)]
    Raster(#[from] emulsion_core::RasterError),
}
