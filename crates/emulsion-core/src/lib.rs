//! Core primitives for the emulsion film-simulation pipeline.
//!
//! This crate provides the pieces every other emulsion crate builds on:
//!
//! - [`Raster`] / [`RasterMut`] — borrowed views over caller-owned RGBA8
//!   buffers (the pipeline never allocates pixel storage)
//! - [`math`] — clamping, luminance, HSV conversion
//! - [`hash`] — deterministic coordinate hashing and seeded value streams
//!   backing all procedural noise
//!
//! # Used by
//!
//! - `emulsion-film` — simulation modules, grading, histogram
//! - `emulsion-cli` — buffer wiring around decoded images

pub mod error;
pub mod hash;
pub mod math;
pub mod raster;

pub use error::{RasterError, RasterResult};
pub use raster::{PIXEL_STRIDE, Raster, RasterMut};
