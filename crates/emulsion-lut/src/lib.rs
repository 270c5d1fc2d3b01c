//! 3D LUT parsing and sampling for the emulsion pipeline.
//!
//! Supports the plain-text `.cube` format (3D only):
//!
//! ```rust
//! use emulsion_lut::cube;
//!
//! let text = "LUT_3D_SIZE 2\n\
//!             0 0 0\n1 0 0\n0 1 0\n1 1 0\n\
//!             0 0 1\n1 0 1\n0 1 1\n1 1 1\n";
//! let lut = cube::parse("identity.cube", text).unwrap();
//! let out = lut.sample([0.5, 0.25, 0.75]);
//! assert!((out[0] - 0.5).abs() < 1e-5);
//! ```
//!
//! Parsed [`CubeLut`] assets are immutable and safely shared read-only
//! across concurrent pipeline invocations.

pub mod cube;
pub mod error;
pub mod lut3d;

pub use error::{CubeError, CubeResult};
pub use lut3d::CubeLut;
