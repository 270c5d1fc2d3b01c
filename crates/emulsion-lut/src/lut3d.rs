//! 3-dimensional lookup table with trilinear sampling.
//!
//! A 3D LUT maps RGB input to RGB output through a cube of color samples.
//! Film looks distributed as `.cube` files are applied this way: normalize
//! the input into the LUT's domain, find the surrounding lattice cell, and
//! interpolate across its 8 corners.

use crate::{CubeError, CubeResult};

/// Cube edge length bounds accepted by the parser and constructors.
pub const MIN_SIZE: usize = 2;
/// See [`MIN_SIZE`].
pub const MAX_SIZE: usize = 128;

/// An immutable, parsed 3D LUT asset.
///
/// Safely shareable read-only across concurrent pipeline invocations.
/// Data is stored in `.cube` file order: R varies fastest, then G, then B.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeLut {
    /// Deterministic asset id derived from the source file identity.
    pub id: String,
    /// Display name (the `TITLE`, or the file name when untitled).
    pub name: String,
    /// Cube edge length (typically 17, 33, or 65).
    pub size: usize,
    /// Input domain minimum per channel.
    pub domain_min: [f32; 3],
    /// Input domain maximum per channel.
    pub domain_max: [f32; 3],
    /// `size^3` RGB samples, R-fastest.
    pub data: Vec<[f32; 3]>,
}

impl CubeLut {
    /// Builds a LUT from raw samples in R-fastest order.
    pub fn from_data(
        id: impl Into<String>,
        name: impl Into<String>,
        size: usize,
        data: Vec<[f32; 3]>,
    ) -> CubeResult<Self> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(CubeError::InvalidSize(size.to_string()));
        }
        let expected = size * size * size;
        if data.len() != expected {
            return Err(CubeError::SampleCountMismatch {
                size,
                expected,
                found: data.len(),
            });
        }
        Ok(Self {
            id: id.into(),
            name: name.into(),
            size,
            domain_min: [0.0; 3],
            domain_max: [1.0; 3],
            data,
        })
    }

    /// Creates an identity (pass-through) LUT. Used by tests and tooling.
    pub fn identity(size: usize) -> CubeResult<Self> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(CubeError::InvalidSize(size.to_string()));
        }
        let n = (size - 1) as f32;
        let mut data = Vec::with_capacity(size * size * size);
        for b in 0..size {
            for g in 0..size {
                for r in 0..size {
                    data.push([r as f32 / n, g as f32 / n, b as f32 / n]);
                }
            }
        }
        Self::from_data(format!("identity-{size}"), "Identity", size, data)
    }

    /// Sets the input domain.
    pub fn with_domain(mut self, min: [f32; 3], max: [f32; 3]) -> Self {
        self.domain_min = min;
        self.domain_max = max;
        self
    }

    #[inline]
    fn get(&self, r: usize, g: usize, b: usize) -> [f32; 3] {
        // R-fastest file order.
        self.data[r + g * self.size + b * self.size * self.size]
    }

    /// Normalizes one channel into [0, 1] over the LUT domain.
    #[inline]
    fn normalize(&self, v: f32, ch: usize) -> f32 {
        let span = self.domain_max[ch] - self.domain_min[ch];
        if span.abs() < f32::EPSILON {
            return 0.0;
        }
        ((v - self.domain_min[ch]) / span).clamp(0.0, 1.0)
    }

    /// Samples the LUT with trilinear interpolation.
    ///
    /// Input is normalized to the LUT domain and clamped to the index
    /// range; there is no extrapolation outside the cube.
    pub fn sample(&self, rgb: [f32; 3]) -> [f32; 3] {
        let r = self.normalize(rgb[0], 0);
        let g = self.normalize(rgb[1], 1);
        let b = self.normalize(rgb[2], 2);
        let n = (self.size - 1) as f32;

        let ri = ((r * n).floor() as usize).min(self.size - 2);
        let gi = ((g * n).floor() as usize).min(self.size - 2);
        let bi = ((b * n).floor() as usize).min(self.size - 2);

        let rf = r * n - ri as f32;
        let gf = g * n - gi as f32;
        let bf = b * n - bi as f32;

        let c000 = self.get(ri, gi, bi);
        let c100 = self.get(ri + 1, gi, bi);
        let c010 = self.get(ri, gi + 1, bi);
        let c110 = self.get(ri + 1, gi + 1, bi);
        let c001 = self.get(ri, gi, bi + 1);
        let c101 = self.get(ri + 1, gi, bi + 1);
        let c011 = self.get(ri, gi + 1, bi + 1);
        let c111 = self.get(ri + 1, gi + 1, bi + 1);

        let mut out = [0.0f32; 3];
        for ch in 0..3 {
            let c00 = c000[ch] + (c100[ch] - c000[ch]) * rf;
            let c10 = c010[ch] + (c110[ch] - c010[ch]) * rf;
            let c01 = c001[ch] + (c101[ch] - c001[ch]) * rf;
            let c11 = c011[ch] + (c111[ch] - c011[ch]) * rf;
            let c0 = c00 + (c10 - c00) * gf;
            let c1 = c01 + (c11 - c01) * gf;
            out[ch] = c0 + (c1 - c0) * bf;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_passes_through() {
        let lut = CubeLut::identity(17).unwrap();
        for rgb in [[0.0, 0.0, 0.0], [0.5, 0.3, 0.8], [1.0, 1.0, 1.0]] {
            let out = lut.sample(rgb);
            for ch in 0..3 {
                assert_relative_eq!(out[ch], rgb[ch], epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn lattice_points_are_exact() {
        let lut = CubeLut::identity(5).unwrap();
        let out = lut.sample([0.25, 0.5, 0.75]);
        assert_relative_eq!(out[0], 0.25, epsilon = 1e-6);
        assert_relative_eq!(out[1], 0.5, epsilon = 1e-6);
        assert_relative_eq!(out[2], 0.75, epsilon = 1e-6);
    }

    #[test]
    fn sampling_clamps_out_of_domain() {
        let lut = CubeLut::identity(9).unwrap();
        let lo = lut.sample([-2.0, -2.0, -2.0]);
        let hi = lut.sample([4.0, 4.0, 4.0]);
        assert_relative_eq!(lo[0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(hi[2], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn custom_domain_normalizes() {
        let lut = CubeLut::identity(9)
            .unwrap()
            .with_domain([0.0; 3], [2.0; 3]);
        let out = lut.sample([1.0, 1.0, 1.0]);
        for ch in 0..3 {
            assert_relative_eq!(out[ch], 0.5, epsilon = 1e-5);
        }
    }

    #[test]
    fn from_data_validates_count() {
        let err = CubeLut::from_data("x", "x", 2, vec![[0.0; 3]; 7]).unwrap_err();
        assert!(matches!(
            err,
            CubeError::SampleCountMismatch {
                expected: 8,
                found: 7,
                ..
            }
        ));
    }

    #[test]
    fn size_bounds_enforced() {
        assert!(CubeLut::identity(1).is_err());
        assert!(CubeLut::identity(129).is_err());
        assert!(CubeLut::identity(2).is_ok());
        assert!(CubeLut::identity(128).is_ok());
    }
}
