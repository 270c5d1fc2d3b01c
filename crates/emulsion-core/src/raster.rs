//! Borrowed raster views over caller-owned RGBA8 memory.
//!
//! The pipeline's contract is "one buffer, one synchronous caller": the
//! caller decodes an image into a byte buffer, the pipeline mutates it in
//! place, the caller reads it back. Nothing here allocates pixel storage;
//! [`Raster`] and [`RasterMut`] only borrow.
//!
//! # Memory layout
//!
//! Pixels are stored row-major, top-to-bottom, 4 bytes per pixel:
//!
//! ```text
//! [R G B A R G B A ...]  <- row 0
//! [R G B A R G B A ...]  <- row 1
//! ```

use crate::{RasterError, RasterResult};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Bytes per RGBA8 pixel.
pub const PIXEL_STRIDE: usize = 4;

/// Immutable borrowed view over an RGBA8 buffer.
#[derive(Debug, Clone, Copy)]
pub struct Raster<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
}

/// Mutable borrowed view over an RGBA8 buffer.
#[derive(Debug)]
pub struct RasterMut<'a> {
    data: &'a mut [u8],
    width: u32,
    height: u32,
}

fn check_dims(len: usize, width: u32, height: u32) -> RasterResult<usize> {
    if width == 0 || height == 0 {
        return Err(RasterError::InvalidDimensions { width, height });
    }
    let expected = width as usize * height as usize * PIXEL_STRIDE;
    if len < expected {
        return Err(RasterError::BufferTooSmall {
            expected,
            got: len,
            width,
            height,
        });
    }
    Ok(expected)
}

impl<'a> Raster<'a> {
    /// Creates a read-only view. The buffer must hold at least
    /// `width * height * 4` bytes.
    pub fn new(data: &'a [u8], width: u32, height: u32) -> RasterResult<Self> {
        let expected = check_dims(data.len(), width, height)?;
        Ok(Self {
            data: &data[..expected],
            width,
            height,
        })
    }

    /// Raster width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Raster height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total pixel count.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw bytes of the view.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        self.data
    }

    /// Reads the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> RasterResult<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return Err(RasterError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let i = (y as usize * self.width as usize + x as usize) * PIXEL_STRIDE;
        Ok([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Iterates all pixels as `[r, g, b, a]` byte quads.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data
            .chunks_exact(PIXEL_STRIDE)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }
}

impl<'a> RasterMut<'a> {
    /// Creates a mutable view. The buffer must hold at least
    /// `width * height * 4` bytes.
    pub fn new(data: &'a mut [u8], width: u32, height: u32) -> RasterResult<Self> {
        let expected = check_dims(data.len(), width, height)?;
        Ok(Self {
            data: &mut data[..expected],
            width,
            height,
        })
    }

    /// Raster width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Raster height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Re-borrows as a read-only view.
    pub fn as_view(&self) -> Raster<'_> {
        Raster {
            data: self.data,
            width: self.width,
            height: self.height,
        }
    }

    /// Reads the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> RasterResult<[u8; 4]> {
        self.as_view().pixel(x, y)
    }

    /// Writes the pixel at (x, y).
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) -> RasterResult<()> {
        if x >= self.width || y >= self.height {
            return Err(RasterError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let i = (y as usize * self.width as usize + x as usize) * PIXEL_STRIDE;
        self.data[i..i + PIXEL_STRIDE].copy_from_slice(&rgba);
        Ok(())
    }

    /// Iterates rows as `(row_index, row_bytes)` pairs.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = (usize, &mut [u8])> {
        self.data
            .chunks_exact_mut(self.width as usize * PIXEL_STRIDE)
            .enumerate()
    }

    /// Applies `f` to every pixel, converting through normalized f32.
    ///
    /// The closure receives pixel coordinates and the RGBA values scaled to
    /// [0, 1]; whatever it writes back is clamped and re-quantized to 8 bit.
    /// Rows are processed in parallel when the `parallel` feature is on
    /// (each worker owns a disjoint row range, so per-pixel independence is
    /// the only requirement on `f`).
    pub fn for_each_pixel<F>(&mut self, f: F)
    where
        F: Fn(u32, u32, &mut [f32; 4]) + Send + Sync,
    {
        let width = self.width;
        let row_bytes = width as usize * PIXEL_STRIDE;

        let body = |(y, row): (usize, &mut [u8])| {
            for (x, px) in row.chunks_exact_mut(PIXEL_STRIDE).enumerate() {
                let mut rgba = [
                    px[0] as f32 / 255.0,
                    px[1] as f32 / 255.0,
                    px[2] as f32 / 255.0,
                    px[3] as f32 / 255.0,
                ];
                f(x as u32, y as u32, &mut rgba);
                for (dst, v) in px.iter_mut().zip(rgba) {
                    *dst = (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
                }
            }
        };

        #[cfg(feature = "parallel")]
        self.data
            .par_chunks_exact_mut(row_bytes)
            .enumerate()
            .for_each(body);

        #[cfg(not(feature = "parallel"))]
        self.data.chunks_exact_mut(row_bytes).enumerate().for_each(body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions() {
        let mut buf = vec![0u8; 16];
        assert!(RasterMut::new(&mut buf, 0, 2).is_err());
        assert!(RasterMut::new(&mut buf, 2, 0).is_err());
    }

    #[test]
    fn rejects_short_buffer() {
        let mut buf = vec![0u8; 15];
        let err = RasterMut::new(&mut buf, 2, 2).unwrap_err();
        assert!(matches!(err, RasterError::BufferTooSmall { expected: 16, .. }));
    }

    #[test]
    fn pixel_round_trip() {
        let mut buf = vec![0u8; 4 * 3 * 2];
        let mut raster = RasterMut::new(&mut buf, 3, 2).unwrap();
        raster.set_pixel(2, 1, [10, 20, 30, 255]).unwrap();
        assert_eq!(raster.pixel(2, 1).unwrap(), [10, 20, 30, 255]);
        assert!(raster.pixel(3, 0).is_err());
        assert!(raster.set_pixel(0, 2, [0; 4]).is_err());
    }

    #[test]
    fn for_each_pixel_sees_coordinates() {
        let mut buf = vec![0u8; 4 * 4];
        let mut raster = RasterMut::new(&mut buf, 2, 2).unwrap();
        raster.for_each_pixel(|x, y, rgba| {
            rgba[0] = x as f32;
            rgba[1] = y as f32;
            rgba[3] = 1.0;
        });
        assert_eq!(raster.pixel(1, 0).unwrap(), [255, 0, 0, 255]);
        assert_eq!(raster.pixel(0, 1).unwrap(), [0, 255, 0, 255]);
    }

    #[test]
    fn for_each_pixel_clamps_output() {
        let mut buf = vec![128u8; 4];
        let mut raster = RasterMut::new(&mut buf, 1, 1).unwrap();
        raster.for_each_pixel(|_, _, rgba| {
            rgba[0] = 2.0;
            rgba[1] = -1.0;
        });
        let px = raster.pixel(0, 0).unwrap();
        assert_eq!(px[0], 255);
        assert_eq!(px[1], 0);
    }
}
