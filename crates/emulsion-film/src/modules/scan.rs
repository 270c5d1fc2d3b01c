//! Scan module: halation, bloom, vignette, scanner warmth.
//!
//! Effects are pointwise: halation and bloom key off each pixel's own
//! luminance rather than a blurred neighborhood, which keeps rows
//! independent for parallel processing. A subtle per-asset scan texture
//! rides on top so two scans of different assets never look machine-clean
//! in exactly the same way.

use crate::modules::percent;
use crate::profile::ScanParams;
use emulsion_core::RasterMut;
use emulsion_core::hash;
use emulsion_core::math::{lerp, luminance, smoothstep};

/// Halation tint per channel at full strength (warm: strong red, mild
/// green, slight blue cut).
const HALATION_TINT: [f32; 3] = [0.35, 0.12, -0.04];

/// Peak bloom lift at full strength.
const BLOOM_LIFT: f32 = 0.25;

/// Peak vignette darkening at full strength.
const VIGNETTE_DEPTH: f32 = 0.45;

/// Warmth gain swing at full strength.
const WARMTH_SWING: f32 = 0.08;

/// Amplitude of the per-asset scan texture jitter.
const TEXTURE_AMPLITUDE: f32 = 0.008;

/// Applies the scan stage. `seed` follows the module's `perAsset` regime.
pub fn apply(raster: &mut RasterMut<'_>, params: &ScanParams, amount: f32, seed: u32) {
    let halation_threshold = params.halation_threshold.clamp(0.0, 1.0);
    let halation = percent(params.halation_amount);
    let bloom_threshold = params.bloom_threshold.clamp(0.0, 1.0);
    let bloom = percent(params.bloom_amount);
    let vignette = percent(params.vignette_amount);
    let warmth = percent(params.scan_warmth);

    // Texture rides on whatever scan simulation is active; with every
    // control at zero the module is exactly identity.
    let texture = TEXTURE_AMPLITUDE * halation.max(bloom).max(vignette).max(warmth);

    let width = raster.width() as f32;
    let height = raster.height() as f32;

    raster.for_each_pixel(|x, y, rgba| {
        let orig = [rgba[0], rgba[1], rgba[2]];
        let mut rgb = orig;
        let luma = luminance(rgb[0], rgb[1], rgb[2]);

        if halation > 0.0 {
            let glow = smoothstep(halation_threshold, 1.0, luma) * halation;
            for ch in 0..3 {
                rgb[ch] += HALATION_TINT[ch] * glow;
            }
        }

        if bloom > 0.0 {
            let lift = smoothstep(bloom_threshold, 1.0, luma) * bloom * BLOOM_LIFT;
            for v in &mut rgb {
                *v += lift;
            }
        }

        if vignette > 0.0 {
            // Normalized distance from center, 1.0 at the corners.
            let dx = (x as f32 + 0.5) / width * 2.0 - 1.0;
            let dy = (y as f32 + 0.5) / height * 2.0 - 1.0;
            let dist = (dx * dx + dy * dy).sqrt() / std::f32::consts::SQRT_2;
            let falloff = smoothstep(0.4, 1.0, dist) * vignette * VIGNETTE_DEPTH;
            for v in &mut rgb {
                *v *= 1.0 - falloff;
            }
        }

        if warmth > 0.0 {
            rgb[0] *= 1.0 + warmth * WARMTH_SWING;
            rgb[2] *= 1.0 - warmth * WARMTH_SWING;
        }

        if texture > 0.0 {
            let jitter =
                (hash::to_unit(hash::hash_coords(seed, x as i32, y as i32, 0)) - 0.5) * texture;
            for v in &mut rgb {
                *v += jitter;
            }
        }

        for ch in 0..3 {
            rgba[ch] = lerp(orig[ch], rgb[ch], amount);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_to(buf: &mut [u8], w: u32, h: u32, params: &ScanParams, seed: u32) {
        let mut raster = RasterMut::new(buf, w, h).unwrap();
        apply(&mut raster, params, 1.0, seed);
    }

    #[test]
    fn halation_warms_bright_pixels_only() {
        let params = ScanParams {
            halation_threshold: 0.6,
            halation_amount: 100.0,
            ..Default::default()
        };
        let mut bright = vec![230, 230, 230, 255];
        let mut dark = vec![60, 60, 60, 255];
        apply_to(&mut bright, 1, 1, &params, 1);
        apply_to(&mut dark, 1, 1, &params, 1);
        // Bright pixel gains more red than blue; dark pixel only sees the
        // sub-quantization texture jitter.
        assert!(bright[0] as i32 - 230 > 10);
        assert!(bright[0] > bright[2]);
        assert!((dark[0] as i32 - 60).abs() <= 2);
    }

    #[test]
    fn vignette_darkens_corners_not_center() {
        let params = ScanParams {
            vignette_amount: 100.0,
            ..Default::default()
        };
        let mut buf = vec![180u8; 9 * 9 * 4];
        for px in buf.chunks_exact_mut(4) {
            px[3] = 255;
        }
        let mut raster = RasterMut::new(&mut buf, 9, 9).unwrap();
        apply(&mut raster, &params, 1.0, 1);
        let center = raster.pixel(4, 4).unwrap();
        let corner = raster.pixel(0, 0).unwrap();
        assert!(corner[0] < center[0]);
        assert!((center[0] as i32 - 180).abs() <= 2);
    }

    #[test]
    fn warmth_shifts_channel_balance() {
        let params = ScanParams {
            scan_warmth: 100.0,
            ..Default::default()
        };
        let mut buf = vec![128, 128, 128, 255];
        apply_to(&mut buf, 1, 1, &params, 1);
        assert!(buf[0] > buf[2]);
    }

    #[test]
    fn texture_depends_on_seed_only() {
        let params = ScanParams {
            bloom_amount: 50.0,
            bloom_threshold: 0.3,
            ..Default::default()
        };
        let mut a = vec![150u8; 4 * 16];
        let mut b = vec![150u8; 4 * 16];
        apply_to(&mut a, 4, 4, &params, 77);
        apply_to(&mut b, 4, 4, &params, 77);
        assert_eq!(a, b);

        let mut c = vec![150u8; 4 * 16];
        apply_to(&mut c, 4, 4, &params, 78);
        assert_ne!(a, c);
    }
}
