//! Grain module: deterministic procedural film grain.
//!
//! The grain field is two-octave value noise over a seeded integer
//! lattice. The coarse octave interpolates smoothly between cell corners
//! (cell edge = `size` pixels); the fine octave is raw per-pixel hash
//! noise. `roughness` mixes the two, `color` interpolates between a shared
//! monochrome field and independent per-channel fields, and
//! `shadow_boost` raises amplitude where luminance is low, the way real
//! grain reads strongest in thin negative areas.

use crate::modules::percent;
use crate::profile::GrainParams;
use emulsion_core::RasterMut;
use emulsion_core::hash;
use emulsion_core::math::{lerp, luminance};

/// Peak additive excursion at `amount = 100`.
const BASE_AMPLITUDE: f32 = 0.18;

/// Amplitude multiplier in full shadow at `shadow_boost = 100`.
const SHADOW_GAIN: f32 = 2.0;

/// Noise lanes: 0..=3 feed the smooth octave (mono + RGB), 4..=7 the fine
/// octave.
const FINE_LANE_OFFSET: i32 = 4;

#[inline]
fn fade(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Smoothed value noise at pixel coordinates, centered on 0.
fn smooth_noise(seed: u32, x: u32, y: u32, cell: f32, lane: i32) -> f32 {
    let fx = x as f32 / cell;
    let fy = y as f32 / cell;
    let ix = fx.floor() as i32;
    let iy = fy.floor() as i32;
    let tx = fade(fx - ix as f32);
    let ty = fade(fy - iy as f32);

    let c00 = hash::to_unit(hash::hash_coords(seed, ix, iy, lane));
    let c10 = hash::to_unit(hash::hash_coords(seed, ix + 1, iy, lane));
    let c01 = hash::to_unit(hash::hash_coords(seed, ix, iy + 1, lane));
    let c11 = hash::to_unit(hash::hash_coords(seed, ix + 1, iy + 1, lane));

    let top = lerp(c00, c10, tx);
    let bottom = lerp(c01, c11, tx);
    lerp(top, bottom, ty) - 0.5
}

/// Raw per-pixel noise, centered on 0.
#[inline]
fn fine_noise(seed: u32, x: u32, y: u32, lane: i32) -> f32 {
    hash::to_unit(hash::hash_coords(seed, x as i32, y as i32, lane)) - 0.5
}

/// Applies the grain stage. Noise is additive, scaled by the grain
/// `amount` parameter and the module-level blend together, so the module
/// needs no separate output lerp.
pub fn apply(raster: &mut RasterMut<'_>, params: &GrainParams, amount: f32, seed: u32) {
    let strength = percent(params.amount) * amount.clamp(0.0, 1.0);
    if strength <= 0.0 {
        return;
    }
    let cell = params.size.clamp(1.0, 64.0);
    let roughness = percent(params.roughness);
    let color = percent(params.color);
    let shadow_boost = percent(params.shadow_boost);

    raster.for_each_pixel(|x, y, rgba| {
        let luma = luminance(rgba[0], rgba[1], rgba[2]);
        let amp = strength
            * BASE_AMPLITUDE
            * (1.0 + shadow_boost * SHADOW_GAIN * (1.0 - luma.clamp(0.0, 1.0)));

        let mono = lerp(
            smooth_noise(seed, x, y, cell, 0),
            fine_noise(seed, x, y, FINE_LANE_OFFSET),
            roughness,
        );

        for ch in 0..3 {
            let lane = ch as i32 + 1;
            let chroma = lerp(
                smooth_noise(seed, x, y, cell, lane),
                fine_noise(seed, x, y, lane + FINE_LANE_OFFSET),
                roughness,
            );
            rgba[ch] += lerp(mono, chroma, color) * amp;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grained(params: &GrainParams, seed: u32) -> Vec<u8> {
        let mut buf = vec![128u8; 8 * 8 * 4];
        for px in buf.chunks_exact_mut(4) {
            px[3] = 255;
        }
        let mut raster = RasterMut::new(&mut buf, 8, 8).unwrap();
        apply(&mut raster, params, 1.0, seed);
        buf
    }

    #[test]
    fn identical_seed_is_bit_identical() {
        let params = GrainParams {
            amount: 60.0,
            roughness: 70.0,
            color: 40.0,
            ..Default::default()
        };
        assert_eq!(grained(&params, 42), grained(&params, 42));
    }

    #[test]
    fn different_seed_changes_field() {
        let params = GrainParams {
            amount: 60.0,
            ..Default::default()
        };
        assert_ne!(grained(&params, 42), grained(&params, 43));
    }

    #[test]
    fn zero_amount_is_noop() {
        let params = GrainParams {
            amount: 0.0,
            ..Default::default()
        };
        let out = grained(&params, 42);
        assert!(out.chunks_exact(4).all(|px| px[0] == 128 && px[1] == 128));
    }

    #[test]
    fn monochrome_grain_keeps_channels_equal() {
        let params = GrainParams {
            amount: 80.0,
            color: 0.0,
            roughness: 100.0,
            ..Default::default()
        };
        let out = grained(&params, 7);
        for px in out.chunks_exact(4) {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
        }
    }

    #[test]
    fn chromatic_grain_decorrelates_channels() {
        let params = GrainParams {
            amount: 80.0,
            color: 100.0,
            roughness: 100.0,
            ..Default::default()
        };
        let out = grained(&params, 7);
        assert!(out.chunks_exact(4).any(|px| px[0] != px[1] || px[1] != px[2]));
    }

    #[test]
    fn coarse_grain_correlates_neighbors() {
        // With a large cell and no fine octave, adjacent pixels sit in the
        // same noise cell and move together.
        let params = GrainParams {
            amount: 100.0,
            size: 16.0,
            roughness: 0.0,
            ..Default::default()
        };
        let out = grained(&params, 99);
        let px = |x: usize, y: usize| out[(y * 8 + x) * 4] as i32;
        let mut total_step = 0;
        for y in 0..8 {
            for x in 0..7 {
                total_step += (px(x, y) - px(x + 1, y)).abs();
            }
        }
        // Average neighbor delta stays small for a 16px cell.
        assert!(total_step / 56 < 6, "avg step {}", total_step / 56);
    }

    #[test]
    fn shadow_boost_amplifies_dark_pixels() {
        let params = GrainParams {
            amount: 60.0,
            shadow_boost: 100.0,
            roughness: 100.0,
            ..Default::default()
        };
        let spread = |value: u8| {
            let mut buf = vec![value; 16 * 16 * 4];
            for px in buf.chunks_exact_mut(4) {
                px[3] = 255;
            }
            let mut raster = RasterMut::new(&mut buf, 16, 16).unwrap();
            apply(&mut raster, &params, 1.0, 5);
            let devs: i64 = buf
                .chunks_exact(4)
                .map(|px| (px[0] as i64 - value as i64).abs())
                .sum();
            devs
        };
        assert!(spread(40) > spread(215));
    }
}
