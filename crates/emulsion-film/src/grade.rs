//! Split-toning color grading: shadow/midtone/highlight hue tints.
//!
//! An independent pass, not one of the five profile modules; callers
//! typically run it bundled with or right after the tone stage. Zone
//! weights form a partition of unity over luminance, with the
//! shadow/highlight split point steered by `balance`.

use emulsion_core::RasterMut;
use emulsion_core::math::{clamp01, hsv_to_rgb, luminance};
use serde::{Deserialize, Serialize};

/// Damping applied to zone color blending.
const COLOR_DAMPING: f32 = 0.45;

/// Damping applied to the per-zone luminance multiplier.
const LUMA_DAMPING: f32 = 0.25;

/// Blends at or below this (after scaling to [0, 1]) are a no-op.
const MIN_BLEND: f32 = 1e-4;

/// One tone zone's tint controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToneZone {
    /// Tint hue in degrees, [0, 360).
    pub hue: f32,
    /// Tint saturation, [0, 100].
    pub saturation: f32,
    /// Zone luminance push, [-100, 100].
    pub luminance: f32,
}

impl Default for ToneZone {
    fn default() -> Self {
        Self {
            hue: 0.0,
            saturation: 0.0,
            luminance: 0.0,
        }
    }
}

/// Split-toning parameters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GradingParams {
    /// Overall blend, [0, 100].
    pub blend: f32,
    /// Shifts the shadow/highlight split point, [-100, 100].
    pub balance: f32,
    /// Shadow zone tint.
    pub shadows: ToneZone,
    /// Midtone zone tint.
    pub midtones: ToneZone,
    /// Highlight zone tint.
    pub highlights: ToneZone,
}

/// Zone weights `[shadows, midtones, highlights]` at a luminance.
fn zone_weights(luma: f32, shadow_edge: f32, highlight_edge: f32) -> [f32; 3] {
    let w_shadows = if luma <= 0.05 {
        1.0
    } else if luma >= shadow_edge {
        0.0
    } else {
        1.0 - (luma - 0.05) / (shadow_edge - 0.05)
    };
    let w_highlights = if luma >= 0.95 {
        1.0
    } else if luma <= highlight_edge {
        0.0
    } else {
        (luma - highlight_edge) / (0.95 - highlight_edge)
    };
    let w_midtones = clamp01(1.0 - w_shadows - w_highlights);
    [w_shadows, w_midtones, w_highlights]
}

/// Applies split toning in place.
pub fn apply(raster: &mut RasterMut<'_>, params: &GradingParams) {
    let blend = (params.blend / 100.0).clamp(0.0, 1.0);
    if blend <= MIN_BLEND {
        return;
    }

    let balance = (params.balance / 100.0).clamp(-1.0, 1.0);
    let shadow_edge = (0.45 + balance * 0.2).clamp(0.2, 0.7);
    let highlight_edge = (0.55 + balance * 0.2).clamp(0.3, 0.8);

    let zones = [&params.shadows, &params.midtones, &params.highlights];
    let colors: Vec<[f32; 3]> = zones
        .iter()
        .map(|z| hsv_to_rgb(z.hue, (z.saturation / 100.0).clamp(0.0, 1.0), 1.0))
        .collect();
    let lums: Vec<f32> = zones
        .iter()
        .map(|z| (z.luminance / 100.0).clamp(-1.0, 1.0))
        .collect();

    raster.for_each_pixel(|_, _, rgba| {
        let luma = luminance(rgba[0], rgba[1], rgba[2]);
        let weights = zone_weights(luma, shadow_edge, highlight_edge);

        let mut lum_shift = 0.0;
        for zone in 0..3 {
            let w = weights[zone] * blend;
            for ch in 0..3 {
                rgba[ch] += (colors[zone][ch] - 0.5) * w * COLOR_DAMPING;
            }
            lum_shift += lums[zone] * w * LUMA_DAMPING;
        }

        for ch in 0..3 {
            rgba[ch] = clamp01(rgba[ch] * (1.0 + lum_shift));
        }
    });
}
