//! Tone module: exposure, contrast, recovery, point remap, 4-zone curve.

use crate::modules::signed_percent;
use crate::profile::ToneParams;
use emulsion_core::RasterMut;
use emulsion_core::math::{lerp, luminance, smoothstep};

/// Mid-gray pivot for contrast. The buffer is display-referred, so the
/// pivot sits at the middle of the encoded range rather than linear 0.18.
const PIVOT: f32 = 0.5;

/// Largest white/black point excursion at full control deflection.
const POINT_RANGE: f32 = 0.25;

/// Largest recovery lift/cut at full control deflection.
const RECOVERY_RANGE: f32 = 0.3;

/// Largest curve-region adjustment at full control deflection.
const CURVE_RANGE: f32 = 0.25;

/// Zone weights for the 4-region tone curve.
///
/// Overlapping smoothstep windows form a partition of unity over
/// luminance, so adjacent regions hand off without seams:
/// shadows fade out over [0.05, 0.35], darks occupy the gap to
/// [0.35, 0.65], lights to [0.65, 0.95], highlights fade in last.
#[inline]
fn curve_weights(luma: f32) -> [f32; 4] {
    let a = smoothstep(0.05, 0.35, luma);
    let b = smoothstep(0.35, 0.65, luma);
    let c = smoothstep(0.65, 0.95, luma);
    [1.0 - a, a - b, b - c, c]
}

/// Applies the tone stage.
pub fn apply(raster: &mut RasterMut<'_>, params: &ToneParams, amount: f32) {
    let exposure_gain = 2.0f32.powf(params.exposure.clamp(-5.0, 5.0));
    let contrast_slope = 1.0 + signed_percent(params.contrast) * 0.75;
    let highlights = signed_percent(params.highlights) * RECOVERY_RANGE;
    let shadows = signed_percent(params.shadows) * RECOVERY_RANGE;

    // Positive whites brighten by pulling the white point down; positive
    // blacks lift by pushing the black point negative.
    let white_point = 1.0 - signed_percent(params.whites) * POINT_RANGE;
    let black_point = -signed_percent(params.blacks) * POINT_RANGE;
    let point_span = (white_point - black_point).max(0.05);

    let curve = [
        signed_percent(params.curve_shadows),
        signed_percent(params.curve_darks),
        signed_percent(params.curve_lights),
        signed_percent(params.curve_highlights),
    ];

    raster.for_each_pixel(|_, _, rgba| {
        let orig = [rgba[0], rgba[1], rgba[2]];
        let mut rgb = orig;

        for v in &mut rgb {
            *v *= exposure_gain;
            *v = (*v - PIVOT) * contrast_slope + PIVOT;
        }

        let luma = luminance(rgb[0], rgb[1], rgb[2]);

        // Recovery acts only in its own end of the tonal range.
        let highlight_w = smoothstep(0.5, 1.0, luma);
        let shadow_w = 1.0 - smoothstep(0.0, 0.5, luma);
        let recovery = highlights * highlight_w + shadows * shadow_w;

        for v in &mut rgb {
            *v += recovery;
            *v = (*v - black_point) / point_span;
        }

        let weights = curve_weights(luminance(rgb[0], rgb[1], rgb[2]));
        let mut adj = 0.0;
        for zone in 0..4 {
            adj += curve[zone] * weights[zone];
        }
        adj *= CURVE_RANGE;

        for ch in 0..3 {
            rgba[ch] = lerp(orig[ch], rgb[ch] + adj, amount);
        }
    });
}
