//! Color-science module: channel mix, temperature/tint, LUT blend.

use crate::modules::signed_percent;
use crate::profile::ColorScienceParams;
use emulsion_core::RasterMut;
use emulsion_core::math::lerp;
use emulsion_lut::CubeLut;

/// Strength of a full-scale temperature/tint shift in normalized units.
const SHIFT_SCALE: f32 = 0.25;

/// Applies the color-science stage.
///
/// Per pixel: multiplicative RGB gains, then an additive warm–cool /
/// green–magenta shift, then (when a LUT is resolved) a blend of the
/// LUT-sampled color into the pre-LUT color by `lut_strength`. The whole
/// result is blended into the original by `amount`.
pub fn apply(
    raster: &mut RasterMut<'_>,
    params: &ColorScienceParams,
    amount: f32,
    lut: Option<&CubeLut>,
) {
    let gains = [
        params.rgb_mix[0].clamp(0.0, 4.0),
        params.rgb_mix[1].clamp(0.0, 4.0),
        params.rgb_mix[2].clamp(0.0, 4.0),
    ];
    // Positive temperature warms (R up, B down); positive tint pushes
    // magenta (G down, R/B up).
    let temp = signed_percent(params.temperature_shift) * SHIFT_SCALE;
    let tint = signed_percent(params.tint_shift) * SHIFT_SCALE;
    let lut_strength = params.lut_strength.clamp(0.0, 1.0);
    let lut = lut.filter(|_| lut_strength > 0.0);

    raster.for_each_pixel(|_, _, rgba| {
        let orig = [rgba[0], rgba[1], rgba[2]];

        let mut rgb = [
            orig[0] * gains[0] + temp + tint * 0.5,
            orig[1] * gains[1] + temp * 0.2 - tint,
            orig[2] * gains[2] - temp + tint * 0.5,
        ];

        if let Some(lut) = lut {
            let looked = lut.sample(rgb);
            for ch in 0..3 {
                rgb[ch] = lerp(rgb[ch], looked[ch], lut_strength);
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

    fn gray_raster(buf: &mut Vec<u8>) -> RasterMut<'_> {
        *buf = vec![128, 128, 128, 255].repeat(4);
        RasterMut::new(buf, 2, 2).unwrap()
    }

    #[test]
    fn identity_params_leave_pixels() {
        let mut buf = Vec::new();
        let mut raster = gray_raster(&mut buf);
        apply(&mut raster, &ColorScienceParams::default(), 1.0, None);
        assert_eq!(raster.pixel(0, 0).unwrap(), [128, 128, 128, 255]);
    }

    #[test]
    fn warm_temperature_raises_red_lowers_blue() {
        let mut buf = Vec::new();
        let mut raster = gray_raster(&mut buf);
        let params = ColorScienceParams {
            temperature_shift: 50.0,
            ..Default::default()
        };
        apply(&mut raster, &params, 1.0, None);
        let px = raster.pixel(0, 0).unwrap();
        assert!(px[0] > 128);
        assert!(px[2] < 128);
    }

    #[test]
    fn rgb_mix_scales_channels() {
        let mut buf = Vec::new();
        let mut raster = gray_raster(&mut buf);
        let params = ColorScienceParams {
            rgb_mix: [1.5, 1.0, 0.5],
            ..Default::default()
        };
        apply(&mut raster, &params, 1.0, None);
        let px = raster.pixel(1, 1).unwrap();
        assert!(px[0] > 180);
        assert_eq!(px[1], 128);
        assert!(px[2] < 70);
    }

    #[test]
    fn amount_blends_toward_original() {
        let mut full = Vec::new();
        let mut half = Vec::new();
        let params = ColorScienceParams {
            temperature_shift: 80.0,
            ..Default::default()
        };
        let mut raster = gray_raster(&mut full);
        apply(&mut raster, &params, 1.0, None);
        let full_px = raster.pixel(0, 0).unwrap();
        let mut raster = gray_raster(&mut half);
        apply(&mut raster, &params, 0.5, None);
        let half_px = raster.pixel(0, 0).unwrap();
        assert!(half_px[0] > 128 && half_px[0] < full_px[0]);
    }

    #[test]
    fn lut_blend_uses_strength() {
        // A LUT that forces everything to pure red.
        let red = CubeLut::from_data("red", "Red", 2, vec![[1.0, 0.0, 0.0]; 8]).unwrap();
        let mut buf = Vec::new();
        let mut raster = gray_raster(&mut buf);
        let params = ColorScienceParams {
            lut_strength: 0.5,
            ..Default::default()
        };
        apply(&mut raster, &params, 1.0, Some(&red));
        let px = raster.pixel(0, 0).unwrap();
        // Halfway between gray 128 and red 255 / 0.
        assert!((px[0] as i32 - 192).abs() <= 1);
        assert!((px[1] as i32 - 64).abs() <= 1);
    }

    #[test]
    fn zero_strength_ignores_lut() {
        let red = CubeLut::from_data("red", "Red", 2, vec![[1.0, 0.0, 0.0]; 8]).unwrap();
        let mut buf = Vec::new();
        let mut raster = gray_raster(&mut buf);
        apply(&mut raster, &ColorScienceParams::default(), 1.0, Some(&red));
        assert_eq!(raster.pixel(0, 0).unwrap(), [128, 128, 128, 255]);
    }
}
