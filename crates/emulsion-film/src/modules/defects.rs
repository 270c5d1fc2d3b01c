//! Defects module: light leaks, dust, scratches.
//!
//! Placement is drawn up front from one seeded stream, then every pixel is
//! evaluated against the placed primitives. That keeps rows independent
//! for parallel processing while the whole field stays a pure function of
//! the module seed. The module runs `perRender` by default, so repeated
//! exports of the same asset vary instead of burning in a static artifact.

use crate::modules::percent;
use crate::profile::DefectsParams;
use emulsion_core::RasterMut;
use emulsion_core::hash::{self, SeedStream};
use emulsion_core::math::{clamp01, hsv_to_rgb, lerp, smoothstep};

/// Peak additive leak intensity at full strength.
const LEAK_PEAK: f32 = 0.6;

/// Fraction of 2x2 dust cells that become specks at `dust_amount = 100`.
const DUST_COVERAGE: f32 = 0.02;

/// Most scratches a single render can draw.
const MAX_SCRATCHES: usize = 6;

/// A colored gradient bleeding in from one image edge.
struct Leak {
    /// 0 = left, 1 = right, 2 = top, 3 = bottom.
    edge: u8,
    /// Band center along the edge, normalized.
    center: f32,
    /// Reach into the frame, normalized.
    width: f32,
    /// Additive tint.
    tint: [f32; 3],
    strength: f32,
}

impl Leak {
    fn intensity(&self, nx: f32, ny: f32) -> f32 {
        let (along, perp) = match self.edge {
            0 => (nx, ny),
            1 => (1.0 - nx, ny),
            2 => (ny, nx),
            _ => (1.0 - ny, nx),
        };
        let falloff = clamp01(1.0 - along / self.width);
        let band = 1.0 - smoothstep(0.15, 0.5, (perp - self.center).abs());
        self.strength * falloff * falloff * band
    }
}

/// A thin, near-vertical streak.
struct Scratch {
    /// Top intercept, normalized.
    x0: f32,
    /// Horizontal drift per unit height.
    slope: f32,
    /// Half-width in pixels.
    half_width: f32,
    /// Additive delta (negative scratches gouge dark).
    delta: f32,
}

/// Everything a single render draws, placed before the pixel loop.
struct DefectField {
    leak: Option<Leak>,
    scratches: Vec<Scratch>,
    dust_seed: u32,
    dust_coverage: f32,
}

fn place(params: &DefectsParams, seed: u32) -> DefectField {
    let mut stream = SeedStream::new(seed);

    // Draw leak parameters unconditionally so the stream stays aligned
    // when only the probability changes.
    let roll = stream.next_unit();
    let edge = (stream.next_u64() % 4) as u8;
    let center = stream.next_range(0.2, 0.8);
    let width = stream.next_range(0.25, 0.6);
    let hue = stream.next_range(10.0, 50.0);
    let strength = percent(params.leak_strength);
    let leak = (roll < params.leak_probability.clamp(0.0, 1.0) && strength > 0.0).then(|| Leak {
        edge,
        center,
        width,
        tint: hsv_to_rgb(hue, 0.85, 1.0),
        strength: strength * LEAK_PEAK,
    });

    let scratch_amount = percent(params.scratch_amount);
    let count = (scratch_amount * MAX_SCRATCHES as f32).round() as usize;
    let scratches = (0..count)
        .map(|_| {
            let x0 = stream.next_unit();
            let slope = stream.next_range(-0.06, 0.06);
            let half_width = stream.next_range(0.5, 1.4);
            let opacity = stream.next_range(0.05, 0.16);
            let bright = stream.next_unit() < 0.5;
            Scratch {
                x0,
                slope,
                half_width,
                delta: if bright { opacity } else { -opacity },
            }
        })
        .collect();

    DefectField {
        leak,
        scratches,
        dust_seed: hash::fold(seed, 0xD057),
        dust_coverage: percent(params.dust_amount) * DUST_COVERAGE,
    }
}

/// Applies the defects stage. `seed` follows the module's `perRender`
/// regime.
pub fn apply(raster: &mut RasterMut<'_>, params: &DefectsParams, amount: f32, seed: u32) {
    let field = place(params, seed);
    let width = raster.width() as f32;
    let height = raster.height() as f32;

    raster.for_each_pixel(|x, y, rgba| {
        let orig = [rgba[0], rgba[1], rgba[2]];
        let mut rgb = orig;
        let nx = (x as f32 + 0.5) / width;
        let ny = (y as f32 + 0.5) / height;

        if let Some(leak) = &field.leak {
            let glow = leak.intensity(nx, ny);
            for ch in 0..3 {
                rgb[ch] += leak.tint[ch] * glow;
            }
        }

        if field.dust_coverage > 0.0 {
            // 2x2 cells so specks read as dots, not single-pixel noise.
            let cx = (x / 2) as i32;
            let cy = (y / 2) as i32;
            let pick = hash::to_unit(hash::hash_coords(field.dust_seed, cx, cy, 0));
            if pick < field.dust_coverage {
                // Bias bright: dust on a scan catches light more often
                // than it shadows.
                let delta =
                    (hash::to_unit(hash::hash_coords(field.dust_seed, cx, cy, 1)) - 0.35) * 0.9;
                for v in &mut rgb {
                    *v += delta;
                }
            }
        }

        for scratch in &field.scratches {
            let xs = (scratch.x0 + scratch.slope * ny) * width;
            if (x as f32 - xs).abs() <= scratch.half_width {
                for v in &mut rgb {
                    *v += scratch.delta;
                }
            }
        }

        for ch in 0..3 {
            rgba[ch] = lerp(orig[ch], rgb[ch], amount);
        }
    });
}
