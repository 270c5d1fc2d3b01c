//! Histogram analysis and monochrome detection.
//!
//! Single pass over a raster view: per-channel 256-bucket counts plus the
//! per-pixel max-minus-min channel delta distribution that drives the
//! monochrome classification. Fully transparent pixels are excluded from
//! every statistic. The result is derived, read-only data; the only
//! "mutation" is [`Histogram::force_monochrome`], which returns a new
//! value.

use emulsion_core::Raster;
use serde::{Deserialize, Serialize};

/// Channel deltas at or below this (8-bit scale) count as monochrome.
const MONO_DELTA_LIMIT: f32 = 4.0;

/// How the histogram should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistogramMode {
    /// Distinct R/G/B distributions.
    #[serde(rename = "rgb")]
    Rgb,
    /// R/G/B distributions are statistically indistinguishable; render
    /// them overlapped as a single luminance trace.
    #[serde(rename = "rgb-monochrome-overlap")]
    RgbMonochromeOverlap,
}

/// Derived classification statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramAnalysis {
    /// True when at least 95% of sampled pixels have near-equal channels.
    pub is_monochrome: bool,
    /// Non-transparent pixels sampled.
    pub sample_count: usize,
    /// Mean of the per-pixel max-minus-min channel delta.
    pub mean_channel_delta: f32,
    /// 95th percentile of the channel delta distribution.
    pub p95_channel_delta: f32,
}

/// Per-channel histogram data normalized to [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Histogram {
    /// Red buckets.
    pub r: Vec<f32>,
    /// Green buckets.
    pub g: Vec<f32>,
    /// Blue buckets.
    pub b: Vec<f32>,
    /// Luma buckets (Rec.709 weights).
    pub luma: Vec<f32>,
    /// Presentation mode.
    pub mode: HistogramMode,
    /// Classification statistics.
    pub analysis: HistogramAnalysis,
}

impl Histogram {
    /// Returns a copy presented as monochrome without recomputing buckets.
    /// UI override for when the detected mode is wrong.
    pub fn force_monochrome(&self) -> Self {
        let mut out = self.clone();
        out.mode = HistogramMode::RgbMonochromeOverlap;
        out.analysis.is_monochrome = true;
        out
    }
}

/// Computes the histogram of a raster view. Pure function, no side
/// effects.
pub fn analyze(view: &Raster<'_>) -> Histogram {
    let mut counts = [[0u32; 256]; 4]; // r, g, b, luma
    let mut delta_counts = [0u32; 256];
    let mut delta_sum: u64 = 0;
    let mut samples: usize = 0;

    for [r, g, b, a] in view.pixels() {
        if a == 0 {
            continue;
        }
        samples += 1;
        counts[0][r as usize] += 1;
        counts[1][g as usize] += 1;
        counts[2][b as usize] += 1;

        let luma = (0.2126 * r as f32 + 0.7152 * g as f32 + 0.0722 * b as f32 + 0.5) as usize;
        counts[3][luma.min(255)] += 1;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = (max - min) as usize;
        delta_counts[delta] += 1;
        delta_sum += delta as u64;
    }

    let (mean_delta, p95_delta) = if samples == 0 {
        (0.0, 0.0)
    } else {
        let mean = delta_sum as f32 / samples as f32;
        // Smallest delta value covering 95% of samples.
        let rank = ((samples as f64) * 0.95).ceil() as u64;
        let mut cumulative: u64 = 0;
        let mut p95 = 255u32;
        for (value, &count) in delta_counts.iter().enumerate() {
            cumulative += count as u64;
            if cumulative >= rank {
                p95 = value as u32;
                break;
            }
        }
        (mean, p95 as f32)
    };

    let is_monochrome = samples > 0 && p95_delta <= MONO_DELTA_LIMIT;

    // Joint normalization: the global peak bucket across all four arrays
    // is exactly 1.0.
    let peak = counts
        .iter()
        .flat_map(|c| c.iter())
        .copied()
        .max()
        .unwrap_or(0);
    let scale = if peak > 0 { 1.0 / peak as f32 } else { 0.0 };
    let normalize = |c: &[u32; 256]| c.iter().map(|&v| v as f32 * scale).collect::<Vec<f32>>();

    Histogram {
        r: normalize(&counts[0]),
        g: normalize(&counts[1]),
        b: normalize(&counts[2]),
        luma: normalize(&counts[3]),
        mode: if is_monochrome {
            HistogramMode::RgbMonochromeOverlap
        } else {
            HistogramMode::Rgb
        },
        analysis: HistogramAnalysis {
            is_monochrome,
            sample_count: samples,
            mean_channel_delta: mean_delta,
            p95_channel_delta: p95_delta,
        },
    }
}
