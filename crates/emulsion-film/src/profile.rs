//! Film profile data model and override resolution.
//!
//! A profile is an ordered list of module configurations over a closed set
//! of five module kinds. The kind set is fixed at compile time: parameters
//! are a tagged union rather than a dynamic bag, so a profile that parses
//! is structurally valid.
//!
//! Profiles serialize with an `id` tag and camelCase fields, matching the
//! JSON interchange shape used by profile-authoring front ends:
//!
//! ```json
//! {
//!   "id": "tone",
//!   "enabled": true,
//!   "amount": 80,
//!   "exposure": 0.3,
//!   "contrast": 12.0
//! }
//! ```

use crate::seed::SeedMode;
use serde::{Deserialize, Serialize};

/// The closed set of simulation module kinds, in canonical execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleKind {
    /// Channel mix, temperature/tint, LUT blend.
    #[serde(rename = "colorScience")]
    ColorScience,
    /// Exposure, contrast, recovery, tone curve.
    #[serde(rename = "tone")]
    Tone,
    /// Halation, bloom, vignette, scanner warmth.
    #[serde(rename = "scan")]
    Scan,
    /// Procedural film grain.
    #[serde(rename = "grain")]
    Grain,
    /// Light leaks, dust, scratches.
    #[serde(rename = "defects")]
    Defects,
}

impl ModuleKind {
    /// Canonical execution order. Module list order in a resolved profile
    /// always matches this.
    pub const ORDER: [ModuleKind; 5] = [
        ModuleKind::ColorScience,
        ModuleKind::Tone,
        ModuleKind::Scan,
        ModuleKind::Grain,
        ModuleKind::Defects,
    ];

    /// Interchange name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleKind::ColorScience => "colorScience",
            ModuleKind::Tone => "tone",
            ModuleKind::Scan => "scan",
            ModuleKind::Grain => "grain",
            ModuleKind::Defects => "defects",
        }
    }

    /// Seed regime a module of this kind uses unless overridden.
    pub fn default_seed_mode(self) -> SeedMode {
        match self {
            ModuleKind::Defects => SeedMode::PerRender,
            _ => SeedMode::PerAsset,
        }
    }
}

/// Color-science stage parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorScienceParams {
    /// Blend of the LUT-transformed color into the pre-LUT color, [0, 1].
    pub lut_strength: f32,
    /// LUT asset this module expects; resolved by the caller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lut_asset_id: Option<String>,
    /// Multiplicative per-channel gains.
    pub rgb_mix: [f32; 3],
    /// Warm–cool shift, [-100, 100].
    pub temperature_shift: f32,
    /// Green–magenta shift, [-100, 100].
    pub tint_shift: f32,
}

impl Default for ColorScienceParams {
    fn default() -> Self {
        Self {
            lut_strength: 0.0,
            lut_asset_id: None,
            rgb_mix: [1.0, 1.0, 1.0],
            temperature_shift: 0.0,
            tint_shift: 0.0,
        }
    }
}

/// Tone stage parameters. All controls default to 0 (identity).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToneParams {
    /// Exposure in stops, [-5, 5].
    pub exposure: f32,
    /// Contrast around mid-gray, [-100, 100].
    pub contrast: f32,
    /// Highlight recovery/lift, [-100, 100].
    pub highlights: f32,
    /// Shadow recovery/lift, [-100, 100].
    pub shadows: f32,
    /// White point adjustment, [-100, 100].
    pub whites: f32,
    /// Black point adjustment, [-100, 100].
    pub blacks: f32,
    /// Curve region control: highlight zone, [-100, 100].
    pub curve_highlights: f32,
    /// Curve region control: light zone, [-100, 100].
    pub curve_lights: f32,
    /// Curve region control: dark zone, [-100, 100].
    pub curve_darks: f32,
    /// Curve region control: shadow zone, [-100, 100].
    pub curve_shadows: f32,
}

/// Scan stage parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanParams {
    /// Luminance above which halation bleeds, [0, 1].
    pub halation_threshold: f32,
    /// Halation strength, [0, 100].
    pub halation_amount: f32,
    /// Luminance above which bloom lifts, [0, 1].
    pub bloom_threshold: f32,
    /// Bloom strength, [0, 100].
    pub bloom_amount: f32,
    /// Radial edge darkening, [0, 100].
    pub vignette_amount: f32,
    /// Uniform warm cast, [0, 100].
    pub scan_warmth: f32,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            halation_threshold: 0.75,
            halation_amount: 0.0,
            bloom_threshold: 0.85,
            bloom_amount: 0.0,
            vignette_amount: 0.0,
            scan_warmth: 0.0,
        }
    }
}

/// Grain stage parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GrainParams {
    /// Grain strength, [0, 100].
    pub amount: f32,
    /// Grain cell size in pixels; larger is coarser, [1, 64].
    pub size: f32,
    /// Mix of fine per-pixel noise into the smoothed field, [0, 100].
    pub roughness: f32,
    /// Chromatic vs monochrome grain, [0, 100].
    pub color: f32,
    /// Extra grain amplitude in shadow zones, [0, 100].
    pub shadow_boost: f32,
}

impl Default for GrainParams {
    fn default() -> Self {
        Self {
            amount: 0.0,
            size: 2.0,
            roughness: 50.0,
            color: 0.0,
            shadow_boost: 0.0,
        }
    }
}

/// Defects stage parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DefectsParams {
    /// Chance a light leak appears in a given render, [0, 1].
    pub leak_probability: f32,
    /// Light leak intensity, [0, 100].
    pub leak_strength: f32,
    /// Dust speck density/opacity, [0, 100].
    pub dust_amount: f32,
    /// Scratch streak count/opacity, [0, 100].
    pub scratch_amount: f32,
}

impl Default for DefectsParams {
    fn default() -> Self {
        Self {
            leak_probability: 0.08,
            leak_strength: 35.0,
            dust_amount: 0.0,
            scratch_amount: 0.0,
        }
    }
}

/// Module parameters, tagged by module id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "id")]
pub enum ModuleParams {
    /// `colorScience` parameters.
    #[serde(rename = "colorScience")]
    ColorScience(ColorScienceParams),
    /// `tone` parameters.
    #[serde(rename = "tone")]
    Tone(ToneParams),
    /// `scan` parameters.
    #[serde(rename = "scan")]
    Scan(ScanParams),
    /// `grain` parameters.
    #[serde(rename = "grain")]
    Grain(GrainParams),
    /// `defects` parameters.
    #[serde(rename = "defects")]
    Defects(DefectsParams),
}

impl ModuleParams {
    /// Kind this parameter record belongs to.
    pub fn kind(&self) -> ModuleKind {
        match self {
            ModuleParams::ColorScience(_) => ModuleKind::ColorScience,
            ModuleParams::Tone(_) => ModuleKind::Tone,
            ModuleParams::Scan(_) => ModuleKind::Scan,
            ModuleParams::Grain(_) => ModuleKind::Grain,
            ModuleParams::Defects(_) => ModuleKind::Defects,
        }
    }

    /// Default parameter record for a kind.
    pub fn default_for(kind: ModuleKind) -> Self {
        match kind {
            ModuleKind::ColorScience => ModuleParams::ColorScience(Default::default()),
            ModuleKind::Tone => ModuleParams::Tone(Default::default()),
            ModuleKind::Scan => ModuleParams::Scan(Default::default()),
            ModuleKind::Grain => ModuleParams::Grain(Default::default()),
            ModuleKind::Defects => ModuleParams::Defects(Default::default()),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_amount() -> f32 {
    100.0
}

/// One configured module within a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleConfig {
    /// Parameter record; its tag is the module id.
    #[serde(flatten)]
    pub params: ModuleParams,
    /// Disabled modules are a strict no-op.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Global intensity blend for the module, [0, 100].
    #[serde(default = "default_amount")]
    pub amount: f32,
    /// Seed regime override; `None` uses the kind's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_mode: Option<SeedMode>,
}

impl ModuleConfig {
    /// Default configuration for a kind. Defaults are identity-safe:
    /// every kind except `defects` is enabled but parameterized to have
    /// no visible effect.
    pub fn default_for(kind: ModuleKind) -> Self {
        Self {
            params: ModuleParams::default_for(kind),
            enabled: kind != ModuleKind::Defects,
            amount: 100.0,
            seed_mode: None,
        }
    }

    /// Kind of this module.
    pub fn kind(&self) -> ModuleKind {
        self.params.kind()
    }
}

/// A named, versioned film profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmProfile {
    /// Stable profile identifier.
    pub id: String,
    /// Schema/content version.
    #[serde(default)]
    pub version: u32,
    /// Display name.
    pub name: String,
    /// Ordered module list; order defines execution order and kinds are
    /// unique within the list.
    pub modules: Vec<ModuleConfig>,
}

impl FilmProfile {
    /// A neutral profile: every module present with identity parameters.
    pub fn neutral(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: 1,
            name: name.into(),
            modules: ModuleKind::ORDER
                .iter()
                .map(|&k| ModuleConfig::default_for(k))
                .collect(),
        }
    }

    /// Finds a module by kind.
    pub fn module(&self, kind: ModuleKind) -> Option<&ModuleConfig> {
        self.modules.iter().find(|m| m.kind() == kind)
    }

    /// Mutable access to a module by kind.
    pub fn module_mut(&mut self, kind: ModuleKind) -> Option<&mut ModuleConfig> {
        self.modules.iter_mut().find(|m| m.kind() == kind)
    }
}

// Override patches. Each module parameter struct gets an explicit,
// field-by-field merge: a present override field replaces the base field.

/// Sparse patch for [`ColorScienceParams`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorSciencePatch {
    pub lut_strength: Option<f32>,
    pub lut_asset_id: Option<String>,
    pub rgb_mix: Option<[f32; 3]>,
    pub temperature_shift: Option<f32>,
    pub tint_shift: Option<f32>,
}

impl ColorScienceParams {
    /// Applies a patch, field by field.
    pub fn merged(&self, patch: &ColorSciencePatch) -> Self {
        Self {
            lut_strength: patch.lut_strength.unwrap_or(self.lut_strength),
            lut_asset_id: patch
                .lut_asset_id
                .clone()
                .or_else(|| self.lut_asset_id.clone()),
            rgb_mix: patch.rgb_mix.unwrap_or(self.rgb_mix),
            temperature_shift: patch.temperature_shift.unwrap_or(self.temperature_shift),
            tint_shift: patch.tint_shift.unwrap_or(self.tint_shift),
        }
    }
}

/// Sparse patch for [`ToneParams`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TonePatch {
    pub exposure: Option<f32>,
    pub contrast: Option<f32>,
    pub highlights: Option<f32>,
    pub shadows: Option<f32>,
    pub whites: Option<f32>,
    pub blacks: Option<f32>,
    pub curve_highlights: Option<f32>,
    pub curve_lights: Option<f32>,
    pub curve_darks: Option<f32>,
    pub curve_shadows: Option<f32>,
}

impl ToneParams {
    /// Applies a patch, field by field.
    pub fn merged(&self, patch: &TonePatch) -> Self {
        Self {
            exposure: patch.exposure.unwrap_or(self.exposure),
            contrast: patch.contrast.unwrap_or(self.contrast),
            highlights: patch.highlights.unwrap_or(self.highlights),
            shadows: patch.shadows.unwrap_or(self.shadows),
            whites: patch.whites.unwrap_or(self.whites),
            blacks: patch.blacks.unwrap_or(self.blacks),
            curve_highlights: patch.curve_highlights.unwrap_or(self.curve_highlights),
            curve_lights: patch.curve_lights.unwrap_or(self.curve_lights),
            curve_darks: patch.curve_darks.unwrap_or(self.curve_darks),
            curve_shadows: patch.curve_shadows.unwrap_or(self.curve_shadows),
        }
    }
}

/// Sparse patch for [`ScanParams`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanPatch {
    pub halation_threshold: Option<f32>,
    pub halation_amount: Option<f32>,
    pub bloom_threshold: Option<f32>,
    pub bloom_amount: Option<f32>,
    pub vignette_amount: Option<f32>,
    pub scan_warmth: Option<f32>,
}

impl ScanParams {
    /// Applies a patch, field by field.
    pub fn merged(&self, patch: &ScanPatch) -> Self {
        Self {
            halation_threshold: patch.halation_threshold.unwrap_or(self.halation_threshold),
            halation_amount: patch.halation_amount.unwrap_or(self.halation_amount),
            bloom_threshold: patch.bloom_threshold.unwrap_or(self.bloom_threshold),
            bloom_amount: patch.bloom_amount.unwrap_or(self.bloom_amount),
            vignette_amount: patch.vignette_amount.unwrap_or(self.vignette_amount),
            scan_warmth: patch.scan_warmth.unwrap_or(self.scan_warmth),
        }
    }
}

/// Sparse patch for [`GrainParams`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GrainPatch {
    pub amount: Option<f32>,
    pub size: Option<f32>,
    pub roughness: Option<f32>,
    pub color: Option<f32>,
    pub shadow_boost: Option<f32>,
}

impl GrainParams {
    /// Applies a patch, field by field.
    pub fn merged(&self, patch: &GrainPatch) -> Self {
        Self {
            amount: patch.amount.unwrap_or(self.amount),
            size: patch.size.unwrap_or(self.size),
            roughness: patch.roughness.unwrap_or(self.roughness),
            color: patch.color.unwrap_or(self.color),
            shadow_boost: patch.shadow_boost.unwrap_or(self.shadow_boost),
        }
    }
}

/// Sparse patch for [`DefectsParams`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DefectsPatch {
    pub leak_probability: Option<f32>,
    pub leak_strength: Option<f32>,
    pub dust_amount: Option<f32>,
    pub scratch_amount: Option<f32>,
}

impl DefectsParams {
    /// Applies a patch, field by field.
    pub fn merged(&self, patch: &DefectsPatch) -> Self {
        Self {
            leak_probability: patch.leak_probability.unwrap_or(self.leak_probability),
            leak_strength: patch.leak_strength.unwrap_or(self.leak_strength),
            dust_amount: patch.dust_amount.unwrap_or(self.dust_amount),
            scratch_amount: patch.scratch_amount.unwrap_or(self.scratch_amount),
        }
    }
}

/// Per-module override: sparse settings plus a sparse parameter patch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModuleOverride<P> {
    pub enabled: Option<bool>,
    pub amount: Option<f32>,
    pub seed_mode: Option<SeedMode>,
    pub params: P,
}

/// Sparse per-asset overrides on top of a base profile.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileOverrides {
    pub color_science: Option<ModuleOverride<ColorSciencePatch>>,
    pub tone: Option<ModuleOverride<TonePatch>>,
    pub scan: Option<ModuleOverride<ScanPatch>>,
    pub grain: Option<ModuleOverride<GrainPatch>>,
    pub defects: Option<ModuleOverride<DefectsPatch>>,
}

fn merge_module<P, F>(
    base: &mut ModuleConfig,
    ov: &Option<ModuleOverride<P>>,
    merge_params: F,
) where
    F: FnOnce(&mut ModuleParams, &P),
{
    let Some(ov) = ov else { return };
    if let Some(enabled) = ov.enabled {
        base.enabled = enabled;
    }
    if let Some(amount) = ov.amount {
        base.amount = amount;
    }
    if let Some(mode) = ov.seed_mode {
        base.seed_mode = Some(mode);
    }
    merge_params(&mut base.params, &ov.params);
}

/// Resolves a base profile plus optional overrides into a complete profile.
///
/// The result always carries all five modules in canonical order; kinds
/// missing from the base are filled with identity-safe defaults. When the
/// base lists a kind twice, the first occurrence wins.
pub fn resolve_profile(base: &FilmProfile, overrides: Option<&ProfileOverrides>) -> FilmProfile {
    let mut modules: Vec<ModuleConfig> = ModuleKind::ORDER
        .iter()
        .map(|&kind| {
            base.module(kind)
                .cloned()
                .unwrap_or_else(|| ModuleConfig::default_for(kind))
        })
        .collect();

    if let Some(ov) = overrides {
        for m in &mut modules {
            match m.kind() {
                ModuleKind::ColorScience => merge_module(m, &ov.color_science, |p, patch| {
                    if let ModuleParams::ColorScience(p) = p {
                        *p = p.merged(patch);
                    }
                }),
                ModuleKind::Tone => merge_module(m, &ov.tone, |p, patch| {
                    if let ModuleParams::Tone(p) = p {
                        *p = p.merged(patch);
                    }
                }),
                ModuleKind::Scan => merge_module(m, &ov.scan, |p, patch| {
                    if let ModuleParams::Scan(p) = p {
                        *p = p.merged(patch);
                    }
                }),
                ModuleKind::Grain => merge_module(m, &ov.grain, |p, patch| {
                    if let ModuleParams::Grain(p) = p {
                        *p = p.merged(patch);
                    }
                }),
                ModuleKind::Defects => merge_module(m, &ov.defects, |p, patch| {
                    if let ModuleParams::Defects(p) = p {
                        *p = p.merged(patch);
                    }
                }),
            }
        }
    }

    FilmProfile {
        id: base.id.clone(),
        version: base.version,
        name: base.name.clone(),
        modules,
    }
}
