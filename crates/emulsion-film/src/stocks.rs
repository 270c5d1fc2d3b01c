//! Built-in film stock profiles.
//!
//! A small set of looks expressed purely through the module parameter
//! model, used as CLI starting points and as realistic test fixtures.
//! Stock character (warmth, lifted blacks, shadow teal, grain weight)
//! follows the usual color-negative / slide / tungsten archetypes.

use crate::profile::{
    ColorScienceParams, FilmProfile, GrainParams, ModuleKind, ModuleParams, ScanParams, ToneParams,
};

fn stock(
    id: &str,
    name: &str,
    color: ColorScienceParams,
    tone: ToneParams,
    scan: ScanParams,
    grain: GrainParams,
) -> FilmProfile {
    let mut profile = FilmProfile::neutral(id, name);
    for module in &mut profile.modules {
        match module.kind() {
            ModuleKind::ColorScience => module.params = ModuleParams::ColorScience(color.clone()),
            ModuleKind::Tone => module.params = ModuleParams::Tone(tone.clone()),
            ModuleKind::Scan => module.params = ModuleParams::Scan(scan.clone()),
            ModuleKind::Grain => module.params = ModuleParams::Grain(grain.clone()),
            ModuleKind::Defects => {}
        }
    }
    profile
}

/// All built-in stocks. Defects stay disabled in every built-in; they are
/// an opt-in accent, not part of a stock's base look.
pub fn builtin() -> Vec<FilmProfile> {
    vec![
        stock(
            "classic-negative",
            "Classic Negative",
            ColorScienceParams {
                rgb_mix: [1.02, 1.0, 0.97],
                temperature_shift: 6.0,
                ..Default::default()
            },
            ToneParams {
                contrast: 8.0,
                blacks: 6.0,
                curve_shadows: -8.0,
                curve_highlights: -5.0,
                ..Default::default()
            },
            ScanParams {
                halation_amount: 12.0,
                vignette_amount: 10.0,
                ..Default::default()
            },
            GrainParams {
                amount: 30.0,
                size: 2.0,
                roughness: 55.0,
                color: 15.0,
                shadow_boost: 25.0,
            },
        ),
        stock(
            "warm-portrait",
            "Warm Portrait",
            ColorScienceParams {
                rgb_mix: [1.04, 1.0, 0.95],
                temperature_shift: 14.0,
                tint_shift: 3.0,
                ..Default::default()
            },
            ToneParams {
                contrast: -6.0,
                shadows: 10.0,
                blacks: 10.0,
                curve_highlights: -10.0,
                ..Default::default()
            },
            ScanParams {
                halation_amount: 18.0,
                halation_threshold: 0.7,
                scan_warmth: 15.0,
                ..Default::default()
            },
            GrainParams {
                amount: 22.0,
                size: 2.5,
                roughness: 45.0,
                color: 10.0,
                shadow_boost: 20.0,
            },
        ),
        stock(
            "vivid-slide",
            "Vivid Slide",
            ColorScienceParams {
                rgb_mix: [1.05, 1.0, 1.04],
                temperature_shift: -2.0,
                ..Default::default()
            },
            ToneParams {
                contrast: 18.0,
                whites: 8.0,
                blacks: -6.0,
                curve_darks: -6.0,
                ..Default::default()
            },
            ScanParams {
                bloom_amount: 10.0,
                bloom_threshold: 0.8,
                vignette_amount: 6.0,
                ..Default::default()
            },
            GrainParams {
                amount: 12.0,
                size: 1.5,
                roughness: 60.0,
                color: 8.0,
                shadow_boost: 10.0,
            },
        ),
        stock(
            "tungsten-night",
            "Tungsten Night",
            ColorScienceParams {
                rgb_mix: [0.98, 1.0, 1.05],
                temperature_shift: -18.0,
                tint_shift: -4.0,
                ..Default::default()
            },
            ToneParams {
                contrast: 10.0,
                shadows: -8.0,
                curve_shadows: -14.0,
                ..Default::default()
            },
            ScanParams {
                halation_amount: 25.0,
                halation_threshold: 0.65,
                vignette_amount: 18.0,
                ..Default::default()
            },
            GrainParams {
                amount: 40.0,
                size: 3.0,
                roughness: 70.0,
                color: 20.0,
                shadow_boost: 40.0,
            },
        ),
    ]
}

/// Looks up a built-in stock by id.
pub fn find(id: &str) -> Option<FilmProfile> {
    builtin().into_iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_fully_resolved() {
        for profile in builtin() {
            let kinds: Vec<ModuleKind> = profile.modules.iter().map(|m| m.kind()).collect();
            assert_eq!(kinds, ModuleKind::ORDER, "{}", profile.id);
            let defects = profile.module(ModuleKind::Defects).unwrap();
            assert!(!defects.enabled, "{} ships defects enabled", profile.id);
        }
    }

    #[test]
    fn ids_are_unique() {
        let stocks = builtin();
        for (i, a) in stocks.iter().enumerate() {
            for b in &stocks[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn find_matches_by_id() {
        assert!(find("warm-portrait").is_some());
        assert!(find("kodak-gold").is_none());
    }
}
