//! Pipeline orchestrator: fixed-order, in-place module execution.
//!
//! Modules run strictly in the order they appear in the resolved profile
//! (canonical order: colorScience, tone, scan, grain, defects), each
//! mutating the shared buffer in place. There are no intermediate copies;
//! later modules see the cumulative effect of earlier ones, and that
//! ordering is part of the output contract. Split toning ([`crate::grade`])
//! is a separate pass invoked by the caller.

use crate::error::FilmResult;
use crate::modules::{color_science, defects, grain, scan, tone};
use crate::profile::{FilmProfile, ModuleParams};
use crate::seed::SeedContext;
use emulsion_core::RasterMut;
use emulsion_lut::CubeLut;
use tracing::debug;

/// Applies a resolved profile to a raw RGBA8 buffer in place.
///
/// Fails only when the buffer shape is unusable (zero dimensions or too
/// few bytes). Out-of-range module parameters are clamped, and an
/// unresolvable LUT reference downgrades to "no LUT for this render".
pub fn apply(
    buffer: &mut [u8],
    width: u32,
    height: u32,
    profile: &FilmProfile,
    seeds: &SeedContext,
    lut: Option<&CubeLut>,
) -> FilmResult<()> {
    let mut raster = RasterMut::new(buffer, width, height)?;
    apply_raster(&mut raster, profile, seeds, lut);
    Ok(())
}

/// Applies a resolved profile to an existing raster view.
pub fn apply_raster(
    raster: &mut RasterMut<'_>,
    profile: &FilmProfile,
    seeds: &SeedContext,
    lut: Option<&CubeLut>,
) {
    for module in &profile.modules {
        let kind = module.kind();
        if !module.enabled {
            debug!(module = kind.as_str(), "module disabled, skipping");
            continue;
        }
        let amount = (module.amount / 100.0).clamp(0.0, 1.0);
        if amount <= 0.0 {
            debug!(module = kind.as_str(), "amount is zero, skipping");
            continue;
        }
        let mode = module.seed_mode.unwrap_or_else(|| kind.default_seed_mode());
        let seed = seeds.module_seed(kind, mode);
        debug!(module = kind.as_str(), amount, "applying module");

        match &module.params {
            ModuleParams::ColorScience(p) => {
                let resolved = resolve_lut(p.lut_asset_id.as_deref(), lut);
                color_science::apply(raster, p, amount, resolved);
            }
            ModuleParams::Tone(p) => tone::apply(raster, p, amount),
            ModuleParams::Scan(p) => scan::apply(raster, p, amount, seed),
            ModuleParams::Grain(p) => grain::apply(raster, p, amount, seed),
            ModuleParams::Defects(p) => defects::apply(raster, p, amount, seed),
        }
    }
}

/// Matches a module's LUT reference against the caller-resolved asset.
///
/// A module that names a LUT the caller did not supply proceeds without
/// the LUT blend; a module with no reference uses whatever the caller
/// resolved for the profile.
fn resolve_lut<'a>(wanted: Option<&str>, provided: Option<&'a CubeLut>) -> Option<&'a CubeLut> {
    match (wanted, provided) {
        (Some(id), Some(lut)) if lut.id == id => Some(lut),
        (Some(id), _) => {
            debug!(lut = id, "LUT not resolvable, skipping LUT blend");
            None
        }
        (None, lut) => lut,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ModuleConfig, ModuleKind, ToneParams};

    fn test_buffer() -> Vec<u8> {
        let mut buf = Vec::with_capacity(8 * 8 * 4);
        for i in 0..64u32 {
            let v = (i * 4) as u8;
            buf.extend_from_slice(&[v, v.wrapping_add(10), v / 2, 255]);
        }
        buf
    }

    fn profile_with_tone(exposure: f32) -> FilmProfile {
        let mut p = FilmProfile::neutral("t", "T");
        if let Some(m) = p.module_mut(ModuleKind::Tone) {
            if let ModuleParams::Tone(t) = &mut m.params {
                t.exposure = exposure;
            }
        }
        p
    }

    #[test]
    fn rejects_zero_dimensions() {
        let mut buf = vec![0u8; 16];
        let profile = FilmProfile::neutral("p", "P");
        let seeds = SeedContext::for_asset("a");
        assert!(apply(&mut buf, 0, 2, &profile, &seeds, None).is_err());
    }

    #[test]
    fn neutral_profile_changes_nothing() {
        let mut buf = test_buffer();
        let expected = buf.clone();
        let profile = FilmProfile::neutral("p", "P");
        let seeds = SeedContext::for_asset("a");
        apply(&mut buf, 8, 8, &profile, &seeds, None).unwrap();
        assert_eq!(buf, expected);
    }

    #[test]
    fn disabled_module_equals_zero_amount() {
        let seeds = SeedContext::for_asset("a");

        let mut disabled_out = test_buffer();
        let mut profile = profile_with_tone(1.5);
        profile.module_mut(ModuleKind::Tone).unwrap().enabled = false;
        apply(&mut disabled_out, 8, 8, &profile, &seeds, None).unwrap();

        let mut zeroed_out = test_buffer();
        let mut profile = profile_with_tone(1.5);
        profile.module_mut(ModuleKind::Tone).unwrap().amount = 0.0;
        apply(&mut zeroed_out, 8, 8, &profile, &seeds, None).unwrap();

        let mut removed_out = test_buffer();
        let mut profile = profile_with_tone(1.5);
        profile.modules.retain(|m| m.kind() != ModuleKind::Tone);
        apply(&mut removed_out, 8, 8, &profile, &seeds, None).unwrap();

        assert_eq!(disabled_out, zeroed_out);
        assert_eq!(disabled_out, removed_out);
    }

    #[test]
    fn enabled_tone_changes_pixels() {
        let mut buf = test_buffer();
        let expected = buf.clone();
        let profile = profile_with_tone(1.0);
        let seeds = SeedContext::for_asset("a");
        apply(&mut buf, 8, 8, &profile, &seeds, None).unwrap();
        assert_ne!(buf, expected);
    }

    #[test]
    fn mismatched_lut_reference_degrades_gracefully() {
        use crate::profile::ColorScienceParams;
        use emulsion_lut::CubeLut;

        let red = CubeLut::from_data("cube-aaaa", "Red", 2, vec![[1.0, 0.0, 0.0]; 8]).unwrap();
        let mut profile = FilmProfile::neutral("p", "P");
        if let Some(m) = profile.module_mut(ModuleKind::ColorScience) {
            m.params = ModuleParams::ColorScience(ColorScienceParams {
                lut_strength: 1.0,
                lut_asset_id: Some("cube-bbbb".into()),
                ..Default::default()
            });
        }
        let seeds = SeedContext::for_asset("a");
        let mut buf = test_buffer();
        let expected = buf.clone();
        apply(&mut buf, 8, 8, &profile, &seeds, Some(&red)).unwrap();
        // Wrong LUT id: module runs without the LUT blend, which here
        // means identity.
        assert_eq!(buf, expected);
    }

    #[test]
    fn module_list_order_is_execution_order() {
        // Grain-then-tone differs from tone-then-grain because tone
        // rescales the grain field. Both profiles share a config set.
        let seeds = SeedContext::for_asset("a");
        let mut grain_cfg = ModuleConfig::default_for(ModuleKind::Grain);
        if let ModuleParams::Grain(g) = &mut grain_cfg.params {
            g.amount = 80.0;
        }
        let mut tone_cfg = ModuleConfig::default_for(ModuleKind::Tone);
        if let ModuleParams::Tone(t) = &mut tone_cfg.params {
            t.exposure = 1.0;
        }

        let forward = FilmProfile {
            id: "f".into(),
            version: 1,
            name: "F".into(),
            modules: vec![tone_cfg.clone(), grain_cfg.clone()],
        };
        let reversed = FilmProfile {
            id: "r".into(),
            version: 1,
            name: "R".into(),
            modules: vec![grain_cfg, tone_cfg],
        };

        let mut a = test_buffer();
        let mut b = test_buffer();
        apply(&mut a, 8, 8, &forward, &seeds, None).unwrap();
        apply(&mut b, 8, 8, &reversed, &seeds, None).unwrap();
        assert_ne!(a, b);
    }
}
