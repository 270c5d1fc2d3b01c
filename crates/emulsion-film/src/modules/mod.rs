//! The five film-simulation modules.
//!
//! Each module is a pure per-pixel transform over a borrowed raster,
//! parameterized by its record from the resolved profile. Modules clamp
//! their numeric controls to the declared ranges before use rather than
//! failing; a module's whole effect is blended against the input pixel by
//! the profile-level `amount`, so `amount = 0` is exactly a no-op.

pub mod color_science;
pub mod defects;
pub mod grain;
pub mod scan;
pub mod tone;

/// Scales a 0–100 control into [0, 1], clamping out-of-range input.
#[inline]
pub(crate) fn percent(v: f32) -> f32 {
    (v / 100.0).clamp(0.0, 1.0)
}

/// Scales a -100–100 control into [-1, 1], clamping out-of-range input.
#[inline]
pub(crate) fn signed_percent(v: f32) -> f32 {
    (v / 100.0).clamp(-1.0, 1.0)
}
