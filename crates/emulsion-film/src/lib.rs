//! Analog film simulation: profile model, module pipeline, split-toning
//! grade, and histogram analysis.
//!
//! The crate is organized around [`FilmProfile`], an ordered list of module
//! configurations over a closed kind set. [`pipeline::apply`] runs a
//! resolved profile over an RGBA8 buffer in place; [`grade::apply`] is a
//! separate split-toning pass; [`histogram::analyze`] derives display
//! statistics from a finished render.
//!
//! All stochastic texture is deterministic: module seeds derive from a
//! [`seed::SeedContext`] and never from global RNG state, so the same
//! asset and profile always produce the same bytes.

pub mod error;
pub mod grade;
pub mod histogram;
pub mod modules;
pub mod pipeline;
pub mod profile;
pub mod seed;
pub mod stocks;

pub use error::{FilmError, FilmResult};
pub use grade::GradingParams;
pub use histogram::{Histogram, HistogramAnalysis, HistogramMode};
pub use profile::{
    FilmProfile, ModuleConfig, ModuleKind, ModuleParams, ProfileOverrides, resolve_profile,
};
pub use seed::{SeedContext, SeedMode};
