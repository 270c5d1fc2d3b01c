//! Profile application command

use crate::ApplyArgs;
use anyhow::{Context, Result, bail};
use emulsion_core::RasterMut;
use emulsion_film::{
    FilmProfile, GradingParams, ProfileOverrides, SeedContext, grade, pipeline, resolve_profile,
    stocks,
};
use emulsion_lut::{CubeLut, cube};
use tracing::info;

pub fn run(args: ApplyArgs) -> Result<()> {
    let base = load_base_profile(&args)?;
    let overrides: Option<ProfileOverrides> = args
        .overrides
        .as_deref()
        .map(super::read_json)
        .transpose()?;
    let profile = resolve_profile(&base, overrides.as_ref());

    let lut: Option<CubeLut> = args
        .lut
        .as_deref()
        .map(|path| {
            cube::read(path).with_context(|| format!("failed to load LUT {}", path.display()))
        })
        .transpose()?;
    if let Some(lut) = &lut {
        info!(id = %lut.id, size = lut.size, "loaded LUT");
    }

    let seed_key = match &args.seed_key {
        Some(key) => key.clone(),
        None => args
            .input
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_owned)
            .unwrap_or_default(),
    };
    let seeds = SeedContext {
        seed_key,
        seed_salt: args.seed_salt,
        render_seed: args.render_seed,
        export_seed: args.export_seed,
    };

    let (mut buf, width, height) = super::load_rgba(&args.input)?;
    info!(profile = %profile.id, width, height, "rendering");
    pipeline::apply(&mut buf, width, height, &profile, &seeds, lut.as_ref())?;

    if let Some(grade_path) = &args.grade {
        let params: GradingParams = super::read_json(grade_path)?;
        let mut raster = RasterMut::new(&mut buf, width, height)?;
        grade::apply(&mut raster, &params);
    }

    super::save_rgba(&args.output, buf, width, height)?;
    info!(output = %args.output.display(), "done");
    Ok(())
}

fn load_base_profile(args: &ApplyArgs) -> Result<FilmProfile> {
    match (&args.stock, &args.profile) {
        (Some(id), _) => stocks::find(id)
            .with_context(|| format!("unknown stock '{id}' (see `emulsion stocks`)")),
        (None, Some(path)) => super::read_json(path),
        (None, None) => bail!("either --profile or --stock is required"),
    }
}
