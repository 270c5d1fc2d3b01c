//! Histogram analysis command

use crate::HistogramArgs;
use anyhow::{Context, Result};
use emulsion_core::Raster;
use emulsion_film::histogram;

pub fn run(args: HistogramArgs) -> Result<()> {
    let (buf, width, height) = super::load_rgba(&args.input)?;
    let view = Raster::new(&buf, width, height)
        .context("decoded image has an unusable buffer shape")?;

    let mut hist = histogram::analyze(&view);
    if args.force_monochrome {
        hist = hist.force_monochrome();
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&hist)
    } else {
        serde_json::to_string(&hist)
    }
    .context("failed to serialize histogram")?;
    println!("{json}");
    Ok(())
}
