//! LUT validation/inspection command

use crate::LutArgs;
use anyhow::{Context, Result};
use emulsion_lut::cube;
use tracing::info;

pub fn run(args: LutArgs) -> Result<()> {
    let lut = cube::read(&args.input)
        .with_context(|| format!("invalid LUT {}", args.input.display()))?;

    println!("id:      {}", lut.id);
    println!("title:   {}", lut.name);
    println!("size:    {0}x{0}x{0} ({1} entries)", lut.size, lut.data.len());
    println!(
        "domain:  [{}, {}, {}] .. [{}, {}, {}]",
        lut.domain_min[0],
        lut.domain_min[1],
        lut.domain_min[2],
        lut.domain_max[0],
        lut.domain_max[1],
        lut.domain_max[2],
    );

    if let Some(out) = &args.emit {
        cube::write_file(out, &lut)
            .with_context(|| format!("failed to write {}", out.display()))?;
        info!(output = %out.display(), "rewrote LUT in canonical form");
    }
    Ok(())
}
