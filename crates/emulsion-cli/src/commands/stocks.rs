//! Built-in stock listing command

use crate::StocksArgs;
use anyhow::{Context, Result};
use emulsion_film::stocks;

pub fn run(args: StocksArgs) -> Result<()> {
    let all = stocks::builtin();
    if args.json {
        let json = serde_json::to_string_pretty(&all).context("failed to serialize stocks")?;
        println!("{json}");
        return Ok(());
    }

    for stock in &all {
        println!("{:<20} {}", stock.id, stock.name);
    }
    Ok(())
}
