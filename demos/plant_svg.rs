//! Grows every preset and writes one SVG per plant.
//!
//! cargo run --example plant_svg -- [output-dir] [params.ron]
use std::path::PathBuf;

use anyhow::{Context, Result};
use aoer_plants::prelude::*;

fn main() -> Result<()> {
    env_logger::init();
    let mut args = std::env::args().skip(1);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "plants".to_string()));
    let params = match args.next() {
        Some(path) => ExpansionParameters::from_file(&PathBuf::from(&path))
            .with_context(|| format!("Loading parameters from {path}"))?,
        None => ExpansionParameters::default(),
    };
    std::fs::create_dir_all(&out_dir)?;

    let surface = Surface::new(1000.0, 1000.0);
    for (index, preset) in presets().into_iter().enumerate() {
        let plant = Plant::from_preset(index, params.clone())?;
        let growth = plant.grow()?;
        println!(
            "{}: {} symbols after {} generations, branch length {:.3}",
            preset.name,
            growth.sentence.chars().count(),
            growth.generations,
            growth.branch_length
        );
        plant.save_svg(&out_dir.join(format!("{}.svg", preset.name)), &surface)?;
    }
    params.to_file(&out_dir.join("params.ron"))?;
    Ok(())
}
