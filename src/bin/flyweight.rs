//! Flyweight: a million trees share two tree types.
//!
//! Run with: cargo run --release --bin flyweight

use anyhow::{Context, Result};
use pattern_playground::config::PlaygroundConfig;
use pattern_playground::console::banner;
use pattern_playground::logging;
use pattern_playground::structural::flyweight::{write_memory_report, Forest};
use std::io;

fn main() -> Result<()> {
    logging::init_demo_logger();
    let config = PlaygroundConfig::load().context("failed to load playground config")?;
    let settings = &config.flyweight;
    println!("{}\n", banner("Flyweight"));

    let mut forest = Forest::new();
    forest.plant_random(&mut rand::thread_rng(), settings.trees, settings.canvas_size);

    if settings.render {
        forest
            .save_png(settings.canvas_size, &settings.output)
            .with_context(|| format!("failed to write {}", settings.output.display()))?;
        println!("Forest written to {}\n", settings.output.display());
    }

    write_memory_report(
        forest.trees().len() as u64,
        forest.type_count() as u64,
        &mut io::stdout().lock(),
    )?;
    Ok(())
}
