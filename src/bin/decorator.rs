//! Decorator: compression over encryption over a plain file.
//!
//! Run with: cargo run --bin decorator

use anyhow::{Context, Result};
use pattern_playground::config::PlaygroundConfig;
use pattern_playground::console::banner;
use pattern_playground::logging;
use pattern_playground::structural::decorator::{run_demo, SALARY_RECORDS};
use std::io;

fn main() -> Result<()> {
    logging::init_demo_logger();
    let config = PlaygroundConfig::load().context("failed to load playground config")?;
    println!("{}\n", banner("Decorator"));

    let path = &config.decorator.output;
    run_demo(
        SALARY_RECORDS,
        path,
        config.decorator.compression_level,
        &mut io::stdout().lock(),
    )
    .with_context(|| format!("round trip through {} failed", path.display()))?;
    Ok(())
}
