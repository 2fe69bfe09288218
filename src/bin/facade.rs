//! Facade: one call drives the whole video conversion subsystem.
//!
//! Run with: cargo run --bin facade

use anyhow::{Context, Result};
use pattern_playground::console::banner;
use pattern_playground::logging;
use pattern_playground::structural::facade::VideoConversionFacade;
use std::io;

fn main() -> Result<()> {
    logging::init_demo_logger();
    println!("{}\n", banner("Facade"));

    let converter = VideoConversionFacade::new();
    let mp4_video = converter
        .convert_video("youtubevideo.ogg", "mp4", &mut io::stdout().lock())
        .context("conversion failed")?;
    println!("Result: {}", mp4_video.display());
    Ok(())
}
