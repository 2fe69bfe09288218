//! Bridge: remotes and devices vary independently.
//!
//! Run with: cargo run --bin bridge

use anyhow::Result;
use pattern_playground::console::banner;
use pattern_playground::logging;
use pattern_playground::structural::bridge::{test_device, Radio, Tv};
use std::io;

fn main() -> Result<()> {
    logging::init_demo_logger();
    println!("{}\n", banner("Bridge"));

    let mut out = io::stdout().lock();
    test_device(&mut Tv::default(), &mut out)?;
    test_device(&mut Radio::default(), &mut out)?;
    Ok(())
}
