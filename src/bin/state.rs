//! State: a media player whose buttons depend on its current state.
//!
//! Run with: cargo run --bin state

use anyhow::{Context, Result};
use pattern_playground::behavioral::state::{run_player_session, Player};
use pattern_playground::console::{banner, Prompt};
use pattern_playground::logging;

fn main() -> Result<()> {
    logging::init_demo_logger();
    println!("{}\n", banner("State"));

    let mut player = Player::new();
    let mut prompt = Prompt::stdio();
    run_player_session(&mut player, &mut prompt).context("player session failed")?;
    Ok(())
}
