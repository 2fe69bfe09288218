//! Command: copy, cut, paste and undo on a headless text area.
//!
//! Run with: cargo run --bin command

use anyhow::{Context, Result};
use pattern_playground::behavioral::command::{run_editor_session, Editor};
use pattern_playground::console::{banner, Prompt};
use pattern_playground::logging;

fn main() -> Result<()> {
    logging::init_demo_logger();
    println!("{}\n", banner("Command"));

    let mut editor = Editor::new("");
    let mut prompt = Prompt::stdio();
    run_editor_session(&mut editor, &mut prompt).context("editor session failed")?;
    Ok(())
}
