//! Observer: listeners react to an editor opening and saving files.
//!
//! Run with: cargo run --bin observer

use anyhow::{Context, Result};
use pattern_playground::behavioral::observer::{
    Editor, EmailNotificationListener, LogOpenListener, OPEN, SAVE,
};
use pattern_playground::console::banner;
use pattern_playground::logging;
use std::io;

fn main() -> Result<()> {
    logging::init_demo_logger();
    println!("{}\n", banner("Observer"));

    let mut editor = Editor::new();
    editor
        .events
        .subscribe(OPEN, LogOpenListener::new("/path/to/log/file.txt"))?;
    editor
        .events
        .subscribe(SAVE, EmailNotificationListener::new("admin@example.com"))?;

    let mut out = io::stdout().lock();
    editor.open_file("test.txt", &mut out).context("open failed")?;
    editor.save_file(&mut out).context("save failed")?;
    Ok(())
}
