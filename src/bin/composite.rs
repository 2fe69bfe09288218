//! Composite: nested groups of shapes behave like single shapes.
//!
//! Run with: cargo run --bin composite
//! Writes the rendered scene (with the right-hand group selected) as PNG.

use anyhow::{Context, Result};
use pattern_playground::config::PlaygroundConfig;
use pattern_playground::console::banner;
use pattern_playground::logging;
use pattern_playground::raster::{BLUE, GREEN, RED};
use pattern_playground::structural::composite::{
    Circle, CompoundShape, Dot, ImageEditor, Rectangle, Shape,
};

fn main() -> Result<()> {
    logging::init_demo_logger();
    let config = PlaygroundConfig::load().context("failed to load playground config")?;
    println!("{}\n", banner("Composite"));

    let mut editor = ImageEditor::new();
    editor.load_shapes(vec![
        Box::new(Circle::new(10, 10, 10, BLUE)),
        Box::new(CompoundShape::new(vec![
            Box::new(Circle::new(110, 110, 50, RED)),
            Box::new(Dot::new(160, 160, RED)),
        ])),
        Box::new(CompoundShape::new(vec![
            Box::new(Rectangle::new(250, 250, 100, 100, GREEN)),
            Box::new(Dot::new(240, 240, GREEN)),
            Box::new(Dot::new(240, 360, GREEN)),
            Box::new(Dot::new(360, 360, GREEN)),
            Box::new(Dot::new(360, 240, GREEN)),
        ])),
    ]);

    let shapes = editor.shapes();
    println!(
        "Loaded {} shapes spanning ({}, {}) {}x{}",
        shapes.children().len(),
        shapes.x(),
        shapes.y(),
        shapes.width(),
        shapes.height()
    );

    let (x, y) = (300, 300);
    let hit = editor.click(x, y);
    println!("Click at ({x}, {y}) selected a shape: {hit}");

    editor
        .save_png(&config.composite.output)
        .with_context(|| format!("failed to write {}", config.composite.output.display()))?;
    println!(
        "Canvas {}x{} written to {}",
        editor.canvas_width(),
        editor.canvas_height(),
        config.composite.output.display()
    );
    Ok(())
}
