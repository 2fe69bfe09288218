//! Flyweight
//!
//! A million trees share a handful of `TreeType`s. Each `Tree` keeps only
//! its coordinates plus a reference-counted handle to the shared type, and
//! the factory hands out one handle per distinct type name.

use crate::cache::MemoCache;
use crate::error::Result;
use crate::raster::{Canvas, Color, RasterCanvas, BLACK, GREEN, ORANGE, WHITE};
use rand::Rng;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

/// The shared, intrinsic state.
#[derive(Debug, PartialEq, Eq)]
pub struct TreeType {
    name: String,
    color: Color,
    texture: String,
}

impl TreeType {
    pub fn new(name: impl Into<String>, color: Color, texture: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color,
            texture: texture.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn texture(&self) -> &str {
        &self.texture
    }

    /// Trunk then crown, anchored at the trunk's top centre.
    pub fn draw(&self, canvas: &mut dyn Canvas, x: i32, y: i32) {
        canvas.set_color(BLACK);
        canvas.fill_rect(x - 1, y, 3, 5);
        canvas.set_color(self.color);
        canvas.fill_oval(x - 5, y - 10, 10, 10);
    }
}

/// Interns tree types by name. The first request for a name decides its
/// colour and texture; later requests get the same handle back.
pub struct TreeFactory {
    types: MemoCache<String, Rc<TreeType>>,
}

impl Default for TreeFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeFactory {
    pub fn new() -> Self {
        Self {
            types: MemoCache::new("tree-types"),
        }
    }

    pub fn tree_type(&mut self, name: &str, color: Color, texture: &str) -> Rc<TreeType> {
        let kind = self
            .types
            .get_or_insert_with(name.to_string(), |name| Rc::new(TreeType::new(name.as_str(), color, texture)));
        Rc::clone(kind)
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }
}

/// The extrinsic state: just a position and a shared type.
#[derive(Debug, Clone)]
pub struct Tree {
    pub x: i32,
    pub y: i32,
    pub kind: Rc<TreeType>,
}

impl Tree {
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.kind.draw(canvas, self.x, self.y);
    }
}

pub const SUMMER_OAK: (&str, Color, &str) = ("Summer Oak", GREEN, "Oak texture stub");
pub const AUTUMN_OAK: (&str, Color, &str) = ("Autumn Oak", ORANGE, "Autumn Oak texture stub");

#[derive(Default)]
pub struct Forest {
    factory: TreeFactory,
    trees: Vec<Tree>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plant_tree(&mut self, x: i32, y: i32, name: &str, color: Color, texture: &str) {
        let kind = self.factory.tree_type(name, color, texture);
        self.trees.push(Tree { x, y, kind });
    }

    /// Plants `count` trees alternating summer and autumn oaks at random
    /// spots inside a `canvas_size` square.
    pub fn plant_random<R: Rng>(&mut self, rng: &mut R, count: u32, canvas_size: u32) {
        let size = canvas_size.max(1) as i32;
        self.trees.reserve(count as usize);
        for i in 0..count {
            let (name, color, texture) = if i % 2 == 0 { SUMMER_OAK } else { AUTUMN_OAK };
            let (x, y) = (rng.gen_range(0..size), rng.gen_range(0..size));
            self.plant_tree(x, y, name, color, texture);
        }
        tracing::info!(trees = self.trees.len(), types = self.type_count(), "forest planted");
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn type_count(&self) -> usize {
        self.factory.type_count()
    }

    pub fn render(&self, canvas_size: u32) -> RasterCanvas {
        let mut canvas = RasterCanvas::new(canvas_size, canvas_size, WHITE);
        for tree in &self.trees {
            tree.draw(&mut canvas);
        }
        canvas
    }

    pub fn save_png(&self, canvas_size: u32, path: &Path) -> Result<()> {
        self.render(canvas_size).save_png(path)
    }
}

const TREE_BYTES: u64 = 8;
const TREE_TYPE_BYTES: u64 = 30;
const MB: u64 = 1024 * 1024;

/// Prints the estimated memory saving, truncating to whole megabytes.
pub fn write_memory_report(trees: u64, tree_types: u64, out: &mut dyn Write) -> Result<()> {
    let shared = (trees * TREE_BYTES + tree_types * TREE_TYPE_BYTES) / MB;
    let unshared = trees * (TREE_BYTES + TREE_TYPE_BYTES) / MB;

    writeln!(out, "{trees} trees drawn")?;
    writeln!(out, "---------------------")?;
    writeln!(out, "Memory usage:")?;
    writeln!(out, "Tree size ({TREE_BYTES} bytes) * {trees}")?;
    writeln!(out, "+ TreeTypes size (~{TREE_TYPE_BYTES} bytes) * {tree_types}")?;
    writeln!(out, "---------------------")?;
    writeln!(out, "Total: {shared}MB (instead of {unshared}MB)")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_same_name_shares_one_type() {
        let mut factory = TreeFactory::new();
        let a = factory.tree_type("Summer Oak", GREEN, "stub");
        let b = factory.tree_type("Summer Oak", ORANGE, "other");
        let c = factory.tree_type("Autumn Oak", ORANGE, "stub");

        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(b.color(), GREEN);
        assert!(!Rc::ptr_eq(&a, &c));
        assert_eq!(factory.type_count(), 2);
    }

    #[test]
    fn test_random_forest_uses_two_types() {
        let mut forest = Forest::new();
        let mut rng = StdRng::seed_from_u64(7);
        forest.plant_random(&mut rng, 1_000, 50);

        assert_eq!(forest.trees().len(), 1_000);
        assert_eq!(forest.type_count(), 2);
        assert!(forest.trees().iter().all(|t| (0..50).contains(&t.x) && (0..50).contains(&t.y)));
        // Forest's handles plus the one held by the factory.
        assert_eq!(Rc::strong_count(&forest.trees()[0].kind), 501);
    }

    #[test]
    fn test_render_draws_trunk_and_crown() {
        let mut forest = Forest::new();
        forest.plant_tree(20, 20, "Summer Oak", GREEN, "stub");
        let canvas = forest.render(40);

        assert_eq!(canvas.pixel(20, 22), Some(BLACK));
        assert_eq!(canvas.pixel(20, 15), Some(GREEN));
        assert_eq!(canvas.pixel(0, 0), Some(WHITE));
    }

    #[test]
    fn test_memory_report_for_a_million_trees() {
        let mut out = Vec::new();
        write_memory_report(1_000_000, 2, &mut out).unwrap();
        let report = String::from_utf8(out).unwrap();

        assert!(report.starts_with("1000000 trees drawn\n"));
        assert!(report.contains("Tree size (8 bytes) * 1000000\n"));
        assert!(report.contains("+ TreeTypes size (~30 bytes) * 2\n"));
        assert!(report.ends_with("Total: 7MB (instead of 36MB)\n"));
    }
}
