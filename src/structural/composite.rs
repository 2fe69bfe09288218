//! Composite
//!
//! Leaf shapes and groups of shapes share one `Shape` trait, so the editor
//! can move, hit-test, select and paint a whole tree as if it were a single
//! shape.

use crate::error::Result;
use crate::raster::{Canvas, Color, RasterCanvas, Stroke, BLACK, LIGHT_GRAY, WHITE};
use itertools::Itertools;
use std::path::Path;

pub trait Shape {
    fn x(&self) -> i32;
    fn y(&self) -> i32;
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn move_by(&mut self, dx: i32, dy: i32);

    /// Strictly inside the bounding box; edges do not count.
    fn is_inside_bounds(&self, x: i32, y: i32) -> bool {
        x > self.x() && x < self.x() + self.width() && y > self.y() && y < self.y() + self.height()
    }

    fn select(&mut self);
    fn unselect(&mut self);
    fn is_selected(&self) -> bool;
    fn paint(&self, canvas: &mut dyn Canvas);
}

/// Position, colour and selection flag common to the leaf shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ShapeBase {
    x: i32,
    y: i32,
    color: Color,
    selected: bool,
}

impl ShapeBase {
    fn new(x: i32, y: i32, color: Color) -> Self {
        Self {
            x,
            y,
            color,
            selected: false,
        }
    }

    fn apply_style(&self, canvas: &mut dyn Canvas) {
        if self.selected {
            enable_selection_style(canvas);
        } else {
            canvas.set_color(self.color);
            canvas.set_stroke(Stroke::Solid);
        }
    }
}

fn enable_selection_style(canvas: &mut dyn Canvas) {
    canvas.set_color(LIGHT_GRAY);
    canvas.set_stroke(Stroke::Dashed);
}

macro_rules! leaf_shape_common {
    () => {
        fn x(&self) -> i32 {
            self.base.x
        }

        fn y(&self) -> i32 {
            self.base.y
        }

        fn move_by(&mut self, dx: i32, dy: i32) {
            self.base.x += dx;
            self.base.y += dy;
        }

        fn select(&mut self) {
            self.base.selected = true;
        }

        fn unselect(&mut self) {
            self.base.selected = false;
        }

        fn is_selected(&self) -> bool {
            self.base.selected
        }
    };
}

const DOT_SIZE: i32 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dot {
    base: ShapeBase,
}

impl Dot {
    pub fn new(x: i32, y: i32, color: Color) -> Self {
        Self {
            base: ShapeBase::new(x, y, color),
        }
    }
}

impl Shape for Dot {
    leaf_shape_common!();

    fn width(&self) -> i32 {
        DOT_SIZE
    }

    fn height(&self) -> i32 {
        DOT_SIZE
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        self.base.apply_style(canvas);
        canvas.fill_rect(self.base.x - 1, self.base.y - 1, DOT_SIZE, DOT_SIZE);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circle {
    base: ShapeBase,
    radius: i32,
}

impl Circle {
    pub fn new(x: i32, y: i32, radius: i32, color: Color) -> Self {
        Self {
            base: ShapeBase::new(x, y, color),
            radius,
        }
    }
}

impl Shape for Circle {
    leaf_shape_common!();

    fn width(&self) -> i32 {
        self.radius * 2
    }

    fn height(&self) -> i32 {
        self.radius * 2
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        self.base.apply_style(canvas);
        canvas.draw_oval(self.base.x, self.base.y, self.width() - 1, self.height() - 1);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rectangle {
    base: ShapeBase,
    width: i32,
    height: i32,
}

impl Rectangle {
    pub fn new(x: i32, y: i32, width: i32, height: i32, color: Color) -> Self {
        Self {
            base: ShapeBase::new(x, y, color),
            width,
            height,
        }
    }
}

impl Shape for Rectangle {
    leaf_shape_common!();

    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        self.base.apply_style(canvas);
        canvas.draw_rect(self.base.x, self.base.y, self.width - 1, self.height - 1);
    }
}

/// A group of shapes whose bounds are the union of its children's.
#[derive(Default)]
pub struct CompoundShape {
    children: Vec<Box<dyn Shape>>,
    selected: bool,
}

impl CompoundShape {
    pub fn new(children: Vec<Box<dyn Shape>>) -> Self {
        Self {
            children,
            selected: false,
        }
    }

    pub fn add(&mut self, child: Box<dyn Shape>) {
        self.children.push(child);
    }

    pub fn extend(&mut self, children: impl IntoIterator<Item = Box<dyn Shape>>) {
        self.children.extend(children);
    }

    /// Removes and returns the child at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<Box<dyn Shape>> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn children(&self) -> &[Box<dyn Shape>] {
        &self.children
    }

    /// Selects the first child hit by the point. Returns whether one was hit.
    pub fn select_child_at(&mut self, x: i32, y: i32) -> bool {
        match self.children.iter_mut().find(|child| child.is_inside_bounds(x, y)) {
            Some(child) => {
                child.select();
                true
            }
            None => false,
        }
    }

    /// Leftmost and rightmost edge over all children, `(0, 0)` when empty.
    fn horizontal_span(&self) -> (i32, i32) {
        self.children
            .iter()
            .flat_map(|c| [c.x(), c.x() + c.width()])
            .minmax()
            .into_option()
            .unwrap_or((0, 0))
    }

    fn vertical_span(&self) -> (i32, i32) {
        self.children
            .iter()
            .flat_map(|c| [c.y(), c.y() + c.height()])
            .minmax()
            .into_option()
            .unwrap_or((0, 0))
    }
}

impl Shape for CompoundShape {
    fn x(&self) -> i32 {
        self.horizontal_span().0
    }

    fn y(&self) -> i32 {
        self.vertical_span().0
    }

    fn width(&self) -> i32 {
        let (left, right) = self.horizontal_span();
        right - left
    }

    fn height(&self) -> i32 {
        let (top, bottom) = self.vertical_span();
        bottom - top
    }

    fn move_by(&mut self, dx: i32, dy: i32) {
        for child in &mut self.children {
            child.move_by(dx, dy);
        }
    }

    fn is_inside_bounds(&self, x: i32, y: i32) -> bool {
        self.children.iter().any(|child| child.is_inside_bounds(x, y))
    }

    fn select(&mut self) {
        self.selected = true;
    }

    fn unselect(&mut self) {
        self.selected = false;
        for child in &mut self.children {
            child.unselect();
        }
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if self.selected {
            enable_selection_style(canvas);
            canvas.draw_rect(self.x() - 1, self.y() - 1, self.width() + 1, self.height() + 1);
            canvas.set_color(BLACK);
            canvas.set_stroke(Stroke::Solid);
        }
        for child in &self.children {
            child.paint(canvas);
        }
    }
}

const PADDING: i32 = 10;

#[derive(Default)]
pub struct ImageEditor {
    all_shapes: CompoundShape,
}

impl ImageEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever was loaded before.
    pub fn load_shapes(&mut self, shapes: Vec<Box<dyn Shape>>) {
        self.all_shapes.clear();
        self.all_shapes.extend(shapes);
        tracing::debug!(
            shapes = self.all_shapes.children().len(),
            width = self.canvas_width(),
            height = self.canvas_height(),
            "shapes loaded"
        );
    }

    pub fn shapes(&self) -> &CompoundShape {
        &self.all_shapes
    }

    /// A mouse press: clear the selection, then select the top-level shape
    /// under the cursor.
    pub fn click(&mut self, x: i32, y: i32) -> bool {
        self.all_shapes.unselect();
        let hit = self.all_shapes.select_child_at(x, y);
        tracing::info!(x, y, hit, "click");
        hit
    }

    pub fn canvas_width(&self) -> i32 {
        self.all_shapes.x() + self.all_shapes.width() + PADDING
    }

    pub fn canvas_height(&self) -> i32 {
        self.all_shapes.y() + self.all_shapes.height() + PADDING
    }

    pub fn render(&self) -> RasterCanvas {
        let mut canvas = RasterCanvas::new(
            self.canvas_width().max(1) as u32,
            self.canvas_height().max(1) as u32,
            WHITE,
        );
        self.all_shapes.paint(&mut canvas);
        canvas
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.render().save_png(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{BLUE, GREEN, RED};

    fn demo_shapes() -> Vec<Box<dyn Shape>> {
        vec![
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
        ]
    }

    #[test]
    fn test_compound_bounds_are_union_of_children() {
        let group = CompoundShape::new(vec![
            Box::new(Rectangle::new(250, 250, 100, 100, GREEN)),
            Box::new(Dot::new(240, 240, GREEN)),
            Box::new(Dot::new(360, 360, GREEN)),
        ]);
        assert_eq!((group.x(), group.y()), (240, 240));
        assert_eq!((group.width(), group.height()), (123, 123));
    }

    #[test]
    fn test_empty_compound_has_zero_bounds() {
        let group = CompoundShape::default();
        assert_eq!((group.x(), group.y(), group.width(), group.height()), (0, 0, 0, 0));
        assert!(!group.is_inside_bounds(0, 0));
    }

    #[test]
    fn test_bounds_check_is_strict() {
        let rect = Rectangle::new(0, 0, 10, 10, BLACK);
        assert!(rect.is_inside_bounds(5, 5));
        assert!(!rect.is_inside_bounds(0, 5));
        assert!(!rect.is_inside_bounds(10, 5));
    }

    #[test]
    fn test_move_recurses_into_children() {
        let mut group = CompoundShape::new(vec![
            Box::new(Dot::new(1, 1, RED)),
            Box::new(CompoundShape::new(vec![Box::new(Dot::new(5, 5, RED))])),
        ]);
        group.move_by(10, 20);
        assert_eq!((group.x(), group.y()), (11, 21));
        assert_eq!(group.children()[1].x(), 15);
    }

    #[test]
    fn test_click_selects_first_hit_and_clears_previous() {
        let mut editor = ImageEditor::new();
        editor.load_shapes(demo_shapes());

        assert!(editor.click(20, 20));
        assert!(editor.shapes().children()[0].is_selected());

        assert!(editor.click(300, 300));
        assert!(!editor.shapes().children()[0].is_selected());
        assert!(editor.shapes().children()[2].is_selected());

        assert!(!editor.click(5, 400));
        assert!(editor.shapes().children().iter().all(|s| !s.is_selected()));
    }

    #[test]
    fn test_render_size_includes_padding() {
        let mut editor = ImageEditor::new();
        editor.load_shapes(demo_shapes());
        let canvas = editor.render();
        // Shapes span 10..363 on both axes.
        assert_eq!((canvas.width(), canvas.height()), (373, 373));
    }

    #[test]
    fn test_selected_group_gets_dashed_frame() {
        let mut editor = ImageEditor::new();
        editor.load_shapes(demo_shapes());
        editor.click(300, 300);
        let canvas = editor.render();

        // Frame runs one pixel outside the group's bounds, 2 px on, 2 px off.
        assert_eq!(canvas.pixel(243, 239), Some(LIGHT_GRAY));
        assert_eq!(canvas.pixel(245, 239), Some(WHITE));
        assert_eq!(canvas.pixel(300, 250), Some(GREEN));
    }

    #[test]
    fn test_remove_child() {
        let mut group = CompoundShape::new(vec![Box::new(Dot::new(1, 1, RED))]);
        assert!(group.remove(3).is_none());
        assert!(group.remove(0).is_some());
        assert!(group.children().is_empty());
    }
}
