//! A tiny drawing surface standing in for a GUI canvas.
//!
//! Composite and Flyweight paint through the [`Canvas`] trait; the demos
//! render onto an [`image::RgbImage`] and save it as PNG.

use crate::error::Result;
use image::{Rgb, RgbImage};
use std::fs;
use std::path::Path;

pub type Color = Rgb<u8>;

pub const BLACK: Color = Rgb([0, 0, 0]);
pub const WHITE: Color = Rgb([255, 255, 255]);
pub const LIGHT_GRAY: Color = Rgb([192, 192, 192]);
pub const RED: Color = Rgb([255, 0, 0]);
pub const GREEN: Color = Rgb([0, 255, 0]);
pub const BLUE: Color = Rgb([0, 0, 255]);
pub const ORANGE: Color = Rgb([255, 200, 0]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    Solid,
    /// Alternating 2 px on, 2 px off.
    Dashed,
}

pub trait Canvas {
    fn set_color(&mut self, color: Color);
    fn set_stroke(&mut self, stroke: Stroke);
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32);
    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32);
    fn fill_oval(&mut self, x: i32, y: i32, width: i32, height: i32);
    fn draw_oval(&mut self, x: i32, y: i32, width: i32, height: i32);
}

pub struct RasterCanvas {
    image: RgbImage,
    color: Color,
    stroke: Stroke,
    dash_counter: u32,
}

impl RasterCanvas {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            image: RgbImage::from_pixel(width.max(1), height.max(1), background),
            color: BLACK,
            stroke: Stroke::Solid,
            dash_counter: 0,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.image.width() && y < self.image.height() {
            Some(*self.image.get_pixel(x, y))
        } else {
            None
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Saves as PNG, creating parent directories as needed.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        self.image.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    fn put(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x < self.image.width() && y < self.image.height() {
            self.image.put_pixel(x, y, self.color);
        }
    }

    fn stroke_point(&mut self, x: i32, y: i32) {
        let visible = match self.stroke {
            Stroke::Solid => true,
            Stroke::Dashed => (self.dash_counter / 2) % 2 == 0,
        };
        self.dash_counter = self.dash_counter.wrapping_add(1);
        if visible {
            self.put(x, y);
        }
    }

    /// Half-extent of the ellipse inscribed in the box, evaluated at `dy`
    /// rows from its centre.
    fn half_span(rx: f64, ry: f64, dy: f64) -> f64 {
        if ry <= 0.0 {
            return rx;
        }
        let t = 1.0 - (dy * dy) / (ry * ry);
        if t <= 0.0 {
            0.0
        } else {
            rx * t.sqrt()
        }
    }
}

impl Canvas for RasterCanvas {
    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn set_stroke(&mut self, stroke: Stroke) {
        self.stroke = stroke;
        self.dash_counter = 0;
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        for py in y..y + height {
            for px in x..x + width {
                self.put(px, py);
            }
        }
    }

    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let (right, bottom) = (x + width, y + height);
        for px in x..=right {
            self.stroke_point(px, y);
        }
        for py in y..=bottom {
            self.stroke_point(right, py);
        }
        for px in (x..=right).rev() {
            self.stroke_point(px, bottom);
        }
        for py in (y..=bottom).rev() {
            self.stroke_point(x, py);
        }
    }

    fn fill_oval(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let (rx, ry) = (f64::from(width) / 2.0, f64::from(height) / 2.0);
        let (cx, cy) = (f64::from(x) + rx, f64::from(y) + ry);
        for py in y..y + height {
            let span = Self::half_span(rx, ry, f64::from(py) + 0.5 - cy);
            let from = (cx - span).round() as i32;
            let to = (cx + span).round() as i32;
            for px in from..to {
                self.put(px, py);
            }
        }
    }

    fn draw_oval(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let (rx, ry) = (f64::from(width) / 2.0, f64::from(height) / 2.0);
        let (cx, cy) = (f64::from(x) + rx, f64::from(y) + ry);
        // Rows and columns are both scanned so steep parts stay connected.
        for py in y..=y + height {
            let span = Self::half_span(rx, ry, f64::from(py) - cy);
            self.stroke_point((cx - span).round() as i32, py);
            self.stroke_point((cx + span).round() as i32, py);
        }
        for px in x..=x + width {
            let span = Self::half_span(ry, rx, f64::from(px) - cx);
            self.stroke_point(px, (cy - span).round() as i32);
            self.stroke_point(px, (cy + span).round() as i32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rect_clips_to_image() {
        let mut canvas = RasterCanvas::new(4, 4, WHITE);
        canvas.set_color(RED);
        canvas.fill_rect(-1, -1, 3, 3);

        assert_eq!(canvas.pixel(0, 0), Some(RED));
        assert_eq!(canvas.pixel(1, 1), Some(RED));
        assert_eq!(canvas.pixel(2, 2), Some(WHITE));
        assert_eq!(canvas.pixel(9, 9), None);
    }

    #[test]
    fn test_draw_rect_leaves_interior_untouched() {
        let mut canvas = RasterCanvas::new(10, 10, WHITE);
        canvas.set_color(BLUE);
        canvas.draw_rect(1, 1, 5, 5);

        assert_eq!(canvas.pixel(1, 1), Some(BLUE));
        assert_eq!(canvas.pixel(6, 6), Some(BLUE));
        assert_eq!(canvas.pixel(3, 3), Some(WHITE));
    }

    #[test]
    fn test_dashed_stroke_skips_pixels() {
        let mut canvas = RasterCanvas::new(20, 3, WHITE);
        canvas.set_color(BLACK);
        canvas.set_stroke(Stroke::Dashed);
        canvas.draw_rect(0, 0, 15, 1);

        let top: Vec<bool> = (0..8).map(|x| canvas.pixel(x, 0) == Some(BLACK)).collect();
        assert_eq!(top, vec![true, true, false, false, true, true, false, false]);
    }

    #[test]
    fn test_fill_oval_covers_centre_not_corners() {
        let mut canvas = RasterCanvas::new(20, 20, WHITE);
        canvas.set_color(GREEN);
        canvas.fill_oval(0, 0, 20, 20);

        assert_eq!(canvas.pixel(10, 10), Some(GREEN));
        assert_eq!(canvas.pixel(0, 0), Some(WHITE));
        assert_eq!(canvas.pixel(19, 19), Some(WHITE));
    }

    #[test]
    fn test_save_png_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.png");
        RasterCanvas::new(3, 3, WHITE).save_png(&path).unwrap();
        assert!(path.exists());
    }
}
