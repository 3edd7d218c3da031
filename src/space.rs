#[cfg(test)]
#[path = "space_test.rs"]
mod space_test;

use std::ops::{Add, Sub};

use serde::Serialize;

use crate::config::LayoutConfig;

/// A point in either display or canonical space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned box in canonical coordinates, top-left anchored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Smallest box spanning two opposite corners given in any order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// The canonical page and its zoom transform.
///
/// Field geometry is always stored in canonical units, a fixed virtual page
/// of `canvas_width × canvas_height`. The display shows that page at `scale`,
/// derived from the width available to the editor.
#[derive(Debug, Clone, Copy)]
pub struct CanvasSpace {
    canvas_width: f64,
    canvas_height: f64,
    min_scale: f64,
    max_scale: f64,
    scale: f64,
}

impl CanvasSpace {
    #[must_use]
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            canvas_width: config.canvas_width,
            canvas_height: config.canvas_height,
            min_scale: config.min_scale,
            max_scale: config.max_scale,
            scale: 1.0_f64.min(config.max_scale).max(config.min_scale),
        }
    }

    /// Recompute the scale for a new available display width and return it.
    ///
    /// Non-finite widths leave the scale unchanged.
    pub fn set_display_width(&mut self, display_width: f64) -> f64 {
        if display_width.is_finite() {
            self.scale = (display_width / self.canvas_width).min(self.max_scale).max(self.min_scale);
        }
        self.scale
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    #[must_use]
    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// The whole canonical page.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.canvas_width, self.canvas_height)
    }

    /// On-screen size of one page image at the current scale.
    #[must_use]
    pub fn display_size(&self) -> (f64, f64) {
        (self.canvas_width * self.scale, self.canvas_height * self.scale)
    }

    /// Convert a display-space point (relative to the page's on-screen rectangle) to canonical coordinates.
    #[must_use]
    pub fn to_canonical(&self, display: Point) -> Point {
        Point::new(display.x / self.scale, display.y / self.scale)
    }

    /// Convert a canonical point to display coordinates.
    #[must_use]
    pub fn to_display(&self, canonical: Point) -> Point {
        Point::new(canonical.x * self.scale, canonical.y * self.scale)
    }

    /// Convert a display-space distance to canonical units.
    #[must_use]
    pub fn display_dist_to_canonical(&self, display_dist: f64) -> f64 {
        display_dist / self.scale
    }

    /// Pull a canonical point onto the page.
    #[must_use]
    pub fn clamp_point(&self, p: Point) -> Point {
        Point::new(p.x.min(self.canvas_width).max(0.0), p.y.min(self.canvas_height).max(0.0))
    }
}

impl Default for CanvasSpace {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}
