//! Rectangles for the two coordinate spaces of the chart.
//!
//! - [`Rect`]: the pixel drawing area supplied by the host on layout.
//! - [`ViewportRect`]: the visible window into logical data space.

use glam::Vec2;

/// Pixel-space drawing area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left)
    pub x: f32,
    /// Y position (top)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Create a new rect.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create from left/top/right/bottom edges.
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Create from position and size.
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    /// Get the left edge.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Get the top edge.
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Get the right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Get the size as a Vec2.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Get the center point.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.center_y())
    }

    /// Horizontal center; the chart's center line.
    pub fn center_x(&self) -> f32 {
        self.x + self.width * 0.5
    }

    /// Vertical center.
    pub fn center_y(&self) -> f32 {
        self.y + self.height * 0.5
    }

    /// True when there is no area to draw into (e.g. before layout).
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Check if a point is inside the rect.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }
}

/// Visible window into logical data space.
///
/// Y is stored bottom-up: `top` holds the smallest visible Y value and
/// `bottom` the largest, so that `height()` is positive for a normal chart.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl ViewportRect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Logical width (`right - left`).
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Logical height (`bottom - top`).
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Horizontal center in data units.
    pub fn center_x(&self) -> f64 {
        (self.left + self.right) * 0.5
    }

    /// True when either extent is zero or negative.
    pub fn is_empty(&self) -> bool {
        !(self.left < self.right && self.top < self.bottom)
    }

    /// Set all four edges.
    pub fn set(&mut self, left: f64, top: f64, right: f64, bottom: f64) {
        *self = Self::new(left, top, right, bottom);
    }

    /// Move horizontally to `left`, keeping the width.
    pub fn offset_to_left(&mut self, left: f64) {
        let width = self.width();
        self.left = left;
        self.right = left + width;
    }

    /// True if `x` lies strictly between the left and right edges.
    #[inline]
    pub fn contains_x(&self, x: f64) -> bool {
        x > self.left && x < self.right
    }
}
