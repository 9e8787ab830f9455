//! Mapping between logical data space and pixel space.

use glam::Vec2;

use crate::data::DataPoint;
use crate::rect::{Rect, ViewportRect};

/// Bidirectional mapping between a logical viewport and a pixel content rect.
///
/// Pixel Y grows downward while logical Y grows upward, so the viewport's
/// `top` (smallest visible value) maps to the content rect's bottom edge.
///
/// Both rectangles must be non-degenerate. This is checked in debug builds
/// only; a zero extent in release builds produces non-finite coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    content: Rect,
    viewport: ViewportRect,
}

impl ViewportTransform {
    pub fn new(content: Rect, viewport: ViewportRect) -> Self {
        debug_assert!(
            viewport.width() != 0.0 && viewport.height() != 0.0,
            "degenerate logical viewport: {viewport:?}"
        );
        debug_assert!(
            content.width != 0.0 && content.height != 0.0,
            "degenerate content rect: {content:?}"
        );
        Self { content, viewport }
    }

    /// Content rect this transform maps into.
    pub fn content(&self) -> &Rect {
        &self.content
    }

    /// Logical viewport this transform maps from.
    pub fn viewport(&self) -> &ViewportRect {
        &self.viewport
    }

    #[inline]
    pub fn to_draw_x(&self, x: f64) -> f32 {
        let scale = f64::from(self.content.width) / self.viewport.width();
        (f64::from(self.content.x) + scale * (x - self.viewport.left)) as f32
    }

    #[inline]
    pub fn to_draw_y(&self, y: f64) -> f32 {
        let scale = f64::from(self.content.height) / self.viewport.height();
        (f64::from(self.content.bottom()) - scale * (y - self.viewport.top)) as f32
    }

    /// Pixel position of a data point.
    #[inline]
    pub fn to_draw(&self, point: DataPoint) -> Vec2 {
        Vec2::new(self.to_draw_x(point.x), self.to_draw_y(point.y))
    }

    /// Inverse of [`Self::to_draw_x`].
    #[inline]
    pub fn to_logical_x(&self, pixel_x: f32) -> f64 {
        let px = f64::from(pixel_x) - f64::from(self.content.x);
        self.viewport.left + px * self.viewport.width() / f64::from(self.content.width)
    }

    /// Inverse of [`Self::to_draw_y`].
    #[inline]
    pub fn to_logical_y(&self, pixel_y: f32) -> f64 {
        let px = f64::from(self.content.bottom()) - f64::from(pixel_y);
        self.viewport.top + px * self.viewport.height() / f64::from(self.content.height)
    }

    /// Logical point under a pixel position (e.g. a touch).
    pub fn to_logical(&self, pixel: Vec2) -> DataPoint {
        DataPoint::new(self.to_logical_x(pixel.x), self.to_logical_y(pixel.y))
    }
}
