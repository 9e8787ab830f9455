//! Pixel-space scroll surface.
//!
//! Scroll physics only understands integer pixel offsets inside a finite
//! extent. The surface is the full data range expressed at the current zoom
//! level: a viewport showing a tenth of the data gives a surface ten content
//! rects wide.

use crate::data::DataBounds;
use crate::rect::{Rect, ViewportRect};

/// Virtual pixel surface for the current viewport zoom.
///
/// Recompute it (with [`ScrollSurface::compute`]) before starting any pan,
/// fling or scroll; offsets taken from a stale surface drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSurface {
    width: i32,
    height: i32,
    bounds: DataBounds,
    /// Logical X units per surface pixel; `span_x / width` before truncation.
    units_per_px_x: f64,
    /// Logical Y units per surface pixel; `span_y / height` before truncation.
    units_per_px_y: f64,
}

impl ScrollSurface {
    /// Size the surface for `viewport` inside `bounds`, drawn into `content`.
    ///
    /// Returns `None` when the viewport or content rect has no area, which
    /// happens transiently before the first layout.
    pub fn compute(bounds: &DataBounds, viewport: &ViewportRect, content: &Rect) -> Option<Self> {
        let vw = viewport.width();
        let vh = viewport.height();
        let cw = f64::from(content.width);
        let ch = f64::from(content.height);
        if !(vw > 0.0 && vh > 0.0 && cw > 0.0 && ch > 0.0) {
            return None;
        }

        // Truncated to whole pixels like the offsets the physics works in.
        let width = (bounds.width() / vw * cw) as i32;
        let height = (bounds.height() / vh * ch) as i32;

        Some(Self {
            width,
            height,
            bounds: *bounds,
            units_per_px_x: vw / cw,
            units_per_px_y: vh / ch,
        })
    }

    /// Surface width in pixels.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Pixel offset of the viewport's left edge from the data's min X,
    /// rounded to the nearest pixel.
    pub fn start_offset_x(&self, viewport: &ViewportRect) -> i32 {
        self.offset_x_for_left(viewport.left)
    }

    /// Pixel offset at which the viewport's left edge would sit on `left`.
    pub fn offset_x_for_left(&self, left: f64) -> i32 {
        ((left - self.bounds.min_x) / self.units_per_px_x).round() as i32
    }

    /// Pixel offset of the viewport's upper edge from the data's max Y.
    ///
    /// Y is inverted: the offset grows as the visible values decrease.
    pub fn start_offset_y(&self, viewport: &ViewportRect) -> i32 {
        ((self.bounds.max_y - viewport.bottom) / self.units_per_px_y).round() as i32
    }

    /// Logical left edge for a horizontal pixel offset.
    pub fn logical_x_from_offset(&self, pixel_x: i32) -> f64 {
        self.bounds.min_x + f64::from(pixel_x) * self.units_per_px_x
    }

    /// Logical upper Y edge for a vertical pixel offset.
    pub fn logical_y_from_offset(&self, pixel_y: i32) -> f64 {
        self.bounds.max_y - f64::from(pixel_y) * self.units_per_px_y
    }

    /// Logical X distance covered by `pixels` of horizontal scroll.
    pub fn logical_dx(&self, pixels: f64) -> f64 {
        pixels * self.units_per_px_x
    }
}
