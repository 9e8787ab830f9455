//! Viewport orchestration.
//!
//! [`ViewportManager`] owns the logical viewport, the full data bounds, the
//! axis stops and the per-frame point buffers. It implements the pan, fling,
//! snap and auto-scale protocols by driving a [`ScrollPhysics`] collaborator
//! and a [`VerticalAutoScaler`]; it never reads a clock or draws anything.

use std::time::Duration;

use centerline_core::profiling::profile_scope;
use tracing::{debug, trace, warn};

use crate::axis::{AxisStops, compute_stops_into, x_axis_stops_into};
use crate::config::GraphConfig;
use crate::data::{DataBounds, DataPoint, DataSet};
use crate::physics::{FlingParams, ScrollPhysics};
use crate::rect::{Rect, ViewportRect};
use crate::scaler::{VerticalAutoScaler, YRange};
use crate::surface::ScrollSurface;
use crate::transform::ViewportTransform;

/// What a physics poll did to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicsTick {
    /// Physics had nothing to report.
    Idle,
    /// The viewport moved.
    Scrolled,
    /// A programmatic scroll reached its final offset on this poll. The
    /// viewport moved there; the visible point set should be auto-scaled.
    ScrollFinished,
    /// A fling came to rest on an earlier poll. The caller should snap or
    /// auto-scale.
    FlingFinished,
}

/// Logical viewport state and interaction protocols for one chart.
#[derive(Debug, Clone)]
pub struct ViewportManager {
    visible_x_range: u32,
    x_interval: u32,
    y_step_hint: u32,

    viewport: ViewportRect,
    content: Rect,
    bounds: Option<DataBounds>,
    initialized: bool,
    surface: Option<ScrollSurface>,

    x_stops: AxisStops,
    y_stops: AxisStops,
    x_range_points: Vec<DataPoint>,
    closest_points: Vec<DataPoint>,

    scroll_in_progress: bool,
    /// Exact left edge a programmatic scroll lands on
    scroll_target: Option<f64>,
    fling: bool,
    computing_scroll: bool,
}

impl ViewportManager {
    pub fn new(config: &GraphConfig) -> Self {
        Self {
            visible_x_range: config.visible_x_range.max(1),
            x_interval: config.x_interval.max(1),
            y_step_hint: config.y_step_hint.max(1),
            viewport: ViewportRect::default(),
            content: Rect::default(),
            bounds: None,
            initialized: false,
            surface: None,
            x_stops: AxisStops::empty(),
            y_stops: AxisStops::empty(),
            x_range_points: Vec::with_capacity(64),
            closest_points: Vec::with_capacity(8),
            scroll_in_progress: false,
            scroll_target: None,
            fling: false,
            computing_scroll: false,
        }
    }

    // --- Configuration -------------------------------------------------

    pub fn visible_x_range(&self) -> u32 {
        self.visible_x_range
    }

    /// Change the viewport width, keeping its centre, and regenerate X stops.
    pub fn set_visible_x_range(&mut self, range: u32) {
        self.visible_x_range = range.max(1);
        if self.initialized {
            let half = f64::from(self.visible_x_range) / 2.0;
            let center = self.viewport.center_x();
            self.viewport.left = center - half;
            self.viewport.right = center + half;
        }
        self.compute_x_axis();
    }

    pub fn x_interval(&self) -> u32 {
        self.x_interval
    }

    pub fn set_x_interval(&mut self, interval: u32) {
        self.x_interval = interval.max(1);
        self.compute_x_axis();
    }

    // --- Data ----------------------------------------------------------

    /// Extend the full bounds with `data_set`'s bounds.
    ///
    /// The first non-empty dataset positions the viewport so its right edge
    /// sits on the last X value.
    pub fn add_data_set(&mut self, data_set: &DataSet) {
        let Some(ds_bounds) = data_set.bounds() else {
            trace!("Ignoring bounds of empty dataset");
            return;
        };
        match &mut self.bounds {
            Some(bounds) => bounds.union(&ds_bounds),
            None => self.bounds = Some(ds_bounds),
        }
        self.init_viewport();
        self.compute_x_axis();
    }

    /// Rebuild the full bounds from scratch. The only way bounds shrink.
    pub fn recompute_bounds(&mut self, data_sets: &[DataSet]) {
        self.bounds = data_sets
            .iter()
            .filter_map(DataSet::bounds)
            .reduce(|mut acc, b| {
                acc.union(&b);
                acc
            });
        self.init_viewport();
        self.compute_x_axis();
    }

    fn init_viewport(&mut self) {
        if self.initialized {
            return;
        }
        let Some(b) = self.bounds else {
            return;
        };
        let (mut bottom_y, mut top_y) = (b.min_y, b.max_y);
        if bottom_y == top_y {
            // Flat data; keep the Y range drawable until the first auto-scale.
            bottom_y -= 1.0;
            top_y += 1.0;
        }
        let range = f64::from(self.visible_x_range);
        self.viewport.set(b.max_x - range, bottom_y, b.max_x, top_y);
        self.initialized = true;
        debug!(
            left = self.viewport.left,
            right = self.viewport.right,
            min_y = bottom_y,
            max_y = top_y,
            "Viewport initialised from first dataset"
        );
    }

    // --- Geometry ------------------------------------------------------

    /// Set the pixel drawing area (on layout).
    pub fn set_content_rect(&mut self, content: Rect) {
        self.content = content;
    }

    pub fn content_rect(&self) -> &Rect {
        &self.content
    }

    pub fn viewport(&self) -> &ViewportRect {
        &self.viewport
    }

    /// Bounds over every dataset, `None` until one with points is added.
    pub fn bounds(&self) -> Option<DataBounds> {
        self.bounds
    }

    /// Visible Y range.
    pub fn y_range(&self) -> YRange {
        YRange::new(self.viewport.top, self.viewport.bottom)
    }

    /// Replace the visible Y range (applied from the auto-scaler).
    pub fn set_y_range(&mut self, range: YRange) {
        self.viewport.top = range.min;
        self.viewport.bottom = range.max;
    }

    /// Transform for the current rectangles, `None` while either is degenerate.
    pub fn transform(&self) -> Option<ViewportTransform> {
        let v = &self.viewport;
        if !self.initialized || v.is_empty() || self.content.is_empty() {
            return None;
        }
        Some(ViewportTransform::new(self.content, *v))
    }

    /// Resize the scroll surface for the current zoom and keep the result.
    pub fn compute_scroll_surface(&mut self) -> Option<ScrollSurface> {
        self.surface = self
            .bounds
            .and_then(|b| ScrollSurface::compute(&b, &self.viewport, &self.content));
        self.surface
    }

    /// Surface from the last [`Self::compute_scroll_surface`].
    pub fn surface(&self) -> Option<&ScrollSurface> {
        self.surface.as_ref()
    }

    pub fn x_stops(&self) -> &AxisStops {
        &self.x_stops
    }

    pub fn y_stops(&self) -> &AxisStops {
        &self.y_stops
    }

    /// Points strictly inside the viewport horizontally, from the last scan.
    pub fn points_in_range(&self) -> &[DataPoint] {
        &self.x_range_points
    }

    /// Points nearest the centre line, from the last computation.
    pub fn closest_points(&self) -> &[DataPoint] {
        &self.closest_points
    }

    pub fn is_fling(&self) -> bool {
        self.fling
    }

    /// A programmatic scroll (snap, tap-to-focus, scroll-by) is in flight.
    pub fn scroll_in_progress(&self) -> bool {
        self.scroll_in_progress
    }

    /// Forget any programmatic scroll or fling in flight (finger down).
    pub fn cancel_scroll(&mut self) {
        self.scroll_in_progress = false;
        self.scroll_target = None;
        self.fling = false;
    }

    // --- Movement ------------------------------------------------------

    /// Move the viewport's left edge to `new_left`, keeping its width.
    ///
    /// `new_left` is clamped to `[min_x - width, max_x]`: the centre line
    /// can reach the first and last point with half a viewport to spare on
    /// either side for overscroll.
    pub fn move_to(&mut self, new_left: f64) {
        let Some(b) = self.bounds else {
            return;
        };
        let width = self.viewport.width();
        let left = new_left.min(b.max_x).max(b.min_x - width);
        self.viewport.offset_to_left(left);
    }

    /// Centre the viewport on the first data point.
    pub fn move_start(&mut self, data_sets: &[DataSet]) {
        let Some(b) = self.bounds else {
            return;
        };
        let range = f64::from(self.visible_x_range);
        let left = b.min_x - range / 2.0;
        self.viewport.left = left;
        self.viewport.right = left + range;
        self.refresh_after_jump(data_sets);
    }

    /// Centre the viewport on the last data point.
    pub fn move_end(&mut self, data_sets: &[DataSet]) {
        let Some(b) = self.bounds else {
            return;
        };
        let range = f64::from(self.visible_x_range);
        let right = b.max_x + range / 2.0;
        self.viewport.left = right - range;
        self.viewport.right = right;
        self.refresh_after_jump(data_sets);
    }

    fn refresh_after_jump(&mut self, data_sets: &[DataSet]) {
        self.compute_points_within_x_range(data_sets);
        self.compute_closest_points();
        self.compute_x_axis();
    }

    // --- Derived sets --------------------------------------------------

    /// Collect every point strictly inside the viewport horizontally,
    /// whatever its Y.
    pub fn compute_points_within_x_range(&mut self, data_sets: &[DataSet]) {
        profile_scope!("compute_points_within_x_range");
        self.x_range_points.clear();
        let viewport = self.viewport;
        for ds in data_sets {
            self.x_range_points.extend(
                ds.points()
                    .iter()
                    .filter(|p| viewport.contains_x(p.x))
                    .copied(),
            );
        }
        trace!(count = self.x_range_points.len(), "Points within X range");
    }

    /// Find the in-range point(s) whose drawn X is nearest the centre line.
    ///
    /// Every point tied at the minimum distance is kept, in scan order.
    pub fn compute_closest_points(&mut self) {
        profile_scope!("compute_closest_points");
        self.closest_points.clear();
        let Some(t) = self.transform() else {
            return;
        };
        let center = self.content.center_x();
        let mut best = f32::INFINITY;
        for p in &self.x_range_points {
            let distance = (t.to_draw_x(p.x) - center).abs();
            if distance < best {
                best = distance;
                self.closest_points.clear();
                self.closest_points.push(*p);
            } else if distance == best {
                self.closest_points.push(*p);
            }
        }
    }

    /// Regenerate the X-axis stops from the viewport's left edge.
    pub fn compute_x_axis(&mut self) {
        if !self.initialized {
            self.x_stops = AxisStops::empty();
            return;
        }
        x_axis_stops_into(
            &mut self.x_stops,
            self.viewport.left,
            self.visible_x_range,
            self.x_interval,
        );
    }

    // --- Auto-scale ----------------------------------------------------

    /// Fit the Y range to the points in view, animating with `scaler`.
    ///
    /// The range is chosen so the Y-axis stops around the visible points fill
    /// the content rect while the lowest stop clears a band of
    /// `bottom_offset` pixels at the bottom. Returns `true` if an animation
    /// was started. Nothing happens when no point is in view or the target
    /// matches the range already shown (or already being animated to).
    pub fn auto_scale(
        &mut self,
        now: Duration,
        scaler: &mut VerticalAutoScaler,
        bottom_offset: f32,
        data_sets: &[DataSet],
    ) -> bool {
        profile_scope!("auto_scale");
        self.scroll_in_progress = false;
        self.compute_points_within_x_range(data_sets);

        let Some((low, high)) = self
            .x_range_points
            .iter()
            .map(|p| (p.y, p.y))
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
        else {
            return false;
        };

        compute_stops_into(&mut self.y_stops, low, high, self.y_step_hint);
        let (Some(bottom_axis), Some(top_axis)) = (self.y_stops.first(), self.y_stops.last())
        else {
            warn!(low, high, "No Y stops for visible points; skipping auto-scale");
            return false;
        };

        let content_height = f64::from(self.content.height);
        if content_height <= 0.0 {
            warn!("Auto-scale requested before layout");
            return false;
        }
        let fraction = f64::from(bottom_offset) / content_height;
        if fraction.is_nan() || fraction >= 1.0 {
            warn!(
                bottom_offset,
                content_height, "Bottom offset leaves no room to plot; skipping auto-scale"
            );
            return false;
        }

        let new_min = (bottom_axis - fraction * top_axis) / (1.0 - fraction);
        let target = YRange::new(new_min, top_axis);
        let current = self.y_range();

        let unchanged = if scaler.is_animating() {
            scaler.target() == target
        } else {
            current == target
        };
        if unchanged {
            return false;
        }

        debug!(
            from_min = current.min,
            from_max = current.max,
            to_min = target.min,
            to_max = target.max,
            "Auto-scale armed"
        );
        scaler.start_scaling_y(now, current, target);
        true
    }

    // --- Physics-driven motion -----------------------------------------

    /// Scroll so that `pixel_x` ends up on the centre line.
    ///
    /// Returns `false` (and does nothing) when it is already there or the
    /// geometry is not ready.
    pub fn scroll_x_to<P: ScrollPhysics + ?Sized>(
        &mut self,
        now: Duration,
        physics: &mut P,
        pixel_x: f32,
        duration: Duration,
    ) -> bool {
        let dx = pixel_x - self.content.center_x();
        if dx == 0.0 || self.content.width <= 0.0 {
            return false;
        }
        let units_per_px = self.viewport.width() / f64::from(self.content.width);
        let target = self.viewport.left + f64::from(dx) * units_per_px;
        self.scroll_left_to(now, physics, target, duration)
    }

    /// Start a programmatic scroll that ends with the left edge on `target`.
    ///
    /// Physics moves in whole pixels; the exact target is applied when the
    /// scroll reports [`PhysicsTick::ScrollFinished`].
    fn scroll_left_to<P: ScrollPhysics + ?Sized>(
        &mut self,
        now: Duration,
        physics: &mut P,
        target: f64,
        duration: Duration,
    ) -> bool {
        let Some(surface) = self.compute_scroll_surface() else {
            warn!("Scroll requested before layout");
            return false;
        };
        let start_x = surface.start_offset_x(&self.viewport);
        let distance = surface.offset_x_for_left(target) - start_x;
        self.scroll_in_progress = true;
        self.scroll_target = Some(target);
        physics.start_scroll(
            now,
            start_x,
            surface.start_offset_y(&self.viewport),
            distance,
            0,
            duration,
        );
        true
    }

    /// Scroll by `dx` logical X units.
    ///
    /// A target past the last point stops with the last point on the centre
    /// line; one before the first point does the same for the first point.
    pub fn scroll_x_by<P: ScrollPhysics + ?Sized>(
        &mut self,
        now: Duration,
        physics: &mut P,
        dx: f64,
        duration: Duration,
    ) -> bool {
        let Some(b) = self.bounds else {
            return false;
        };
        let half = f64::from(self.visible_x_range) / 2.0;
        let mut dx = dx;
        if self.viewport.left + dx > b.max_x {
            dx = (b.max_x - half) - self.viewport.left;
        }
        if self.viewport.left + dx < b.min_x {
            dx = (b.min_x + half) - self.viewport.right;
        }

        let width = self.viewport.width();
        if width <= 0.0 {
            return false;
        }
        let distance = (dx / width * f64::from(self.content.width)).round() as i32;
        if distance == 0 {
            return false;
        }
        self.scroll_left_to(now, physics, self.viewport.left + dx, duration)
    }

    /// Scroll the X stop nearest the centre line onto it.
    ///
    /// On an exact tie the first stop wins. Returns `false` when no scroll
    /// was needed or possible.
    pub fn snap_to_closest_x_stop<P: ScrollPhysics + ?Sized>(
        &mut self,
        now: Duration,
        physics: &mut P,
        duration: Duration,
    ) -> bool {
        if self.x_stops.is_empty() {
            self.compute_x_axis();
        }
        let Some(t) = self.transform() else {
            warn!("Snap requested before layout");
            return false;
        };
        let center = self.content.center_x();
        let mut closest: Option<(f64, f32)> = None;
        for &stop in self.x_stops.values() {
            let dx = t.to_draw_x(stop) - center;
            if closest.is_none_or(|(_, c)| dx.abs() <= c.abs()) {
                closest = Some((stop, dx));
            }
        }
        let Some((stop, dx)) = closest else {
            return false;
        };
        if dx == 0.0 {
            return false;
        }
        debug!(stop, pixel_dx = dx, "Snapping to closest X stop");
        let target = stop - self.viewport.width() / 2.0;
        self.scroll_left_to(now, physics, target, duration)
    }

    /// Tap-to-focus: if a visible point is drawn within `radius` of the tap
    /// on both axes, scroll it onto the centre line.
    ///
    /// Returns `true` if a point was hit.
    pub fn clicked_on_marker<P: ScrollPhysics + ?Sized>(
        &mut self,
        now: Duration,
        physics: &mut P,
        pixel_x: f32,
        pixel_y: f32,
        radius: f32,
        duration: Duration,
    ) -> bool {
        let Some(t) = self.transform() else {
            return false;
        };
        let center = self.content.center_x();
        let hit = self.x_range_points.iter().find_map(|p| {
            let drawn = t.to_draw(*p);
            ((pixel_x - drawn.x).abs() < radius && (pixel_y - drawn.y).abs() < radius)
                .then_some((p.x, drawn.x))
        });
        match hit {
            Some((x, drawn_x)) => {
                debug!(x, pixel_x = drawn_x, "Tapped on point");
                if drawn_x != center {
                    let target = x - self.viewport.width() / 2.0;
                    self.scroll_left_to(now, physics, target, duration);
                }
                true
            }
            None => false,
        }
    }

    /// Pan by a pixel drag delta. Positive `dx` moves towards larger X.
    pub fn on_pan(&mut self, dx: f32, _dy: f32) {
        if self.content.width <= 0.0 || !self.initialized {
            return;
        }
        let logical_dx = f64::from(dx) / f64::from(self.content.width) * self.viewport.width();
        self.compute_scroll_surface();
        self.move_to(self.viewport.left + logical_dx);
        self.compute_x_axis();
    }

    /// Start a fling with velocities in pixels per second (positive towards
    /// larger X).
    ///
    /// Horizontal travel is bounded to `[-w/2, surface_width - w/2]` for a
    /// content width `w`, with another `w/2` of overscroll.
    pub fn on_fling_start<P: ScrollPhysics + ?Sized>(
        &mut self,
        now: Duration,
        physics: &mut P,
        velocity_x: f32,
        velocity_y: f32,
    ) -> bool {
        let Some(surface) = self.compute_scroll_surface() else {
            warn!("Fling requested before layout");
            return false;
        };
        self.fling = true;
        self.scroll_in_progress = false;
        self.scroll_target = None;

        let half_w = self.content.width as i32 / 2;
        let height = self.content.height as i32;
        let params = FlingParams {
            start_x: surface.start_offset_x(&self.viewport),
            start_y: surface.start_offset_y(&self.viewport),
            velocity_x,
            velocity_y,
            min_x: -half_w,
            max_x: surface.width() - half_w,
            min_y: 0,
            max_y: surface.height() - height,
            over_x: half_w,
            over_y: height / 2,
        };
        debug!(
            velocity_x,
            velocity_y,
            min_x = params.min_x,
            max_x = params.max_x,
            "Fling started"
        );
        physics.force_finished(true);
        physics.fling(now, params);
        true
    }

    /// Poll `physics` and move the viewport to its offset.
    pub fn on_physics_tick<P: ScrollPhysics + ?Sized>(
        &mut self,
        now: Duration,
        physics: &mut P,
    ) -> PhysicsTick {
        if physics.compute_scroll_offset(now) {
            self.computing_scroll = true;
            let x = physics.current_x();
            let at_final = x == physics.final_x();
            trace!(x, final_x = physics.final_x(), "Physics poll");

            match self.scroll_target {
                Some(left) if at_final => self.move_to(left),
                _ => {
                    if let Some(surface) = self.compute_scroll_surface() {
                        self.move_to(surface.logical_x_from_offset(x));
                    }
                }
            }
            self.compute_x_axis();

            if self.scroll_in_progress && at_final {
                self.scroll_in_progress = false;
                return PhysicsTick::ScrollFinished;
            }
            return PhysicsTick::Scrolled;
        }
        self.scroll_target = None;

        if self.computing_scroll && self.fling {
            self.fling = false;
            self.computing_scroll = false;
            return PhysicsTick::FlingFinished;
        }
        PhysicsTick::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::scroller::Scroller;

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    fn manager_with(points: &[(f64, f64)]) -> (ViewportManager, Vec<DataSet>) {
        let mut m = ViewportManager::new(&GraphConfig::default());
        m.set_content_rect(Rect::new(0.0, 0.0, 700.0, 400.0));
        let ds = DataSet::from_tuples(points);
        m.add_data_set(&ds);
        (m, vec![ds])
    }

    fn series(n: usize) -> Vec<(f64, f64)> {
        (1..=n).map(|i| (i as f64, 60.0 + (i % 5) as f64)).collect()
    }

    /// Poll until physics settles, returning the last tick that did something.
    fn settle(m: &mut ViewportManager, physics: &mut Scroller, from: Duration) -> PhysicsTick {
        let mut last = PhysicsTick::Idle;
        let mut now = from;
        for _ in 0..1000 {
            match m.on_physics_tick(now, physics) {
                PhysicsTick::Idle => return last,
                tick => last = tick,
            }
            now += ms(16);
        }
        panic!("physics never settled");
    }

    #[test]
    fn test_first_dataset_initialises_viewport() {
        let (m, _) = manager_with(&[(1.0, 70.0), (2.0, 72.0), (3.0, 68.0)]);
        let b = m.bounds().unwrap();
        assert_eq!((b.min_x, b.max_x, b.min_y, b.max_y), (1.0, 3.0, 68.0, 72.0));
        assert_eq!(m.viewport().left, -4.0);
        assert_eq!(m.viewport().right, 3.0);
        assert_eq!(m.y_range(), YRange::new(68.0, 72.0));
        assert_eq!(m.x_stops().first(), Some(-4.0));
        assert_eq!(m.x_stops().len(), 7);
    }

    #[test]
    fn test_later_dataset_only_grows_bounds() {
        let (mut m, _) = manager_with(&[(1.0, 70.0), (3.0, 68.0)]);
        m.add_data_set(&DataSet::from_tuples(&[(2.0, 69.0)]));
        let b = m.bounds().unwrap();
        assert_eq!((b.min_x, b.max_x, b.min_y, b.max_y), (1.0, 3.0, 68.0, 70.0));
        // Viewport stays where the first dataset put it.
        assert_eq!(m.viewport().left, -4.0);
    }

    #[test]
    fn test_recompute_bounds_shrinks() {
        let (mut m, mut sets) = manager_with(&[(1.0, 70.0), (2.0, 72.0), (3.0, 68.0)]);
        sets[0].remove_point(&DataPoint::new(2.0, 72.0));
        m.recompute_bounds(&sets);
        assert_eq!(m.bounds().unwrap().max_y, 70.0);
    }

    #[test]
    fn test_move_clamps() {
        let (mut m, _) = manager_with(&series(20));
        m.move_to(-1000.0);
        assert_eq!(m.viewport().left, 1.0 - 7.0);
        assert_eq!(m.viewport().width(), 7.0);
        m.move_to(1000.0);
        assert_eq!(m.viewport().left, 20.0);
        assert_eq!(m.viewport().right, 27.0);
    }

    #[test]
    fn test_move_start_and_end_center_edge_points() {
        let (mut m, sets) = manager_with(&series(20));
        m.move_start(&sets);
        assert_eq!(m.viewport().center_x(), 1.0);
        assert_eq!(m.closest_points(), &[DataPoint::new(1.0, 61.0)]);

        m.move_end(&sets);
        assert_eq!(m.viewport().center_x(), 20.0);
        assert_eq!(m.closest_points(), &[DataPoint::new(20.0, 60.0)]);
        assert_eq!(m.x_stops().first(), Some(17.0));
    }

    #[test]
    fn test_points_in_range_are_strict() {
        let (mut m, sets) = manager_with(&[(1.0, 70.0), (2.0, 72.0), (3.0, 68.0)]);
        m.compute_points_within_x_range(&sets);
        // The right edge sits exactly on x = 3.
        assert_eq!(m.points_in_range().len(), 2);
    }

    #[test]
    fn test_closest_points_keep_ties() {
        let mut m = ViewportManager::new(&GraphConfig::default().with_visible_x_range(1000));
        m.set_content_rect(Rect::new(0.0, 0.0, 1000.0, 400.0));
        let ds = DataSet::from_tuples(&[(300.0, 1.0), (498.0, 2.0), (502.0, 3.0), (1000.0, 4.0)]);
        m.add_data_set(&ds);
        m.move_to(0.0);
        m.compute_points_within_x_range(std::slice::from_ref(&ds));
        m.compute_closest_points();
        assert_eq!(
            m.closest_points(),
            &[DataPoint::new(498.0, 2.0), DataPoint::new(502.0, 3.0)]
        );
    }

    #[test]
    fn test_closer_point_after_ties_resets() {
        let mut m = ViewportManager::new(&GraphConfig::default().with_visible_x_range(1000));
        m.set_content_rect(Rect::new(0.0, 0.0, 1000.0, 400.0));
        let ds = DataSet::from_tuples(&[(490.0, 1.0), (510.0, 2.0), (499.0, 3.0)]);
        m.add_data_set(&ds);
        m.move_to(0.0);
        m.compute_points_within_x_range(std::slice::from_ref(&ds));
        m.compute_closest_points();
        assert_eq!(m.closest_points(), &[DataPoint::new(499.0, 3.0)]);
    }

    #[test]
    fn test_auto_scale_targets_stops() {
        let (mut m, sets) = manager_with(&[(1.0, 70.0), (2.0, 72.0), (3.0, 68.0)]);
        let mut scaler = VerticalAutoScaler::new().with_easing(Easing::Linear);

        assert!(m.auto_scale(ms(0), &mut scaler, 0.0, &sets));
        // x = 3 is on the right edge, so only 70 and 72 are in view.
        assert_eq!(m.y_stops().values(), &[70.0, 71.0, 72.0, 73.0]);
        assert_eq!(scaler.target(), YRange::new(70.0, 73.0));
    }

    #[test]
    fn test_auto_scale_reserves_bottom_band() {
        let (mut m, sets) = manager_with(&[(1.0, 70.0), (2.0, 72.0), (3.0, 68.0)]);
        let mut scaler = VerticalAutoScaler::new();
        assert!(m.auto_scale(ms(0), &mut scaler, 100.0, &sets));
        let target = scaler.target();
        assert!((target.min - 69.0).abs() < 1e-9);

        m.set_y_range(target);
        let t = m.transform().unwrap();
        // The lowest stop sits right on top of the 100 px band.
        assert!((t.to_draw_y(70.0) - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_auto_scale_is_idempotent() {
        let (mut m, sets) = manager_with(&[(1.0, 70.0), (2.0, 72.0), (3.0, 68.0)]);
        let mut scaler = VerticalAutoScaler::new();
        assert!(m.auto_scale(ms(0), &mut scaler, 0.0, &sets));
        // Same target while animating.
        assert!(!m.auto_scale(ms(10), &mut scaler, 0.0, &sets));

        let range = scaler.tick(ms(1000)).range().unwrap();
        m.set_y_range(range);
        assert!(!m.auto_scale(ms(1000), &mut scaler, 0.0, &sets));
        assert!(!scaler.is_animating());
    }

    #[test]
    fn test_auto_scale_without_points_is_noop() {
        let (mut m, sets) = manager_with(&series(20));
        m.move_to(-1000.0);
        let mut scaler = VerticalAutoScaler::new();
        let before = m.y_range();
        // Viewport is (-6, 1); x = 1 sits on the edge, so nothing is in view.
        assert!(!m.auto_scale(ms(0), &mut scaler, 0.0, &sets));
        assert_eq!(m.y_range(), before);
    }

    #[test]
    fn test_auto_scale_before_layout_is_noop() {
        let mut m = ViewportManager::new(&GraphConfig::default());
        let sets = vec![DataSet::from_tuples(&[(1.0, 70.0), (2.0, 72.0)])];
        m.add_data_set(&sets[0]);
        let mut scaler = VerticalAutoScaler::new();
        assert!(!m.auto_scale(ms(0), &mut scaler, 0.0, &sets));
        assert!(m.transform().is_none());
    }

    #[test]
    fn test_pan_converts_pixels_to_units() {
        let (mut m, _) = manager_with(&series(20));
        let before = m.viewport().left;
        // 700 px for 7 units: 100 px per unit.
        m.on_pan(-250.0, 0.0);
        assert!((m.viewport().left - (before - 2.5)).abs() < 1e-9);
        assert_eq!(m.x_stops().first(), Some(m.viewport().left.ceil()));
    }

    #[test]
    fn test_snap_scrolls_to_nearest_stop() {
        let (mut m, _) = manager_with(&series(20));
        let mut physics = Scroller::new();
        // Left edge 13, centre 16.5: stops 16 and 17 tie, last wins.
        assert!(m.snap_to_closest_x_stop(ms(0), &mut physics, ms(300)));
        assert!(m.scroll_in_progress());

        assert_eq!(settle(&mut m, &mut physics, ms(0)), PhysicsTick::ScrollFinished);
        assert!((m.viewport().center_x() - 17.0).abs() < 1e-6);
        assert!(!m.scroll_in_progress());
    }

    #[test]
    fn test_scroll_x_to_centres_pixel() {
        let (mut m, _) = manager_with(&series(20));
        let mut physics = Scroller::new();
        // Centre line at 350 px; 100 px per unit.
        assert!(!m.scroll_x_to(ms(0), &mut physics, 350.0, ms(300)));
        assert!(m.scroll_x_to(ms(0), &mut physics, 450.0, ms(300)));
        assert_eq!(physics.final_x() - physics.current_x(), 100);

        assert_eq!(settle(&mut m, &mut physics, ms(0)), PhysicsTick::ScrollFinished);
        assert!((m.viewport().center_x() - 17.5).abs() < 1e-9);
    }

    #[test]
    fn test_cancel_scroll_forgets_target() {
        let (mut m, _) = manager_with(&series(20));
        let mut physics = Scroller::new();
        assert!(m.scroll_x_to(ms(0), &mut physics, 425.0, ms(300)));
        m.cancel_scroll();
        physics.force_finished(true);
        assert!(!m.scroll_in_progress());
        assert_eq!(m.on_physics_tick(ms(16), &mut physics), PhysicsTick::Idle);
        assert_eq!(m.viewport().center_x(), 16.5);
    }

    #[test]
    fn test_snap_when_aligned_does_nothing() {
        let (mut m, sets) = manager_with(&series(20));
        m.move_end(&sets);
        let mut physics = Scroller::new();
        assert!(!m.snap_to_closest_x_stop(ms(0), &mut physics, ms(300)));
        assert!(physics.is_finished());
    }

    #[test]
    fn test_scroll_x_by_stops_at_last_point() {
        let (mut m, _) = manager_with(&series(20));
        let mut physics = Scroller::new();
        assert!(m.scroll_x_by(ms(0), &mut physics, 100.0, ms(200)));
        settle(&mut m, &mut physics, ms(0));
        assert!((m.viewport().center_x() - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_scroll_x_by_stops_at_first_point() {
        let (mut m, _) = manager_with(&series(20));
        let mut physics = Scroller::new();
        assert!(m.scroll_x_by(ms(0), &mut physics, -100.0, ms(200)));
        settle(&mut m, &mut physics, ms(0));
        assert!((m.viewport().center_x() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_tap_on_point_focuses_it() {
        let (mut m, sets) = manager_with(&series(20));
        m.set_y_range(YRange::new(50.0, 70.0));
        m.compute_points_within_x_range(&sets);
        let mut physics = Scroller::new();

        let t = m.transform().unwrap();
        let p = t.to_draw(DataPoint::new(15.0, 60.0));
        assert!(m.clicked_on_marker(ms(0), &mut physics, p.x + 5.0, p.y - 5.0, 48.0, ms(300)));
        settle(&mut m, &mut physics, ms(0));
        assert!((m.viewport().center_x() - 15.0).abs() < 1e-6);

        assert!(!m.clicked_on_marker(ms(0), &mut physics, 0.0, 0.0, 48.0, ms(300)));
    }

    #[test]
    fn test_fling_reports_completion_once() {
        let (mut m, _) = manager_with(&series(50));
        let mut physics = Scroller::new();
        assert!(m.on_fling_start(ms(0), &mut physics, -1500.0, 0.0));
        assert!(m.is_fling());

        assert_eq!(settle(&mut m, &mut physics, ms(0)), PhysicsTick::FlingFinished);
        assert!(!m.is_fling());
        assert!(m.viewport().left < 43.0);
        assert_eq!(m.on_physics_tick(ms(100_000), &mut physics), PhysicsTick::Idle);
    }
}
