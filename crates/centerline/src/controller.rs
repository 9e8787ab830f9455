//! Host-facing chart controller.
//!
//! [`GraphController`] bundles the datasets, the [`ViewportManager`], a
//! [`ScrollPhysics`] implementation, the [`VerticalAutoScaler`] and the
//! formatters behind a small event API:
//!
//! - data and layout: [`GraphController::add_data_set`],
//!   [`GraphController::set_content_rect`], ...
//! - gestures: [`GraphController::on_down`], [`GraphController::on_scroll`],
//!   [`GraphController::on_fling`], [`GraphController::on_up`];
//! - the per-frame poll: [`GraphController::frame`];
//! - render queries: [`GraphController::transform`],
//!   [`GraphController::x_axis_labels`], ...
//!
//! Calls that take no timestamp use the time of the most recent timestamped
//! call (usually the last frame).
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use centerline::{DataSet, GraphConfig, GraphController, Rect};
//!
//! let mut chart = GraphController::new(GraphConfig::default())?;
//! chart.set_content_rect(Rect::new(0.0, 0.0, 700.0, 400.0));
//! chart.add_data_set(DataSet::from_tuples(&[(1.0, 70.0), (2.0, 72.0), (3.0, 68.0)]));
//!
//! let mut now = Duration::ZERO;
//! while chart.frame(now).needs_redraw() {
//!     now += Duration::from_millis(16);
//! }
//! assert!(!chart.closest_points().is_empty());
//! # Ok::<(), centerline::ConfigError>(())
//! ```

use std::time::Duration;

use centerline_core::profiling::profile_scope;
use tracing::debug;

use crate::config::{
    ConfigResult, GraphConfig, validate_duration, validate_visible_range, validate_x_interval,
};
use crate::data::{DataPoint, DataSet};
use crate::format::{
    DefaultValueFormatter, LabelFormatter, UnitLabelFormatter, ValueFormatter, format_float,
};
use crate::manager::{PhysicsTick, ViewportManager};
use crate::physics::ScrollPhysics;
use crate::rect::{Rect, ViewportRect};
use crate::scaler::VerticalAutoScaler;
use crate::scroller::Scroller;
use crate::transform::ViewportTransform;

bitflags::bitflags! {
    /// What changed during a [`GraphController::frame`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FrameStatus: u8 {
        /// The viewport moved horizontally.
        const SCROLLED = 0b0000_0001;
        /// The Y range changed.
        const SCALED = 0b0000_0010;
        /// A fling came to rest.
        const FLING_FINISHED = 0b0000_0100;
        /// A snap, tap-to-focus or scroll-by reached its target.
        const SCROLL_FINISHED = 0b0000_1000;
        /// A snap scroll was started.
        const SNAPPED = 0b0001_0000;
    }
}

impl FrameStatus {
    /// Whether the host should schedule another frame.
    pub fn needs_redraw(&self) -> bool {
        !self.is_empty()
    }
}

/// A formatted axis label and where to draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    /// Stop value in data units
    pub value: f64,
    /// Pixel position along the axis
    pub position: f32,
    pub text: String,
}

/// Interactive line chart state driven by host events.
pub struct GraphController<P: ScrollPhysics = Scroller> {
    config: GraphConfig,
    data_sets: Vec<DataSet>,
    manager: ViewportManager,
    physics: P,
    scaler: VerticalAutoScaler,
    x_formatter: Box<dyn ValueFormatter>,
    label_formatter: Box<dyn LabelFormatter>,
    bottom_offset: f32,
    now: Duration,
}

impl GraphController<Scroller> {
    /// Create a controller with the built-in [`Scroller`].
    pub fn new(config: GraphConfig) -> ConfigResult<Self> {
        let physics = Scroller::new().with_easing(config.scroll_easing);
        Self::with_physics(config, physics)
    }
}

impl<P: ScrollPhysics> GraphController<P> {
    /// Create a controller with custom scroll physics.
    pub fn with_physics(config: GraphConfig, physics: P) -> ConfigResult<Self> {
        if let Err(err) = config.validate() {
            debug!(%err, "Rejected graph config");
            return Err(err);
        }
        let scaler = VerticalAutoScaler::new()
            .with_duration(config.scale_duration)
            .with_easing(config.scale_easing);
        Ok(Self {
            manager: ViewportManager::new(&config),
            config,
            data_sets: Vec::new(),
            physics,
            scaler,
            x_formatter: Box::new(DefaultValueFormatter),
            label_formatter: Box::new(UnitLabelFormatter::default()),
            bottom_offset: 0.0,
            now: Duration::ZERO,
        })
    }

    // --- Data and layout -----------------------------------------------

    /// Add a dataset, extend the bounds and auto-scale to the visible points.
    pub fn add_data_set(&mut self, data_set: DataSet) {
        self.manager.add_data_set(&data_set);
        self.data_sets.push(data_set);
        self.refresh_closest();
        self.scale(self.now);
    }

    /// Remove the first point equal to `point` from dataset `index`.
    ///
    /// Returns `false` if there is no such dataset or point.
    pub fn remove_point(&mut self, index: usize, point: &DataPoint) -> bool {
        let Some(data_set) = self.data_sets.get_mut(index) else {
            return false;
        };
        if !data_set.remove_point(point) {
            return false;
        }
        self.manager.recompute_bounds(&self.data_sets);
        self.refresh_closest();
        self.scale(self.now);
        true
    }

    /// Set the pixel drawing area. Snaps (when enabled) and auto-scales.
    pub fn set_content_rect(&mut self, content: Rect) {
        self.manager.set_content_rect(content);
        self.refresh_closest();
        if self.manager.transform().is_some() {
            self.settle(self.now);
        } else {
            self.scale(self.now);
        }
    }

    /// Reserve `pixels` at the bottom of the content rect (e.g. for X labels).
    /// Takes effect on the next auto-scale.
    pub fn set_bottom_offset(&mut self, pixels: f32) {
        self.bottom_offset = pixels;
    }

    pub fn bottom_offset(&self) -> f32 {
        self.bottom_offset
    }

    // --- Gestures ------------------------------------------------------

    /// Finger down: stop any motion.
    pub fn on_down(&mut self, now: Duration) {
        self.now = now;
        self.physics.force_finished(true);
        self.manager.cancel_scroll();
    }

    /// Drag by a pixel delta; positive `dx` pans towards larger X.
    pub fn on_scroll(&mut self, dx: f32, dy: f32) {
        self.manager.on_pan(dx, dy);
        self.refresh_closest();
    }

    /// Fling with velocities in pixels per second, positive towards larger X.
    pub fn on_fling(&mut self, now: Duration, velocity_x: f32, velocity_y: f32) {
        self.now = now;
        self.manager
            .on_fling_start(now, &mut self.physics, velocity_x, velocity_y);
    }

    /// Finger up without a fling at pixel `(x, y)`.
    ///
    /// A tap on a point focuses it; otherwise the chart snaps or auto-scales.
    pub fn on_up(&mut self, now: Duration, x: f32, y: f32) {
        self.now = now;
        self.manager.compute_points_within_x_range(&self.data_sets);
        let tapped = self.manager.clicked_on_marker(
            now,
            &mut self.physics,
            x,
            y,
            self.config.point_click_radius,
            self.config.snap_duration,
        );
        if !tapped {
            self.settle(now);
        } else if !self.manager.scroll_in_progress() {
            // Tapped the point already on the centre line.
            self.scale(now);
        }
    }

    // --- Commands ------------------------------------------------------

    /// Centre the first point and auto-scale.
    pub fn move_start(&mut self) {
        self.manager.move_start(&self.data_sets);
        self.scale(self.now);
    }

    /// Centre the last point and auto-scale.
    pub fn move_end(&mut self) {
        self.manager.move_end(&self.data_sets);
        self.scale(self.now);
    }

    /// Animate a pan by `dx` data units.
    pub fn scroll_x_by(&mut self, now: Duration, dx: f64) -> bool {
        self.now = now;
        self.manager
            .scroll_x_by(now, &mut self.physics, dx, self.config.snap_duration)
    }

    /// Snap the nearest X stop onto the centre line.
    pub fn snap_to_closest_point(&mut self, now: Duration) -> bool {
        self.now = now;
        self.manager
            .snap_to_closest_x_stop(now, &mut self.physics, self.config.snap_duration)
    }

    /// Auto-scale to the points in view.
    pub fn scale(&mut self, now: Duration) -> bool {
        self.now = now;
        self.manager
            .auto_scale(now, &mut self.scaler, self.bottom_offset, &self.data_sets)
    }

    /// Finish the running auto-scale immediately.
    pub fn abort_scale(&mut self) {
        if self.scaler.is_animating() {
            self.scaler.abort();
            self.manager.set_y_range(self.scaler.current());
        }
    }

    // --- Frame ---------------------------------------------------------

    /// Advance physics and the auto-scaler to `now` and apply them.
    pub fn frame(&mut self, now: Duration) -> FrameStatus {
        profile_scope!("graph_frame");
        self.now = now;
        let mut status = FrameStatus::empty();

        match self.manager.on_physics_tick(now, &mut self.physics) {
            PhysicsTick::Idle => {}
            PhysicsTick::Scrolled => status |= FrameStatus::SCROLLED,
            PhysicsTick::ScrollFinished => {
                status |= FrameStatus::SCROLLED | FrameStatus::SCROLL_FINISHED;
                self.scale(now);
            }
            PhysicsTick::FlingFinished => {
                status |= FrameStatus::FLING_FINISHED;
                if self.settle(now) {
                    status |= FrameStatus::SNAPPED;
                }
            }
        }

        if let Some(range) = self.scaler.tick(now).range() {
            self.manager.set_y_range(range);
            status |= FrameStatus::SCALED;
        }

        if status.intersects(FrameStatus::SCROLLED | FrameStatus::SCALED) {
            self.refresh_closest();
        }
        status
    }

    /// Snap when enabled, otherwise (or when already aligned) auto-scale.
    /// Returns `true` if a snap scroll started.
    fn settle(&mut self, now: Duration) -> bool {
        if self.config.snap_enabled && self.snap_to_closest_point(now) {
            return true;
        }
        self.scale(now);
        false
    }

    fn refresh_closest(&mut self) {
        self.manager.compute_points_within_x_range(&self.data_sets);
        self.manager.compute_closest_points();
    }

    // --- Render queries ------------------------------------------------

    /// Mapping for drawing, `None` until layout and data are in place.
    pub fn transform(&self) -> Option<ViewportTransform> {
        self.manager.transform()
    }

    pub fn viewport(&self) -> &ViewportRect {
        self.manager.viewport()
    }

    pub fn content_rect(&self) -> &Rect {
        self.manager.content_rect()
    }

    /// X-axis labels with their pixel X positions.
    pub fn x_axis_labels(&self) -> Vec<AxisLabel> {
        let Some(t) = self.transform() else {
            return Vec::new();
        };
        self.manager
            .x_stops()
            .values()
            .iter()
            .map(|&value| AxisLabel {
                value,
                position: t.to_draw_x(value),
                text: self.x_formatter.format_value(value),
            })
            .collect()
    }

    /// Y-axis labels with their pixel Y positions, `digits` decimals each.
    pub fn y_axis_labels(&self, digits: usize) -> Vec<AxisLabel> {
        let Some(t) = self.transform() else {
            return Vec::new();
        };
        self.manager
            .y_stops()
            .values()
            .iter()
            .map(|&value| AxisLabel {
                value,
                position: t.to_draw_y(value),
                text: format_float(value, digits),
            })
            .collect()
    }

    /// Label for the points on the centre line; empty when there are none.
    pub fn central_label(&self) -> String {
        let points = self.manager.closest_points();
        if points.is_empty() {
            return String::new();
        }
        self.label_formatter.format_label(points)
    }

    pub fn closest_points(&self) -> &[DataPoint] {
        self.manager.closest_points()
    }

    pub fn data_sets(&self) -> &[DataSet] {
        &self.data_sets
    }

    pub fn manager(&self) -> &ViewportManager {
        &self.manager
    }

    pub fn scaler(&self) -> &VerticalAutoScaler {
        &self.scaler
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut P {
        &mut self.physics
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    // --- Runtime settings ----------------------------------------------

    pub fn set_visible_x_range(&mut self, range: u32) -> ConfigResult<()> {
        validate_visible_range(range).inspect_err(|err| debug!(%err, "Rejected setting"))?;
        self.config.visible_x_range = range;
        self.manager.set_visible_x_range(range);
        self.refresh_closest();
        Ok(())
    }

    pub fn set_x_interval(&mut self, interval: u32) -> ConfigResult<()> {
        validate_x_interval(interval).inspect_err(|err| debug!(%err, "Rejected setting"))?;
        self.config.x_interval = interval;
        self.manager.set_x_interval(interval);
        Ok(())
    }

    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.config.snap_enabled = enabled;
    }

    pub fn set_scale_duration(&mut self, duration: Duration) -> ConfigResult<()> {
        validate_duration("scale duration", duration)
            .inspect_err(|err| debug!(%err, "Rejected setting"))?;
        self.config.scale_duration = duration;
        self.scaler.set_duration(duration);
        Ok(())
    }

    pub fn set_snap_duration(&mut self, duration: Duration) -> ConfigResult<()> {
        validate_duration("snap duration", duration)
            .inspect_err(|err| debug!(%err, "Rejected setting"))?;
        self.config.snap_duration = duration;
        Ok(())
    }

    pub fn set_x_formatter(&mut self, formatter: impl ValueFormatter + 'static) {
        self.x_formatter = Box::new(formatter);
    }

    pub fn set_label_formatter(&mut self, formatter: impl LabelFormatter + 'static) {
        self.label_formatter = Box::new(formatter);
    }
}
