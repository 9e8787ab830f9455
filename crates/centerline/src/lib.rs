//! Centerline - interactive line-chart viewport engine
//!
//! This crate provides the state and interaction logic behind a horizontally
//! scrolling line chart whose "current" value sits on a vertical centre line:
//! - Datasets with incrementally maintained bounds
//! - Integer-aligned axis stops for both axes
//! - Data-to-pixel mapping through a logical viewport
//! - Kinetic panning over a virtual scroll surface
//! - Snapping to the nearest X stop after a gesture
//! - Animated vertical auto-scaling to the visible points
//!
//! Nothing here draws or reads a clock. Hosts feed gestures and a `now`
//! timestamp into a [`GraphController`], poll it once per frame, and render
//! from its [`ViewportTransform`] and axis labels.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use centerline::{DataSet, GraphConfig, GraphController, Rect};
//!
//! let mut chart = GraphController::new(GraphConfig::default().with_visible_x_range(5))?;
//! chart.set_content_rect(Rect::new(0.0, 0.0, 500.0, 300.0));
//! chart.add_data_set(DataSet::from_tuples(&[(1.0, 70.2), (2.0, 70.8), (3.0, 69.9)]));
//!
//! // Drag, release, and let the snap and auto-scale play out.
//! chart.on_down(Duration::ZERO);
//! chart.on_scroll(-40.0, 0.0);
//! chart.on_up(Duration::ZERO, -1.0, -1.0);
//! let mut now = Duration::ZERO;
//! while chart.frame(now).needs_redraw() {
//!     now += Duration::from_millis(16);
//! }
//!
//! let t = chart.transform().expect("laid out");
//! let _x = t.to_draw_x(2.0);
//! # Ok::<(), centerline::ConfigError>(())
//! ```

pub mod axis;
pub mod config;
pub mod controller;
pub mod data;
pub mod easing;
pub mod format;
pub mod manager;
pub mod physics;
pub mod rect;
pub mod scaler;
pub mod scroller;
pub mod surface;
pub mod time;
pub mod transform;

pub use axis::{AxisStops, compute_stops, x_axis_stops};
pub use config::{ConfigError, ConfigResult, GraphConfig};
pub use controller::{AxisLabel, FrameStatus, GraphController};
pub use data::{DataBounds, DataPoint, DataSet};
pub use easing::Easing;
pub use format::{
    DefaultValueFormatter, LabelFormatter, UnitLabelFormatter, ValueFormatter, format_float,
};
pub use manager::{PhysicsTick, ViewportManager};
pub use physics::{FlingParams, ScrollPhysics, ScrollSample};
pub use rect::{Rect, ViewportRect};
pub use scaler::{ScaleTick, ScalerState, VerticalAutoScaler, YRange};
pub use scroller::Scroller;
pub use surface::ScrollSurface;
pub use time::FrameClock;
pub use transform::ViewportTransform;

pub use glam::Vec2;
