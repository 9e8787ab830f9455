//! Axis stop (tick) generation.
//!
//! Two strategies are used by the chart:
//! - [`compute_stops`]: adaptive integer spacing covering a value range,
//!   used for the Y axis during auto-scale.
//! - [`x_axis_stops`]: a fixed number of evenly spaced stops starting at the
//!   first integer inside the viewport, used for the X axis.

use tracing::warn;

/// Largest bound magnitude stepped in integers. Past 2^53 an `f64` no longer
/// holds every integer, and the `i64` stepping below keeps headroom for the
/// flat-range widening and the upward interval search.
const MAX_STOP_MAGNITUDE: f64 = 9_007_199_254_740_992.0;

/// An ordered set of tick values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisStops {
    values: Vec<f64>,
}

impl AxisStops {
    /// An empty stop set ("nothing to draw").
    pub fn empty() -> Self {
        Self::default()
    }

    /// Stops in increasing order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Lowest stop.
    pub fn first(&self) -> Option<f64> {
        self.values.first().copied()
    }

    /// Highest stop.
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Spacing between consecutive stops, `None` with fewer than two stops.
    pub fn step(&self) -> Option<f64> {
        match self.values.as_slice() {
            [a, b, ..] => Some(b - a),
            _ => None,
        }
    }

    /// Replace the contents with `count` values `start, start + step, ...`,
    /// reusing the existing allocation.
    fn fill(&mut self, start: f64, step: f64, count: usize) {
        self.values.clear();
        self.values.reserve(count);
        let mut value = start;
        for _ in 0..count {
            self.values.push(value);
            value += step;
        }
    }
}

/// Compute integer-aligned stops covering `[min, max]`.
///
/// `target_step_count` is the starting guess for the number of intervals; the
/// search walks upward from it until the spacing `ceil(range / count)` no
/// longer lands exactly on the end. Stops start at `floor(min)` and run until
/// the first stop beyond `ceil(max)`.
///
/// - `max < min` (or non-finite input) yields an empty set.
/// - Bounds beyond ±2^53 cannot be stepped in integers and also yield an
///   empty set.
/// - A flat integral range is widened by `target_step_count` units on each
///   side and stepped by one, giving at least `2 * target_step_count + 1` stops.
pub fn compute_stops(min: f64, max: f64, target_step_count: u32) -> AxisStops {
    let mut stops = AxisStops::empty();
    compute_stops_into(&mut stops, min, max, target_step_count);
    stops
}

/// [`compute_stops`] writing into an existing buffer.
pub fn compute_stops_into(stops: &mut AxisStops, min: f64, max: f64, target_step_count: u32) {
    if !min.is_finite() || !max.is_finite() || max < min {
        stops.values.clear();
        return;
    }

    let (lo, hi) = (min.floor(), max.ceil());
    if lo < -MAX_STOP_MAGNITUDE || hi > MAX_STOP_MAGNITUDE {
        warn!(min, max, "Axis range too large for integer stops");
        stops.values.clear();
        return;
    }

    let mut steps = i64::from(target_step_count.max(1));
    let mut start = lo as i64;
    let mut end = hi as i64;
    let range = end - start;

    let interval = if range == 0 {
        start -= steps;
        end += steps;
        1
    } else {
        let mut interval = div_ceil(range, steps);
        while start + interval * steps <= end {
            steps += 1;
            interval = div_ceil(range, steps);
        }
        interval
    };

    // Every stop up to `end` plus the first one past it.
    let count = ((end - start) / interval + 2) as usize;
    stops.fill(start as f64, interval as f64, count);
}

/// `visible_range` consecutive X stops starting at `ceil(viewport_left)`,
/// spaced by `x_interval`.
pub fn x_axis_stops(viewport_left: f64, visible_range: u32, x_interval: u32) -> AxisStops {
    let mut stops = AxisStops::empty();
    x_axis_stops_into(&mut stops, viewport_left, visible_range, x_interval);
    stops
}

/// [`x_axis_stops`] writing into an existing buffer.
pub fn x_axis_stops_into(
    stops: &mut AxisStops,
    viewport_left: f64,
    visible_range: u32,
    x_interval: u32,
) {
    if !viewport_left.is_finite() {
        stops.values.clear();
        return;
    }
    stops.fill(
        viewport_left.ceil(),
        f64::from(x_interval),
        visible_range as usize,
    );
}

#[inline]
fn div_ceil(a: i64, b: i64) -> i64 {
    (a + b - 1) / b
}
