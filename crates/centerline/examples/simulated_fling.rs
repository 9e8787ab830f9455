//! Simulated Fling
//!
//! This example demonstrates:
//! - Feeding a gesture sequence into a `GraphController` without a window
//! - Driving frames with a fixed 60 Hz timestep
//! - Reading axis labels and the centre-line label after each phase
//!
//! The script drags a 90 day weight series, flings it towards the start, taps
//! a point, then jumps to the end. Frame-level detail is logged at `trace`.
//!
//! Run with: cargo run -p centerline --example simulated_fling
//! Set RUST_LOG=centerline=trace to see every physics poll.

use std::time::Duration;

use centerline::{DataPoint, DataSet, FrameStatus, GraphConfig, GraphController, Rect};
use centerline_core::logging;
use centerline_core::profiling::{ProfilingBackend, init_profiling, new_frame};
use tracing::info;

const FRAME: Duration = Duration::from_micros(16_667);

fn weight_series() -> DataSet {
    (1..=90)
        .map(|day| {
            let trend = 82.0 - day as f64 * 0.08;
            let noise = ((day * 7919) % 13) as f64 / 10.0 - 0.6;
            DataPoint::new(day as f64, ((trend + noise) * 10.0).round() / 10.0)
        })
        .collect()
}

/// Run frames until the chart is idle, returning the new time.
fn run_until_idle(chart: &mut GraphController, mut now: Duration, phase: &str) -> Duration {
    let mut frames = 0u32;
    let mut seen = FrameStatus::empty();
    loop {
        new_frame();
        let status = chart.frame(now);
        if !status.needs_redraw() {
            break;
        }
        seen |= status;
        frames += 1;
        now += FRAME;
    }
    info!(phase, frames, ?seen, "Settled");
    report(chart);
    now
}

fn report(chart: &GraphController) {
    let v = chart.viewport();
    let x_labels: Vec<String> = chart.x_axis_labels().into_iter().map(|l| l.text).collect();
    let y_labels: Vec<String> = chart
        .y_axis_labels(1)
        .into_iter()
        .map(|l| l.text)
        .collect();
    info!(
        left = v.left,
        right = v.right,
        min_y = v.top,
        max_y = v.bottom,
        "Viewport"
    );
    info!("X axis: {}", x_labels.join(" | "));
    info!("Y axis: {}", y_labels.join(" | "));
    info!("Centre: {:?}", chart.central_label());
}

fn main() {
    logging::init();
    init_profiling(ProfilingBackend::InProcess);

    let config = GraphConfig::default()
        .with_visible_x_range(14)
        .with_x_interval(2);
    let mut chart = match GraphController::new(config) {
        Ok(chart) => chart,
        Err(err) => {
            tracing::error!("Invalid chart config: {}", err);
            return;
        }
    };

    chart.set_content_rect(Rect::new(0.0, 0.0, 1080.0, 640.0));
    chart.set_bottom_offset(48.0);
    chart.set_x_formatter(|day: f64| format!("d{day}"));
    chart.add_data_set(weight_series());

    let mut now = run_until_idle(&mut chart, Duration::ZERO, "initial scale");

    // Drag a little, then release without flinging.
    chart.on_down(now);
    for _ in 0..10 {
        now += FRAME;
        chart.on_scroll(-12.0, 0.0);
        chart.frame(now);
    }
    chart.on_up(now, -100.0, -100.0);
    now = run_until_idle(&mut chart, now, "drag and release");

    // Fling towards the first day.
    chart.on_down(now);
    chart.on_fling(now, -4200.0, 0.0);
    now = run_until_idle(&mut chart, now, "fling");

    // Tap the point left of the centre line.
    if let Some(t) = chart.transform() {
        let center = chart.viewport().center_x();
        let target = chart
            .manager()
            .points_in_range()
            .iter()
            .rev()
            .find(|p| p.x < center)
            .copied();
        if let Some(p) = target {
            let drawn = t.to_draw(p);
            chart.on_down(now);
            chart.on_up(now, drawn.x, drawn.y);
            now = run_until_idle(&mut chart, now, "tap to focus");
        }
    }

    chart.move_end();
    run_until_idle(&mut chart, now, "move to end");
}
