//! End-to-end gesture flows through [`GraphController`].

use std::time::Duration;

use centerline::{
    DataPoint, DataSet, FrameStatus, GraphConfig, GraphController, Rect, ScrollPhysics,
};

const FRAME: Duration = Duration::from_millis(16);

fn weights() -> DataSet {
    (1..=60)
        .map(|day| DataPoint::new(day as f64, 70.0 + ((day * 13) % 9) as f64 / 2.0))
        .collect()
}

fn chart(config: GraphConfig) -> GraphController {
    let mut chart = GraphController::new(config).expect("valid config");
    chart.set_content_rect(Rect::new(0.0, 0.0, 700.0, 400.0));
    chart.add_data_set(weights());
    chart
}

/// Run frames until nothing changes, returning the end time and every flag seen.
fn settle(chart: &mut GraphController, mut now: Duration) -> (Duration, FrameStatus) {
    let mut seen = FrameStatus::empty();
    for _ in 0..5000 {
        let status = chart.frame(now);
        if !status.needs_redraw() {
            return (now, seen);
        }
        seen |= status;
        now += FRAME;
    }
    panic!("chart never settled");
}

fn assert_centered_on_stop(chart: &GraphController) {
    let center = chart.viewport().center_x();
    assert!(
        (center - center.round()).abs() < 1e-6,
        "centre {center} not on a stop"
    );
}

fn assert_scaled_to_stops(chart: &GraphController) {
    let stops = chart.manager().y_stops();
    let range = chart.manager().y_range();
    assert_eq!(range.min, stops.first().unwrap());
    assert_eq!(range.max, stops.last().unwrap());
    for p in chart.manager().points_in_range() {
        assert!(p.y >= range.min && p.y <= range.max, "{p:?} outside {range:?}");
    }
}

#[test]
fn test_fling_then_snap_and_scale() {
    let mut chart = chart(GraphConfig::default());
    let (now, _) = settle(&mut chart, Duration::ZERO);
    let start = chart.viewport().center_x();

    chart.on_down(now);
    chart.on_scroll(-60.0, 0.0);
    chart.on_fling(now, -1800.0, 0.0);

    let (_, seen) = settle(&mut chart, now);
    assert!(seen.contains(FrameStatus::SCROLLED));
    assert!(seen.contains(FrameStatus::FLING_FINISHED));
    assert!(chart.viewport().center_x() < start);

    assert_centered_on_stop(&chart);
    assert_scaled_to_stops(&chart);
    assert!(!chart.scaler().is_animating());
    assert!(chart.physics().is_finished());

    let center = chart.viewport().center_x();
    assert!(!chart.closest_points().is_empty());
    assert!(
        chart
            .closest_points()
            .iter()
            .all(|p| (p.x - center).abs() < 1e-6)
    );
}

#[test]
fn test_fling_without_snap_only_scales() {
    let mut chart = chart(GraphConfig::default().with_snap_enabled(false));
    let (now, _) = settle(&mut chart, Duration::ZERO);

    chart.on_down(now);
    chart.on_fling(now, -900.0, 0.0);
    let (_, seen) = settle(&mut chart, now);

    assert!(seen.contains(FrameStatus::FLING_FINISHED));
    assert!(!seen.contains(FrameStatus::SNAPPED));
    assert!(!seen.contains(FrameStatus::SCROLL_FINISHED));
    assert_scaled_to_stops(&chart);
}

#[test]
fn test_touch_down_stops_fling() {
    let mut chart = chart(GraphConfig::default());
    let (mut now, _) = settle(&mut chart, Duration::ZERO);

    chart.on_fling(now, -5000.0, 0.0);
    for _ in 0..5 {
        chart.frame(now);
        now += FRAME;
    }
    chart.on_down(now);
    let held = *chart.viewport();

    for _ in 0..20 {
        now += FRAME;
        let status = chart.frame(now);
        assert!(!status.contains(FrameStatus::SCROLLED));
        assert!(!status.contains(FrameStatus::FLING_FINISHED));
    }
    assert_eq!(chart.viewport().left, held.left);
}

#[test]
fn test_tap_focuses_point() {
    let mut chart = chart(GraphConfig::default());
    let (now, _) = settle(&mut chart, Duration::ZERO);

    let target = chart.manager().points_in_range()[1];
    let t = chart.transform().expect("laid out");
    let drawn = t.to_draw(target);

    chart.on_down(now);
    chart.on_up(now, drawn.x + 3.0, drawn.y + 3.0);
    let (_, seen) = settle(&mut chart, now);

    assert!(seen.contains(FrameStatus::SCROLL_FINISHED));
    assert!((chart.viewport().center_x() - target.x).abs() < 1e-6);
    assert!(chart.closest_points().contains(&target));
    assert_scaled_to_stops(&chart);
}

#[test]
fn test_move_start_and_scroll_by() {
    let mut chart = chart(GraphConfig::default());
    chart.move_start();
    assert_eq!(chart.viewport().center_x(), 1.0);
    assert_eq!(chart.closest_points()[0].x, 1.0);

    let (now, _) = settle(&mut chart, Duration::ZERO);
    assert!(chart.scroll_x_by(now, 5.0));
    settle(&mut chart, now);
    assert!((chart.viewport().center_x() - 6.0).abs() < 1e-6);

    chart.move_end();
    assert_eq!(chart.viewport().center_x(), 60.0);
    assert!(!chart.snap_to_closest_point(now));
}

#[test]
fn test_bottom_offset_keeps_points_above_band() {
    let mut chart = chart(GraphConfig::default());
    chart.set_bottom_offset(80.0);
    let (now, _) = settle(&mut chart, Duration::ZERO);
    chart.scale(now);
    settle(&mut chart, now);

    let t = chart.transform().expect("laid out");
    for p in chart.manager().points_in_range() {
        assert!(t.to_draw_y(p.y) <= 320.0 + 1e-3, "{p:?} drawn inside the band");
    }
}

#[test]
fn test_labels_follow_viewport() {
    let mut chart = chart(GraphConfig::default().with_visible_x_range(5));
    chart.set_x_formatter(|x: f64| format!("Day {x}"));
    chart.move_end();
    settle(&mut chart, Duration::ZERO);

    let labels = chart.x_axis_labels();
    assert_eq!(labels.len(), 5);
    assert_eq!(labels[0].text, "Day 58");
    assert!(
        labels
            .iter()
            .all(|l| (0.0..=700.0).contains(&l.position))
    );

    let expected = format!("{} kg", chart.closest_points()[0].y);
    assert_eq!(chart.central_label(), expected);
    assert!(chart.y_axis_labels(1).iter().all(|l| l.text.contains('.')));
}

#[test]
fn test_empty_chart_is_quiet() {
    let mut chart = GraphController::new(GraphConfig::default()).expect("valid config");
    chart.set_content_rect(Rect::new(0.0, 0.0, 700.0, 400.0));
    chart.on_down(Duration::ZERO);
    chart.on_scroll(50.0, 0.0);
    chart.on_fling(Duration::ZERO, 2000.0, 0.0);
    chart.on_up(Duration::ZERO, 10.0, 10.0);

    assert!(!chart.frame(Duration::ZERO).contains(FrameStatus::SCALED));
    assert!(chart.transform().is_none());
    assert!(chart.x_axis_labels().is_empty());
    assert_eq!(chart.central_label(), "");
}
