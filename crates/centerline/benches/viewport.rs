//! Benchmarks for the per-frame viewport work (visible-point scans, closest
//! point search, auto-scale and a full fling).

use std::time::Duration;

use centerline::{
    DataPoint, DataSet, GraphConfig, GraphController, Rect, VerticalAutoScaler, ViewportManager,
    compute_stops,
};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

const CONTENT: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 1080.0,
    height: 600.0,
};

fn series(len: usize) -> DataSet {
    (0..len)
        .map(|i| DataPoint::new(i as f64, 70.0 + ((i * 37) % 23) as f64 / 4.0))
        .collect()
}

fn manager(data: &DataSet, visible: u32) -> ViewportManager {
    let mut m = ViewportManager::new(&GraphConfig::default().with_visible_x_range(visible));
    m.set_content_rect(CONTENT);
    m.add_data_set(data);
    m
}

fn bench_points_within_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("points_within_x_range");

    for size in [1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));

        let data = vec![series(size)];
        let mut m = manager(&data[0], 30);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                m.compute_points_within_x_range(black_box(&data));
                m.compute_closest_points();
                black_box(m.closest_points().len())
            });
        });
    }

    group.finish();
}

fn bench_auto_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("auto_scale");

    for visible in [7, 90, 365] {
        let data = vec![series(10_000)];
        let mut m = manager(&data[0], visible);

        group.bench_with_input(BenchmarkId::from_parameter(visible), &visible, |b, _| {
            b.iter(|| {
                // A fresh scaler each time so the target is never deduplicated.
                let mut scaler = VerticalAutoScaler::new();
                black_box(m.auto_scale(Duration::ZERO, &mut scaler, 48.0, &data))
            });
        });
    }

    group.finish();
}

fn bench_compute_stops(c: &mut Criterion) {
    c.bench_function("compute_stops", |b| {
        b.iter(|| {
            let mut total = 0;
            for lo in 0..100 {
                let min = 50.0 + lo as f64 * 0.3;
                total += compute_stops(black_box(min), black_box(min + 17.5), 2).len();
            }
            total
        });
    });
}

fn bench_fling_to_rest(c: &mut Criterion) {
    c.bench_function("fling_to_rest", |b| {
        b.iter_batched(
            || {
                let mut chart = GraphController::new(GraphConfig::default()).unwrap();
                chart.set_content_rect(CONTENT);
                chart.add_data_set(series(5_000));
                chart
            },
            |mut chart| {
                let mut now = Duration::from_secs(1);
                chart.on_down(now);
                chart.on_fling(now, black_box(-6000.0), 0.0);
                let mut frames = 0;
                while chart.frame(now).needs_redraw() {
                    now += Duration::from_millis(16);
                    frames += 1;
                }
                black_box(frames)
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_points_within_range,
    bench_auto_scale,
    bench_compute_stops,
    bench_fling_to_rest
);
criterion_main!(benches);
