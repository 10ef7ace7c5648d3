//! Performance benchmarks for route-projector-lib
//!
//! Run with: cargo bench --package route-projector-lib

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use route_projector_lib::{
    RenderConfig, RouteLeg, RoutePoint, build_render_model, decode_polyline, encode_polyline,
    render,
};

/// Generate a wiggly walk with the specified number of points
fn generate_walk(num_points: usize, base_lat: f64, base_lng: f64) -> Vec<RoutePoint> {
    (0..num_points)
        .map(|i| {
            let t = i as f64 / num_points as f64;
            RoutePoint::new(
                base_lat + t * 0.01 + (t * 50.0).sin() * 0.0005,
                base_lng + t * 0.01 + (t * 30.0).cos() * 0.0005,
            )
        })
        .collect()
}

/// Split a walk into connected legs
fn generate_legs(num_legs: usize, points_per_leg: usize) -> Vec<RouteLeg> {
    let walk = generate_walk(num_legs * points_per_leg + 1, 25.75, -80.38);
    (0..num_legs)
        .map(|i| {
            let start = i * points_per_leg;
            RouteLeg::new(encode_polyline(&walk[start..=start + points_per_leg]))
        })
        .collect()
}

// ============================================================================
// Core Benchmarks
// ============================================================================

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    let encoded = encode_polyline(&generate_walk(10_000, 25.75, -80.38));
    group.throughput(Throughput::Elements(10_000));
    group.bench_function("decode_10k", |b| {
        b.iter(|| decode_polyline(&encoded));
    });

    group.finish();
}

fn bench_render_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    // A day on campus: a handful of legs with a few hundred points each
    let legs = generate_legs(6, 200);
    let config = RenderConfig::default();

    group.bench_function("build_model_6x200", |b| {
        b.iter(|| build_render_model(&legs, &config));
    });

    let model = build_render_model(&legs, &config);
    group.bench_function("render_6x200", |b| {
        b.iter(|| render(&model, config.width, config.height));
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(benches, bench_decode, bench_render_pipeline);

criterion_main!(benches);
