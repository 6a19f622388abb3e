//! Benchmarks for layout normalization and boundary mapping.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use imgslice::{
    map_lines_to_original_boundaries, map_rect_to_original_box, PreviewGeometry, SliceLayout,
};

/// A layout with `n` lines per axis, shuffled and with duplicates.
fn noisy_layout(n: usize, width: u32, height: u32) -> SliceLayout {
    let spread = |i: usize, dim: u32| ((i * 7919) % (dim as usize + 1)) as f64 + 0.25;
    let axis = |dim: u32| -> Vec<f64> {
        (0..n)
            .chain(0..n / 4)
            .map(|i| spread(i, dim))
            .collect()
    };
    SliceLayout {
        horizontal: axis(height),
        vertical: axis(width),
    }
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");

    let small = noisy_layout(8, 4000, 3000);
    let large = noisy_layout(2000, 4000, 3000);

    group.bench_function("normalize_small", |b| {
        b.iter(|| {
            let mut layout = small.clone();
            layout.normalize(black_box(4000), black_box(3000));
            layout
        })
    });

    group.bench_function("normalize_large", |b| {
        b.iter(|| {
            let mut layout = large.clone();
            layout.normalize(black_box(4000), black_box(3000));
            layout
        })
    });

    group.bench_function("grid_100x100", |b| {
        b.iter(|| SliceLayout::grid(black_box(100), black_box(100), 4000, 3000).unwrap())
    });

    group.finish();
}

fn bench_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("mapping");

    // 24000x18000 original behind a 4000x3000 preview
    let geometry = PreviewGeometry::new(24_000, 18_000, 4000).unwrap();
    let large = noisy_layout(2000, 4000, 3000);

    group.bench_function("rect", |b| {
        b.iter(|| {
            map_rect_to_original_box(
                &geometry,
                black_box(123.4),
                black_box(56.7),
                black_box(890.1),
                black_box(234.5),
            )
            .unwrap()
        })
    });

    group.bench_function("boundaries_large", |b| {
        b.iter(|| {
            let mut layout = large.clone();
            map_lines_to_original_boundaries(&geometry, &mut layout).unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_layout, bench_mapping);
criterion_main!(benches);
