use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use ndarray::Array2;
use zebrafish_render::{
    CanvasShape, Compositor, LabelArray, Placement, SpaceTime, Strictness, viz::rasterize,
};

#[derive(Clone, Copy)]
struct ComposeConfig {
    name: &'static str,
    rows: usize,
    cols: usize,
}

const COMPOSE_CONFIGS: &[ComposeConfig] = &[
    ComposeConfig {
        name: "64x64",
        rows: 64,
        cols: 64,
    },
    ComposeConfig {
        name: "128x512",
        rows: 128,
        cols: 512,
    },
    ComposeConfig {
        name: "512x512",
        rows: 512,
        cols: 512,
    },
];

const PLACEMENTS: [(&str, Placement); 4] = [
    ("raw", Placement::Raw),
    ("centered", Placement::Centered),
    ("grow_left", Placement::GrowLeft),
    ("grow_right", Placement::GrowRight),
];

// Snapshots cover roughly the left three quarters of the final canvas.
fn snapshot(cfg: &ComposeConfig) -> LabelArray {
    let cols = (cfg.cols * 3 / 4).max(1);
    LabelArray::Grid(Array2::from_shape_fn((cfg.rows, cols), |(row, col)| {
        ((row * 7 + col * 3) % 3) as i32
    }))
}

fn compose_bench(c: &mut Criterion) {
    for (placement_name, placement) in PLACEMENTS {
        let mut group = c.benchmark_group(format!("compose/{placement_name}"));
        let compositor = Compositor::new(placement, Strictness::Permissive);

        for cfg in COMPOSE_CONFIGS {
            let labels = snapshot(cfg);
            let shape = CanvasShape::new(cfg.rows, cfg.cols);
            group.throughput(Throughput::Elements((cfg.rows * cfg.cols) as u64));
            group.bench_with_input(BenchmarkId::from_parameter(cfg.name), cfg, |b, _| {
                b.iter(|| {
                    let canvas = compositor.compose(&labels, shape).expect("compose");
                    black_box(canvas);
                });
            });
        }
        group.finish();
    }
}

fn space_time_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("space_time");
    for cfg in COMPOSE_CONFIGS {
        let frames = cfg.rows;
        let slice: Vec<i32> = (0..cfg.cols).map(|idx| (idx % 3) as i32).collect();
        group.throughput(Throughput::Elements((frames * cfg.cols) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(cfg.name), cfg, |b, _| {
            b.iter(|| {
                let mut space_time = SpaceTime::new(cfg.cols, frames);
                for column in 0..frames {
                    let len = (column + 1).min(slice.len());
                    space_time
                        .accumulate(column, &slice[..len], Strictness::Permissive)
                        .expect("accumulate");
                }
                black_box(rasterize(&space_time.to_canvas(), 1));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, compose_bench, space_time_bench);
criterion_main!(benches);
