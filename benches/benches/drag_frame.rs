// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size, Vec2};
use stagehand_handles::{
    BOUNDARY_MARGIN, Boundary, Handle, MIN_SIZE, Modifiers, hit_test, resize_rect,
};
use stagehand_transform::{CssTransform, Placement, StyleSnapshot, SwapMode};

const START: Rect = Rect::new(225.0, 500.0, 475.0, 700.0);

/// Pointer offsets along a spiral, like a jittery drag.
fn offsets(n: usize) -> Vec<Vec2> {
    (0..n)
        .map(|i| {
            let t = i as f64 * 0.05;
            Vec2::new(t.cos() * t * 4.0, t.sin() * t * 3.0)
        })
        .collect()
}

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_frame/resize_rect");
    let offsets = offsets(1_024);
    group.throughput(Throughput::Elements(offsets.len() as u64));

    for (name, modifiers) in [
        ("free", Modifiers::empty()),
        ("aspect", Modifiers::SHIFT),
        ("center", Modifiers::CTRL),
        ("aspect_center", Modifiers::SHIFT | Modifiers::ALT),
    ] {
        group.bench_with_input(BenchmarkId::new(name, "se"), &offsets, |b, offsets| {
            b.iter(|| {
                for &offset in offsets {
                    black_box(resize_rect(
                        black_box(START),
                        Handle::Se,
                        offset,
                        modifiers,
                        MIN_SIZE,
                    ));
                }
            });
        });
    }
    group.finish();
}

/// One whole frame as the editor computes it: candidate box, boundary check,
/// then the placement that renders the candidate.
fn bench_full_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_frame/full");
    let offsets = offsets(1_024);
    group.throughput(Throughput::Elements(offsets.len() as u64));

    let style = StyleSnapshot {
        transform: "translate(-50%, -50%)".into(),
        ..StyleSnapshot::default()
    };
    let boundary = Boundary::new(Size::new(1000.0, 800.0), BOUNDARY_MARGIN);

    for mode in [SwapMode::Transform, SwapMode::LayoutBox] {
        let start = Placement::capture(&style, START.size(), START, mode);
        let min = start.min_visual_size(MIN_SIZE);
        group.bench_with_input(
            BenchmarkId::new("se", format!("{mode:?}")),
            &offsets,
            |b, offsets| {
                b.iter(|| {
                    let mut applied = 0_u32;
                    for &offset in offsets {
                        let candidate =
                            resize_rect(START, Handle::Se, offset, Modifiers::empty(), min);
                        if !boundary.admits(START, candidate) {
                            continue;
                        }
                        if let Some(next) = start.fitted(candidate) {
                            black_box(next.edit_patch());
                            applied += 1;
                        }
                    }
                    black_box(applied)
                });
            },
        );
    }
    group.finish();
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_frame/hit_test");
    let points: Vec<Point> = (0..32)
        .flat_map(|y| {
            (0..32).map(move |x| Point::new(200.0 + f64::from(x) * 9.0, 480.0 + f64::from(y) * 8.0))
        })
        .collect();
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("grid", |b| {
        b.iter(|| {
            for &p in &points {
                black_box(hit_test(START, p, 10.0));
            }
        });
    });
    group.finish();
}

fn bench_parse_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_frame/css");
    for text in [
        "translate(-50%, -50%)",
        "translate(-50%, -50%) scale(1.4, 1.25) rotate(12deg)",
        "matrix(0.866, 0.5, -0.5, 0.866, 10, 20)",
    ] {
        group.bench_with_input(BenchmarkId::new("parse", text.len()), text, |b, text| {
            b.iter(|| black_box(CssTransform::parse(black_box(text))));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_resize,
    bench_full_frame,
    bench_hit_test,
    bench_parse_transform
);
criterion_main!(benches);
