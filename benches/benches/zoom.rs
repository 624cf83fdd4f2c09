// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Size, Vec2};
use understory_zoom::{
    Alignment, AnimationSpec, ContentLayout, ContentScale, ReadMode, ZoomConfig, ZoomEngine,
    compute_initial_zoom,
};

const CONTAINER: Size = Size::new(1080.0, 1920.0);

fn engine(content: Size) -> ZoomEngine {
    let config = ZoomConfig::default()
        .with_read_mode(Some(ReadMode::default()))
        .with_animation_spec(AnimationSpec::default());
    let mut engine = ZoomEngine::with_config(config);
    engine.set_container_size(CONTAINER);
    engine.set_content_size(content);
    engine
}

fn bench_initial_zoom(c: &mut Criterion) {
    let mut group = c.benchmark_group("zoom/initial_zoom");
    let read_mode = ReadMode::default();

    for rotation in [0_u32, 90, 180, 270] {
        let layout = ContentLayout::new(
            CONTAINER,
            Size::new(7_000.0, 30_000.0),
            ContentScale::Fit,
            Alignment::Center,
            rotation,
        );
        group.bench_with_input(
            BenchmarkId::new("long_image", rotation),
            &layout,
            |b, layout| {
                b.iter(|| {
                    black_box(compute_initial_zoom(
                        black_box(layout),
                        Size::new(14_000.0, 60_000.0),
                        Some(&read_mode),
                        3.0,
                    ))
                });
            },
        );
    }

    group.finish();
}

fn bench_gesture_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("zoom/gesture_transform");

    // A pinch delivers one update per frame; model gestures of increasing length.
    for steps in [16_usize, 120, 960] {
        group.throughput(Throughput::Elements(steps as u64));
        group.bench_with_input(BenchmarkId::new("pinch_pan", steps), &steps, |b, &steps| {
            b.iter_batched(
                || engine(Size::new(6_000.0, 4_000.0)),
                |mut engine| {
                    for i in 0..steps {
                        let zoom = if i % 2 == 0 { 1.02 } else { 0.99 };
                        engine.gesture_transform(
                            Point::new(540.0, 960.0),
                            Vec2::new(3.0, -2.0),
                            zoom,
                            0.0,
                        );
                    }
                    black_box(engine.transform());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_animations(c: &mut Criterion) {
    let mut group = c.benchmark_group("zoom/animation");

    group.bench_function("switch_scale_to_completion", |b| {
        b.iter_batched(
            || engine(Size::new(6_000.0, 4_000.0)),
            |mut engine| {
                engine.switch_scale(None, true);
                let mut now = 0;
                while engine.on_frame(now) {
                    now += 16;
                }
                black_box(engine.transform());
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("fling_to_completion", |b| {
        b.iter_batched(
            || {
                let mut engine = engine(Size::new(6_000.0, 4_000.0));
                engine.scale(engine.max_scale(), None, false);
                engine
            },
            |mut engine| {
                engine.fling(-2_500.0, 1_200.0);
                let mut now = 0;
                while engine.on_frame(now) {
                    now += 16;
                }
                black_box(engine.user_transform());
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_initial_zoom,
    bench_gesture_stream,
    bench_animations
);
criterion_main!(benches);
