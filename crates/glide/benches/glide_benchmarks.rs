#![forbid(unsafe_code)]

//! Benchmarks for the scroll engine.

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use glide::{
    ManualFrameClock, Mode, ScrollConfig, ScrollEngine, ScrollExtent, ScrollRegion,
    SimulationState, VelocityHistory, advance,
};

fn bench_advance(c: &mut Criterion) {
    let config = ScrollConfig::default();
    let extent = ScrollExtent::new(2000.0, 500.0, 700.0);

    c.bench_function("advance_momentum_step", |b| {
        b.iter_batched(
            || SimulationState::in_motion(&config, Mode::Momentum, -37.5),
            |mut state| advance(black_box(&mut state), black_box(&extent), &config),
            BatchSize::SmallInput,
        );
    });

    let overscrolled = ScrollExtent::new(2000.0, 500.0, -120.0);
    c.bench_function("advance_elastic_step", |b| {
        b.iter_batched(
            || SimulationState::in_motion(&config, Mode::Elastic, 0.0),
            |mut state| advance(black_box(&mut state), black_box(&overscrolled), &config),
            BatchSize::SmallInput,
        );
    });
}

fn bench_release_velocity(c: &mut Criterion) {
    let mut history = VelocityHistory::new(10);
    for i in 0..10 {
        history.push(f64::from(i) * 3.5);
    }

    c.bench_function("release_velocity", |b| {
        b.iter(|| black_box(&history).release_velocity(black_box(5)));
    });
}

fn bench_full_fling(c: &mut Criterion) {
    c.bench_function("drag_fling_settle", |b| {
        b.iter(|| {
            let mut region = ScrollRegion::new(20_000.0, 500.0).with_scroll_offset(1000.0);
            let mut engine = ScrollEngine::new(ScrollConfig::default(), ManualFrameClock::new());

            engine.pointer_down(800.0, 0.0, &region);
            for i in 1..=12 {
                engine.pointer_move(800.0 - f64::from(i) * 25.0, f64::from(i) * 8.0, &mut region);
            }
            engine.pointer_up(&region);
            black_box(engine.run_until_idle(&mut region, 10_000))
        });
    });
}

criterion_group!(
    glide_benches,
    bench_advance,
    bench_release_velocity,
    bench_full_fling
);
criterion_main!(glide_benches);
