use std::time::{Duration, Instant};

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;
use lustre::animation::{Easing, Transition, TransitionSlot};
use lustre::gem::{GemController, GemProfile};
use lustre::options::AnimationOptions;

fn easing_benchmark(c: &mut Criterion) {
    let f = Easing::CubicInOut;
    c.bench_function("cubic_in_out_easing", |b| {
        b.iter(|| black_box(f.evaluate(black_box(0.5))))
    });
}

fn transition_sample_benchmark(c: &mut Criterion) {
    let start = Instant::now();
    let mut transition = Transition::new(
        Vec3::ZERO,
        Vec3::new(0.0, 0.0, 0.715),
        Duration::from_millis(1500),
        Easing::CubicInOut,
    );
    let _ = transition.sample(start);
    let mid = start + Duration::from_millis(750);

    c.bench_function("transition_sample", |b| {
        b.iter(|| black_box(transition.sample(black_box(mid))))
    });
}

fn slot_supersede_benchmark(c: &mut Criterion) {
    c.bench_function("slot_begin_supersede", |b| {
        let mut slot = TransitionSlot::idle();
        b.iter(|| {
            slot.begin(
                black_box(Vec3::ZERO),
                black_box(Vec3::ONE),
                Duration::from_millis(1500),
                Easing::CubicInOut,
            );
        })
    });
}

fn controller_update_benchmark(c: &mut Criterion) {
    let tuning = AnimationOptions::default();
    let dt = 1.0 / 60.0;

    c.bench_function("gem_controller_update", |b| {
        let mut controller = GemController::new(GemProfile::diamond());
        let mut now = Instant::now();
        let mut selected = false;
        let mut frame = 0u32;
        b.iter(|| {
            // Flip selection every simulated second to keep both the
            // transition path and the steady-state path hot.
            frame += 1;
            if frame % 60 == 0 {
                selected = !selected;
            }
            now += Duration::from_secs_f32(dt);
            black_box(controller.update(now, dt, selected, &tuning))
        })
    });
}

criterion_group!(
    benches,
    easing_benchmark,
    transition_sample_benchmark,
    slot_supersede_benchmark,
    controller_update_benchmark
);
criterion_main!(benches);
