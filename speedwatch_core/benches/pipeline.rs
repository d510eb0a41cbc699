use criterion::{Criterion, black_box, criterion_group, criterion_main};
use speedwatch_core::mocks::NoopAccelerometer;
use speedwatch_core::{CalibrationBias, SpeedEstimator};
use std::time::{Duration, Instant};

// Generate a synthetic drive: acceleration bursts with additive white noise
fn synth_trace(n: usize, noise_amp: f32, seed: u32) -> Vec<[f32; 3]> {
    // tiny PRNG
    let mut state = seed.max(1);
    let mut next_f32 = || {
        let mut x = state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        state = x;
        (x as f32) / (u32::MAX as f32 + 1.0)
    };
    let mut v = Vec::with_capacity(n);
    for i in 0..n {
        let burst = if (i / 500) % 2 == 0 { 0.08 } else { 0.0 };
        let nx = (next_f32() * 2.0 - 1.0) * noise_amp;
        let ny = (next_f32() * 2.0 - 1.0) * noise_amp;
        let nz = (next_f32() * 2.0 - 1.0) * noise_amp;
        v.push([burst + nx, ny, 1.0 + nz]);
    }
    v
}

pub fn bench_tick(c: &mut Criterion) {
    let mut g = c.benchmark_group("pipeline_tick");
    g.sample_size(50);

    let n = 50_000usize;
    let trace = synth_trace(n, 0.01, 0xC0FFEE);

    g.bench_function("step_from_axes_50k", |b| {
        b.iter(|| {
            let mut est = SpeedEstimator::builder()
                .with_sensor(NoopAccelerometer)
                .with_bias(CalibrationBias {
                    x: 0.0,
                    y: 0.0,
                    z: 1.0,
                })
                .build()
                .unwrap();
            let t0 = Instant::now();
            for (i, raw) in trace.iter().enumerate() {
                let now = t0 + Duration::from_millis((i as u64 + 1) * 10);
                est.step_from_axes(black_box(*raw), now);
            }
            black_box(est.velocity())
        })
    });
    g.finish();
}

criterion_group!(pipeline, bench_tick);
criterion_main!(pipeline);
