//! Benchmarks for the envelope follower.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use strike_dsp::analysis::EnvelopeFollower;

use crate::BLOCK_SIZES;

pub fn bench_follower(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/follower");

    for &size in BLOCK_SIZES {
        // Sawtooth-like ramp as the test signal.
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        let mut follower = EnvelopeFollower::new(48_000.0, 0.002, 0.05);
        group.bench_with_input(BenchmarkId::new("step", size), &size, |b, _| {
            b.iter(|| {
                let mut acc = 0.0;
                for &x in &input {
                    acc += follower.step(black_box(x));
                }
                black_box(acc)
            })
        });
    }

    group.finish();
}
