//! Benchmarks for the two-voice snare.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use strike_dsp::synth::{DrumParams, SnareDrum};

use crate::BLOCK_SIZES;

pub fn bench_drum(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/drum");

    for &size in BLOCK_SIZES {
        let mut drum = SnareDrum::new(48_000.0);
        drum.retrigger(&DrumParams::default());

        group.bench_with_input(BenchmarkId::new("process", size), &size, |b, _| {
            b.iter(|| {
                let mut acc = 0.0;
                for _ in 0..size {
                    acc += drum.process();
                }
                black_box(acc)
            })
        });
    }

    let mut drum = SnareDrum::new(48_000.0);
    group.bench_function("retrigger", |b| {
        b.iter(|| drum.retrigger(black_box(&DrumParams::default())))
    });

    group.finish();
}
