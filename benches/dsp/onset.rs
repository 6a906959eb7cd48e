//! Benchmarks for the onset detector state machine.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use strike_dsp::analysis::OnsetDetector;

use crate::BLOCK_SIZES;

pub fn bench_onset(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/onset");

    for &size in BLOCK_SIZES {
        // Envelope sweeping through both thresholds.
        let input: Vec<f32> = (0..size).map(|i| i as f32 / size as f32).collect();

        let mut detector = OnsetDetector::new(0.5, 0.25, 2_400);
        group.bench_with_input(BenchmarkId::new("step", size), &size, |b, _| {
            b.iter(|| {
                let mut fired = 0u32;
                for &envelope in &input {
                    if detector.step(black_box(envelope)).is_some() {
                        fired += 1;
                    }
                }
                black_box(fired)
            })
        });
    }

    group.finish();
}
