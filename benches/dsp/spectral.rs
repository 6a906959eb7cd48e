//! Benchmarks for the spectral analyzer.
//!
//! The push path runs per sample and must be trivially cheap; the
//! centroid runs a windowed FFT but only fires once per onset.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use strike_dsp::analysis::SpectralAnalyzer;

use crate::BLOCK_SIZES;

pub fn bench_spectral(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/spectral");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 * 0.3).sin() * 0.8)
            .collect();

        let mut analyzer = SpectralAnalyzer::new(48_000.0, 1_024);
        group.bench_with_input(BenchmarkId::new("push", size), &size, |b, _| {
            b.iter(|| {
                for &x in &input {
                    analyzer.push(black_box(x));
                }
            })
        });
    }

    // One centroid evaluation over a full window, the per-onset cost.
    let mut analyzer = SpectralAnalyzer::new(48_000.0, 1_024);
    for i in 0..2_048 {
        analyzer.push((i as f32 * 0.3).sin() * 0.8);
    }
    group.bench_function("centroid/1024", |b| {
        b.iter(|| black_box(analyzer.centroid()))
    });

    group.finish();
}
