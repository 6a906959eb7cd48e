//! The complete analysis-to-synthesis chain, as the audio callback runs it.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use strike_dsp::{ControlFrame, DrumController};

use crate::BLOCK_SIZES;

pub fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/pipeline");
    let frame = ControlFrame::default();

    for &size in BLOCK_SIZES {
        // Loud alternating input so the detector and drum paths stay hot.
        let input: Vec<f32> = (0..size)
            .map(|i| if i % 2 == 0 { 0.9 } else { -0.9 })
            .collect();
        let mut output = vec![0.0f32; size];

        let mut controller = DrumController::new(48_000.0).unwrap();
        group.bench_with_input(BenchmarkId::new("process_block", size), &size, |b, _| {
            b.iter(|| {
                controller.process_block(black_box(&frame), &input, &mut output);
                black_box(output[0])
            })
        });
    }

    // Per-sample cost in isolation, the number that has to fit the
    // tightest callback budget.
    let mut controller = DrumController::new(48_000.0).unwrap();
    controller.apply_control(&frame);
    group.bench_function("process_sample", |b| {
        b.iter(|| black_box(controller.process(black_box(0.5))))
    });

    group.finish();
}
