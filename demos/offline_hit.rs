//! Render a single synthetic hit through the whole pipeline with no audio
//! hardware, and print what the analysis stage saw.
//!
//! Run with: cargo run --example offline_hit

use strike_dsp::io::{drive, AudioSink, BufferSource};
use strike_dsp::{ControlFrame, DrumController};

const SAMPLE_RATE: f32 = 48_000.0;

/// Sink that keeps the rendered audio and a running peak.
#[derive(Default)]
struct StatsSink {
    samples: Vec<f32>,
    peak: f32,
}

impl AudioSink for StatsSink {
    fn commit(&mut self, block: &[f32]) {
        for &s in block {
            self.peak = self.peak.max(s.abs());
        }
        self.samples.extend_from_slice(block);
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // 10 ms of near-full-scale clicks, then a second of silence for the
    // drum to ring into.
    let mut material: Vec<f32> = (0..480)
        .map(|n| if n % 2 == 0 { 0.9 } else { -0.9 })
        .collect();
    material.extend(std::iter::repeat(0.0).take(SAMPLE_RATE as usize));

    let mut controller = DrumController::new(SAMPLE_RATE)?;
    let mut source = BufferSource::new(material);
    let mut sink = StatsSink::default();

    drive(
        &mut controller,
        &ControlFrame::default(),
        &mut source,
        &mut sink,
        256,
    );

    let ctx = controller.modulation_context();
    println!("rendered {} samples", sink.samples.len());
    println!("onset energy:   {:.3}", ctx.energy);
    println!("onset centroid: {:.3}", ctx.centroid);
    println!("output peak:    {:.3}", sink.peak);
    println!(
        "still ringing:  {}",
        if controller.is_active() { "yes" } else { "no" }
    );

    Ok(())
}
