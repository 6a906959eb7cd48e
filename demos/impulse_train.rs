//! Feed a train of hits at increasing loudness and brightness through the
//! pipeline and print one line of telemetry per detected onset. Shows how
//! the energy and centroid features spread across playing dynamics, and
//! how the refractory window thins hits that land too close together.
//!
//! Run with: cargo run --example impulse_train

use strike_dsp::mapping::{ParamId, ParamSpec};
use strike_dsp::{ControlFrame, DrumController};

const SAMPLE_RATE: f32 = 48_000.0;

/// One burst: `period`-sample square wave at `level` for 10 ms.
fn burst(level: f32, period: usize) -> Vec<f32> {
    (0..480)
        .map(|n| {
            if (n / (period / 2).max(1)) % 2 == 0 {
                level
            } else {
                -level
            }
        })
        .collect()
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Route energy into gain and the centroid into noise color, so loud
    // hits are louder and bright hits rattle brighter.
    let mut frame = ControlFrame::default();
    frame.mapping.set(
        ParamId::Gain,
        ParamSpec {
            base: 0.2,
            energy_mod: 0.8,
            spectral_mod: 0.0,
        },
    );
    frame.mapping.set(
        ParamId::NoiseColor,
        ParamSpec {
            base: 0.1,
            energy_mod: 0.0,
            spectral_mod: 0.9,
        },
    );

    let mut controller = DrumController::new(SAMPLE_RATE)?;
    controller.apply_control(&frame);

    let hits = [
        (0.60f32, 96usize), // soft, dull
        (0.75, 48),
        (0.90, 24),
        (0.98, 12), // hard, bright
    ];
    let gap = (SAMPLE_RATE * 0.2) as usize;

    println!("{:>6}  {:>7}  {:>8}  {:>6}", "hit", "energy", "centroid", "peak");
    for (i, &(level, period)) in hits.iter().enumerate() {
        let mut telemetry = None;
        let mut peak = 0.0f32;

        for &x in &burst(level, period) {
            controller.process(x);
            if controller.telemetry().triggered {
                telemetry = Some(controller.telemetry());
            }
        }
        for _ in 0..gap {
            peak = peak.max(controller.process(0.0).abs());
        }

        match telemetry {
            Some(t) => println!("{:>6}  {:>7.3}  {:>8.3}  {:>6.3}", i, t.energy, t.centroid, peak),
            None => println!("{:>6}  (below threshold)", i),
        }
    }

    Ok(())
}
