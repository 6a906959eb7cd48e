//! End-to-end pipeline tests: synthetic percussive material in, rendered
//! drum out, driven through the same source/sink plumbing the offline
//! demos use.

use strike_dsp::io::{drive, AudioSink, AudioSource, BufferSink, BufferSource};
use strike_dsp::mapping::{ParamId, ParamSpec};
use strike_dsp::{ControlFrame, DrumController};

const SAMPLE_RATE: f32 = 48_000.0;

/// Alternating-sign samples crudely shaped like a stick hit: a short
/// plateau at full level (long enough for the 2 ms follower to catch
/// up), then an exponential tail.
fn hit(level: f32, len: usize) -> Vec<f32> {
    let plateau = len / 2;
    let decay = (-8.0 / (len - plateau) as f32).exp();
    let mut amp = level;
    (0..len)
        .map(|n| {
            if n >= plateau {
                amp *= decay;
            }
            if n % 2 == 0 {
                amp
            } else {
                -amp
            }
        })
        .collect()
}

/// `count` hits separated by `gap` samples of silence, with a tail of
/// silence long enough for the drum to ring out.
fn hit_sequence(count: usize, level: f32, gap: usize) -> Vec<f32> {
    let mut samples = Vec::new();
    for _ in 0..count {
        samples.extend(hit(level, 480));
        samples.extend(std::iter::repeat(0.0).take(gap));
    }
    samples.extend(std::iter::repeat(0.0).take(SAMPLE_RATE as usize));
    samples
}

#[test]
fn silence_renders_silence() {
    let mut controller = DrumController::new(SAMPLE_RATE).unwrap();
    let mut source = BufferSource::new(vec![0.0; 48_000]);
    let mut sink = BufferSink::new();

    drive(
        &mut controller,
        &ControlFrame::default(),
        &mut source,
        &mut sink,
        256,
    );

    assert_eq!(sink.samples.len(), 48_000);
    assert!(sink.samples.iter().all(|&s| s == 0.0));
}

#[test]
fn hits_produce_bounded_drum_output() {
    let mut controller = DrumController::new(SAMPLE_RATE).unwrap();
    let mut source = BufferSource::new(hit_sequence(4, 0.9, 9_600));
    let mut sink = BufferSink::new();

    drive(
        &mut controller,
        &ControlFrame::default(),
        &mut source,
        &mut sink,
        128,
    );

    let peak = sink.samples.iter().fold(0.0f32, |p, &s| p.max(s.abs()));
    assert!(peak > 0.0, "audible hits must drive the drum");
    assert!(peak <= 1.0, "output must stay within [-1, 1], got {peak}");
    assert!(sink.samples.iter().all(|s| s.is_finite()));
}

#[test]
fn quiet_material_below_threshold_stays_silent() {
    let mut controller = DrumController::new(SAMPLE_RATE).unwrap();
    // Default threshold is 16/30 of full scale; 0.2 hits never reach it.
    let mut source = BufferSource::new(hit_sequence(4, 0.2, 9_600));
    let mut sink = BufferSink::new();

    drive(
        &mut controller,
        &ControlFrame::default(),
        &mut source,
        &mut sink,
        128,
    );

    assert!(sink.samples.iter().all(|&s| s == 0.0));
}

#[test]
fn lowering_the_threshold_recovers_quiet_hits() {
    let frame = ControlFrame {
        trigger_threshold: 3.0,
        ..ControlFrame::default()
    };
    let mut controller = DrumController::new(SAMPLE_RATE).unwrap();
    let mut source = BufferSource::new(hit_sequence(4, 0.2, 9_600));
    let mut sink = BufferSink::new();

    drive(&mut controller, &frame, &mut source, &mut sink, 128);

    let peak = sink.samples.iter().fold(0.0f32, |p, &s| p.max(s.abs()));
    assert!(peak > 0.0);
}

#[test]
fn refractory_limits_trigger_density() {
    // Hits 10 ms apart, twice as dense as the 50 ms refractory window:
    // only every other one may land.
    let mut controller = DrumController::new(SAMPLE_RATE).unwrap();
    let material = hit_sequence(8, 0.9, 480 / 2);

    let frame = ControlFrame::default();
    controller.apply_control(&frame);

    let mut triggers = 0;
    for &x in &material {
        controller.process(x);
        if controller.telemetry().triggered {
            triggers += 1;
        }
    }
    assert!(triggers >= 1);
    assert!(
        triggers <= 4,
        "refractory must thin dense hits, got {triggers} of 8"
    );
}

#[test]
fn calibrated_session_spreads_dynamics() {
    // Listen pass over soft and loud hits, then a live pass: after
    // calibration the two loudness levels must map to clearly different
    // energies instead of both saturating.
    let mut controller = DrumController::new(SAMPLE_RATE).unwrap();
    let gap = 9_600;

    let listen = ControlFrame {
        listen: true,
        ..ControlFrame::default()
    };
    let mut material = hit_sequence(2, 0.7, gap);
    material.extend(hit_sequence(2, 0.95, gap));
    let mut sink = BufferSink::new();
    drive(
        &mut controller,
        &listen,
        &mut BufferSource::new(material),
        &mut sink,
        256,
    );
    assert!(sink.samples.iter().all(|&s| s == 0.0), "listen pass is silent");

    let live = ControlFrame::default();
    let mut energies = Vec::new();
    for level in [0.7f32, 0.95] {
        for &x in &hit_sequence(1, level, gap) {
            controller.process_block(&live, &[x], &mut [0.0]);
            if controller.telemetry().triggered {
                energies.push(controller.telemetry().energy);
            }
        }
    }

    assert_eq!(energies.len(), 2);
    assert!(
        energies[1] - energies[0] > 0.2,
        "calibration should separate soft from loud, got {energies:?}"
    );
}

#[test]
fn spectral_modulation_tracks_material_brightness() {
    // Route the centroid into noise color at full depth, feed a dull and
    // a bright hit, and check the mapped context actually differs.
    let mut frame = ControlFrame::default();
    frame.mapping.set(
        ParamId::NoiseColor,
        ParamSpec {
            base: 0.0,
            energy_mod: 0.0,
            spectral_mod: 1.0,
        },
    );

    let mut controller = DrumController::new(SAMPLE_RATE).unwrap();
    controller.apply_control(&frame);

    let mut centroids = Vec::new();
    for period in [96usize, 6] {
        // Square-ish tones: 500 Hz vs 8 kHz at 48 kHz. A quiet pre-roll
        // fills the analysis window with the tone's spectrum before the
        // loud part fires the trigger.
        for n in 0..3_200 {
            let level = if n < 1_200 { 0.05 } else { 0.9 };
            let x = if (n / (period / 2)) % 2 == 0 {
                level
            } else {
                -level
            };
            controller.process(x);
            if controller.telemetry().triggered {
                centroids.push(controller.telemetry().centroid);
            }
        }
        for _ in 0..19_200 {
            controller.process(0.0);
        }
    }

    assert_eq!(centroids.len(), 2, "each tone burst fires once");
    assert!(
        centroids[1] > centroids[0],
        "brighter material must read a higher centroid, got {centroids:?}"
    );
}

#[test]
fn block_size_does_not_change_the_render() {
    let material = hit_sequence(3, 0.9, 9_600);
    let frame = ControlFrame::default();

    let mut render = |block_len: usize| {
        let mut controller = DrumController::new(SAMPLE_RATE).unwrap();
        let mut sink = BufferSink::new();
        drive(
            &mut controller,
            &frame,
            &mut BufferSource::new(material.clone()),
            &mut sink,
            block_len,
        );
        sink.samples
    };

    let small = render(64);
    let large = render(1_024);
    assert_eq!(small, large);
}

#[test]
fn custom_source_and_sink_plug_in() {
    // Minimal third-party transport: a counting source and a peak-holding
    // sink, exercising the traits rather than the buffer helpers.
    struct Clicks {
        remaining: usize,
    }
    impl AudioSource for Clicks {
        fn fill(&mut self, block: &mut [f32]) -> usize {
            if self.remaining == 0 {
                return 0;
            }
            for (n, slot) in block.iter_mut().enumerate() {
                *slot = if n % 2 == 0 { 0.9 } else { -0.9 };
            }
            let filled = block.len().min(self.remaining);
            self.remaining -= filled;
            filled
        }
    }

    #[derive(Default)]
    struct PeakSink {
        peak: f32,
        count: usize,
    }
    impl AudioSink for PeakSink {
        fn commit(&mut self, block: &[f32]) {
            self.count += block.len();
            for &s in block {
                self.peak = self.peak.max(s.abs());
            }
        }
    }

    let mut controller = DrumController::new(SAMPLE_RATE).unwrap();
    let mut source = Clicks { remaining: 4_800 };
    let mut sink = PeakSink::default();

    drive(
        &mut controller,
        &ControlFrame::default(),
        &mut source,
        &mut sink,
        256,
    );

    assert_eq!(sink.count, 4_800);
    assert!(sink.peak > 0.0);
    assert!(sink.peak <= 1.0);
}
