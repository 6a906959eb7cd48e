use crate::synth::filter::SVFilter;

/*
Noise Voice
===========

The "rattle" of the drum: white noise shaped by a state-variable filter
under an exponential decay envelope. Three normalized controls:

  color [0,1]    low-pass cutoff, 200 Hz to 12 kHz exponential. Low
                 values give a dark thud, high values an open hiss.

  tone  [0,1]    filter resonance. High values ring the filter at the
                 cutoff, which reads as a pitched "wire" buzz on top of
                 the noise.

  decay [0,1]    T60 decay time, 20 ms to 800 ms exponential - noise
                 tails are kept shorter than the tonal shell, matching
                 how real snare wires damp faster than the head.

The filter output is scaled down as resonance rises so the voice stays
within the unit range the mixer expects.
*/

const MIN_CUTOFF_HZ: f32 = 200.0;
const MAX_CUTOFF_HZ: f32 = 12_000.0;
const MIN_DECAY_S: f32 = 0.02;
const MAX_DECAY_S: f32 = 0.8;

const SILENCE_FLOOR: f32 = 1e-5;

/// Fixed RNG seed so a voice is deterministic run-to-run. Audibly
/// irrelevant for noise; essential for regression tests.
const NOISE_SEED: u64 = 0x5eed_d12a;

#[derive(Debug, Clone)]
pub struct NoiseVoice {
    sample_rate: f32,
    rng: fastrand::Rng,
    filter: SVFilter,
    level: f32,
    decay_coeff: f32,
    makeup: f32,
}

impl NoiseVoice {
    pub fn new(sample_rate: f32) -> Self {
        let mut voice = Self {
            sample_rate,
            rng: fastrand::Rng::with_seed(NOISE_SEED),
            filter: SVFilter::new(),
            level: 0.0,
            decay_coeff: 0.0,
            makeup: 1.0,
        };
        voice.set_params(0.75, 0.25, 0.25);
        voice
    }

    /// Apply normalized tone, color, and decay controls.
    pub fn set_params(&mut self, tone: f32, color: f32, decay: f32) {
        let tone = tone.clamp(0.0, 1.0);
        let color = color.clamp(0.0, 1.0);
        let decay = decay.clamp(0.0, 1.0);

        let cutoff = MIN_CUTOFF_HZ * (MAX_CUTOFF_HZ / MIN_CUTOFF_HZ).powf(color);
        let resonance = tone * 0.9;
        self.filter.set_params(cutoff, resonance, self.sample_rate);

        // Resonance peak gain of the SVF is roughly 1/k; compensate so the
        // mixer sees a bounded signal at any tone setting.
        self.makeup = (2.0 - 2.0 * resonance) / 2.0;

        let t60 = MIN_DECAY_S * (MAX_DECAY_S / MIN_DECAY_S).powf(decay);
        self.decay_coeff = (0.001f32.ln() / (t60 * self.sample_rate)).exp();
    }

    /// Restart the decay from full amplitude. Filter state is cleared so a
    /// resonant tail from the previous hit cannot ring into this one.
    pub fn trigger(&mut self) {
        self.level = 1.0;
        self.filter.reset();
    }

    #[inline]
    pub fn process(&mut self) -> f32 {
        if self.level == 0.0 {
            return 0.0;
        }

        let white = self.rng.f32() * 2.0 - 1.0;
        let shaped = self.filter.process(white).lowpass * self.makeup;
        let out = shaped * self.level;

        self.level *= self.decay_coeff;
        if self.level < SILENCE_FLOOR {
            self.level = 0.0;
        }

        out
    }

    pub fn is_active(&self) -> bool {
        self.level > 0.0
    }

    pub fn level(&self) -> f32 {
        self.level
    }
}
