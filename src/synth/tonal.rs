use std::f32::consts::TAU;

/*
Tonal Voice
===========

The pitched "shell" of the drum: a sine oscillator under an exponential
decay envelope. Two normalized controls:

  tuning [0,1]   base frequency, 80 Hz to 400 Hz on an exponential
                 curve (equal steps sound like equal pitch intervals)

  decay [0,1]    T60 decay time, 30 ms to 1.5 s, also exponential

The envelope is a single multiply per sample:

    level *= decay_coeff,  decay_coeff = exp(ln(0.001) / (t60 * Fs))

so after t60 seconds the level has fallen 60 dB. Strictly monotonic
between retriggers; a retrigger snaps phase and level back to their
initial values with no crossfade, which is exactly how the early drum
machines behaved.
*/

const MIN_FREQ_HZ: f32 = 80.0;
const MAX_FREQ_HZ: f32 = 400.0;
const MIN_DECAY_S: f32 = 0.03;
const MAX_DECAY_S: f32 = 1.5;

/// Level below which the voice snaps to silence instead of decaying forever.
const SILENCE_FLOOR: f32 = 1e-5;

#[derive(Debug, Clone)]
pub struct TonalVoice {
    sample_rate: f32,
    phase: f32,
    phase_inc: f32,
    level: f32,
    decay_coeff: f32,
}

impl TonalVoice {
    pub fn new(sample_rate: f32) -> Self {
        let mut voice = Self {
            sample_rate,
            phase: 0.0,
            phase_inc: 0.0,
            level: 0.0,
            decay_coeff: 0.0,
        };
        voice.set_params(0.5, 0.25);
        voice
    }

    /// Apply normalized tuning and decay controls. Latched until the next
    /// call; typically invoked once per retrigger.
    pub fn set_params(&mut self, tuning: f32, decay: f32) {
        let tuning = tuning.clamp(0.0, 1.0);
        let decay = decay.clamp(0.0, 1.0);

        let freq = MIN_FREQ_HZ * (MAX_FREQ_HZ / MIN_FREQ_HZ).powf(tuning);
        self.phase_inc = freq / self.sample_rate;

        let t60 = MIN_DECAY_S * (MAX_DECAY_S / MIN_DECAY_S).powf(decay);
        self.decay_coeff = (0.001f32.ln() / (t60 * self.sample_rate)).exp();
    }

    /// Restart the decay from full amplitude. Resets state in place.
    pub fn trigger(&mut self) {
        self.phase = 0.0;
        self.level = 1.0;
    }

    #[inline]
    pub fn process(&mut self) -> f32 {
        if self.level == 0.0 {
            return 0.0;
        }

        let out = (TAU * self.phase).sin() * self.level;

        self.phase += self.phase_inc;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    #[test]
    fn silent_until_triggered() {
        let mut voice = TonalVoice::new(SAMPLE_RATE);
        for _ in 0..100 {
            assert_eq!(voice.process(), 0.0);
        }
        assert!(!voice.is_active());
    }

    #[test]
    fn decays_monotonically() {
        let mut voice = TonalVoice::new(SAMPLE_RATE);
        voice.set_params(0.5, 0.3);
        voice.trigger();

        let mut prev = voice.level();
        for _ in 0..(SAMPLE_RATE as usize) {
            voice.process();
            assert!(voice.level() <= prev, "level must never rise mid-decay");
            prev = voice.level();
        }
    }

    #[test]
    fn reaches_silence_within_bounded_time() {
        let mut voice = TonalVoice::new(SAMPLE_RATE);
        voice.set_params(0.5, 1.0); // Slowest decay, t60 = 1.5s.
        voice.trigger();

        // After 2x the maximum decay time the voice must be fully silent.
        for _ in 0..(3.0 * SAMPLE_RATE) as usize {
            voice.process();
        }
        assert!(!voice.is_active());
        assert_eq!(voice.process(), 0.0);
    }

    #[test]
    fn higher_tuning_oscillates_faster() {
        let count_crossings = |tuning: f32| {
            let mut voice = TonalVoice::new(SAMPLE_RATE);
            voice.set_params(tuning, 1.0);
            voice.trigger();
            let mut crossings = 0;
            let mut prev = voice.process();
            for _ in 0..4_800 {
                let s = voice.process();
                if prev <= 0.0 && s > 0.0 {
                    crossings += 1;
                }
                prev = s;
            }
            crossings
        };

        assert!(count_crossings(1.0) > count_crossings(0.0) * 2);
    }

    #[test]
    fn longer_decay_setting_sustains_longer() {
        let level_after = |decay: f32, samples: usize| {
            let mut voice = TonalVoice::new(SAMPLE_RATE);
            voice.set_params(0.5, decay);
            voice.trigger();
            for _ in 0..samples {
                voice.process();
            }
            voice.level()
        };

        let probe = (0.1 * SAMPLE_RATE) as usize;
        assert!(level_after(1.0, probe) > level_after(0.0, probe));
    }

    #[test]
    fn retrigger_restarts_from_full_amplitude() {
        let mut voice = TonalVoice::new(SAMPLE_RATE);
        voice.trigger();
        for _ in 0..10_000 {
            voice.process();
        }
        let mid_decay = voice.level();
        voice.trigger();
        assert_eq!(voice.level(), 1.0);
        assert!(voice.level() > mid_decay);
    }

    #[test]
    fn output_bounded_by_unity() {
        let mut voice = TonalVoice::new(SAMPLE_RATE);
        voice.set_params(1.0, 1.0);
        voice.trigger();
        for _ in 0..48_000 {
            assert!(voice.process().abs() <= 1.0);
        }
    }
}
