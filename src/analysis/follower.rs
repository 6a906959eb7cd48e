use crate::MIN_TIME;

/*
Envelope Follower
=================

Smooths the instantaneous magnitude of the input into a continuous,
non-negative envelope. This is the front end of the trigger path: the
onset detector never looks at the raw waveform, only at this envelope.

Vocabulary
----------

  value       The current envelope estimate (>= 0). Follows |sample|.

  attack      Time constant used while |sample| is ABOVE the current
              value. Short (milliseconds) so percussive hits register
              within a handful of samples.

  release     Time constant used while |sample| is BELOW the current
              value. Longer, so the envelope rides over the zero
              crossings of the waveform instead of collapsing to zero
              twice per cycle.

The update is a one-pole smoother toward |x|:

    value = |x| + coeff * (value - |x|)

with coeff = exp(-1 / (time * sample_rate)), picked per sample from the
attack or release side. Both coefficients are derived once at
construction, never re-derived in the per-sample path.
*/

#[derive(Debug, Clone)]
pub struct EnvelopeFollower {
    attack_coeff: f32,
    release_coeff: f32,
    value: f32,
}

impl EnvelopeFollower {
    /// Default attack time constant: 2 ms.
    pub const DEFAULT_ATTACK: f32 = 0.002;
    /// Default release time constant: 50 ms.
    pub const DEFAULT_RELEASE: f32 = 0.05;

    pub fn new(sample_rate: f32, attack_time: f32, release_time: f32) -> Self {
        Self {
            attack_coeff: time_to_coeff(attack_time, sample_rate),
            release_coeff: time_to_coeff(release_time, sample_rate),
            value: 0.0,
        }
    }

    /// Advance the follower by one sample and return the new envelope value.
    #[inline]
    pub fn step(&mut self, sample: f32) -> f32 {
        let magnitude = sample.abs();
        let coeff = if magnitude > self.value {
            self.attack_coeff
        } else {
            self.release_coeff
        };
        self.value = magnitude + coeff * (self.value - magnitude);

        debug_assert!(self.value >= 0.0);
        self.value
    }

    /// Current envelope value without advancing.
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

#[inline]
fn time_to_coeff(time: f32, sample_rate: f32) -> f32 {
    (-1.0 / (time.max(MIN_TIME) * sample_rate)).exp()
}
