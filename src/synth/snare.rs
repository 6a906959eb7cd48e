use crate::synth::{NoiseVoice, TonalVoice};

/// The full normalized parameter set for one drum hit. Every field lives
/// in [0, 1]; the mapping layer guarantees that before the set reaches
/// the drum.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrumParams {
    pub tonal_decay: f32,
    pub tonal_tuning: f32,
    pub noise_decay: f32,
    pub noise_tone: f32,
    pub noise_color: f32,
    pub mix_ratio: f32,
    pub gain: f32,
}

impl Default for DrumParams {
    /// A balanced mid-bright snare; the voicing the drum boots with.
    fn default() -> Self {
        Self {
            tonal_decay: 0.25,
            tonal_tuning: 0.5,
            noise_decay: 0.25,
            noise_tone: 0.75,
            noise_color: 0.25,
            mix_ratio: 0.5,
            gain: 0.5,
        }
    }
}

/*
Snare Drum
==========

Composes the tonal shell and the noise rattle:

    tonal ──┐
            ├── linear crossfade (mix_ratio) ── clamp ── * gain ── out
    noise ──┘

mix_ratio 0 is pure tonal, 1 is pure noise. The crossfade is linear: a
slight loudness dip at 0.5 in exchange for predictable math.

The clamp before the gain stage enforces the output bound: whatever the
voices do, |output| <= gain. Both voices decay strictly toward silence,
so without retriggers the drum converges to zero.
*/

pub struct SnareDrum {
    tonal: TonalVoice,
    noise: NoiseVoice,
    mix_ratio: f32,
    gain: f32,
}

impl SnareDrum {
    pub fn new(sample_rate: f32) -> Self {
        let mut drum = Self {
            tonal: TonalVoice::new(sample_rate),
            noise: NoiseVoice::new(sample_rate),
            mix_ratio: 0.5,
            gain: 0.5,
        };
        drum.set_params(&DrumParams::default());
        drum
    }

    /// Latch a parameter set without restarting the decay.
    pub fn set_params(&mut self, params: &DrumParams) {
        self.tonal
            .set_params(params.tonal_tuning, params.tonal_decay);
        self.noise
            .set_params(params.noise_tone, params.noise_color, params.noise_decay);
        self.mix_ratio = params.mix_ratio.clamp(0.0, 1.0);
        self.gain = params.gain.clamp(0.0, 1.0);
    }

    /// Latch parameters and restart both voices from full amplitude.
    /// Fully overwrites voice state - calling this twice in a row with the
    /// same parameters is indistinguishable from calling it once.
    pub fn retrigger(&mut self, params: &DrumParams) {
        self.set_params(params);
        self.tonal.trigger();
        self.noise.trigger();
    }

    /// Advance both voices one sample and return the mixed, gained output.
    #[inline]
    pub fn process(&mut self) -> f32 {
        let tonal = self.tonal.process();
        let noise = self.noise.process();
        let mixed = tonal * (1.0 - self.mix_ratio) + noise * self.mix_ratio;
        mixed.clamp(-1.0, 1.0) * self.gain
    }

    pub fn is_active(&self) -> bool {
        self.tonal.is_active() || self.noise.is_active()
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn mix_ratio(&self) -> f32 {
        self.mix_ratio
    }
}
