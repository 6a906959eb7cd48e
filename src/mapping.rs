use crate::synth::DrumParams;

/*
Feature-to-Parameter Mapping
============================

Each of the seven synthesis parameters carries a base value and two
signed modulation depths, one per onset feature:

    final = clamp(base + energy_mod * energy + spectral_mod * centroid,
                  0.0, 1.0)

All seven are evaluated together from the same ModulationContext at the
moment of an onset, and the result is latched into the drum for the whole
decay - parameters are not modulated continuously per sample.

Depths may be negative (inverse modulation: hit harder, get a shorter
drum) and are deliberately not clamped themselves; only the final value
is. The mapping is a pure function of its inputs.
*/

pub const NUM_PARAMS: usize = 7;

/// The seven mapped synthesis parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamId {
    TonalDecay,
    TonalTuning,
    NoiseDecay,
    NoiseTone,
    NoiseColor,
    MixRatio,
    Gain,
}

impl ParamId {
    pub const ALL: [ParamId; NUM_PARAMS] = [
        ParamId::TonalDecay,
        ParamId::TonalTuning,
        ParamId::NoiseDecay,
        ParamId::NoiseTone,
        ParamId::NoiseColor,
        ParamId::MixRatio,
        ParamId::Gain,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            ParamId::TonalDecay => "Tonal Decay",
            ParamId::TonalTuning => "Tonal Tuning",
            ParamId::NoiseDecay => "Noise Decay",
            ParamId::NoiseTone => "Noise Tone",
            ParamId::NoiseColor => "Noise Color",
            ParamId::MixRatio => "Mix Ratio",
            ParamId::Gain => "Gain",
        }
    }
}

/// Base value and modulation depths for one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParamSpec {
    /// Resting value in [0, 1].
    pub base: f32,
    /// Depth applied to the normalized onset energy, in [-1, 1].
    pub energy_mod: f32,
    /// Depth applied to the normalized spectral centroid, in [-1, 1].
    pub spectral_mod: f32,
}

impl ParamSpec {
    pub fn fixed(base: f32) -> Self {
        Self {
            base,
            energy_mod: 0.0,
            spectral_mod: 0.0,
        }
    }
}

/// Normalized features of the most recent onset, held between onsets.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModulationContext {
    pub energy: f32,
    pub centroid: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterMapping {
    specs: [ParamSpec; NUM_PARAMS],
}

impl ParameterMapping {
    pub fn get(&self, id: ParamId) -> ParamSpec {
        self.specs[id.index()]
    }

    pub fn set(&mut self, id: ParamId, spec: ParamSpec) {
        self.specs[id.index()] = spec;
    }

    /// Evaluate all seven parameters against one modulation context.
    pub fn apply(&self, ctx: &ModulationContext) -> DrumParams {
        DrumParams {
            tonal_decay: self.map_one(ParamId::TonalDecay, ctx),
            tonal_tuning: self.map_one(ParamId::TonalTuning, ctx),
            noise_decay: self.map_one(ParamId::NoiseDecay, ctx),
            noise_tone: self.map_one(ParamId::NoiseTone, ctx),
            noise_color: self.map_one(ParamId::NoiseColor, ctx),
            mix_ratio: self.map_one(ParamId::MixRatio, ctx),
            gain: self.map_one(ParamId::Gain, ctx),
        }
    }

    #[inline]
    fn map_one(&self, id: ParamId, ctx: &ModulationContext) -> f32 {
        let spec = self.specs[id.index()];
        (spec.base + spec.energy_mod * ctx.energy + spec.spectral_mod * ctx.centroid)
            .clamp(0.0, 1.0)
    }
}

impl Default for ParameterMapping {
    /// Control-surface default bases; all modulation depths start at zero.
    fn default() -> Self {
        let mut mapping = Self {
            specs: [ParamSpec::fixed(0.0); NUM_PARAMS],
        };
        mapping.set(ParamId::TonalDecay, ParamSpec::fixed(0.30));
        mapping.set(ParamId::TonalTuning, ParamSpec::fixed(0.60));
        mapping.set(ParamId::NoiseDecay, ParamSpec::fixed(0.30));
        mapping.set(ParamId::NoiseTone, ParamSpec::fixed(0.92));
        mapping.set(ParamId::NoiseColor, ParamSpec::fixed(0.75));
        mapping.set(ParamId::MixRatio, ParamSpec::fixed(0.5));
        mapping.set(ParamId::Gain, ParamSpec::fixed(0.5));
        mapping
    }
}
