use std::f32::consts::PI;

/*
| tap       | passes          | rejects      |
| --------- | --------------- | ------------ |
| lowpass   | below cutoff    | above cutoff |
| bandpass  | around cutoff   | outside      |
| highpass  | above cutoff    | below cutoff |
*/

/// All three responses of one filter step; the caller picks a tap.
pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
}

/// Per-sample state-variable filter.
///
/// Coefficients are computed once in [`set_params`](SVFilter::set_params)
/// (at retrigger time), not per sample - the hot path is two integrator
/// updates and a handful of multiplies.
#[derive(Debug, Clone)]
pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory
    g: f32,
    k: f32,
}

impl SVFilter {
    pub fn new() -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            g: 0.1,
            k: 2.0,
        }
    }

    /// Recompute coefficients for a cutoff (Hz) and resonance in [0, 1).
    /// Cutoff is pinned below Nyquist to keep the prewarp finite.
    pub fn set_params(&mut self, cutoff_hz: f32, resonance: f32, sample_rate: f32) {
        let cutoff = cutoff_hz.clamp(10.0, sample_rate * 0.49);
        self.g = (PI * cutoff / sample_rate).tan();
        self.k = 2.0 - 2.0 * resonance.clamp(0.0, 0.98);
    }

    #[inline]
    pub fn process(&mut self, sample: f32) -> FilterOutputs {
        let h = 1.0 / (1.0 + self.g * (self.g + self.k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + self.g * v3);
        let v2 = self.ic2eq + self.g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        FilterOutputs {
            lowpass: v2,
            bandpass: v1,
            highpass: sample - self.k * v1 - v2,
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }
}

impl Default for SVFilter {
    fn default() -> Self {
        Self::new()
    }
}
