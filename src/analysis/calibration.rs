//! Feature normalization and the "listen" auto-ranging strategy.
//!
//! Raw onset features (trigger envelope, spectral centroid) arrive in
//! signal-dependent units: a quiet brush player and a close-miked stick
//! player occupy very different energy ranges. Normalization maps the raw
//! value through a [`FeatureRange`] into [0, 1] before it reaches the
//! parameter mapping.
//!
//! Two sources of ranges:
//!
//! - static defaults ([`FeatureNormalizer::default`]), always valid;
//! - the [`Calibrator`], which observes raw features over a rolling window
//!   of recent onsets while the controller has "listen" enabled, and
//!   produces ranges fitted to the live material.
//!
//! The calibrator is a separate object the controller swaps in and out, so
//! the normal per-sample path carries no calibration conditionals.

/// Number of recent onsets the calibrator fits its ranges to.
pub const CALIBRATION_WINDOW: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureRange {
    pub min: f32,
    pub max: f32,
}

impl FeatureRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Map a raw value into [0, 1]. A degenerate range (max <= min)
    /// saturates at the midpoint rather than dividing by zero.
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let span = self.max - self.min;
        if span <= f32::EPSILON {
            return 0.5;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// The pair of ranges used to normalize both onset features.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureNormalizer {
    pub energy: FeatureRange,
    pub centroid: FeatureRange,
}

impl Default for FeatureNormalizer {
    fn default() -> Self {
        Self {
            // Envelope of full-scale input tops out at 1.0; centroid is
            // already Nyquist-normalized.
            energy: FeatureRange::new(0.0, 1.0),
            centroid: FeatureRange::new(0.0, 1.0),
        }
    }
}

/// Rolling min/max fit over the most recent [`CALIBRATION_WINDOW`] onsets.
/// Fixed-size storage, mutated in place; safe to feed from the audio path.
#[derive(Debug, Clone)]
pub struct Calibrator {
    energy: [f32; CALIBRATION_WINDOW],
    centroid: [f32; CALIBRATION_WINDOW],
    len: usize,
    pos: usize,
}

impl Calibrator {
    pub fn new() -> Self {
        Self {
            energy: [0.0; CALIBRATION_WINDOW],
            centroid: [0.0; CALIBRATION_WINDOW],
            len: 0,
            pos: 0,
        }
    }

    /// Record the raw features of one onset.
    pub fn observe(&mut self, energy: f32, centroid: f32) {
        self.energy[self.pos] = energy;
        self.centroid[self.pos] = centroid;
        self.pos = (self.pos + 1) % CALIBRATION_WINDOW;
        self.len = (self.len + 1).min(CALIBRATION_WINDOW);
    }

    pub fn observed(&self) -> usize {
        self.len
    }

    /// Ranges fitted to the observed onsets. Falls back to the static
    /// defaults until at least two onsets exist; one point has no span.
    pub fn normalizer(&self) -> FeatureNormalizer {
        if self.len < 2 {
            return FeatureNormalizer::default();
        }
        FeatureNormalizer {
            energy: fit_range(&self.energy[..self.len]),
            centroid: fit_range(&self.centroid[..self.len]),
        }
    }

    pub fn reset(&mut self) {
        self.len = 0;
        self.pos = 0;
    }
}

impl Default for Calibrator {
    fn default() -> Self {
        Self::new()
    }
}

fn fit_range(values: &[f32]) -> FeatureRange {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }
    FeatureRange::new(min, max)
}
