//! Control-rate configuration consumed at block boundaries, plus the
//! construction-time error type.

use thiserror::Error;

use crate::mapping::ParameterMapping;

/// Upper end of the trigger-threshold control range. The control surface
/// works in [0, 30]; the controller divides by this to get envelope units.
pub const TRIGGER_THRESHOLD_MAX: f32 = 30.0;

/// Default trigger threshold on the control surface.
pub const DEFAULT_TRIGGER_THRESHOLD: f32 = 16.0;

/// Refractory duration as a fraction of the sample rate: Fs / 20, i.e.
/// 50 ms of enforced inter-onset spacing regardless of tuning.
pub const REFRACTORY_DIVISOR: f32 = 20.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f32),
    #[error("analysis window must be at least {min} samples, got {got}")]
    WindowTooShort { min: usize, got: usize },
}

/// Analysis constants exposed as explicit configuration rather than
/// buried magic numbers. The defaults are standard choices: a ~21 ms
/// Hann-windowed FFT at 48 kHz and millisecond-scale follower constants.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisConfig {
    /// Spectral-centroid window length in samples.
    pub window_len: usize,
    /// Envelope-follower attack time constant in seconds.
    pub attack_time: f32,
    /// Envelope-follower release time constant in seconds.
    pub release_time: f32,
}

impl AnalysisConfig {
    pub const MIN_WINDOW_LEN: usize = 64;
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_len: 1024,
            attack_time: crate::analysis::EnvelopeFollower::DEFAULT_ATTACK,
            release_time: crate::analysis::EnvelopeFollower::DEFAULT_RELEASE,
        }
    }
}

/// One block's worth of control-surface state. The controller snapshots
/// this once per processing block and holds it fixed for every sample in
/// the block, so a UI thread can rewrite it freely without tearing the
/// per-sample path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlFrame {
    /// Calibration ("listen") mode: onsets feed the auto-ranger instead
    /// of retriggering the drum.
    pub listen: bool,
    /// Trigger threshold in control units, [0, TRIGGER_THRESHOLD_MAX].
    pub trigger_threshold: f32,
    /// Base values and modulation depths for all seven parameters.
    pub mapping: ParameterMapping,
}

impl Default for ControlFrame {
    fn default() -> Self {
        Self {
            listen: false,
            trigger_threshold: DEFAULT_TRIGGER_THRESHOLD,
            mapping: ParameterMapping::default(),
        }
    }
}
