//! Realtime-safe analysis primitives for the audio-driven trigger path.
//!
//! These components are allocation-free after construction, making them safe
//! to run inside the per-sample audio callback. They intentionally stay
//! focused on the signal-analysis math so the controller can layer on
//! orchestration and parameter mapping.

/// Range calibration for feature normalization ("listen" mode).
pub mod calibration;
/// Attack/release envelope follower over input magnitude.
pub mod follower;
/// Onset detection state machine with hysteresis and refractory period.
pub mod onset;
/// Spectral-centroid extraction from recent input history.
pub mod spectral;

pub use follower::EnvelopeFollower;
pub use onset::{DetectorState, Onset, OnsetDetector};
pub use spectral::SpectralAnalyzer;
