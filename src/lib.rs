pub mod analysis; // Realtime-safe signal analysis (envelope, onsets, spectrum)
pub mod config;
pub mod controller;
pub mod io;
pub mod mapping; // Feature-to-parameter modulation
pub mod synth; // Two-voice drum engine

pub use config::{AnalysisConfig, ConfigError, ControlFrame};
pub use controller::{DrumController, Telemetry};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
