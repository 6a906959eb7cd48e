//! The drum synthesis engine: two decaying voices mixed into one output.
//!
//! Modeled on early drum-machine snare circuits - a pitched "shell" tone
//! plus a filtered noise "rattle", each with its own decay, crossfaded and
//! gained. Voices are allocation-free and advance one sample per call.

mod filter;
mod noise;
mod snare;
mod tonal;

pub use filter::SVFilter;
pub use noise::NoiseVoice;
pub use snare::{DrumParams, SnareDrum};
pub use tonal::TonalVoice;
