//! strike - audio-driven drum synthesizer
//!
//! Listens on the default input device, detects percussive onsets, and
//! renders a synthesized snare in their place. Run with: cargo run

mod app;
mod ui;

use app::Strike;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    Strike::new().run()
}
