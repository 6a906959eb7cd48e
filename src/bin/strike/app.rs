//! Audio transport: duplex cpal streams around the drum controller.
//!
//! Topology:
//!
//!   input stream ──(rtrb ring)── output stream ──(rtrb ring)── TUI
//!                                     ▲
//!                  Arc<Mutex<ControlFrame>>, snapshotted once per
//!                  callback - the UI thread writes, the audio thread
//!                  reads a copy at block boundaries only.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;
use std::sync::{Arc, Mutex};

use strike_dsp::{ControlFrame, DrumController, Telemetry};

use super::ui::UiApp;

/// Mic-to-engine sample ring. Generous enough to absorb callback jitter
/// between the two streams.
const INPUT_RING_CAPACITY: usize = 1 << 14;

/// Engine-to-UI telemetry ring; one entry per onset.
const TELEMETRY_RING_CAPACITY: usize = 256;

pub struct Strike {
    control: Arc<Mutex<ControlFrame>>,
}

impl Strike {
    pub fn new() -> Self {
        Self {
            control: Arc::new(Mutex::new(ControlFrame::default())),
        }
    }

    /// Run the application (takes over, plays audio, draws the TUI).
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let input_device = host
            .default_input_device()
            .ok_or_else(|| eyre!("no default input device available"))?;
        let output_device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;

        let output_config = output_device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;
        let input_config = input_device
            .default_input_config()
            .wrap_err("failed to fetch default input config")?;

        let sample_rate = output_config.sample_rate().0 as f32;
        let out_channels = output_config.channels() as usize;
        let in_channels = input_config.channels() as usize;

        let controller = DrumController::new(sample_rate)
            .wrap_err("failed to construct drum controller")?;

        let (mut mic_tx, mut mic_rx) = RingBuffer::<f32>::new(INPUT_RING_CAPACITY);
        let (mut telemetry_tx, telemetry_rx) = RingBuffer::<Telemetry>::new(TELEMETRY_RING_CAPACITY);

        // Input callback: forward channel 0 into the ring. Overruns are
        // dropped; the engine substitutes silence on underrun, so the worst
        // case is a missed hit, never a blocked callback.
        let input_stream = input_device.build_input_stream(
            &input_config.into(),
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                for frame in data.chunks(in_channels) {
                    let _ = mic_tx.push(frame[0]);
                }
            },
            |err| eprintln!("input stream error: {err}"),
            None,
        )?;

        // Output callback: one control snapshot per callback, then strictly
        // per-sample processing, mono duplicated to every channel.
        let control = Arc::clone(&self.control);
        let mut controller = controller;
        let output_stream = output_device.build_output_stream(
            &output_config.into(),
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let frame = *control.lock().unwrap();
                controller.apply_control(&frame);

                for out_frame in data.chunks_mut(out_channels) {
                    let x = mic_rx.pop().unwrap_or(0.0);
                    let y = controller.process(x);
                    for channel in out_frame.iter_mut() {
                        *channel = y;
                    }
                    if controller.telemetry().triggered {
                        let _ = telemetry_tx.push(controller.telemetry());
                    }
                }
            },
            |err| eprintln!("output stream error: {err}"),
            None,
        )?;

        input_stream.play()?;
        output_stream.play()?;

        let terminal = ratatui::init();
        let result = UiApp::new(Arc::clone(&self.control), telemetry_rx, sample_rate)
            .run(terminal);
        ratatui::restore();
        result
    }
}

impl Default for Strike {
    fn default() -> Self {
        Self::new()
    }
}
