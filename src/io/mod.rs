//! Audio source/sink abstraction.
//!
//! The core is driven one block at a time by whoever owns the real audio
//! transport - a cpal callback in the `strike` binary, or a plain buffer
//! in tests and demos. Keeping the transport behind these traits means
//! the whole pipeline can run against synthetic material with no audio
//! hardware in sight.

use crate::config::ControlFrame;
use crate::controller::DrumController;

/// Supplies input samples one block at a time.
pub trait AudioSource {
    /// Fill `block` with input samples, returning how many were written.
    /// Anything less than `block.len()` means the source is exhausted;
    /// the remainder of the block is left untouched.
    fn fill(&mut self, block: &mut [f32]) -> usize;
}

/// Consumes rendered output samples.
pub trait AudioSink {
    fn commit(&mut self, block: &[f32]);
}

/// A source backed by a preloaded buffer. Exhausts after the last sample.
pub struct BufferSource {
    samples: Vec<f32>,
    pos: usize,
}

impl BufferSource {
    pub fn new(samples: Vec<f32>) -> Self {
        Self { samples, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.samples.len() - self.pos
    }
}

impl AudioSource for BufferSource {
    fn fill(&mut self, block: &mut [f32]) -> usize {
        let available = (self.samples.len() - self.pos).min(block.len());
        block[..available].copy_from_slice(&self.samples[self.pos..self.pos + available]);
        self.pos += available;
        available
    }
}

/// A sink that appends everything it is given.
#[derive(Default)]
pub struct BufferSink {
    pub samples: Vec<f32>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioSink for BufferSink {
    fn commit(&mut self, block: &[f32]) {
        self.samples.extend_from_slice(block);
    }
}

/// Drive a controller from a source to a sink in fixed-size blocks until
/// the source runs dry. The control frame is re-applied at every block
/// boundary, mirroring how the realtime transport behaves. `block_len`
/// is clamped to [1, MAX_BLOCK_SIZE].
pub fn drive(
    controller: &mut DrumController,
    frame: &ControlFrame,
    source: &mut impl AudioSource,
    sink: &mut impl AudioSink,
    block_len: usize,
) {
    let block_len = block_len.clamp(1, crate::MAX_BLOCK_SIZE);
    let mut input = vec![0.0f32; block_len];
    let mut output = vec![0.0f32; block_len];

    loop {
        let filled = source.fill(&mut input);
        if filled == 0 {
            break;
        }
        controller.process_block(frame, &input[..filled], &mut output[..filled]);
        sink.commit(&output[..filled]);
    }
}
