use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

/*
Spectral Centroid
=================

The second modulation axis, independent of loudness: the
magnitude-weighted mean frequency of the most recent window of input,

    centroid_hz = sum(f_k * |X_k|) / sum(|X_k|)

over the positive-frequency FFT bins, normalized by Nyquist into [0, 1].
A bright hit (stick, rim) lands high; a dull hit (brush, palm) lands low.

The analyzer keeps a circular history of the raw input, fed one sample
per tick by the controller. The FFT only runs at onset time, so the
per-sample cost is a single ring-buffer write; the O(N log N) transform
happens at most once per refractory period.

Everything - the Hann window, the FFT plan, the complex work buffer and
the scratch area - is allocated at construction. The onset-time path is
allocation-free.
*/

/// Fallback centroid when no meaningful spectrum exists yet (start of
/// stream, or an all-zero window). Mid-scale keeps downstream mapping
/// well-defined without biasing it bright or dark.
pub const NEUTRAL_CENTROID: f32 = 0.5;

pub struct SpectralAnalyzer {
    sample_rate: f32,
    history: Vec<f32>,
    write_pos: usize,
    filled: usize,
    window: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
    fft_buf: Vec<Complex<f32>>,
    fft_scratch: Vec<Complex<f32>>,
}

impl SpectralAnalyzer {
    pub fn new(sample_rate: f32, window_len: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(window_len);
        let scratch_len = fft.get_inplace_scratch_len();

        // Hann window - reduces spectral leakage
        let window: Vec<f32> = (0..window_len)
            .map(|i| {
                let denom = (window_len - 1).max(1) as f32;
                0.5 * (1.0 - (2.0 * PI * i as f32 / denom).cos())
            })
            .collect();

        Self {
            sample_rate,
            history: vec![0.0; window_len],
            write_pos: 0,
            filled: 0,
            window,
            fft,
            fft_buf: vec![Complex::new(0.0, 0.0); window_len],
            fft_scratch: vec![Complex::new(0.0, 0.0); scratch_len],
        }
    }

    /// Record one input sample. Called every tick; O(1).
    #[inline]
    pub fn push(&mut self, sample: f32) {
        self.history[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.history.len();
        if self.filled < self.history.len() {
            self.filled += 1;
        }
    }

    /// Compute the normalized spectral centroid of the window ending at the
    /// most recent sample. Returns [`NEUTRAL_CENTROID`] until one full
    /// window of history exists, and for windows with no energy.
    pub fn centroid(&mut self) -> f32 {
        let len = self.history.len();
        if self.filled < len {
            return NEUTRAL_CENTROID;
        }

        // Unroll the ring into time order, applying the window as we go.
        // write_pos points at the oldest sample.
        for i in 0..len {
            let sample = self.history[(self.write_pos + i) % len];
            self.fft_buf[i].re = sample * self.window[i];
            self.fft_buf[i].im = 0.0;
        }

        self.fft
            .process_with_scratch(&mut self.fft_buf, &mut self.fft_scratch);

        // Magnitude-weighted mean over positive-frequency bins. Bin 0 (DC)
        // carries no pitch information and is skipped.
        let bin_hz = self.sample_rate / len as f32;
        let mut weighted = 0.0f32;
        let mut total = 0.0f32;
        for (k, bin) in self.fft_buf.iter().enumerate().take(len / 2).skip(1) {
            let magnitude = bin.norm();
            weighted += k as f32 * bin_hz * magnitude;
            total += magnitude;
        }

        if total <= f32::EPSILON {
            return NEUTRAL_CENTROID;
        }

        let nyquist = self.sample_rate / 2.0;
        (weighted / total / nyquist).clamp(0.0, 1.0)
    }

    pub fn window_len(&self) -> usize {
        self.history.len()
    }

    pub fn reset(&mut self) {
        self.history.fill(0.0);
        self.write_pos = 0;
        self.filled = 0;
    }
}
