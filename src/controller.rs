use crate::analysis::calibration::{Calibrator, FeatureNormalizer};
use crate::analysis::{EnvelopeFollower, OnsetDetector, SpectralAnalyzer};
use crate::config::{
    AnalysisConfig, ConfigError, ControlFrame, REFRACTORY_DIVISOR, TRIGGER_THRESHOLD_MAX,
};
use crate::mapping::{ModulationContext, ParameterMapping};
use crate::synth::SnareDrum;

/*
Drum Controller
===============

Orchestrates the whole pipeline once per incoming sample, in strict
order:

    input ── follower ── detector ──(onset)── analyzer.centroid
                                              normalizer
                                              mapping.apply
                                              drum.retrigger
    drum.process ── output

Control-rate state (thresholds, the parameter mapping, the listen flag)
enters only through apply_control, called once per block boundary and
held fixed for the block. The per-sample path allocates nothing, locks
nothing, and cannot fail: any finite input produces a finite, bounded
output.

An explicitly constructed controller owns every piece of state - there
are no process-wide singletons, and as many instances as needed can
coexist (the tests rely on that).
*/

/// Read-only observation of the most recent step, for scopes and logging.
/// The core never depends on this being consumed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Telemetry {
    /// Normalized energy of the last onset.
    pub energy: f32,
    /// Normalized spectral centroid of the last onset.
    pub centroid: f32,
    /// Whether the most recent `process` call fired an onset.
    pub triggered: bool,
}

pub struct DrumController {
    sample_rate: f32,
    follower: EnvelopeFollower,
    detector: OnsetDetector,
    analyzer: SpectralAnalyzer,
    calibrator: Calibrator,
    normalizer: FeatureNormalizer,
    mapping: ParameterMapping,
    listen: bool,
    drum: SnareDrum,
    context: ModulationContext,
    telemetry: Telemetry,
}

impl DrumController {
    pub fn new(sample_rate: f32) -> Result<Self, ConfigError> {
        Self::with_config(sample_rate, AnalysisConfig::default())
    }

    /// Fails fast on misconfiguration so nothing invalid reaches the
    /// per-sample loop.
    pub fn with_config(sample_rate: f32, config: AnalysisConfig) -> Result<Self, ConfigError> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(ConfigError::InvalidSampleRate(sample_rate));
        }
        if config.window_len < AnalysisConfig::MIN_WINDOW_LEN {
            return Err(ConfigError::WindowTooShort {
                min: AnalysisConfig::MIN_WINDOW_LEN,
                got: config.window_len,
            });
        }

        let frame = ControlFrame::default();
        let mut controller = Self {
            sample_rate,
            follower: EnvelopeFollower::new(sample_rate, config.attack_time, config.release_time),
            detector: OnsetDetector::new(0.0, 0.0, 0),
            analyzer: SpectralAnalyzer::new(sample_rate, config.window_len),
            calibrator: Calibrator::new(),
            normalizer: FeatureNormalizer::default(),
            mapping: frame.mapping,
            listen: false,
            drum: SnareDrum::new(sample_rate),
            context: ModulationContext::default(),
            telemetry: Telemetry::default(),
        };
        controller.apply_control(&frame);
        Ok(controller)
    }

    /// Snapshot one block's control state. Call once per block boundary;
    /// everything here is latched until the next call.
    pub fn apply_control(&mut self, frame: &ControlFrame) {
        let onset_threshold =
            frame.trigger_threshold.clamp(0.0, TRIGGER_THRESHOLD_MAX) / TRIGGER_THRESHOLD_MAX;
        let refractory = (self.sample_rate / REFRACTORY_DIVISOR) as u32;
        self.detector
            .update_parameters(onset_threshold, onset_threshold / 2.0, refractory);

        self.mapping = frame.mapping;

        // A fresh listen session starts with an empty calibration window.
        if frame.listen && !self.listen {
            self.calibrator.reset();
        }
        self.listen = frame.listen;
    }

    /// Process one input sample and return one output sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.telemetry.triggered = false;

        self.analyzer.push(input);
        let envelope = self.follower.step(input);

        if let Some(onset) = self.detector.step(envelope) {
            let centroid = self.analyzer.centroid();

            if self.listen {
                // Calibration path: fit the normalization ranges to the
                // live material instead of driving the drum.
                self.calibrator.observe(onset.envelope, centroid);
                self.normalizer = self.calibrator.normalizer();
            } else {
                self.context = ModulationContext {
                    energy: self.normalizer.energy.normalize(onset.envelope),
                    centroid: self.normalizer.centroid.normalize(centroid),
                };
                let params = self.mapping.apply(&self.context);
                self.drum.retrigger(&params);
            }

            self.telemetry = Telemetry {
                energy: self.normalizer.energy.normalize(onset.envelope),
                centroid: self.normalizer.centroid.normalize(centroid),
                triggered: true,
            };
        }

        self.drum.process()
    }

    /// Process a whole block: snapshot the control frame, then run every
    /// sample through [`process`](Self::process). Input and output may be
    /// the same length only; extra output samples are not produced.
    pub fn process_block(&mut self, frame: &ControlFrame, input: &[f32], output: &mut [f32]) {
        self.apply_control(frame);
        for (x, y) in input.iter().zip(output.iter_mut()) {
            *y = self.process(*x);
        }
    }

    pub fn telemetry(&self) -> Telemetry {
        self.telemetry
    }

    /// Features the drum is currently voiced with.
    pub fn modulation_context(&self) -> ModulationContext {
        self.context
    }

    pub fn normalizer(&self) -> FeatureNormalizer {
        self.normalizer
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn is_active(&self) -> bool {
        self.drum.is_active()
    }
}
