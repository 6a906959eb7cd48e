/*
Onset Detection
===============

A small state machine over the envelope-follower output that emits one
event per percussive hit. Two mechanisms keep it from chattering:

  hysteresis    The detector arms on `onset_threshold` but only re-arms
                after the envelope has fallen below `release_threshold`
                (half the onset threshold at the control surface). A
                signal hovering around the onset threshold cannot
                retrigger on every wobble.

  refractory    After an emission the detector is dead for a fixed
                number of samples (sample_rate / 20 at the control
                surface), whatever the envelope does. This puts a hard
                floor on inter-onset spacing, so the drum's own decay
                tail leaking back into the microphone cannot retrigger
                it immediately.


The State Machine
-----------------

        envelope >= onset_threshold: emit Onset
      ┌──────────────────────────────────────────┐
      │                                          ▼
  ┌──────┐                                ┌────────────┐
  │ Idle │                                │ Refractory │──┐ clock running,
  └──────┘                                └────────────┘  │ or envelope still
      ▲                                          │  ▲     │ above release
      └──────────────────────────────────────────┘  └─────┘
        clock >= refractory_samples AND
        envelope < release_threshold

Emission happens on the Idle → Refractory edge; there is no separate
"Triggered" state to hold, the event is returned from the same step.
*/

/// A detected onset. Carries the raw envelope value at the trigger sample;
/// normalization into [0, 1] is the caller's concern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Onset {
    pub envelope: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorState {
    Idle,
    Refractory,
}

#[derive(Debug, Clone)]
pub struct OnsetDetector {
    state: DetectorState,
    onset_threshold: f32,
    release_threshold: f32,
    refractory_samples: u32,
    refractory_clock: u32,
}

impl OnsetDetector {
    pub fn new(onset_threshold: f32, release_threshold: f32, refractory_samples: u32) -> Self {
        Self {
            state: DetectorState::Idle,
            onset_threshold,
            release_threshold,
            refractory_samples,
            refractory_clock: 0,
        }
    }

    /// Update thresholds at control rate. Safe to call between samples;
    /// an in-flight refractory period keeps its original clock.
    pub fn update_parameters(
        &mut self,
        onset_threshold: f32,
        release_threshold: f32,
        refractory_samples: u32,
    ) {
        self.onset_threshold = onset_threshold;
        self.release_threshold = release_threshold;
        self.refractory_samples = refractory_samples;
    }

    /// Evaluate one transition. Called once per sample with the envelope
    /// value for that sample; returns `Some` only on the trigger sample.
    #[inline]
    pub fn step(&mut self, envelope: f32) -> Option<Onset> {
        match self.state {
            DetectorState::Idle => {
                if envelope >= self.onset_threshold {
                    self.state = DetectorState::Refractory;
                    self.refractory_clock = 0;
                    return Some(Onset { envelope });
                }
                None
            }
            DetectorState::Refractory => {
                self.refractory_clock = self.refractory_clock.saturating_add(1);
                if self.refractory_clock >= self.refractory_samples && self.released(envelope) {
                    self.state = DetectorState::Idle;
                }
                None
            }
        }
    }

    /// A non-positive release threshold is treated as always satisfied so a
    /// degenerate configuration cannot deadlock the detector in Refractory.
    #[inline]
    fn released(&self, envelope: f32) -> bool {
        self.release_threshold <= 0.0 || envelope < self.release_threshold
    }

    pub fn state(&self) -> DetectorState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = DetectorState::Idle;
        self.refractory_clock = 0;
    }
}
