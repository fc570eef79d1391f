//! Per-track effects — stateless, length-preserving transforms.
//!
//! Every effect consumes a whole sample buffer and returns a new buffer
//! of the same length. Reverb and delay conceptually extend the tail but
//! are truncated back to the input length; that truncation is part of
//! the engine's contract and is pinned by tests. No effect carries state
//! across calls and none can fail.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::REVERB_PREDELAY_SECS;

/// Effect discriminant, used to key a track's applied-effects record
/// and to give state snapshots a stable effect ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    Reverb,
    Delay,
    Compression,
    Normalize,
}

/// An effect with its parameter set.
///
/// Defaults match the engine's historical keyword defaults so a bare
/// `{"kind": "reverb"}` in a session descriptor behaves the same as the
/// untyped call it replaces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Effect {
    Reverb {
        #[serde(default = "default_reverb_decay")]
        decay: f64,
    },
    Delay {
        #[serde(default = "default_delay_time")]
        time: f64,
        #[serde(default = "default_delay_feedback")]
        feedback: f64,
    },
    Compression {
        #[serde(default = "default_compression_threshold")]
        threshold: f64,
        #[serde(default = "default_compression_ratio")]
        ratio: f64,
    },
    Normalize {
        #[serde(default = "default_normalize_target")]
        target: f64,
    },
}

fn default_reverb_decay() -> f64 {
    0.5
}
fn default_delay_time() -> f64 {
    0.25
}
fn default_delay_feedback() -> f64 {
    0.3
}
fn default_compression_threshold() -> f64 {
    0.6
}
fn default_compression_ratio() -> f64 {
    4.0
}
fn default_normalize_target() -> f64 {
    0.9
}

impl Effect {
    pub fn kind(&self) -> EffectKind {
        match self {
            Effect::Reverb { .. } => EffectKind::Reverb,
            Effect::Delay { .. } => EffectKind::Delay,
            Effect::Compression { .. } => EffectKind::Compression,
            Effect::Normalize { .. } => EffectKind::Normalize,
        }
    }
}

/// A track's applied-effects record: effect kind → most recent params.
pub type AppliedEffects = HashMap<EffectKind, Effect>;

/// Stateless effects processor bound to a sample rate.
#[derive(Debug, Clone)]
pub struct EffectsProcessor {
    pub sample_rate: f64,
}

impl EffectsProcessor {
    pub fn new(sample_rate: f64) -> Self {
        EffectsProcessor { sample_rate }
    }

    /// Apply an effect, returning a new buffer of the same length.
    pub fn apply(&self, effect: &Effect, samples: &[f64]) -> Vec<f64> {
        match *effect {
            Effect::Reverb { decay } => self.reverb(samples, decay),
            Effect::Delay { time, feedback } => self.delay(samples, time, feedback),
            Effect::Compression { threshold, ratio } => {
                self.compression(samples, threshold, ratio)
            }
            Effect::Normalize { target } => self.normalize(samples, target),
        }
    }

    /// Single-tap reverb: the input plus a copy delayed by
    /// [`REVERB_PREDELAY_SECS`], scaled by `decay`.
    pub fn reverb(&self, samples: &[f64], decay: f64) -> Vec<f64> {
        self.tap(samples, REVERB_PREDELAY_SECS, decay)
    }

    /// Single-tap delay: the input plus a copy delayed by `time`
    /// seconds, scaled by `feedback`. There is no recursive feedback
    /// loop — one echo only.
    pub fn delay(&self, samples: &[f64], time: f64, feedback: f64) -> Vec<f64> {
        self.tap(samples, time, feedback)
    }

    /// Shift-and-add shared by reverb and delay. The shifted copy is
    /// zero-filled at the head and truncated to the input length.
    fn tap(&self, samples: &[f64], time: f64, gain: f64) -> Vec<f64> {
        let shift = (time * self.sample_rate) as usize;
        samples
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                let echo = if i >= shift { samples[i - shift] } else { 0.0 };
                s + gain * echo
            })
            .collect()
    }

    /// Hard-knee compression: samples whose absolute value exceeds
    /// `threshold` are scaled by `1/ratio`; everything else passes
    /// untouched. No makeup gain, no look-ahead.
    pub fn compression(&self, samples: &[f64], threshold: f64, ratio: f64) -> Vec<f64> {
        samples
            .iter()
            .map(|&s| if s.abs() > threshold { s / ratio } else { s })
            .collect()
    }

    /// Scale the buffer so its peak absolute value equals `target`.
    /// Silence is returned unchanged.
    pub fn normalize(&self, samples: &[f64], target: f64) -> Vec<f64> {
        let peak = samples.iter().fold(0.0_f64, |m, &s| m.max(s.abs()));
        if peak > 0.0 {
            samples.iter().map(|&s| s * target / peak).collect()
        } else {
            samples.to_vec()
        }
    }
}
