//! Oscillators — naive periodic waveforms rendered to buffers.
//!
//! The engine's contract fixes the exact sample values produced for each
//! waveform, so these are the direct phase formulas with no band
//! limiting. Notes are rendered whole (offline) and shaped by the ADSR
//! envelope, then scaled by [`NOTE_HEADROOM`] to leave summing room.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::envelope::EnvelopeParams;
use super::NOTE_HEADROOM;

/// Supported waveform shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Default for Waveform {
    fn default() -> Self {
        Waveform::Sine
    }
}

impl Waveform {
    /// Parse a waveform name. Unknown names fall back to `Sine` — an
    /// explicit default, not an error.
    pub fn from_name(s: &str) -> Waveform {
        match s {
            "sine" => Waveform::Sine,
            "square" => Waveform::Square,
            "sawtooth" | "saw" => Waveform::Sawtooth,
            "triangle" => Waveform::Triangle,
            _ => Waveform::Sine,
        }
    }

    /// Sample value at phase `ft` (frequency × time, in cycles).
    fn sample(&self, ft: f64) -> f64 {
        match self {
            Waveform::Sine => (2.0 * PI * ft).sin(),
            Waveform::Square => signum_or_zero((2.0 * PI * ft).sin()),
            Waveform::Sawtooth => 2.0 * (ft - (ft + 0.5).floor()),
            Waveform::Triangle => 4.0 * (ft - (ft + 0.75).floor() - 0.5).abs() - 1.0,
        }
    }
}

/// `sign` with `sign(0) == 0`, matching the mathematical convention the
/// square formula is defined against.
fn signum_or_zero(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Renders single notes: one oscillator shaped by an ADSR envelope.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    pub sample_rate: f64,
    /// Envelope applied to every note. Fixed per synthesizer instance.
    pub envelope: EnvelopeParams,
}

impl Synthesizer {
    pub fn new(sample_rate: f64) -> Self {
        Synthesizer {
            sample_rate,
            envelope: EnvelopeParams::default(),
        }
    }

    /// Synthesize one note: `round(duration × sample_rate)` samples of
    /// the waveform at `frequency` Hz, envelope-shaped and scaled by
    /// [`NOTE_HEADROOM`].
    ///
    /// Total over its numeric domain: a zero frequency renders the
    /// waveform's value at phase 0 for the whole note (silence for sine
    /// and sawtooth), a negative frequency mirrors the phase. Neither is
    /// rejected or clamped.
    pub fn synthesize_note(&self, frequency: f64, duration: f64, waveform: Waveform) -> Vec<f64> {
        let length = (duration * self.sample_rate).round() as usize;
        let curve = self.envelope.render(length, self.sample_rate);

        (0..length)
            .map(|i| {
                let t = i as f64 / self.sample_rate;
                waveform.sample(frequency * t) * curve[i] * NOTE_HEADROOM
            })
            .collect()
    }
}
