//! ADSR envelope generator.
//!
//! Renders the whole amplitude curve for a note up front: the engine
//! synthesizes notes offline into buffers, so the envelope is a pure
//! function of the sample count rather than a per-sample state machine.

/// ADSR parameters with linear attack/decay/release curves.
///
/// Times are in seconds, sustain is a level in [0, 1]. Parameters are
/// fixed per synthesizer instance, not per note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeParams {
    /// Attack time in seconds.
    pub attack: f64,
    /// Decay time in seconds.
    pub decay: f64,
    /// Sustain level [0, 1].
    pub sustain: f64,
    /// Release time in seconds.
    pub release: f64,
}

impl Default for EnvelopeParams {
    fn default() -> Self {
        EnvelopeParams {
            attack: 0.01,
            decay: 0.1,
            sustain: 0.7,
            release: 0.3,
        }
    }
}

impl EnvelopeParams {
    /// Render the envelope as `length` multipliers in [0, 1].
    ///
    /// Segments: 0→1 over the attack, 1→sustain over the decay, hold at
    /// sustain for whatever remains, sustain→0 over the release. Each
    /// ramp is floored to one sample so no segment degenerates to an
    /// empty slice. If attack + decay + release exceed `length`, the
    /// sustain hold is empty and the concatenation is truncated to
    /// exactly `length` samples, so the release tail dominates.
    pub fn render(&self, length: usize, sample_rate: f64) -> Vec<f64> {
        let attack_len = (self.attack * sample_rate) as usize;
        let decay_len = (self.decay * sample_rate) as usize;
        let release_len = (self.release * sample_rate) as usize;
        let sustain_len =
            length.saturating_sub(attack_len + decay_len + release_len);

        let mut curve = Vec::with_capacity(length + 3);
        ramp(&mut curve, 0.0, 1.0, attack_len.max(1));
        ramp(&mut curve, 1.0, self.sustain, decay_len.max(1));
        curve.extend(std::iter::repeat(self.sustain).take(sustain_len));
        ramp(&mut curve, self.sustain, 0.0, release_len.max(1));

        curve.truncate(length);
        curve
    }
}

/// Append `n` evenly spaced values from `start` to `end` inclusive.
fn ramp(out: &mut Vec<f64>, start: f64, end: f64, n: usize) {
    if n == 1 {
        out.push(start);
        return;
    }
    let step = (end - start) / (n - 1) as f64;
    for i in 0..n {
        out.push(start + step * i as f64);
    }
}
