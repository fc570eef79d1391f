//! Track — a named, independently mixable mono sample sequence.

use serde::{Deserialize, Serialize};

use super::effects::AppliedEffects;

/// One studio track: its audio plus mix parameters.
///
/// `samples` holds whatever the last record/generate call produced;
/// effects rewrite it in place without changing its length. Tracks are
/// owned exclusively by their [`Studio`](super::studio::Studio) and
/// mutated only through it.
#[derive(Debug, Clone)]
pub struct Track {
    pub name: String,
    /// Mono amplitude values, roughly [-1, 1] but not hard-clamped.
    pub samples: Vec<f64>,
    pub muted: bool,
    /// Gain in [0, 1]. Setting it scales `samples` destructively, so
    /// repeated sets compound rather than replace.
    pub volume: f64,
    /// Stereo position in [-1, 1]. Recorded metadata only — the mix
    /// path is monophonic up to the final stereo duplication.
    pub pan: f64,
    /// Most recent parameter set per applied effect kind. Re-applying a
    /// kind overwrites its record; the audio of both passes persists in
    /// `samples`.
    pub effects: AppliedEffects,
}

impl Track {
    pub fn new(name: impl Into<String>) -> Self {
        Track {
            name: name.into(),
            samples: Vec::new(),
            muted: false,
            volume: 1.0,
            pan: 0.0,
            effects: AppliedEffects::new(),
        }
    }

    /// Snapshot of the track's parameters (audio excluded). Effects are
    /// listed in a stable kind order regardless of application order.
    pub fn state(&self) -> TrackState {
        let mut effects: Vec<_> = self.effects.values().copied().collect();
        effects.sort_by_key(|e| e.kind());
        TrackState {
            name: self.name.clone(),
            muted: self.muted,
            volume: self.volume,
            pan: self.pan,
            effects,
        }
    }
}

/// Serializable view of a track's parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackState {
    pub name: String,
    pub muted: bool,
    pub volume: f64,
    pub pan: f64,
    #[serde(default)]
    pub effects: Vec<super::effects::Effect>,
}
