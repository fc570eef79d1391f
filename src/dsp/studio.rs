//! Studio — track registry, global state, and the public engine surface.
//!
//! Owns a fixed-size collection of named tracks plus the synthesizer and
//! effects processors, and exposes the operations the orchestrator
//! drives: record, generate, apply effects, mix. All operations are
//! synchronous call/return; the only concurrency-aware component is the
//! [`StreamingBuffer`](super::buffer::StreamingBuffer).

use serde::{Deserialize, Serialize};

use crate::error::StudioError;

use super::effects::{Effect, EffectsProcessor};
use super::mixer::mix_down;
use super::oscillator::{Synthesizer, Waveform};
use super::track::{Track, TrackState};

/// One symbolic note event: frequency in Hz, duration in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub frequency: f64,
    pub duration: f64,
}

impl From<(f64, f64)> for Note {
    fn from((frequency, duration): (f64, f64)) -> Self {
        Note {
            frequency,
            duration,
        }
    }
}

/// The live studio engine.
pub struct Studio {
    pub sample_rate: f64,
    tracks: Vec<Track>,
    synthesizer: Synthesizer,
    effects: EffectsProcessor,
    tempo: u32,
    time_signature: (u32, u32),
    master_volume: f64,
}

impl Studio {
    /// Create a studio with `num_tracks` empty tracks named
    /// `track_0 … track_{n-1}`, all unmuted at volume 1.0, pan 0.0.
    pub fn new(sample_rate: f64, num_tracks: usize) -> Self {
        let tracks = (0..num_tracks)
            .map(|i| Track::new(format!("track_{i}")))
            .collect();
        Studio {
            sample_rate,
            tracks,
            synthesizer: Synthesizer::new(sample_rate),
            effects: EffectsProcessor::new(sample_rate),
            tempo: 120,
            time_signature: (4, 4),
            master_volume: 1.0,
        }
    }

    fn track_mut(&mut self, name: &str) -> Result<&mut Track, StudioError> {
        self.tracks
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| StudioError::TrackNotFound {
                name: name.to_string(),
            })
    }

    /// Look up a track by name.
    pub fn track(&self, name: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.name == name)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn num_tracks(&self) -> usize {
        self.tracks.len()
    }

    /// Replace a track's sample content outright.
    pub fn record_track(&mut self, name: &str, samples: Vec<f64>) -> Result<(), StudioError> {
        self.track_mut(name)?.samples = samples;
        Ok(())
    }

    /// Synthesize a note sequence into a track: each note rendered by
    /// the oscillator, segments concatenated, stored as the track's
    /// samples. Returns the generated audio.
    pub fn generate_track(
        &mut self,
        name: &str,
        notes: &[Note],
        waveform: Waveform,
    ) -> Result<&[f64], StudioError> {
        let mut audio = Vec::new();
        for note in notes {
            audio.extend(
                self.synthesizer
                    .synthesize_note(note.frequency, note.duration, waveform),
            );
        }
        let track = self.track_mut(name)?;
        track.samples = audio;
        Ok(&track.samples)
    }

    /// Apply an effect to a track's audio in place and record its
    /// parameters under the effect's kind, overwriting any prior record
    /// for that kind.
    pub fn apply_effect(&mut self, name: &str, effect: &Effect) -> Result<(), StudioError> {
        let processed = {
            let track = self.track(name).ok_or_else(|| StudioError::TrackNotFound {
                name: name.to_string(),
            })?;
            self.effects.apply(effect, &track.samples)
        };
        let track = self.track_mut(name)?;
        track.samples = processed;
        track.effects.insert(effect.kind(), *effect);
        Ok(())
    }

    /// Set a track's volume, clamped to [0, 1]. The new volume scales
    /// the track's current samples destructively — repeated calls
    /// compound rather than reset to an absolute level.
    pub fn set_volume(&mut self, name: &str, volume: f64) -> Result<(), StudioError> {
        let volume = volume.clamp(0.0, 1.0);
        let track = self.track_mut(name)?;
        for s in track.samples.iter_mut() {
            *s *= volume;
        }
        track.volume = volume;
        Ok(())
    }

    /// Set a track's pan, clamped to [-1, 1]. Stored as metadata only;
    /// the mix path stays mono until the final stereo duplication.
    pub fn set_pan(&mut self, name: &str, pan: f64) -> Result<(), StudioError> {
        self.track_mut(name)?.pan = pan.clamp(-1.0, 1.0);
        Ok(())
    }

    /// Mute a track. Unknown names are silently ignored.
    pub fn mute_track(&mut self, name: &str) {
        if let Ok(track) = self.track_mut(name) {
            track.muted = true;
        }
    }

    /// Unmute a track. Unknown names are silently ignored.
    pub fn unmute_track(&mut self, name: &str) {
        if let Ok(track) = self.track_mut(name) {
            track.muted = false;
        }
    }

    /// Set the studio tempo in BPM. No bound is enforced.
    pub fn set_tempo(&mut self, bpm: u32) {
        self.tempo = bpm;
    }

    pub fn set_time_signature(&mut self, numerator: u32, denominator: u32) {
        self.time_signature = (numerator, denominator);
    }

    /// Set the master volume. No bound is enforced.
    pub fn set_master_volume(&mut self, volume: f64) {
        self.master_volume = volume;
    }

    /// Mix all tracks to a stereo master pair. See
    /// [`mix_down`](super::mixer::mix_down) for the exact semantics.
    pub fn mix(&self) -> (Vec<f64>, Vec<f64>) {
        mix_down(&self.tracks, self.master_volume, &self.effects)
    }

    /// Snapshot the studio's state for the orchestrator.
    pub fn state(&self) -> StudioState {
        StudioState {
            tempo: self.tempo,
            time_signature: self.time_signature,
            master_volume: self.master_volume,
            num_tracks: self.tracks.len(),
            tracks: self.tracks.iter().map(|t| t.state()).collect(),
        }
    }
}

/// Serializable snapshot of the studio's global and per-track state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioState {
    pub tempo: u32,
    pub time_signature: (u32, u32),
    pub master_volume: f64,
    pub num_tracks: usize,
    pub tracks: Vec<TrackState>,
}
