//! Session descriptors — the orchestrator's data contract.
//!
//! The higher-level orchestrator (prompt interpretation, event log,
//! config persistence) lives outside this crate; what crosses the
//! boundary is a structured record describing a studio session. These
//! types are that record, serde-enabled so the same JSON works from the
//! WASM surface and from native hosts.

use serde::{Deserialize, Serialize};

use crate::dsp::effects::Effect;
use crate::dsp::oscillator::Waveform;
use crate::dsp::studio::{Note, Studio, StudioState};
use crate::error::StudioError;

/// A full session: global settings plus one entry per track to realize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSpec {
    #[serde(default = "default_sample_rate")]
    pub sample_rate: f64,
    #[serde(default = "default_num_tracks")]
    pub num_tracks: usize,
    #[serde(default = "default_tempo")]
    pub tempo: u32,
    #[serde(default = "default_time_signature")]
    pub time_signature: (u32, u32),
    #[serde(default = "default_master_volume")]
    pub master_volume: f64,
    #[serde(default)]
    pub tracks: Vec<TrackSpec>,
}

/// One track to generate and configure. `name` must refer to a track
/// slot the studio initialized (`track_0 … track_{n-1}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackSpec {
    pub name: String,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub waveform: Waveform,
    #[serde(default)]
    pub effects: Vec<Effect>,
    #[serde(default = "default_track_volume", skip_serializing_if = "is_unit")]
    pub volume: f64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub pan: f64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub muted: bool,
}

fn default_sample_rate() -> f64 {
    44100.0
}
fn default_num_tracks() -> usize {
    8
}
fn default_tempo() -> u32 {
    120
}
fn default_time_signature() -> (u32, u32) {
    (4, 4)
}
fn default_master_volume() -> f64 {
    1.0
}
fn default_track_volume() -> f64 {
    1.0
}
fn is_unit(v: &f64) -> bool {
    *v == 1.0
}
fn is_zero(v: &f64) -> bool {
    *v == 0.0
}

impl Default for SessionSpec {
    fn default() -> Self {
        SessionSpec {
            sample_rate: default_sample_rate(),
            num_tracks: default_num_tracks(),
            tempo: default_tempo(),
            time_signature: default_time_signature(),
            master_volume: default_master_volume(),
            tracks: Vec::new(),
        }
    }
}

/// Build a studio from a session descriptor: generate every track's
/// notes, apply its effects in order, then set volume/pan/mute.
///
/// `TrackNotFound` propagates uncaught if a track spec names a slot
/// outside `track_0 … track_{n-1}`.
pub fn build_studio(spec: &SessionSpec) -> Result<Studio, StudioError> {
    let mut studio = Studio::new(spec.sample_rate, spec.num_tracks);
    studio.set_tempo(spec.tempo);
    studio.set_time_signature(spec.time_signature.0, spec.time_signature.1);
    studio.set_master_volume(spec.master_volume);

    for track in &spec.tracks {
        if !track.notes.is_empty() {
            studio.generate_track(&track.name, &track.notes, track.waveform)?;
        }
        for effect in &track.effects {
            studio.apply_effect(&track.name, effect)?;
        }
        if track.volume != 1.0 {
            studio.set_volume(&track.name, track.volume)?;
        }
        if track.pan != 0.0 {
            studio.set_pan(&track.name, track.pan)?;
        }
        if track.muted {
            studio.mute_track(&track.name);
        }
    }

    Ok(studio)
}

/// Render a session straight to the stereo master pair.
pub fn render_session(spec: &SessionSpec) -> Result<(Vec<f64>, Vec<f64>), StudioError> {
    Ok(build_studio(spec)?.mix())
}

/// Render a session and encode the stereo master to a WAV file as
/// bytes (16-bit stereo PCM).
pub fn render_session_wav(spec: &SessionSpec) -> Result<Vec<u8>, StudioError> {
    let (left, right) = render_session(spec)?;
    Ok(crate::dsp::renderer::mix_to_wav(
        &left,
        &right,
        spec.sample_rate as u32,
    ))
}

/// Decode a JSON session descriptor.
pub fn parse_session(json: &str) -> Result<SessionSpec, StudioError> {
    Ok(serde_json::from_str(json)?)
}

/// Build a session's studio and snapshot its state.
pub fn session_state(spec: &SessionSpec) -> Result<StudioState, StudioError> {
    Ok(build_studio(spec)?.state())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_note_session() -> SessionSpec {
        SessionSpec {
            tracks: vec![TrackSpec {
                name: "track_0".to_string(),
                notes: vec![Note {
                    frequency: 440.0,
                    duration: 0.5,
                }],
                waveform: Waveform::Sine,
                effects: vec![],
                volume: 1.0,
                pan: 0.0,
                muted: false,
            }],
            ..SessionSpec::default()
        }
    }

    #[test]
    fn defaults_fill_minimal_json() {
        let spec = parse_session(r#"{"tracks": [{"name": "track_0"}]}"#).unwrap();
        assert_eq!(spec.sample_rate, 44100.0);
        assert_eq!(spec.num_tracks, 8);
        assert_eq!(spec.tempo, 120);
        assert_eq!(spec.time_signature, (4, 4));
        let t = &spec.tracks[0];
        assert_eq!(t.waveform, Waveform::Sine);
        assert_eq!(t.volume, 1.0);
        assert!(!t.muted);
    }

    #[test]
    fn malformed_json_is_invalid_session() {
        let err = parse_session("{ nope").unwrap_err();
        assert!(matches!(err, StudioError::InvalidSession { .. }));
    }

    #[test]
    fn render_produces_stereo_audio() {
        let (l, r) = render_session(&one_note_session()).unwrap();
        assert_eq!(l.len(), 22050);
        assert_eq!(l, r);
        let peak = l.iter().fold(0.0_f64, |m, &s| m.max(s.abs()));
        assert!(peak > 0.1, "session render should not be silent");
    }

    #[test]
    fn unknown_track_name_propagates() {
        let mut spec = one_note_session();
        spec.tracks[0].name = "track_99".to_string();
        assert!(matches!(
            render_session(&spec),
            Err(StudioError::TrackNotFound { .. })
        ));
    }

    #[test]
    fn effects_and_mix_params_applied() {
        let json = r#"{
            "num_tracks": 2,
            "master_volume": 0.5,
            "tracks": [
                {
                    "name": "track_0",
                    "notes": [{"frequency": 220.0, "duration": 0.25}],
                    "waveform": "square",
                    "effects": [{"kind": "reverb", "decay": 0.4}],
                    "volume": 0.8,
                    "pan": -0.5
                },
                {"name": "track_1", "muted": true}
            ]
        }"#;
        let spec = parse_session(json).unwrap();
        let studio = build_studio(&spec).unwrap();

        let t0 = studio.track("track_0").unwrap();
        assert_eq!(t0.samples.len(), 11025);
        assert_eq!(t0.volume, 0.8);
        assert_eq!(t0.pan, -0.5);
        assert_eq!(t0.effects.len(), 1);
        assert!(studio.track("track_1").unwrap().muted);

        let state = studio.state();
        assert_eq!(state.master_volume, 0.5);
        assert_eq!(state.num_tracks, 2);
    }

    #[test]
    fn session_wav_has_valid_header_and_size() {
        let wav = render_session_wav(&one_note_session()).unwrap();
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        // 0.5s at 44100 = 22050 frames * 2 channels * 2 bytes
        let data_size = u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]);
        assert_eq!(data_size, 88200);
        assert_eq!(wav.len(), 44 + 88200);
    }

    #[test]
    fn empty_session_wav_is_header_only() {
        let wav = render_session_wav(&SessionSpec::default()).unwrap();
        assert_eq!(wav.len(), 44);
    }

    #[test]
    fn spec_round_trips_through_json() {
        let spec = one_note_session();
        let json = serde_json::to_string(&spec).unwrap();
        let back = parse_session(&json).unwrap();
        assert_eq!(back.tracks[0].notes, spec.tracks[0].notes);
        assert_eq!(back.sample_rate, spec.sample_rate);
    }
}
