//! DSP Engine — Pure Rust audio synthesis and processing.
//!
//! All DSP runs in Rust for deterministic, cross-platform audio output.
//! The same code powers both the WebAudio (via AudioWorklet + WASM) and
//! native in-process consumers (the orchestrator, offline WAV export).

pub mod buffer;
pub mod effects;
pub mod envelope;
pub mod mixer;
pub mod oscillator;
pub mod renderer;
pub mod studio;
pub mod track;

/// Amplitude scale applied to every synthesized note so that multiple
/// notes and tracks can sum later without clipping.
pub const NOTE_HEADROOM: f64 = 0.3;

/// Peak level the master bus is normalized to before master volume.
pub const MIX_NORMALIZE_TARGET: f64 = 0.9;

/// Pre-delay of the reverb tap, in seconds.
pub const REVERB_PREDELAY_SECS: f64 = 0.05;

/// Default streaming buffer capacity: one second at 44.1 kHz.
pub const STREAM_BUFFER_CAPACITY: usize = 44100;
