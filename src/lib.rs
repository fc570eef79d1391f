pub mod dsp;
pub mod error;
pub mod session;

pub use dsp::buffer::StreamingBuffer;
pub use dsp::effects::{Effect, EffectKind, EffectsProcessor};
pub use dsp::envelope::EnvelopeParams;
pub use dsp::oscillator::{Synthesizer, Waveform};
pub use dsp::studio::{Note, Studio, StudioState};
pub use dsp::track::{Track, TrackState};
pub use error::StudioError;
pub use session::{render_session, render_session_wav, SessionSpec, TrackSpec};

use wasm_bindgen::prelude::*;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the livestudio-core version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// WASM-exposed: render a JSON session descriptor to a WAV byte array.
#[wasm_bindgen]
pub fn render_session_wav_js(session_json: &str) -> Result<Vec<u8>, JsValue> {
    let spec = session::parse_session(session_json).map_err(|e| JsValue::from_str(&format!("{e}")))?;
    session::render_session_wav(&spec).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: render a JSON session descriptor to mono f32 samples.
/// Returns the left channel (the mix path is mono pre-duplication) as a
/// raw audio buffer for AudioWorklet playback.
#[wasm_bindgen]
pub fn render_session_samples(session_json: &str) -> Result<Vec<f32>, JsValue> {
    let spec = session::parse_session(session_json).map_err(|e| JsValue::from_str(&format!("{e}")))?;
    let (left, _right) =
        session::render_session(&spec).map_err(|e| JsValue::from_str(&format!("{e}")))?;
    Ok(left.iter().map(|&s| s as f32).collect())
}

/// WASM-exposed: build a session's studio and return its state snapshot
/// (tempo, time signature, master volume, per-track parameters).
#[wasm_bindgen]
pub fn session_state(session_json: &str) -> Result<JsValue, JsValue> {
    let spec = session::parse_session(session_json).map_err(|e| JsValue::from_str(&format!("{e}")))?;
    let state =
        session::session_state(&spec).map_err(|e| JsValue::from_str(&format!("{e}")))?;
    serde_wasm_bindgen::to_value(&state).map_err(|e| JsValue::from_str(&format!("{e}")))
}
