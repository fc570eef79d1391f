use std::fmt;

/// Errors raised by the studio engine.
///
/// `TrackNotFound` is the only domain error the DSP core itself raises;
/// every numeric operation (oscillator, envelope, effects, mixer) is
/// total over its input domain. `InvalidSession` is produced at the
/// session surface when a descriptor fails to decode.
#[derive(Debug)]
pub enum StudioError {
    TrackNotFound { name: String },
    InvalidSession { message: String },
}

impl fmt::Display for StudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudioError::TrackNotFound { name } => write!(f, "Track '{name}' not found"),
            StudioError::InvalidSession { message } => {
                write!(f, "Invalid session descriptor: {message}")
            }
        }
    }
}

impl std::error::Error for StudioError {}

impl From<serde_json::Error> for StudioError {
    fn from(e: serde_json::Error) -> Self {
        StudioError::InvalidSession {
            message: e.to_string(),
        }
    }
}
