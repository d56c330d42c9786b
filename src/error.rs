use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by configuration loading and frame output.
///
/// The per-frame update path never errors; invalid time input is reported
/// through [`crate::scene::UpdateOutcome::Skipped`] instead.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read config {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("frame buffer is {actual} bytes, expected {expected}")]
    FrameSize { expected: usize, actual: usize },

    #[error("failed to write {}: {message}", path.display())]
    Output { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, SceneError>;
