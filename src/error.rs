use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Could not probe duration of {path:?}: {reason}")]
    ProbeFailure { path: PathBuf, reason: String },

    #[error("ffmpeg error: {stderr}")]
    EncodeFailure {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Failed to execute {program}: {source}")]
    LaunchFailure {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported file format: {0:?}")]
    UnsupportedInput(PathBuf),

    #[error("Unrecognized ambiguity preset: {0:?}")]
    UnrecognizedPreset(String),

    #[error("Failed to create output directory {path:?}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EncodeError {
    /// Exit code of the encoder, when it got far enough to produce one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            EncodeError::EncodeFailure { exit_code, .. } => *exit_code,
            _ => None,
        }
    }

    pub fn stderr_text(&self) -> &str {
        match self {
            EncodeError::EncodeFailure { stderr, .. } => stderr,
            _ => "",
        }
    }
}

pub type Result<T> = std::result::Result<T, EncodeError>;
