use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading and validating a video export.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported input format for {path}: expected .csv or .json")]
    UnsupportedFormat { path: PathBuf },

    #[error("Row {row} has an empty video id")]
    MissingId { row: usize },

    #[error("Video {video_id} has invalid {field}: {value}")]
    InvalidMetric {
        video_id: String,
        field: &'static str,
        value: f64,
    },

    #[error("Video {video_id} appears more than once in channel {channel_id}")]
    DuplicateVideo { video_id: String, channel_id: String },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("priority must be between 1 and 5, got {0}")]
pub struct PriorityError(pub u8);

pub type InputResult<T> = Result<T, InputError>;
