//! Error types for magnet construction, field evaluation and rotation.

use nalgebra::Vector3;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MagnetError {
    /// The rotation axis has zero length, is not finite, or an alignment step degenerated.
    #[error("invalid rotation axis: {0}")]
    InvalidAxis(String),

    /// The field was evaluated exactly at the position of a source charge.
    #[error("field is singular at ({}, {}, {})", .position[0], .position[1], .position[2])]
    FieldSingularity { position: Vector3<f64> },

    #[error("invalid shape: {0}")]
    InvalidShape(String),

    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, MagnetError>;
