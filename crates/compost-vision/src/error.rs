//! Error types for detection runs.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for detection operations.
pub type VisionResult<T> = Result<T, VisionError>;

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("Model not found: {0}")]
    ModelNotFound(PathBuf),

    #[error("Source image not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Invalid model output: {0}")]
    InvalidOutput(String),
}

impl VisionError {
    pub fn model_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ModelNotFound(path.into())
    }

    pub fn source_not_found(path: impl Into<PathBuf>) -> Self {
        Self::SourceNotFound(path.into())
    }

    pub fn inference(message: impl Into<String>) -> Self {
        Self::Inference(message.into())
    }

    pub fn invalid_output(message: impl Into<String>) -> Self {
        Self::InvalidOutput(message.into())
    }
}
