//! Object detection for Compost.
//!
//! Loads a YOLO-format ONNX model, runs it once on an image and saves an
//! annotated copy under a fresh run directory.

pub mod annotate;
pub mod config;
pub mod detector;
pub mod error;
pub mod runner;

pub use config::{DetectorConfig, RunnerConfig};
pub use detector::{
    decode_predictions, non_maximum_suppression, BoundingBox, Detection,
    Detector, ObjectDetector,
};
pub use error::{VisionError, VisionResult};
pub use runner::{next_run_dir, run_once, DetectionReport};
