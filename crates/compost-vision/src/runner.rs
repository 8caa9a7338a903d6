//! One-shot prediction runs.
//!
//! Each run gets its own directory under the project root: `predict`, then
//! `predict2`, `predict3` and so on when earlier runs exist.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::annotate::draw_detections;
use crate::config::RunnerConfig;
use crate::detector::{Detection, Detector};
use crate::error::{VisionError, VisionResult};

/// Outcome of a run, printed as JSON by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionReport {
    pub source: PathBuf,
    pub saved_to: PathBuf,
    pub model: PathBuf,
    pub detections: Vec<Detection>,
}

/// First unused run directory for `name` under `project_dir`.
pub fn next_run_dir(project_dir: &Path, name: &str) -> PathBuf {
    let first = project_dir.join(name);
    if !first.exists() {
        return first;
    }

    (2u32..)
        .map(|n| project_dir.join(format!("{}{}", name, n)))
        .find(|dir| !dir.exists())
        .unwrap_or(first)
}

/// Detect objects in `source` once and save an annotated copy.
pub fn run_once<D>(detector: &D, source: &Path, config: &RunnerConfig) -> VisionResult<DetectionReport>
where
    D: Detector + ?Sized,
{
    if !source.is_file() {
        return Err(VisionError::source_not_found(source));
    }

    let img = image::open(source)?;
    let detections = detector.detect(&img)?;

    let mut annotated = img.to_rgb8();
    draw_detections(&mut annotated, &detections);

    let run_dir = next_run_dir(&config.project_dir, &config.name);
    std::fs::create_dir_all(&run_dir)?;

    let file_name = source
        .file_name()
        .ok_or_else(|| VisionError::source_not_found(source))?;
    let saved_to = run_dir.join(file_name);
    annotated.save(&saved_to)?;

    info!(
        source = %source.display(),
        saved_to = %saved_to.display(),
        count = detections.len(),
        "Prediction saved"
    );

    Ok(DetectionReport {
        source: source.to_path_buf(),
        saved_to,
        model: detector.model_path().to_path_buf(),
        detections,
    })
}
