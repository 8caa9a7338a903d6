//! Detector and runner configuration.

use std::path::PathBuf;

pub const DEFAULT_MODEL_PATH: &str = "models/best.onnx";
pub const DEFAULT_PROJECT_DIR: &str = "runs/detect";
pub const DEFAULT_RUN_NAME: &str = "predict";

/// Configuration for the YOLO detector.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Path to ONNX model file
    pub model_path: PathBuf,
    /// Minimum best-class score kept
    pub confidence_threshold: f32,
    /// IoU above which a lower-confidence box of the same class is dropped
    pub iou_threshold: f32,
    /// Square model input size in pixels
    pub input_size: u32,
    /// Label per class id; ids without a name are shown as `class<N>`
    pub class_names: Vec<String>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            confidence_threshold: 0.25,
            iou_threshold: 0.45,
            input_size: 640,
            class_names: Vec::new(),
        }
    }
}

impl DetectorConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            model_path: std::env::var("DETECT_MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            confidence_threshold: env_parse("DETECT_CONFIDENCE")
                .unwrap_or(defaults.confidence_threshold),
            iou_threshold: env_parse("DETECT_IOU").unwrap_or(defaults.iou_threshold),
            input_size: env_parse("DETECT_INPUT_SIZE")
                .filter(|size| *size > 0)
                .unwrap_or(defaults.input_size),
            class_names: std::env::var("DETECT_CLASS_NAMES")
                .map(|s| parse_class_names(&s))
                .unwrap_or_default(),
        }
    }

    /// Display label for a class id.
    pub fn label(&self, class_id: usize) -> String {
        self.class_names
            .get(class_id)
            .cloned()
            .unwrap_or_else(|| format!("class{}", class_id))
    }
}

/// Where annotated prediction output is written.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Root holding one directory per run
    pub project_dir: PathBuf,
    /// Base name of a run directory; repeats get a numeric suffix
    pub name: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from(DEFAULT_PROJECT_DIR),
            name: DEFAULT_RUN_NAME.to_string(),
        }
    }
}

impl RunnerConfig {
    pub fn from_env() -> Self {
        Self {
            project_dir: std::env::var("DETECT_PROJECT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_PROJECT_DIR)),
            ..Self::default()
        }
    }
}

/// Split a comma-separated class list, trimming blanks.
pub fn parse_class_names(raw: &str) -> Vec<String> {
    raw.split(',').map(|name| name.trim().to_string()).collect()
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}
