//! Object detection with a YOLO-format ONNX model.
//!
//! The model takes a `[1, 3, S, S]` RGB tensor scaled to [0, 1] and returns
//! `[1, 4 + C, N]`: per candidate a center-format box followed by C class
//! scores. Any class count is accepted.

use std::path::Path;
use std::sync::Mutex;

use image::{DynamicImage, GenericImageView};
use ndarray::ArrayView2;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::{Tensor, Value};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::DetectorConfig;
use crate::error::{VisionError, VisionResult};

/// Box corners in source-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    pub fn width(&self) -> f32 {
        (self.x2 - self.x1).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.y2 - self.y1).max(0.0)
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Intersection over union.
    pub fn iou(&self, other: &BoundingBox) -> f32 {
        let inter = BoundingBox {
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
            x2: self.x2.min(other.x2),
            y2: self.y2.min(other.y2),
        }
        .area();

        let union = self.area() + other.area() - inter;
        if union > 0.0 {
            inter / union
        } else {
            0.0
        }
    }
}

/// A detected object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    pub class_id: usize,
    pub label: String,
    pub confidence: f32,
    pub bbox: BoundingBox,
}

/// Anything that can find objects in an image.
pub trait Detector {
    fn detect(&self, image: &DynamicImage) -> VisionResult<Vec<Detection>>;

    /// Model identifier reported with results.
    fn model_path(&self) -> &Path;
}

/// YOLO detector backed by an ONNX Runtime session.
pub struct ObjectDetector {
    session: Mutex<Session>,
    config: DetectorConfig,
}

impl ObjectDetector {
    /// Load the model named by `config`.
    pub fn new(config: DetectorConfig) -> VisionResult<Self> {
        if !config.model_path.exists() {
            return Err(VisionError::model_not_found(&config.model_path));
        }

        let session = Mutex::new(create_session(&config.model_path)?);
        info!(
            model_path = %config.model_path.display(),
            input_size = config.input_size,
            "Object detector initialized"
        );

        Ok(Self { session, config })
    }

    /// Resize to the model input, scale to [0, 1] and lay out as NCHW.
    fn preprocess(&self, img: &DynamicImage) -> VisionResult<Value> {
        let size = self.config.input_size;
        let rgb = img
            .resize_exact(size, size, image::imageops::FilterType::Triangle)
            .to_rgb8();

        let side = size as usize;
        let mut chw = Vec::with_capacity(3 * side * side);
        for c in 0..3 {
            for y in 0..size {
                for x in 0..size {
                    chw.push(rgb.get_pixel(x, y)[c] as f32 / 255.0);
                }
            }
        }

        Tensor::from_array((vec![1usize, 3, side, side], chw.into_boxed_slice()))
            .map(Value::from)
            .map_err(|e| VisionError::inference(format!("Failed to create tensor: {}", e)))
    }

    /// Run the session and return the first output with its shape.
    fn run_inference(&self, input: Value) -> VisionResult<(Vec<usize>, Vec<f32>)> {
        let mut session = self
            .session
            .lock()
            .map_err(|_| VisionError::inference("Session lock poisoned"))?;

        let output_name = session
            .outputs
            .first()
            .map(|output| output.name.clone())
            .ok_or_else(|| VisionError::invalid_output("Model declares no outputs"))?;

        let outputs = session
            .run(ort::inputs![input])
            .map_err(|e| VisionError::inference(format!("ONNX inference failed: {}", e)))?;

        let output = outputs
            .get(output_name.as_str())
            .ok_or_else(|| VisionError::invalid_output(format!("Missing {} tensor", output_name)))?;

        let (shape, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| VisionError::invalid_output(format!("Failed to extract tensor: {}", e)))?;

        let dims = shape.iter().map(|&d| d.max(0) as usize).collect();
        Ok((dims, data.to_vec()))
    }
}

impl Detector for ObjectDetector {
    fn detect(&self, img: &DynamicImage) -> VisionResult<Vec<Detection>> {
        let (width, height) = img.dimensions();
        let input = self.preprocess(img)?;
        let (shape, output) = self.run_inference(input)?;

        let candidates = decode_predictions(&output, &shape, &self.config, (width, height))?;
        let kept = non_maximum_suppression(candidates, self.config.iou_threshold);
        debug!(count = kept.len(), "Object detection completed");
        Ok(kept)
    }

    fn model_path(&self) -> &Path {
        &self.config.model_path
    }
}

/// Decode a `[1, 4 + C, N]` (or `[4 + C, N]`) output into pixel-space boxes.
///
/// Each candidate keeps its best class when that score reaches the
/// confidence threshold. Boxes are scaled from model input to `source_size`
/// and clamped to the image.
pub fn decode_predictions(
    output: &[f32],
    shape: &[usize],
    config: &DetectorConfig,
    source_size: (u32, u32),
) -> VisionResult<Vec<Detection>> {
    let (features, boxes) = match shape {
        [1, f, n] | [f, n] => (*f, *n),
        _ => {
            return Err(VisionError::invalid_output(format!(
                "Expected [1, 4 + C, N] output, got {:?}",
                shape
            )))
        }
    };
    if features <= 4 {
        return Err(VisionError::invalid_output(format!(
            "Output has {} features, need box plus at least one class",
            features
        )));
    }

    let predictions = ArrayView2::from_shape((features, boxes), output)
        .map_err(|e| VisionError::invalid_output(format!("Failed to reshape output: {}", e)))?;

    let (src_w, src_h) = (source_size.0 as f32, source_size.1 as f32);
    let input_size = config.input_size as f32;
    let scale_w = src_w / input_size;
    let scale_h = src_h / input_size;

    let mut detections = Vec::new();
    for i in 0..boxes {
        let column = predictions.column(i);

        let mut best_class = 0;
        let mut best_score = f32::NEG_INFINITY;
        for (c, &score) in column.iter().skip(4).enumerate() {
            if score > best_score {
                best_score = score;
                best_class = c;
            }
        }

        if best_score < config.confidence_threshold {
            continue;
        }

        let (cx, cy, w, h) = (column[0], column[1], column[2], column[3]);
        let bbox = BoundingBox {
            x1: ((cx - w / 2.0) * scale_w).clamp(0.0, src_w),
            y1: ((cy - h / 2.0) * scale_h).clamp(0.0, src_h),
            x2: ((cx + w / 2.0) * scale_w).clamp(0.0, src_w),
            y2: ((cy + h / 2.0) * scale_h).clamp(0.0, src_h),
        };

        detections.push(Detection {
            class_id: best_class,
            label: config.label(best_class),
            confidence: best_score,
            bbox,
        });
    }

    Ok(detections)
}

/// Per-class non-maximum suppression, highest confidence first.
pub fn non_maximum_suppression(mut detections: Vec<Detection>, iou_threshold: f32) -> Vec<Detection> {
    detections.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut keep: Vec<Detection> = Vec::new();
    for candidate in detections {
        let overlaps = keep.iter().any(|kept| {
            kept.class_id == candidate.class_id && kept.bbox.iou(&candidate.bbox) > iou_threshold
        });
        if !overlaps {
            keep.push(candidate);
        }
    }
    keep
}

/// Build a session, preferring CUDA when the `cuda` feature is on.
fn create_session(model_path: &Path) -> VisionResult<Session> {
    let model_bytes = std::fs::read(model_path)?;

    let builder = Session::builder()
        .map_err(|e| VisionError::inference(format!("Failed to create session builder: {}", e)))?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .map_err(|e| VisionError::inference(format!("Failed to set optimization level: {}", e)))?;

    #[cfg(all(target_os = "linux", feature = "cuda"))]
    {
        use ort::execution_providers::CUDAExecutionProvider;
        if let Ok(cuda_builder) = builder
            .clone()
            .with_execution_providers([CUDAExecutionProvider::default().build()])
        {
            if let Ok(session) = cuda_builder.commit_from_memory(&model_bytes) {
                info!("Using CUDA execution provider");
                return Ok(session);
            }
        }
        debug!("CUDA execution provider not available, using CPU");
    }

    info!("Using CPU execution provider");
    builder
        .commit_from_memory(&model_bytes)
        .map_err(|e| VisionError::inference(format!("Failed to load ONNX model: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn bbox(x1: f32, y1: f32, x2: f32, y2: f32) -> BoundingBox {
        BoundingBox { x1, y1, x2, y2 }
    }

    fn detection(class_id: usize, confidence: f32, bbox: BoundingBox) -> Detection {
        Detection {
            class_id,
            label: format!("class{}", class_id),
            confidence,
            bbox,
        }
    }

    /// Lay candidates out feature-major, as the model does.
    fn tensor(candidates: &[[f32; 6]]) -> Vec<f32> {
        let mut out = Vec::new();
        for feature in 0..6 {
            for candidate in candidates {
                out.push(candidate[feature]);
            }
        }
        out
    }

    fn config() -> DetectorConfig {
        DetectorConfig {
            class_names: vec!["paper".to_string()],
            input_size: 100,
            ..DetectorConfig::default()
        }
    }

    #[test]
    fn test_iou() {
        let a = bbox(0.0, 0.0, 10.0, 10.0);
        assert!((a.iou(&a) - 1.0).abs() < 1e-6);

        let b = bbox(5.0, 0.0, 15.0, 10.0);
        // 50 / (100 + 100 - 50)
        assert!((a.iou(&b) - 1.0 / 3.0).abs() < 1e-6);

        let far = bbox(20.0, 20.0, 30.0, 30.0);
        assert_eq!(a.iou(&far), 0.0);
        assert_eq!(bbox(1.0, 1.0, 1.0, 1.0).iou(&bbox(1.0, 1.0, 1.0, 1.0)), 0.0);
    }

    #[test]
    fn test_nms_same_class_keeps_most_confident() {
        let kept = non_maximum_suppression(
            vec![
                detection(0, 0.6, bbox(0.0, 0.0, 10.0, 10.0)),
                detection(0, 0.9, bbox(1.0, 1.0, 11.0, 11.0)),
            ],
            0.45,
        );
        assert_eq!(kept.len(), 1);
        assert!((kept[0].confidence - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_nms_keeps_other_classes_and_distant_boxes() {
        let kept = non_maximum_suppression(
            vec![
                detection(0, 0.9, bbox(0.0, 0.0, 10.0, 10.0)),
                detection(1, 0.8, bbox(0.0, 0.0, 10.0, 10.0)),
                detection(0, 0.7, bbox(50.0, 50.0, 60.0, 60.0)),
            ],
            0.45,
        );
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn test_decode_scales_and_thresholds() {
        // cx, cy, w, h, score(class0), score(class1)
        let output = tensor(&[
            [50.0, 50.0, 20.0, 10.0, 0.9, 0.1],
            [10.0, 10.0, 4.0, 4.0, 0.1, 0.2],
            [20.0, 30.0, 10.0, 10.0, 0.05, 0.7],
        ]);

        let detections = decode_predictions(&output, &[1, 6, 3], &config(), (200, 100)).unwrap();
        assert_eq!(detections.len(), 2);

        let first = &detections[0];
        assert_eq!(first.class_id, 0);
        assert_eq!(first.label, "paper");
        assert_eq!(first.bbox, bbox(80.0, 45.0, 120.0, 55.0));

        let second = &detections[1];
        assert_eq!(second.class_id, 1);
        assert_eq!(second.label, "class1");
        assert!((second.confidence - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_decode_clamps_to_image() {
        let output = tensor(&[[2.0, 98.0, 10.0, 10.0, 0.8, 0.0]]);
        let detections = decode_predictions(&output, &[6, 1], &config(), (100, 100)).unwrap();
        assert_eq!(detections[0].bbox, bbox(0.0, 93.0, 7.0, 100.0));
    }

    #[test]
    fn test_decode_rejects_bad_shapes() {
        let cfg = config();
        assert!(matches!(
            decode_predictions(&[0.0; 8], &[2, 4, 1], &cfg, (10, 10)),
            Err(VisionError::InvalidOutput(_))
        ));
        assert!(matches!(
            decode_predictions(&[0.0; 4], &[1, 4, 1], &cfg, (10, 10)),
            Err(VisionError::InvalidOutput(_))
        ));
        // Shape and data length disagree
        assert!(matches!(
            decode_predictions(&[0.0; 5], &[1, 6, 1], &cfg, (10, 10)),
            Err(VisionError::InvalidOutput(_))
        ));
    }

    #[test]
    fn test_missing_model() {
        let config = DetectorConfig {
            model_path: PathBuf::from("/nonexistent/best.onnx"),
            ..DetectorConfig::default()
        };
        assert!(matches!(
            ObjectDetector::new(config),
            Err(VisionError::ModelNotFound(_))
        ));
    }
}
