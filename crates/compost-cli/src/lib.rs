//! Shared startup and command lines for the Compost binaries.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{filter::Directive, fmt, prelude::*, EnvFilter};

use compost_vision::{DetectorConfig, RunnerConfig};

/// Install the rustls provider, load `.env` and start logging.
pub fn init() {
    // Ignore the error when a provider is already installed.
    let _ = rustls::crypto::ring::default_provider().install_default();

    dotenvy::dotenv().ok();

    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize logging: {}", e);
    }
}

/// Initialize tracing on stderr: colored text by default, JSON when
/// `LOG_FORMAT=json`.
pub fn init_tracing() -> anyhow::Result<()> {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("compost=info".parse::<Directive>()?)
        .add_directive("ort=warn".parse::<Directive>()?);

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .with(env_filter)
            .try_init()?;
    }
    Ok(())
}

/// Print the mean comment sentiment of one video as JSON
#[derive(Parser, Debug)]
#[command(name = "compost-sentiment", version, about)]
pub struct SentimentArgs {
    /// Video id or YouTube URL
    pub video: String,
}

/// Rank underdog study videos for a query
#[derive(Parser, Debug)]
#[command(name = "compost-rank", version, about)]
pub struct RankArgs {
    /// Study query; multiple words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,
}

impl RankArgs {
    pub fn query(&self) -> String {
        self.query.join(" ")
    }
}

/// Run the detector once on an image and save an annotated copy
#[derive(Parser, Debug)]
#[command(name = "compost-detect", version, about)]
pub struct DetectArgs {
    /// Source image
    #[arg(env = "DETECT_SOURCE")]
    pub source: PathBuf,

    /// ONNX model [env: DETECT_MODEL_PATH]
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Directory holding the run directories [env: DETECT_PROJECT_DIR]
    #[arg(long)]
    pub project: Option<PathBuf>,

    /// Minimum confidence [env: DETECT_CONFIDENCE]
    #[arg(long)]
    pub conf: Option<f32>,

    /// IoU threshold for suppression [env: DETECT_IOU]
    #[arg(long)]
    pub iou: Option<f32>,
}

impl DetectArgs {
    /// Overlay explicit arguments on env-derived config.
    pub fn apply(&self, detector: &mut DetectorConfig, runner: &mut RunnerConfig) {
        if let Some(model) = &self.model {
            detector.model_path = model.clone();
        }
        if let Some(conf) = self.conf {
            detector.confidence_threshold = conf;
        }
        if let Some(iou) = self.iou {
            detector.iou_threshold = iou;
        }
        if let Some(project) = &self.project {
            runner.project_dir = project.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_parse_detect_args() {
        let parsed = DetectArgs::try_parse_from([
            "compost-detect", "bin.jpg", "--model", "m.onnx", "--conf", "0.5", "--iou", "0.3",
            "--project", "out",
        ])
        .unwrap();

        assert_eq!(parsed.source, PathBuf::from("bin.jpg"));
        assert_eq!(parsed.model, Some(PathBuf::from("m.onnx")));
        assert_eq!(parsed.project, Some(PathBuf::from("out")));
        assert_eq!(parsed.conf, Some(0.5));
        assert_eq!(parsed.iou, Some(0.3));
    }

    #[test]
    #[serial]
    fn test_detect_usage_errors() {
        std::env::remove_var("DETECT_SOURCE");

        let missing = DetectArgs::try_parse_from(["compost-detect"]).unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(missing.exit_code(), 2);

        let bad_number =
            DetectArgs::try_parse_from(["compost-detect", "a.jpg", "--conf", "high"]).unwrap_err();
        assert_eq!(bad_number.kind(), ErrorKind::ValueValidation);

        let unknown = DetectArgs::try_parse_from(["compost-detect", "a.jpg", "--fast"]).unwrap_err();
        assert_eq!(unknown.kind(), ErrorKind::UnknownArgument);

        let extra = DetectArgs::try_parse_from(["compost-detect", "a.jpg", "b.jpg"]).unwrap_err();
        assert_eq!(extra.exit_code(), 2);
    }

    #[test]
    #[serial]
    fn test_source_falls_back_to_env() {
        std::env::set_var("DETECT_SOURCE", "from_env.jpg");
        let from_env = DetectArgs::try_parse_from(["compost-detect"]).unwrap();
        assert_eq!(from_env.source, PathBuf::from("from_env.jpg"));

        let given = DetectArgs::try_parse_from(["compost-detect", "cli.jpg"]).unwrap();
        assert_eq!(given.source, PathBuf::from("cli.jpg"));

        std::env::remove_var("DETECT_SOURCE");
    }

    #[test]
    #[serial]
    fn test_apply_overrides_only_given_values() {
        let parsed =
            DetectArgs::try_parse_from(["compost-detect", "a.jpg", "--conf", "0.7", "--project", "out"])
                .unwrap();
        let mut detector = DetectorConfig::default();
        let mut runner = RunnerConfig::default();
        parsed.apply(&mut detector, &mut runner);

        assert!((detector.confidence_threshold - 0.7).abs() < 1e-6);
        assert!((detector.iou_threshold - 0.45).abs() < 1e-6);
        assert_eq!(detector.model_path, PathBuf::from("models/best.onnx"));
        assert_eq!(runner.project_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_sentiment_args() {
        let parsed = SentimentArgs::try_parse_from(["compost-sentiment", "dQw4w9WgXcQ"]).unwrap();
        assert_eq!(parsed.video, "dQw4w9WgXcQ");

        let missing = SentimentArgs::try_parse_from(["compost-sentiment"]).unwrap_err();
        assert_eq!(missing.exit_code(), 2);
    }

    #[test]
    fn test_rank_args_join_words() {
        let parsed = RankArgs::try_parse_from(["compost-rank", "cell", "biology"]).unwrap();
        assert_eq!(parsed.query(), "cell biology");

        let missing = RankArgs::try_parse_from(["compost-rank"]).unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(missing.exit_code(), 2);
    }

    #[test]
    fn test_clap_definitions() {
        use clap::CommandFactory;
        SentimentArgs::command().debug_assert();
        RankArgs::command().debug_assert();
        DetectArgs::command().debug_assert();
    }
}
