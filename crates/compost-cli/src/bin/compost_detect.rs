//! Run the detector once on an image and save an annotated copy.

use clap::Parser;
use tracing::{error, info};

use compost_cli::DetectArgs;
use compost_vision::{run_once, DetectorConfig, ObjectDetector, RunnerConfig};

fn main() {
    compost_cli::init();
    let args = DetectArgs::parse();

    let mut detector_config = DetectorConfig::from_env();
    let mut runner_config = RunnerConfig::from_env();
    args.apply(&mut detector_config, &mut runner_config);

    if let Err(e) = run(&args.source, detector_config, &runner_config) {
        error!("Detection failed: {:#}", e);
        std::process::exit(1);
    }
}

fn run(
    source: &std::path::Path,
    detector_config: DetectorConfig,
    runner_config: &RunnerConfig,
) -> anyhow::Result<()> {
    info!(
        model = %detector_config.model_path.display(),
        source = %source.display(),
        "Running detection"
    );
    let detector = ObjectDetector::new(detector_config)?;
    let report = run_once(&detector, source, runner_config)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
