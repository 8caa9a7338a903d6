//! Print the mean comment sentiment of one video as JSON.

use clap::Parser;
use tracing::{error, info};

use compost_cli::SentimentArgs;
use compost_models::parse_video_ref;
use compost_sentiment::{SentimentAggregator, SentimentConfig, VaderScorer};
use compost_youtube::YoutubeClient;

#[tokio::main]
async fn main() {
    compost_cli::init();
    let args = SentimentArgs::parse();

    if let Err(e) = run(&args.video).await {
        error!("Sentiment analysis failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(input: &str) -> anyhow::Result<()> {
    let video_id = parse_video_ref(input)?;
    let client = YoutubeClient::from_env()?;
    let config = SentimentConfig::from_env();
    info!(video_id = %video_id, max_comments = config.max_comments, "Analyzing comments");

    let aggregator = SentimentAggregator::new(client, VaderScorer::new(), config);
    let record = aggregator.analyze(&video_id).await?;

    println!("{}", serde_json::to_string(&record)?);
    Ok(())
}
