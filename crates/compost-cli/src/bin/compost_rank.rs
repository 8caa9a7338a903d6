//! Rank underdog study videos for a query and print them as JSON.

use clap::Parser;
use tracing::error;

use compost_cli::RankArgs;
use compost_sentiment::{Ranker, SentimentAggregator, SentimentConfig, VaderScorer};
use compost_youtube::YoutubeClient;

#[tokio::main]
async fn main() {
    compost_cli::init();
    let args = RankArgs::parse();

    if let Err(e) = run(&args.query()).await {
        error!("Ranking failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(query: &str) -> anyhow::Result<()> {
    let client = YoutubeClient::from_env()?;
    let aggregator = SentimentAggregator::new(&client, VaderScorer::new(), SentimentConfig::from_env());
    let ranker = Ranker::new(&client, aggregator);

    let response = ranker.rank(query).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
