use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use reddigest::{render_digest, Client, Config, FeedAggregator};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    init_tracing()?;

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(subreddits = config.subreddits.len(), "Configuration loaded");

    // No token, no run: every listing call needs the credential.
    let client = Client::login(&config)
        .await
        .context("Failed to obtain access token")?;
    info!("Access token acquired");

    let posts = FeedAggregator::new(&client, &config).collect().await;

    let page = render_digest(&posts, Utc::now());

    if let Some(parent) = config.output_path.parent() {
        tokio::fs::create_dir_all(parent).await.with_context(|| {
            format!("Failed to create output directory: {}", parent.display())
        })?;
    }
    tokio::fs::write(&config.output_path, page.into_string())
        .await
        .with_context(|| format!("Failed to write {}", config.output_path.display()))?;

    info!(path = %config.output_path.display(), "Digest written");
    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}
