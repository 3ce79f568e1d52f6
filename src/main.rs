mod ads;
mod config;
mod feed;
mod models;
mod platform;
mod sync;

use config::Config;
use feed::FeedClient;
use platform::SnapshotPlatform;
use sync::SyncOutcome;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    info!("✈️  Fare Ad Sync");
    info!(
        "Campaign {} / ad group {} / departure {}",
        config.campaign_name, config.ad_group_name, config.departure_code
    );

    let source = FeedClient::new(config.feed_url.clone())?;
    let platform = SnapshotPlatform::load(&config.snapshot_path).await?;

    let outcome = sync::run(&config, &source, &platform).await?;

    match &outcome {
        SyncOutcome::NoOffers => info!("Done: no matching offer"),
        SyncOutcome::AdGroupNotFound => info!("Done: ad group missing"),
        SyncOutcome::UpToDate => info!("Done: ad already current"),
        SyncOutcome::Created { created } => info!("Done: created={}", created),
        SyncOutcome::Replaced {
            removed,
            failed_removals,
            created,
        } => info!(
            "Done: removed {} ads ({} failed), created={}",
            removed, failed_removals, created
        ),
    }

    if outcome.changed_platform() {
        platform.save(&config.snapshot_path).await?;
    }

    Ok(())
}
