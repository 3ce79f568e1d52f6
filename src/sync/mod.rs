use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::ads::{build_ad_text, read_existing_ads};
use crate::config::Config;
use crate::feed::{first_matching, OfferSource};
use crate::models::{AdText, ExistingAd};
use crate::platform::{AdGroupHandle, AdPlatform};

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No offer departs from the configured airport
    NoOffers,
    AdGroupNotFound,
    /// The live ad already shows the rendered copy
    UpToDate,
    /// The ad group had no responsive search ad
    Created { created: bool },
    /// Stale ads were removed and a fresh one created
    Replaced {
        removed: usize,
        failed_removals: usize,
        created: bool,
    },
}

impl SyncOutcome {
    /// Whether the run issued writes that succeeded
    pub fn changed_platform(&self) -> bool {
        match self {
            SyncOutcome::Created { created } => *created,
            SyncOutcome::Replaced {
                removed, created, ..
            } => *removed > 0 || *created,
            _ => false,
        }
    }
}

/// Every slot the live ad has must equal the same slot in `fresh`
fn slots_match(live: &[String], fresh: &[String]) -> bool {
    live.iter()
        .enumerate()
        .all(|(i, text)| fresh.get(i) == Some(text))
}

/// Check a live ad against freshly rendered copy, position by position
///
/// Only the slots the platform returned are compared, since unreadable slots
/// are dropped when the ad is read.
pub fn is_up_to_date(existing: &ExistingAd, fresh: &AdText) -> bool {
    slots_match(&existing.headlines, &fresh.headlines)
        && slots_match(&existing.descriptions, &fresh.descriptions)
        && existing.final_url == fresh.final_url
}

async fn create_ad(platform: &dyn AdPlatform, group: AdGroupHandle, text: &AdText) -> bool {
    match platform.create_ad(group, text).await {
        Ok(_) => {
            info!(
                "Successfully created ad for departure: {} ({} to {}, ${})",
                text.departure, text.departure_date, text.return_date, text.cost
            );
            true
        }
        Err(e) => {
            error!(
                "Failed to create ad for departure: {}. Error: {:#}",
                text.departure, e
            );
            false
        }
    }
}

/// Bring the ad group in line with `text`
pub async fn reconcile(
    platform: &dyn AdPlatform,
    group: AdGroupHandle,
    text: &AdText,
) -> Result<SyncOutcome> {
    let existing = read_existing_ads(platform, group).await?;

    let Some(current) = existing.first() else {
        info!("No existing ads in ad group, creating one");
        let created = create_ad(platform, group, text).await;
        return Ok(SyncOutcome::Created { created });
    };

    if is_up_to_date(current, text) {
        info!("No changes detected. Ad is up to date.");
        return Ok(SyncOutcome::UpToDate);
    }

    info!(
        "Ad copy changed (live ad shows date {:?}, return {:?}, price {:?}), replacing {} existing ads",
        current.departure_date,
        current.return_date,
        current.cost,
        existing.len()
    );

    let mut removed = 0;
    let mut failed_removals = 0;
    for ad in &existing {
        match platform.remove_ad(ad.handle).await {
            Ok(()) => {
                removed += 1;
                info!("Successfully removed existing ad {}", ad.handle.0);
            }
            Err(e) => {
                failed_removals += 1;
                warn!("Failed to remove existing ad {}: {:#}", ad.handle.0, e);
            }
        }
    }

    let created = create_ad(platform, group, text).await;
    Ok(SyncOutcome::Replaced {
        removed,
        failed_removals,
        created,
    })
}

/// Run one full sync: fetch offers, pick the first matching departure, render
/// the copy, then create or replace the live ad. Steps run strictly in order
/// and nothing is retried or rolled back.
pub async fn run(
    config: &Config,
    source: &dyn OfferSource,
    platform: &dyn AdPlatform,
) -> Result<SyncOutcome> {
    info!("Fetching offers from {}", source.source_name());
    let offers = source.fetch_offers().await?;

    let Some(record) = first_matching(&offers, &config.departure_code) else {
        info!(
            "No offers found for the specified departure airport. ({})",
            config.departure_code
        );
        return Ok(SyncOutcome::NoOffers);
    };

    let offer = record
        .to_offer()
        .context("Failed to decode matching offer")?;
    info!(
        "Using offer from {} ({}), {} to {}",
        offer.departure, offer.departure_airport_name, offer.departure_date, offer.return_date
    );
    let text = build_ad_text(&offer);

    let group = platform
        .find_ad_group(&config.ad_group_name, &config.campaign_name)
        .await
        .context("Failed to look up ad group")?;

    let Some(group) = group else {
        warn!("Ad group not found: {}", config.ad_group_name);
        return Ok(SyncOutcome::AdGroupNotFound);
    };

    reconcile(platform, group, &text).await
}
