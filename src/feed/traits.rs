use crate::models::FareRecord;
use anyhow::Result;
use async_trait::async_trait;

/// Source of fare offers
/// The sync only needs "give me the current offer list"; tests swap in canned data
#[async_trait]
pub trait OfferSource: Send + Sync {
    /// Fetch the full fare list, in feed order
    ///
    /// Records are left undecoded so a malformed one that is never selected
    /// cannot fail the run.
    async fn fetch_offers(&self) -> Result<Vec<FareRecord>>;

    /// Get a human-readable name for logs
    fn source_name(&self) -> &str;
}
