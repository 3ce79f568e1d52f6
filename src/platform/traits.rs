use crate::models::AdText;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Headline slots a responsive search ad can hold
pub const MAX_HEADLINES: usize = 15;
/// Description slots a responsive search ad can hold
pub const MAX_DESCRIPTIONS: usize = 4;
pub const HEADLINE_MAX_LEN: usize = 30;
pub const DESCRIPTION_MAX_LEN: usize = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdType {
    ResponsiveSearchAd,
    ExpandedTextAd,
}

/// Opaque reference to an ad group on the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdGroupHandle(pub u64);

/// Opaque reference to a single ad on the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdHandle(pub u64);

/// Operations the sync needs from the ad-management platform
///
/// Slots are numbered from 1, the way the platform exposes them. A slot the
/// platform does not expose returns `Err`; an exposed but empty slot returns
/// `Ok(None)`.
#[async_trait]
pub trait AdPlatform: Send + Sync {
    /// Find an ad group by exact name within the named campaign
    async fn find_ad_group(&self, name: &str, campaign: &str) -> Result<Option<AdGroupHandle>>;

    /// List the ads of one type in an ad group, in platform order
    async fn list_ads(&self, group: AdGroupHandle, ad_type: AdType) -> Result<Vec<AdHandle>>;

    async fn headline(&self, ad: AdHandle, slot: usize) -> Result<Option<String>>;

    async fn description(&self, ad: AdHandle, slot: usize) -> Result<Option<String>>;

    async fn final_url(&self, ad: AdHandle) -> Result<String>;

    /// Create a responsive search ad from rendered copy
    async fn create_ad(&self, group: AdGroupHandle, text: &AdText) -> Result<AdHandle>;

    async fn remove_ad(&self, ad: AdHandle) -> Result<()>;
}
