use crate::models::AdText;
use crate::platform::error::PlatformError;
use crate::platform::traits::{
    AdGroupHandle, AdHandle, AdPlatform, AdType, DESCRIPTION_MAX_LEN, HEADLINE_MAX_LEN,
    MAX_DESCRIPTIONS, MAX_HEADLINES,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

const MIN_HEADLINES: usize = 3;
const MIN_DESCRIPTIONS: usize = 2;

/// Serialized ad group state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub ad_groups: Vec<StoredAdGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAdGroup {
    pub id: u64,
    pub name: String,
    pub campaign_name: String,
    #[serde(default)]
    pub ads: Vec<StoredAd>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAd {
    pub id: u64,
    pub ad_type: AdType,
    #[serde(default)]
    pub headlines: Vec<String>,
    #[serde(default)]
    pub descriptions: Vec<String>,
    pub final_url: String,
}

struct State {
    snapshot: Snapshot,
    next_id: u64,
}

/// In-memory stand-in for the ad platform, persisted as a JSON snapshot
pub struct SnapshotPlatform {
    state: Mutex<State>,
}

impl SnapshotPlatform {
    pub fn new(snapshot: Snapshot) -> Self {
        let next_id = snapshot
            .ad_groups
            .iter()
            .flat_map(|g| std::iter::once(g.id).chain(g.ads.iter().map(|a| a.id)))
            .max()
            .map_or(1, |max| max + 1);

        Self {
            state: Mutex::new(State { snapshot, next_id }),
        }
    }

    /// Load platform state from a snapshot file
    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        let snapshot: Snapshot = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;

        info!(
            "Loaded {} ad groups from {}",
            snapshot.ad_groups.len(),
            path.display()
        );
        Ok(Self::new(snapshot))
    }

    /// Write the current state back to a snapshot file
    pub async fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.snapshot())?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
        info!("💾 Saved ad groups to {}", path.display());
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // State is never left half-updated, so a poisoned lock is still usable
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn with_ad<T>(&self, ad: AdHandle, f: impl FnOnce(&StoredAd) -> T) -> Result<T> {
        let state = self.lock();
        let stored = state
            .snapshot
            .ad_groups
            .iter()
            .flat_map(|g| g.ads.iter())
            .find(|a| a.id == ad.0)
            .ok_or(PlatformError::AdNotFound(ad.0))?;
        Ok(f(stored))
    }

    fn validate(text: &AdText) -> Result<(), PlatformError> {
        if !(MIN_HEADLINES..=MAX_HEADLINES).contains(&text.headlines.len()) {
            return Err(PlatformError::InvalidAd(format!(
                "expected {}-{} headlines, got {}",
                MIN_HEADLINES,
                MAX_HEADLINES,
                text.headlines.len()
            )));
        }
        if !(MIN_DESCRIPTIONS..=MAX_DESCRIPTIONS).contains(&text.descriptions.len()) {
            return Err(PlatformError::InvalidAd(format!(
                "expected {}-{} descriptions, got {}",
                MIN_DESCRIPTIONS,
                MAX_DESCRIPTIONS,
                text.descriptions.len()
            )));
        }
        if let Some(h) = text
            .headlines
            .iter()
            .find(|h| h.chars().count() > HEADLINE_MAX_LEN)
        {
            return Err(PlatformError::InvalidAd(format!("headline too long: {:?}", h)));
        }
        if let Some(d) = text
            .descriptions
            .iter()
            .find(|d| d.chars().count() > DESCRIPTION_MAX_LEN)
        {
            return Err(PlatformError::InvalidAd(format!(
                "description too long: {:?}",
                d
            )));
        }
        if text.final_url.is_empty() {
            return Err(PlatformError::InvalidAd("missing final URL".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl AdPlatform for SnapshotPlatform {
    async fn find_ad_group(&self, name: &str, campaign: &str) -> Result<Option<AdGroupHandle>> {
        let state = self.lock();
        Ok(state
            .snapshot
            .ad_groups
            .iter()
            .find(|g| g.name == name && g.campaign_name == campaign)
            .map(|g| AdGroupHandle(g.id)))
    }

    async fn list_ads(&self, group: AdGroupHandle, ad_type: AdType) -> Result<Vec<AdHandle>> {
        let state = self.lock();
        let group = state
            .snapshot
            .ad_groups
            .iter()
            .find(|g| g.id == group.0)
            .ok_or(PlatformError::AdGroupNotFound(group.0))?;

        Ok(group
            .ads
            .iter()
            .filter(|a| a.ad_type == ad_type)
            .map(|a| AdHandle(a.id))
            .collect())
    }

    async fn headline(&self, ad: AdHandle, slot: usize) -> Result<Option<String>> {
        if slot == 0 || slot > MAX_HEADLINES {
            return Err(PlatformError::UnsupportedSlot {
                field: "headline",
                slot,
            }
            .into());
        }
        self.with_ad(ad, |a| a.headlines.get(slot - 1).cloned())
    }

    async fn description(&self, ad: AdHandle, slot: usize) -> Result<Option<String>> {
        if slot == 0 || slot > MAX_DESCRIPTIONS {
            return Err(PlatformError::UnsupportedSlot {
                field: "description",
                slot,
            }
            .into());
        }
        self.with_ad(ad, |a| a.descriptions.get(slot - 1).cloned())
    }

    async fn final_url(&self, ad: AdHandle) -> Result<String> {
        self.with_ad(ad, |a| a.final_url.clone())
    }

    async fn create_ad(&self, group: AdGroupHandle, text: &AdText) -> Result<AdHandle> {
        Self::validate(text)?;

        let mut state = self.lock();
        let id = state.next_id;
        let stored_group = state
            .snapshot
            .ad_groups
            .iter_mut()
            .find(|g| g.id == group.0)
            .ok_or(PlatformError::AdGroupNotFound(group.0))?;

        stored_group.ads.push(StoredAd {
            id,
            ad_type: AdType::ResponsiveSearchAd,
            headlines: text.headlines.clone(),
            descriptions: text.descriptions.clone(),
            final_url: text.final_url.clone(),
        });
        state.next_id += 1;

        debug!("Created ad {} in ad group {}", id, group.0);
        Ok(AdHandle(id))
    }

    async fn remove_ad(&self, ad: AdHandle) -> Result<()> {
        let mut state = self.lock();
        for group in state.snapshot.ad_groups.iter_mut() {
            if let Some(pos) = group.ads.iter().position(|a| a.id == ad.0) {
                group.ads.remove(pos);
                debug!("Removed ad {} from ad group {}", ad.0, group.id);
                return Ok(());
            }
        }
        Err(PlatformError::AdNotFound(ad.0).into())
    }
}
