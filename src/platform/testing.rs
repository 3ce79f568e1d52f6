// Test double for the ad platform
//
// Wraps a SnapshotPlatform, records every write and can be told to fail
// specific operations.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

use super::snapshot::{Snapshot, StoredAd, StoredAdGroup};
use super::{AdGroupHandle, AdHandle, AdPlatform, AdType, SnapshotPlatform};
use crate::models::AdText;

/// A write issued against the fake
#[derive(Debug, Clone, PartialEq)]
pub enum WriteCall {
    Create(AdText),
    Remove(AdHandle),
}

pub struct FakePlatform {
    inner: SnapshotPlatform,
    writes: Mutex<Vec<WriteCall>>,
    lookups: Mutex<usize>,
    fail_create: bool,
    fail_removals: HashSet<u64>,
    exposed_headline_slots: usize,
    exposed_description_slots: usize,
}

pub struct FakePlatformBuilder {
    snapshot: Snapshot,
    next_id: u64,
    fail_create: bool,
    fail_removals: HashSet<u64>,
    exposed_headline_slots: usize,
    exposed_description_slots: usize,
}

impl FakePlatform {
    pub fn builder() -> FakePlatformBuilder {
        FakePlatformBuilder {
            snapshot: Snapshot::default(),
            next_id: 1,
            fail_create: false,
            fail_removals: HashSet::new(),
            exposed_headline_slots: usize::MAX,
            exposed_description_slots: usize::MAX,
        }
    }

    pub fn writes(&self) -> Vec<WriteCall> {
        self.writes.lock().unwrap().clone()
    }

    pub fn creates(&self) -> Vec<AdText> {
        self.writes()
            .into_iter()
            .filter_map(|w| match w {
                WriteCall::Create(text) => Some(text),
                WriteCall::Remove(_) => None,
            })
            .collect()
    }

    pub fn removals(&self) -> Vec<AdHandle> {
        self.writes()
            .into_iter()
            .filter_map(|w| match w {
                WriteCall::Remove(ad) => Some(ad),
                WriteCall::Create(_) => None,
            })
            .collect()
    }

    pub fn ad_group_lookups(&self) -> usize {
        *self.lookups.lock().unwrap()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.inner.snapshot()
    }
}

impl FakePlatformBuilder {
    pub fn ad_group(mut self, name: &str, campaign: &str) -> Self {
        let id = self.take_id();
        self.snapshot.ad_groups.push(StoredAdGroup {
            id,
            name: name.to_string(),
            campaign_name: campaign.to_string(),
            ads: vec![],
        });
        self
    }

    /// Add a responsive search ad to the most recently added ad group
    pub fn ad(self, headlines: &[&str], descriptions: &[&str], final_url: &str) -> Self {
        self.ad_of_type(AdType::ResponsiveSearchAd, headlines, descriptions, final_url)
    }

    pub fn ad_of_type(
        mut self,
        ad_type: AdType,
        headlines: &[&str],
        descriptions: &[&str],
        final_url: &str,
    ) -> Self {
        let id = self.take_id();
        let group = self
            .snapshot
            .ad_groups
            .last_mut()
            .expect("add an ad group first");
        group.ads.push(StoredAd {
            id,
            ad_type,
            headlines: headlines.iter().map(|s| s.to_string()).collect(),
            descriptions: descriptions.iter().map(|s| s.to_string()).collect(),
            final_url: final_url.to_string(),
        });
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn failing_removal(mut self, ad_id: u64) -> Self {
        self.fail_removals.insert(ad_id);
        self
    }

    /// Headline slots above `n` error instead of answering
    pub fn exposed_headline_slots(mut self, n: usize) -> Self {
        self.exposed_headline_slots = n;
        self
    }

    /// Description slots above `n` error instead of answering
    pub fn exposed_description_slots(mut self, n: usize) -> Self {
        self.exposed_description_slots = n;
        self
    }

    pub fn build(self) -> FakePlatform {
        FakePlatform {
            inner: SnapshotPlatform::new(self.snapshot),
            writes: Mutex::new(Vec::new()),
            lookups: Mutex::new(0),
            fail_create: self.fail_create,
            fail_removals: self.fail_removals,
            exposed_headline_slots: self.exposed_headline_slots,
            exposed_description_slots: self.exposed_description_slots,
        }
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[async_trait]
impl AdPlatform for FakePlatform {
    async fn find_ad_group(&self, name: &str, campaign: &str) -> Result<Option<AdGroupHandle>> {
        *self.lookups.lock().unwrap() += 1;
        self.inner.find_ad_group(name, campaign).await
    }

    async fn list_ads(&self, group: AdGroupHandle, ad_type: AdType) -> Result<Vec<AdHandle>> {
        self.inner.list_ads(group, ad_type).await
    }

    async fn headline(&self, ad: AdHandle, slot: usize) -> Result<Option<String>> {
        if slot > self.exposed_headline_slots {
            return Err(anyhow!("headline slot {} unavailable", slot));
        }
        self.inner.headline(ad, slot).await
    }

    async fn description(&self, ad: AdHandle, slot: usize) -> Result<Option<String>> {
        if slot > self.exposed_description_slots {
            return Err(anyhow!("description slot {} unavailable", slot));
        }
        self.inner.description(ad, slot).await
    }

    async fn final_url(&self, ad: AdHandle) -> Result<String> {
        self.inner.final_url(ad).await
    }

    async fn create_ad(&self, group: AdGroupHandle, text: &AdText) -> Result<AdHandle> {
        self.writes
            .lock()
            .unwrap()
            .push(WriteCall::Create(text.clone()));
        if self.fail_create {
            return Err(anyhow!("platform rejected the ad"));
        }
        self.inner.create_ad(group, text).await
    }

    async fn remove_ad(&self, ad: AdHandle) -> Result<()> {
        self.writes.lock().unwrap().push(WriteCall::Remove(ad));
        if self.fail_removals.contains(&ad.0) {
            return Err(anyhow!("ad {} is locked", ad.0));
        }
        self.inner.remove_ad(ad).await
    }
}
