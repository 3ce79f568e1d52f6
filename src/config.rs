use anyhow::{bail, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_CAMPAIGN_NAME: &str = "WASHINGTON-PKG-TFO";
pub const DEFAULT_AD_GROUP_NAME: &str = "TFO-WASHINGTON-ESTANDAR";
pub const DEFAULT_FEED_URL: &str = "https://www.reservhotel.com/hotel_air_tools/10818.json";
pub const DEFAULT_DEPARTURE_CODE: &str = "DCA";
pub const DEFAULT_SNAPSHOT_PATH: &str = "ad_groups.json";

/// Settings for one sync run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub campaign_name: String,
    pub ad_group_name: String,
    pub feed_url: String,
    /// Offers are matched on this departure code
    pub departure_code: String,
    /// JSON file holding the ad group state of the platform stand-in
    pub snapshot_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            campaign_name: DEFAULT_CAMPAIGN_NAME.to_string(),
            ad_group_name: DEFAULT_AD_GROUP_NAME.to_string(),
            feed_url: DEFAULT_FEED_URL.to_string(),
            departure_code: DEFAULT_DEPARTURE_CODE.to_string(),
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
        }
    }
}

impl Config {
    /// Load configuration, letting environment variables override the defaults
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let var = |key: &str, default: String| -> Result<String> {
            match lookup(key) {
                Some(value) if value.trim().is_empty() => bail!("{} must not be empty", key),
                Some(value) => Ok(value),
                None => Ok(default),
            }
        };

        Ok(Self {
            campaign_name: var("AD_SYNC_CAMPAIGN", defaults.campaign_name)?,
            ad_group_name: var("AD_SYNC_AD_GROUP", defaults.ad_group_name)?,
            feed_url: var("AD_SYNC_FEED_URL", defaults.feed_url)?,
            departure_code: var("AD_SYNC_DEPARTURE", defaults.departure_code)?,
            snapshot_path: PathBuf::from(var(
                "AD_SYNC_SNAPSHOT",
                defaults.snapshot_path.to_string_lossy().into_owned(),
            )?),
        })
    }
}
