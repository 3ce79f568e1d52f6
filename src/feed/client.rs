use crate::feed::traits::OfferSource;
use crate::models::{FareRecord, FeedDocument};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the hotel fares JSON feed
pub struct FeedClient {
    client: Client,
    url: String,
}

impl FeedClient {
    /// Create a feed client for `url`
    ///
    /// No timeout or retry is configured; the reqwest defaults apply.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Decode a feed body into its fare records
    fn parse_offers(body: &str) -> Result<Vec<FareRecord>> {
        let doc: FeedDocument =
            serde_json::from_str(body).context("Failed to parse fares feed JSON")?;
        Ok(doc.hotel.lowest_fares)
    }
}

#[async_trait]
impl OfferSource for FeedClient {
    async fn fetch_offers(&self) -> Result<Vec<FareRecord>> {
        debug!("Fetching URL: {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("Failed to fetch fares feed")?;

        if !response.status().is_success() {
            warn!("Fares feed returned status: {}", response.status());
            anyhow::bail!("Failed to fetch fares feed: {}", response.status());
        }

        let body = response
            .text()
            .await
            .context("Failed to read response body")?;
        debug!("Downloaded {} bytes of JSON", body.len());

        let offers = Self::parse_offers(&body)?;
        info!("Fetched {} offers from {}", offers.len(), self.url);
        Ok(offers)
    }

    fn source_name(&self) -> &str {
        &self.url
    }
}
