use crate::models::ExistingAd;
use crate::platform::traits::{MAX_DESCRIPTIONS, MAX_HEADLINES};
use crate::platform::{AdGroupHandle, AdHandle, AdPlatform, AdType};
use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;
use tracing::debug;

// Word, digit and boundary classes are ASCII-only, so "Mär 15" is not a date

/// Short month name followed by a day, e.g. "Jan 1"
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| ascii_regex(r"\b\w{3} \d{1,2}\b"));

/// Dollar amount with optional cents, e.g. "$123.45"
static COST_RE: LazyLock<Regex> = LazyLock::new(|| ascii_regex(r"\$\d+(\.\d{1,2})?"));

fn ascii_regex(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .unicode(false)
        .build()
        .expect("valid ASCII pattern")
}

// Template positions the telemetry reads from (0-based)
const DEPARTURE_DATE_HEADLINE: usize = 3;
const RETURN_DATE_DESCRIPTION: usize = 0;
const COST_HEADLINE: usize = 2;

pub fn extract_date(text: &str) -> Option<String> {
    DATE_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn extract_cost(text: &str) -> Option<String> {
    COST_RE
        .find(text)
        .map(|m| m.as_str().trim_start_matches('$').to_string())
}

/// Keep the values of slots that answered, in slot order
fn present<const N: usize>(slots: [Option<String>; N]) -> Vec<String> {
    slots
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect()
}

fn slot_text(values: &[String], index: usize) -> &str {
    values.get(index).map(String::as_str).unwrap_or("")
}

/// Read back one ad's visible text
///
/// A slot the platform refuses to answer counts as empty. Failing to read the
/// final URL is an error.
pub async fn read_ad(platform: &dyn AdPlatform, ad: AdHandle) -> Result<ExistingAd> {
    let mut headline_slots: [Option<String>; MAX_HEADLINES] = Default::default();
    for (i, slot) in headline_slots.iter_mut().enumerate() {
        *slot = platform.headline(ad, i + 1).await.ok().flatten();
    }

    let mut description_slots: [Option<String>; MAX_DESCRIPTIONS] = Default::default();
    for (i, slot) in description_slots.iter_mut().enumerate() {
        *slot = platform.description(ad, i + 1).await.ok().flatten();
    }

    let headlines = present(headline_slots);
    let descriptions = present(description_slots);
    let final_url = platform
        .final_url(ad)
        .await
        .with_context(|| format!("Failed to read final URL of ad {}", ad.0))?;

    let departure_date = extract_date(slot_text(&headlines, DEPARTURE_DATE_HEADLINE));
    let return_date = extract_date(slot_text(&descriptions, RETURN_DATE_DESCRIPTION));
    let cost = extract_cost(slot_text(&headlines, COST_HEADLINE));

    debug!(
        "Ad {}: {} headlines, {} descriptions, date {:?}, return {:?}, cost {:?}",
        ad.0,
        headlines.len(),
        descriptions.len(),
        departure_date,
        return_date,
        cost
    );

    Ok(ExistingAd {
        handle: ad,
        headlines,
        descriptions,
        final_url,
        departure_date,
        return_date,
        cost,
    })
}

/// Read every responsive search ad in an ad group
pub async fn read_existing_ads(
    platform: &dyn AdPlatform,
    group: AdGroupHandle,
) -> Result<Vec<ExistingAd>> {
    let handles = platform
        .list_ads(group, AdType::ResponsiveSearchAd)
        .await
        .context("Failed to list ads in ad group")?;

    let mut ads = Vec::with_capacity(handles.len());
    for handle in handles {
        ads.push(read_ad(platform, handle).await?);
    }
    Ok(ads)
}
