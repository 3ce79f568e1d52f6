use crate::models::{AdText, Offer};
use crate::platform::traits::{DESCRIPTION_MAX_LEN, HEADLINE_MAX_LEN};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::warn;

const ELLIPSIS: &str = "...";

/// Rendered in place of a date the feed sent in an unknown format
pub const INVALID_DATE: &str = "Invalid Date";

/// Cut `text` to at most `max_len` characters, ending in "..." when shortened
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let keep = max_len.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|d| d.date())
        })
}

/// Render a feed date as `MM-DD`
///
/// Unparsable input yields [`INVALID_DATE`] rather than an error, so the ad
/// copy shows the placeholder and the run carries on.
pub fn format_month_day(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%m-%d").to_string(),
        None => {
            warn!("Unparsable date {:?} in feed, rendering placeholder", raw);
            INVALID_DATE.to_string()
        }
    }
}

/// Render the responsive search ad copy for an offer
pub fn build_ad_text(offer: &Offer) -> AdText {
    let cost = offer.cost.to_string();
    let dates = format_month_day(&offer.departure_date);

    let headlines = [
        "Fly from Washington to Cancun".to_string(),
        format!("Flights from ${}", cost),
        "Stay at The Fives Downtown".to_string(),
        format!("Dates: {}", dates),
        format!("Today's best rate ${}", cost),
        "Enjoy from Playa del Carmen".to_string(),
        format!("Book today from ${}", cost),
        format!("Fly since {}", dates),
        format!("Hotel + Flight from ${}", cost),
        "The Fives Downtown".to_string(),
        "Exclusive Packages ".to_string(),
        "Caribbean Vacation Packages".to_string(),
        format!("Book Now from ${}", cost),
        "Book Today".to_string(),
        "Best Package Deals".to_string(),
    ];

    // Live copy; the second line's spelling and spacing match the running ads
    let descriptions = [
        format!("Flight from Washington to Cancun from ${}. Book Today!", cost),
        format!("Enjoy a stay at The Fives Downtow Hotel + Flight  from ${}", cost),
        "Book Now and Get the Best Rate: Flight + Hotel by The Fives Downtown".to_string(),
    ];

    AdText {
        departure: offer.departure.clone(),
        departure_date: offer.departure_date.clone(),
        return_date: offer.return_date.clone(),
        cost,
        headlines: headlines
            .iter()
            .map(|h| truncate_text(h, HEADLINE_MAX_LEN))
            .collect(),
        descriptions: descriptions
            .iter()
            .map(|d| truncate_text(d, DESCRIPTION_MAX_LEN))
            .collect(),
        final_url: offer.booking_url.clone(),
    }
}
