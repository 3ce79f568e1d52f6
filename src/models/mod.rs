use crate::platform::AdHandle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level shape of the fares feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedDocument {
    pub hotel: Hotel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub lowest_fares: Vec<FareRecord>,
}

/// Undecoded fare record; only the matched one is turned into an [`Offer`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FareRecord(pub serde_json::Value);

impl FareRecord {
    pub fn departure(&self) -> Option<&str> {
        self.0.get("departure").and_then(serde_json::Value::as_str)
    }

    pub fn to_offer(&self) -> serde_json::Result<Offer> {
        Offer::deserialize(&self.0)
    }
}

impl From<&Offer> for FareRecord {
    fn from(offer: &Offer) -> Self {
        // Offer only holds strings and JSON numbers, both always representable
        Self(serde_json::to_value(offer).unwrap_or_default())
    }
}

/// Price as published by the feed, either a JSON number or a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cost {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cost::Number(n) => {
                if let Some(i) = n.as_i64() {
                    write!(f, "{}", i)
                } else if let Some(u) = n.as_u64() {
                    write!(f, "{}", u)
                } else {
                    // f64 Display drops a zero fraction and keeps the shortest form
                    let v = n.as_f64().unwrap_or_default();
                    write!(f, "{}", v)
                }
            }
            Cost::Text(s) => f.write_str(s),
        }
    }
}

/// One fare record from the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub departure: String,
    #[serde(default)]
    pub departure_airport_name: String,
    #[serde(rename = "departureDate", default)]
    pub departure_date: String,
    #[serde(rename = "returnDate", default)]
    pub return_date: String,
    pub cost: Cost,
    pub booking_url: String,
}

/// Rendered responsive search ad copy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdText {
    /// Departure code of the source offer, for logging
    pub departure: String,
    pub departure_date: String,
    pub return_date: String,
    pub cost: String,
    pub headlines: Vec<String>,
    pub descriptions: Vec<String>,
    pub final_url: String,
}

/// Snapshot of a live ad as read back from the platform
#[derive(Debug, Clone, PartialEq)]
pub struct ExistingAd {
    pub handle: AdHandle,
    pub headlines: Vec<String>,
    pub descriptions: Vec<String>,
    pub final_url: String,
    /// Best-effort values recovered from the ad copy; never authoritative
    pub departure_date: Option<String>,
    pub return_date: Option<String>,
    pub cost: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_document_decodes_mixed_field_names() {
        let body = r#"{
            "hotel": {
                "lowestFares": [
                    {
                        "departure": "DCA",
                        "departure_airport_name": "Washington Reagan National",
                        "departureDate": "2024-06-01",
                        "returnDate": "2024-06-08",
                        "cost": 450,
                        "booking_url": "https://x/1"
                    }
                ]
            }
        }"#;

        let doc: FeedDocument = serde_json::from_str(body).unwrap();
        let record = &doc.hotel.lowest_fares[0];
        assert_eq!(record.departure(), Some("DCA"));

        let offer = record.to_offer().unwrap();
        assert_eq!(offer.departure, "DCA");
        assert_eq!(offer.departure_date, "2024-06-01");
        assert_eq!(offer.return_date, "2024-06-08");
        assert_eq!(offer.cost.to_string(), "450");
        assert_eq!(offer.booking_url, "https://x/1");
    }

    #[test]
    fn test_broken_record_only_fails_when_decoded() {
        let body = r#"{"hotel":{"lowestFares":[
            {"departure":"IAD","cost":null,"booking_url":null},
            {"cost":450}
        ]}}"#;

        let doc: FeedDocument = serde_json::from_str(body).unwrap();
        assert_eq!(doc.hotel.lowest_fares[0].departure(), Some("IAD"));
        assert_eq!(doc.hotel.lowest_fares[1].departure(), None);
        assert!(doc.hotel.lowest_fares[0].to_offer().is_err());
    }

    #[test]
    fn test_record_from_offer_decodes_back() {
        let offer = Offer {
            departure: "DCA".to_string(),
            departure_airport_name: String::new(),
            departure_date: "2024-06-01".to_string(),
            return_date: "2024-06-08".to_string(),
            cost: Cost::Number(450.into()),
            booking_url: "https://x/1".to_string(),
        };

        let record = FareRecord::from(&offer);
        assert_eq!(record.0["departureDate"], "2024-06-01");
        assert_eq!(record.to_offer().unwrap(), offer);
    }

    #[test]
    fn test_cost_display() {
        let whole: Cost = serde_json::from_str("450.0").unwrap();
        assert_eq!(whole.to_string(), "450");

        let fractional: Cost = serde_json::from_str("450.5").unwrap();
        assert_eq!(fractional.to_string(), "450.5");

        let text: Cost = serde_json::from_str("\"1,299\"").unwrap();
        assert_eq!(text.to_string(), "1,299");
    }
}
