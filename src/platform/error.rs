use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("slot {slot} is not exposed for {field}")]
    UnsupportedSlot { field: &'static str, slot: usize },

    #[error("ad group {0} not found")]
    AdGroupNotFound(u64),

    #[error("ad {0} not found")]
    AdNotFound(u64),

    #[error("invalid ad: {0}")]
    InvalidAd(String),
}
