pub mod error;
pub mod snapshot;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use snapshot::SnapshotPlatform;
pub use traits::{AdGroupHandle, AdHandle, AdPlatform, AdType};
