pub mod client;
pub mod filter;
pub mod traits;

pub use client::FeedClient;
pub use filter::first_matching;
pub use traits::OfferSource;
