pub mod builder;
pub mod reader;

pub use builder::build_ad_text;
pub use reader::read_existing_ads;
