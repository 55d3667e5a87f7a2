//! Market data module - price snapshots and the feed trait.

mod market_data_model;
mod market_data_traits;

pub use market_data_model::PriceSnapshot;
pub use market_data_traits::PriceFeedTrait;
