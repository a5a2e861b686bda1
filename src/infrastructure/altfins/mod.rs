//! altFINS market-data API

pub mod client;
pub mod dto;

use async_trait::async_trait;

use crate::shared::errors::FetchError;
use crate::shared::types::{PriceSample, SignalRecord};

pub use client::{AltfinsClient, PriceFeed, SignalFeed};
pub use dto::{PriceRequest, SignalRequest};

/// Source of the tracked asset's latest price
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// `Ok(None)` when the API answered but had no data for the asset.
    async fn latest_price(&self) -> Result<Option<PriceSample>, FetchError>;
}

/// Source of recent trading signals, in no particular order
#[async_trait]
pub trait SignalSource: Send + Sync {
    async fn latest_signals(&self) -> Result<Vec<SignalRecord>, FetchError>;
}
