//! altFINS request and response bodies

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::types::{PriceSample, SignalRecord};

/// Screener search body used by the price monitor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRequest {
    pub symbols: Vec<String>,
    pub time_interval: String,
    pub display_type: Vec<String>,
    pub coin_type_filter: String,
}

/// Signals feed body used by the signal monitor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalRequest {
    pub signals: Vec<String>,
    pub symbols: Vec<String>,
}

/// Paged response; only `content` matters here.
#[derive(Debug, Deserialize)]
pub struct ContentPage<T> {
    pub content: Option<Vec<T>>,
}

impl<T> ContentPage<T> {
    pub fn into_content(self) -> Vec<T> {
        self.content.unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinData {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    pub last_price: Decimal,
}

impl From<CoinData> for PriceSample {
    fn from(coin: CoinData) -> Self {
        Self {
            symbol: coin.symbol,
            name: coin.name.unwrap_or_default(),
            last_price: coin.last_price,
        }
    }
}

/// Text fields may arrive as strings, numbers or null.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalData {
    #[serde(default)]
    pub timestamp: Option<Value>,
    #[serde(default)]
    pub signal_key: Option<Value>,
    #[serde(default)]
    pub signal_name: Option<Value>,
    #[serde(default)]
    pub symbol: Option<Value>,
    #[serde(default)]
    pub symbol_name: Option<Value>,
    #[serde(default)]
    pub last_price: Option<Value>,
    #[serde(default)]
    pub price_change: Option<Value>,
    #[serde(default)]
    pub direction: Option<Value>,
}

fn text(value: Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    }
}

impl TryFrom<SignalData> for SignalRecord {
    type Error = String;

    fn try_from(data: SignalData) -> Result<Self, Self::Error> {
        let raw = match data.timestamp {
            Some(Value::String(raw)) => raw,
            other => return Err(format!("missing timestamp: {:?}", other)),
        };
        let timestamp = DateTime::parse_from_rfc3339(&raw)
            .map_err(|e| format!("bad timestamp {:?}: {}", raw, e))?
            .with_timezone(&Utc);

        Ok(Self {
            timestamp,
            signal_key: text(data.signal_key),
            signal_name: text(data.signal_name),
            symbol: text(data.symbol),
            symbol_name: text(data.symbol_name),
            last_price: text(data.last_price),
            price_change: text(data.price_change),
            direction: text(data.direction),
        })
    }
}
