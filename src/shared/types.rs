//! Common types used across the application

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Latest price of the tracked asset, produced once per tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    pub symbol: String,
    pub name: String,
    pub last_price: Decimal,
}

impl PriceSample {
    /// Name used in alert text; falls back to the symbol.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.symbol
        } else {
            &self.name
        }
    }
}

/// One entry of the signals feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub timestamp: DateTime<Utc>,
    pub signal_key: String,
    pub signal_name: String,
    pub symbol: String,
    pub symbol_name: String,
    pub last_price: String,
    pub price_change: String,
    pub direction: String,
}

impl SignalRecord {
    /// Secondary identity used to tell apart signals sharing a timestamp.
    pub fn identity(&self) -> SignalIdentity {
        SignalIdentity {
            signal_key: self.signal_key.clone(),
            symbol: self.symbol.clone(),
        }
    }

    pub fn time_label(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignalIdentity {
    pub signal_key: String,
    pub symbol: String,
}
