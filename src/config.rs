use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::{env, fs, path::Path, time::Duration};

use crate::application::Schedule;
use crate::infrastructure::altfins::{PriceRequest, SignalRequest};
use crate::infrastructure::telegram::bot_api_base;
use crate::shared::errors::ConfigError;

const ALTFINS_BASE: &str = "https://altfins.com/api/v2/public";

fn default_price_url() -> String {
    format!("{}/screener-data/search-requests", ALTFINS_BASE)
}

fn default_signals_url() -> String {
    format!("{}/signals-feed/search-requests", ALTFINS_BASE)
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_interval_secs() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

fn default_symbols() -> Vec<String> {
    vec!["BTC".to_string()]
}

fn default_time_interval() -> String {
    "DAILY".to_string()
}

fn default_display_type() -> Vec<String> {
    vec!["MARKET_CAP".to_string(), "DOLLAR_VOLUME".to_string()]
}

fn default_coin_type_filter() -> String {
    "REGULAR".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCfg {
    #[serde(default = "default_price_url")]
    pub price_url: String,
    #[serde(default = "default_signals_url")]
    pub signals_url: String,
    #[serde(default)]
    pub key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiCfg {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramCfg {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub chat_id: String,
    pub username: Option<String>,
    #[serde(default = "bot_api_base")]
    pub api_base: String,
}

impl Default for TelegramCfg {
    fn default() -> Self {
        Self {
            token: String::new(),
            chat_id: String::new(),
            username: None,
            api_base: bot_api_base(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PriceCfg {
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,
    #[serde(default = "default_time_interval")]
    pub time_interval: String,
    #[serde(default = "default_display_type")]
    pub display_type: Vec<String>,
    #[serde(default = "default_coin_type_filter")]
    pub coin_type_filter: String,
    pub threshold: Decimal,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    // every minute on second 0 unless told otherwise
    #[serde(default = "default_true")]
    pub align: bool,
}

impl PriceCfg {
    pub fn request(&self) -> PriceRequest {
        PriceRequest {
            symbols: self.symbols.clone(),
            time_interval: self.time_interval.clone(),
            display_type: self.display_type.clone(),
            coin_type_filter: self.coin_type_filter.clone(),
        }
    }

    pub fn schedule(&self) -> Schedule {
        Schedule {
            every: Duration::from_secs(self.interval_secs),
            align: self.align,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignalsCfg {
    #[serde(default)]
    pub signals: Vec<String>,
    pub symbols: Vec<String>,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default)]
    pub align: bool,
}

impl SignalsCfg {
    /// Blank signal keys are dropped; an empty list means every signal.
    pub fn request(&self) -> SignalRequest {
        SignalRequest {
            signals: self
                .signals
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            symbols: self.symbols.iter().map(|s| s.trim().to_string()).collect(),
        }
    }

    pub fn schedule(&self) -> Schedule {
        Schedule {
            every: Duration::from_secs(self.interval_secs),
            align: self.align,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiCfg,
    #[serde(default)]
    pub telegram: TelegramCfg,
    pub price: Option<PriceCfg>,
    pub signals: Option<SignalsCfg>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Self::from_toml(&s)
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(s).context("parse Config.toml")?;
        Ok(cfg)
    }

    /// Secrets from the environment win over the file.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| env::var(name).ok());
    }

    fn apply_overrides<F: Fn(&str) -> Option<String>>(&mut self, lookup: F) {
        if let Some(key) = lookup("ALTFINS_API_KEY") {
            self.api.key = key;
        }
        if let Some(token) = lookup("TELEGRAM_BOT_TOKEN") {
            self.telegram.token = token;
        }
        if let Some(chat_id) = lookup("TELEGRAM_CHAT_ID") {
            self.telegram.chat_id = chat_id;
        }
    }

    pub fn validate(&self, dry_run: bool) -> Result<(), ConfigError> {
        if self.api.key.trim().is_empty() {
            return Err(ConfigError::Missing("api.key"));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "api.timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        if !dry_run {
            if self.telegram.token.trim().is_empty() {
                return Err(ConfigError::Missing("telegram.token"));
            }
            if self.telegram.chat_id.trim().is_empty() {
                return Err(ConfigError::Missing("telegram.chat_id"));
            }
        }

        if let Some(price) = &self.price {
            if self.api.price_url.trim().is_empty() {
                return Err(ConfigError::Missing("api.price_url"));
            }
            if price.threshold.is_sign_negative() {
                return Err(ConfigError::Invalid {
                    field: "price.threshold",
                    reason: format!("{} is negative", price.threshold),
                });
            }
            if price.symbols.is_empty() {
                return Err(ConfigError::Missing("price.symbols"));
            }
            if price.interval_secs == 0 {
                return Err(ConfigError::Invalid {
                    field: "price.interval_secs",
                    reason: "must be greater than zero".to_string(),
                });
            }
        }

        if let Some(signals) = &self.signals {
            if self.api.signals_url.trim().is_empty() {
                return Err(ConfigError::Missing("api.signals_url"));
            }
            if signals.interval_secs == 0 {
                return Err(ConfigError::Invalid {
                    field: "signals.interval_secs",
                    reason: "must be greater than zero".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn price(&self) -> Result<&PriceCfg, ConfigError> {
        self.price.as_ref().ok_or(ConfigError::MissingSection("price"))
    }

    pub fn signals(&self) -> Result<&SignalsCfg, ConfigError> {
        self.signals.as_ref().ok_or(ConfigError::MissingSection("signals"))
    }
}
