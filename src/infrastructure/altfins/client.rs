use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::shared::errors::FetchError;
use crate::shared::types::{PriceSample, SignalRecord};

use super::dto::{CoinData, ContentPage, PriceRequest, SignalData, SignalRequest};
use super::{PriceSource, SignalSource};

/// Thin altFINS HTTP client: one POST per call, no retries
#[derive(Clone)]
pub struct AltfinsClient {
    http_client: Client,
    api_key: String,
}

impl AltfinsClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_key: api_key.into(),
        })
    }

    pub async fn search<B, T>(&self, url: &str, body: &B) -> Result<Vec<T>, FetchError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        debug!("POST {}", url);

        let response = self
            .http_client
            .post(url)
            .header("x-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let page: ContentPage<T> =
            serde_json::from_str(&text).map_err(|e| FetchError::Decode(e.to_string()))?;
        Ok(page.into_content())
    }
}

/// Latest price of the configured asset via the screener endpoint
pub struct PriceFeed {
    client: AltfinsClient,
    url: String,
    request: PriceRequest,
}

impl PriceFeed {
    pub fn new(client: AltfinsClient, url: impl Into<String>, request: PriceRequest) -> Self {
        Self {
            client,
            url: url.into(),
            request,
        }
    }
}

#[async_trait]
impl PriceSource for PriceFeed {
    async fn latest_price(&self) -> Result<Option<PriceSample>, FetchError> {
        let coins: Vec<CoinData> = self.client.search(&self.url, &self.request).await?;
        Ok(coins.into_iter().next().map(PriceSample::from))
    }
}

/// Recent entries of the signals feed
pub struct SignalFeed {
    client: AltfinsClient,
    url: String,
    request: SignalRequest,
}

impl SignalFeed {
    pub fn new(client: AltfinsClient, url: impl Into<String>, request: SignalRequest) -> Self {
        Self {
            client,
            url: url.into(),
            request,
        }
    }
}

#[async_trait]
impl SignalSource for SignalFeed {
    async fn latest_signals(&self) -> Result<Vec<SignalRecord>, FetchError> {
        let entries: Vec<SignalData> = self.client.search(&self.url, &self.request).await?;

        let records = entries
            .into_iter()
            .filter_map(|entry| match SignalRecord::try_from(entry) {
                Ok(record) => Some(record),
                Err(reason) => {
                    warn!("⚠️ Dropping signal entry: {}", reason);
                    None
                }
            })
            .collect();
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use rust_decimal::Decimal;

    fn client() -> AltfinsClient {
        AltfinsClient::new("secret", Duration::from_secs(5)).unwrap()
    }

    fn price_request() -> PriceRequest {
        PriceRequest {
            symbols: vec!["BTC".to_string()],
            time_interval: "DAILY".to_string(),
            display_type: vec!["MARKET_CAP".to_string(), "DOLLAR_VOLUME".to_string()],
            coin_type_filter: "REGULAR".to_string(),
        }
    }

    #[tokio::test]
    async fn test_price_feed_returns_first_entry() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/screener")
            .match_header("x-api-key", "secret")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "symbols": ["BTC"],
                "timeInterval": "DAILY",
                "coinTypeFilter": "REGULAR",
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"content":[
                    {"symbol":"BTC","name":"Bitcoin","lastPrice":64000.25,"extra":true},
                    {"symbol":"BTC","name":"Bitcoin","lastPrice":1}
                ],"totalElements":2}"#,
            )
            .create_async()
            .await;

        let feed = PriceFeed::new(client(), format!("{}/screener", server.url()), price_request());
        let sample = feed.latest_price().await.unwrap().unwrap();

        mock.assert_async().await;
        assert_eq!(sample.symbol, "BTC");
        assert_eq!(sample.last_price, Decimal::new(6400025, 2));
    }

    #[tokio::test]
    async fn test_price_feed_empty_content() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/screener")
            .with_status(200)
            .with_body(r#"{"content":[]}"#)
            .create_async()
            .await;

        let feed = PriceFeed::new(client(), format!("{}/screener", server.url()), price_request());
        assert!(feed.latest_price().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_non_success_status_is_fetch_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/screener")
            .with_status(401)
            .with_body("unauthorized")
            .create_async()
            .await;

        let feed = PriceFeed::new(client(), format!("{}/screener", server.url()), price_request());
        match feed.latest_price().await {
            Err(FetchError::Status { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "unauthorized");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_fetch_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/screener")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let feed = PriceFeed::new(client(), format!("{}/screener", server.url()), price_request());
        assert!(matches!(feed.latest_price().await, Err(FetchError::Decode(_))));
    }

    #[tokio::test]
    async fn test_signal_feed_drops_unparseable_entries() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/signals")
            .match_header("x-api-key", "secret")
            .match_body(Matcher::Json(serde_json::json!({
                "signals": ["SIGNALS_SUMMARY_CHANNEL_UP"],
                "symbols": ["BTC", "ETH"],
            })))
            .with_status(200)
            .with_body(
                r#"{"content":[
                    {"timestamp":"2024-05-01T10:00:00Z","signalKey":"SIGNALS_SUMMARY_CHANNEL_UP","symbol":"BTC"},
                    {"timestamp":"not a time","signalKey":"SIGNALS_SUMMARY_CHANNEL_UP","symbol":"ETH"}
                ],"totalElements":2}"#,
            )
            .create_async()
            .await;

        let request = SignalRequest {
            signals: vec!["SIGNALS_SUMMARY_CHANNEL_UP".to_string()],
            symbols: vec!["BTC".to_string(), "ETH".to_string()],
        };
        let feed = SignalFeed::new(client(), format!("{}/signals", server.url()), request);
        let records = feed.latest_signals().await.unwrap();

        mock.assert_async().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].symbol, "BTC");
    }

    #[tokio::test]
    async fn test_signal_feed_keeps_batch_when_timestamp_is_null() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/signals")
            .with_status(200)
            .with_body(
                r#"{"content":[
                    {"timestamp":"2024-05-01T10:00:00Z","signalKey":"SIGNALS_SUMMARY_CHANNEL_UP","symbol":"BTC"},
                    {"timestamp":null,"signalKey":"SIGNALS_SUMMARY_CHANNEL_UP","symbol":"ETH"},
                    {"signalKey":"SIGNALS_SUMMARY_CHANNEL_UP","symbol":"SOL"}
                ]}"#,
            )
            .create_async()
            .await;

        let request = SignalRequest {
            signals: Vec::new(),
            symbols: vec!["BTC".to_string(), "ETH".to_string(), "SOL".to_string()],
        };
        let feed = SignalFeed::new(client(), format!("{}/signals", server.url()), request);
        let records = feed.latest_signals().await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].symbol, "BTC");
    }
}
