//! Alert delivery

mod bot_api;

use async_trait::async_trait;
use tracing::info;

use crate::shared::errors::DeliveryError;

pub use bot_api::{TelegramNotifier, DEFAULT_API_BASE};

pub fn bot_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

/// Sends one plain-text message to one destination
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, destination: &str, text: &str) -> Result<(), DeliveryError>;
}

/// Dry-run notifier: writes the alert to the log instead of sending it
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, destination: &str, text: &str) -> Result<(), DeliveryError> {
        info!("📝 [dry-run] alert for {}:\n{}", destination, text);
        Ok(())
    }
}
