//! MessageProducer port - Outbound messages to external workers.

use async_trait::async_trait;
use thiserror::Error;

/// Sends one serialized message to the configured destination.
///
/// Used by the encoder hand-off; the destination (channel, queue) is fixed
/// when the adapter is built.
#[async_trait]
pub trait MessageProducer: Send + Sync {
    async fn send(&self, payload: String) -> Result<(), MessagingError>;
}

/// Messaging errors.
#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("Broker unavailable: {0}")]
    Unavailable(String),

    #[error("Message rejected: {0}")]
    Rejected(String),
}
