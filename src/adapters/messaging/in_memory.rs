//! In-memory message producer that records what was sent.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{MessageProducer, MessagingError};

#[derive(Debug, Clone, Default)]
pub struct InMemoryMessageProducer {
    sent: Arc<RwLock<Vec<String>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryMessageProducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following `send` fail, or succeed again.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn sent(&self) -> Vec<String> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl MessageProducer for InMemoryMessageProducer {
    async fn send(&self, payload: String) -> Result<(), MessagingError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(MessagingError::Unavailable("in-memory broker offline".to_string()));
        }
        self.sent.write().await.push(payload);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_until_unavailable() {
        let producer = InMemoryMessageProducer::new();
        producer.send("one".to_string()).await.unwrap();

        producer.set_unavailable(true);
        assert!(producer.send("two".to_string()).await.is_err());

        assert_eq!(producer.sent().await, vec!["one".to_string()]);
    }
}
