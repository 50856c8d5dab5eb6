//! Redis-backed message producer.
//!
//! Publishes each message on one pub/sub channel with `PUBLISH`. Delivery is
//! fire-and-forget from Redis' point of view; a subscriber that is not
//! connected misses the message.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::debug;

use crate::ports::{MessageProducer, MessagingError};

#[derive(Clone)]
pub struct RedisMessageProducer {
    conn: MultiplexedConnection,
    channel: String,
}

impl RedisMessageProducer {
    pub fn new(conn: MultiplexedConnection, channel: impl Into<String>) -> Self {
        Self {
            conn,
            channel: channel.into(),
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }
}

#[async_trait]
impl MessageProducer for RedisMessageProducer {
    async fn send(&self, payload: String) -> Result<(), MessagingError> {
        let mut conn = self.conn.clone();
        let receivers: i64 = conn
            .publish(&self.channel, payload)
            .await
            .map_err(|e: redis::RedisError| MessagingError::Unavailable(e.to_string()))?;

        debug!(channel = %self.channel, receivers, "Message published");
        Ok(())
    }
}
