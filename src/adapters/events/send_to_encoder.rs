//! Hands freshly uploaded media to the encoder.
//!
//! Registered for `VideoMediaUploaded`. Sends one `VideoEncodingRequested`
//! message per event through the configured [`MessageProducer`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::domain::foundation::{ensure_not_cancelled, DomainError};
use crate::domain::CatalogEvent;
use crate::ports::{EventHandler, MessageProducer};

/// Message consumed by the encoder worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoEncodingRequested {
    pub resource_id: String,
    pub file_path: String,
}

pub struct SendToEncoderHandler {
    producer: Arc<dyn MessageProducer>,
}

impl SendToEncoderHandler {
    pub fn new(producer: Arc<dyn MessageProducer>) -> Self {
        Self { producer }
    }
}

#[async_trait]
impl EventHandler for SendToEncoderHandler {
    async fn handle(
        &self,
        event: &CatalogEvent,
        cancel: &CancellationToken,
    ) -> Result<(), DomainError> {
        let CatalogEvent::VideoMediaUploaded(uploaded) = event else {
            return Ok(());
        };
        ensure_not_cancelled(cancel)?;

        let message = VideoEncodingRequested {
            resource_id: format!("{}.{}", uploaded.video_id, uploaded.slot),
            file_path: uploaded.file_path.clone(),
        };
        let payload = serde_json::to_string(&message)
            .map_err(|err| DomainError::upstream(self.name(), err))?;

        self.producer
            .send(payload)
            .await
            .map_err(|err| DomainError::upstream(self.name(), err))?;

        debug!(
            video_id = %uploaded.video_id,
            slot = %uploaded.slot,
            "Encoding requested"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "SendToEncoderHandler"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::CategoryCreated;
    use crate::domain::foundation::{CategoryId, VideoId};
    use crate::domain::video::{MediaSlot, VideoMediaUploaded};
    use crate::ports::MessagingError;
    use std::sync::Mutex;

    struct MockProducer {
        sent: Mutex<Vec<String>>,
        fail: bool,
    }

    impl MockProducer {
        fn new(fail: bool) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    #[async_trait]
    impl MessageProducer for MockProducer {
        async fn send(&self, payload: String) -> Result<(), MessagingError> {
            if self.fail {
                return Err(MessagingError::Unavailable("broker down".to_string()));
            }
            self.sent.lock().unwrap().push(payload);
            Ok(())
        }
    }

    #[tokio::test]
    async fn sends_resource_id_and_path() {
        let producer = Arc::new(MockProducer::new(false));
        let handler = SendToEncoderHandler::new(producer.clone());
        let video_id = VideoId::new();
        let event: CatalogEvent =
            VideoMediaUploaded::new(video_id, MediaSlot::Trailer, "abc-trailer.mp4").into();

        handler.handle(&event, &CancellationToken::new()).await.unwrap();

        let sent = producer.sent.lock().unwrap();
        let message: VideoEncodingRequested = serde_json::from_str(&sent[0]).unwrap();
        assert_eq!(message.resource_id, format!("{}.trailer", video_id));
        assert_eq!(message.file_path, "abc-trailer.mp4");
    }

    #[tokio::test]
    async fn ignores_other_events() {
        let producer = Arc::new(MockProducer::new(true));
        let handler = SendToEncoderHandler::new(producer);
        let event: CatalogEvent = CategoryCreated::new(CategoryId::new(), "Movies").into();

        assert!(handler.handle(&event, &CancellationToken::new()).await.is_ok());
    }

    #[tokio::test]
    async fn broker_failure_is_upstream() {
        let handler = SendToEncoderHandler::new(Arc::new(MockProducer::new(true)));
        let event: CatalogEvent =
            VideoMediaUploaded::new(VideoId::new(), MediaSlot::Media, "m.mp4").into();

        let err = handler.handle(&event, &CancellationToken::new()).await.unwrap_err();

        assert!(matches!(err, DomainError::UpstreamFailure { .. }));
    }
}
