//! Integration tests for media uploads: compensation on partial failure and
//! the hand-off of uploaded media to the encoder queue.

mod common;

use async_trait::async_trait;
use std::sync::Arc;

use common::{token, Wiring};
use media_catalog::adapters::{
    HandlerRegistry, InMemoryMessageProducer, InMemoryStorage, InProcessEventPublisher,
    SendToEncoderHandler,
};
use media_catalog::application::handlers::video::{UploadMediasCommand, UploadMediasHandler};
use media_catalog::application::{CommitCoordinator, MediaFile, MediaUploadCoordinator};
use media_catalog::domain::foundation::{
    AggregateRoot, DomainError, SearchableRepository, VideoId,
};
use media_catalog::domain::video::{MediaSlot, Rating, Video, VideoAttributes};
use media_catalog::domain::EventKind;
use media_catalog::ports::{ByteStream, StorageError, StorageService, UnitOfWork};

/// Delegates to an in-memory store but refuses any object whose name
/// contains `fail_on`.
struct FlakyStorage {
    inner: Arc<InMemoryStorage>,
    fail_on: &'static str,
}

#[async_trait]
impl StorageService for FlakyStorage {
    async fn upload(&self, name: &str, content: ByteStream) -> Result<String, StorageError> {
        if name.contains(self.fail_on) {
            return Err(StorageError::Unavailable(format!("refused {}", name)));
        }
        self.inner.upload(name, content).await
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        self.inner.delete(path).await
    }
}

fn attributes() -> VideoAttributes {
    VideoAttributes {
        title: "Arrival".to_string(),
        description: "First contact".to_string(),
        year_launched: 2016,
        duration: 116,
        rating: Rating::R12,
        opened: false,
    }
}

async fn seed_video(w: &Wiring) -> VideoId {
    let video = Video::new(attributes(), [], [], []).unwrap();
    let id = video.id();
    w.session.videos().insert(video, &token()).await.unwrap();
    w.unit_of_work.commit(&token()).await.unwrap();
    id
}

fn files() -> Vec<MediaFile> {
    vec![
        MediaFile::new(MediaSlot::Media, "mp4", Box::new(&b"primary"[..])),
        MediaFile::new(MediaSlot::Trailer, "mp4", Box::new(&b"trailer"[..])),
    ]
}

#[tokio::test]
async fn failed_trailer_upload_removes_the_primary_and_leaves_slots_empty() {
    let w = Wiring::new();
    let id = seed_video(&w).await;
    w.publisher.clear();

    let inner = Arc::new(InMemoryStorage::new());
    let storage = Arc::new(FlakyStorage {
        inner: inner.clone(),
        fail_on: "trailer",
    });
    let coordinator = Arc::new(MediaUploadCoordinator::new(
        storage,
        w.session.videos(),
        w.unit_of_work.clone(),
    ));

    let err = UploadMediasHandler::new(w.session.videos(), coordinator)
        .handle(
            UploadMediasCommand {
                video_id: id,
                files: files(),
            },
            &token(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::UpstreamFailure { .. }));
    assert_eq!(inner.object_count().await, 0);
    assert_eq!(w.publisher.calls(), 0);

    let stored = w.next_request().session.videos().get(id, &token()).await.unwrap();
    assert!(stored.media().is_none());
    assert!(stored.trailer().is_none());
}

#[tokio::test]
async fn uploaded_media_is_handed_to_the_encoder() {
    let catalog = media_catalog::adapters::InMemoryCatalog::new();
    let session = catalog.session();
    let producer = Arc::new(InMemoryMessageProducer::new());
    let registry = HandlerRegistry::new().with(
        EventKind::VideoMediaUploaded,
        Arc::new(SendToEncoderHandler::new(producer.clone())),
    );
    let unit_of_work = Arc::new(CommitCoordinator::new(
        session.clone(),
        Arc::new(InProcessEventPublisher::new(registry)),
    ));

    let video = Video::new(attributes(), [], [], []).unwrap();
    let id = video.id();
    session.videos().insert(video, &token()).await.unwrap();
    unit_of_work.commit(&token()).await.unwrap();

    let storage = Arc::new(InMemoryStorage::new());
    let coordinator = Arc::new(MediaUploadCoordinator::new(
        storage.clone(),
        session.videos(),
        unit_of_work.clone(),
    ));
    UploadMediasHandler::new(session.videos(), coordinator)
        .handle(
            UploadMediasCommand {
                video_id: id,
                files: files(),
            },
            &token(),
        )
        .await
        .unwrap();

    let sent = producer.sent().await;
    assert_eq!(sent.len(), 2);
    let first: serde_json::Value = serde_json::from_str(&sent[0]).unwrap();
    assert_eq!(first["resource_id"], format!("{}.media", id));
    assert_eq!(storage.object_count().await, 2);
}

#[tokio::test]
async fn unavailable_encoder_aborts_the_commit_and_removes_uploads() {
    let catalog = media_catalog::adapters::InMemoryCatalog::new();
    let session = catalog.session();
    let producer = Arc::new(InMemoryMessageProducer::new());
    producer.set_unavailable(true);
    let registry = HandlerRegistry::new().with(
        EventKind::VideoMediaUploaded,
        Arc::new(SendToEncoderHandler::new(producer.clone())),
    );
    let unit_of_work = Arc::new(CommitCoordinator::new(
        session.clone(),
        Arc::new(InProcessEventPublisher::new(registry)),
    ));

    let video = Video::new(attributes(), [], [], []).unwrap();
    let id = video.id();
    session.videos().insert(video, &token()).await.unwrap();
    unit_of_work.commit(&token()).await.unwrap();

    let storage = Arc::new(InMemoryStorage::new());
    let coordinator = Arc::new(MediaUploadCoordinator::new(
        storage.clone(),
        session.videos(),
        unit_of_work.clone(),
    ));
    let err = UploadMediasHandler::new(session.videos(), coordinator)
        .handle(
            UploadMediasCommand {
                video_id: id,
                files: files(),
            },
            &token(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::UpstreamFailure { .. }));
    assert_eq!(storage.object_count().await, 0);
    let stored = catalog.session().videos().get(id, &token()).await.unwrap();
    assert!(stored.media().is_none());
}

#[tokio::test]
async fn failed_reupload_keeps_the_object_the_stored_video_points_at() {
    let w = Wiring::new();
    let id = seed_video(&w).await;

    let inner = Arc::new(InMemoryStorage::new());
    let storage = Arc::new(FlakyStorage {
        inner: inner.clone(),
        fail_on: "trailer",
    });
    let coordinator = Arc::new(MediaUploadCoordinator::new(
        storage,
        w.session.videos(),
        w.unit_of_work.clone(),
    ));
    let handler = UploadMediasHandler::new(w.session.videos(), coordinator);

    handler
        .handle(
            UploadMediasCommand {
                video_id: id,
                files: vec![MediaFile::new(MediaSlot::Media, "mp4", Box::new(&b"v1"[..]))],
            },
            &token(),
        )
        .await
        .unwrap();
    let before = w.next_request().session.videos().get(id, &token()).await.unwrap();
    let media_path = before.media().unwrap().raw_path.clone();

    let err = handler
        .handle(
            UploadMediasCommand {
                video_id: id,
                files: vec![
                    MediaFile::new(MediaSlot::Media, "mp4", Box::new(&b"v2"[..])),
                    MediaFile::new(MediaSlot::Trailer, "mp4", Box::new(&b"trailer"[..])),
                ],
            },
            &token(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::UpstreamFailure { .. }));
    let after = w.next_request().session.videos().get(id, &token()).await.unwrap();
    assert_eq!(after.media().unwrap().raw_path, media_path);
    assert!(after.trailer().is_none());
    assert!(inner.contains(&media_path).await);
}
