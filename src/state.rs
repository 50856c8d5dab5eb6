//! Long-lived collaborators and the per-operation wiring built from them.

use sqlx::PgPool;
use std::sync::Arc;

use crate::adapters::PostgresSession;
use crate::application::handlers::video::VideoRelations;
use crate::application::{CommitCoordinator, MediaUploadCoordinator};
use crate::ports::{
    CastMemberRepository, CategoryRepository, EventPublisher, GenreRepository, StorageService,
    UnitOfWork, VideoRepository,
};

/// Shared application state, built once at startup.
///
/// Cheap to clone; every field is a pool or behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: PgPool,
    /// Dispatches committed events to the registered handlers.
    pub publisher: Arc<dyn EventPublisher>,
    /// Media object storage.
    pub storage: Arc<dyn StorageService>,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        publisher: Arc<dyn EventPublisher>,
        storage: Arc<dyn StorageService>,
    ) -> Self {
        Self {
            pool,
            publisher,
            storage,
        }
    }

    /// Starts one catalog operation with its own staged change set.
    pub fn begin(&self) -> CatalogOperation {
        let session = PostgresSession::new(self.pool.clone());
        let unit_of_work = Arc::new(CommitCoordinator::new(
            session.clone(),
            self.publisher.clone(),
        ));
        CatalogOperation {
            session,
            unit_of_work,
            storage: self.storage.clone(),
        }
    }
}

/// Repositories, unit of work and coordinators for a single operation.
///
/// Handlers are built from these; everything staged through the repositories
/// is committed (or dropped) by `unit_of_work`.
pub struct CatalogOperation {
    session: Arc<PostgresSession>,
    unit_of_work: Arc<CommitCoordinator>,
    storage: Arc<dyn StorageService>,
}

impl CatalogOperation {
    pub fn categories(&self) -> Arc<dyn CategoryRepository> {
        self.session.categories()
    }

    pub fn genres(&self) -> Arc<dyn GenreRepository> {
        self.session.genres()
    }

    pub fn cast_members(&self) -> Arc<dyn CastMemberRepository> {
        self.session.cast_members()
    }

    pub fn videos(&self) -> Arc<dyn VideoRepository> {
        self.session.videos()
    }

    pub fn unit_of_work(&self) -> Arc<dyn UnitOfWork> {
        self.unit_of_work.clone()
    }

    pub fn storage(&self) -> Arc<dyn StorageService> {
        self.storage.clone()
    }

    pub fn video_relations(&self) -> VideoRelations {
        VideoRelations::new(self.categories(), self.genres(), self.cast_members())
    }

    pub fn media_uploads(&self) -> Arc<MediaUploadCoordinator> {
        Arc::new(MediaUploadCoordinator::new(
            self.storage(),
            self.videos(),
            self.unit_of_work(),
        ))
    }
}
