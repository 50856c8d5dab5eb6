//! PostgreSQL persistence session.
//!
//! Collects staged changes in memory and writes them in one transaction on
//! `persist`. Reads made by repositories go straight to the pool and only see
//! committed rows.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::foundation::DomainError;
use crate::ports::{CatalogAggregate, PersistenceSession, StagedChange};

use super::support::db_error;
use super::{
    cast_member_repository, category_repository, genre_repository, video_repository,
    PostgresCastMemberRepository, PostgresCategoryRepository, PostgresGenreRepository,
    PostgresVideoRepository,
};

pub struct PostgresSession {
    pool: PgPool,
    staged: Mutex<Vec<StagedChange>>,
}

impl PostgresSession {
    pub fn new(pool: PgPool) -> Arc<Self> {
        Arc::new(Self {
            pool,
            staged: Mutex::new(Vec::new()),
        })
    }

    pub fn categories(self: &Arc<Self>) -> Arc<PostgresCategoryRepository> {
        Arc::new(PostgresCategoryRepository::new(self.pool.clone(), self.clone()))
    }

    pub fn genres(self: &Arc<Self>) -> Arc<PostgresGenreRepository> {
        Arc::new(PostgresGenreRepository::new(self.pool.clone(), self.clone()))
    }

    pub fn cast_members(self: &Arc<Self>) -> Arc<PostgresCastMemberRepository> {
        Arc::new(PostgresCastMemberRepository::new(self.pool.clone(), self.clone()))
    }

    pub fn videos(self: &Arc<Self>) -> Arc<PostgresVideoRepository> {
        Arc::new(PostgresVideoRepository::new(self.pool.clone(), self.clone()))
    }
}

#[async_trait]
impl PersistenceSession for PostgresSession {
    async fn stage(&self, change: StagedChange) {
        self.staged.lock().await.push(change);
    }

    async fn take_staged(&self) -> Vec<StagedChange> {
        std::mem::take(&mut *self.staged.lock().await)
    }

    async fn persist(&self, changes: Vec<StagedChange>) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        for change in &changes {
            match &change.aggregate {
                CatalogAggregate::Category(a) => {
                    category_repository::write(&mut tx, change.operation, a).await?
                }
                CatalogAggregate::Genre(a) => {
                    genre_repository::write(&mut tx, change.operation, a).await?
                }
                CatalogAggregate::CastMember(a) => {
                    cast_member_repository::write(&mut tx, change.operation, a).await?
                }
                CatalogAggregate::Video(a) => {
                    video_repository::write(&mut tx, change.operation, a).await?
                }
            }
        }

        tx.commit().await.map_err(db_error)?;
        debug!(changes = changes.len(), "Postgres transaction committed");
        Ok(())
    }
}
