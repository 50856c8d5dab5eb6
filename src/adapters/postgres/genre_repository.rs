//! PostgreSQL implementation of GenreRepository.
//!
//! Category references live in `genres_categories`; they are written in the
//! same transaction as the genre row.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool};
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::domain::foundation::{
    ensure_not_cancelled, AggregateRoot, BatchRepository, CategoryId, DomainError, GenreId,
    SearchInput, SearchOutput, SearchableRepository,
};
use crate::domain::genre::Genre;
use crate::ports::{GenreRepository, PersistenceSession, StagedChange, StagedOperation};

use super::support::{
    db_error, existing_ids, get_column, load_relation, replace_relation, search_page, timestamp,
};

const COLUMNS: &str = "id, name, is_active, created_at";

/// PostgreSQL implementation of GenreRepository.
#[derive(Clone)]
pub struct PostgresGenreRepository {
    pool: PgPool,
    session: Arc<dyn PersistenceSession>,
}

impl PostgresGenreRepository {
    pub fn new(pool: PgPool, session: Arc<dyn PersistenceSession>) -> Self {
        Self { pool, session }
    }

    async fn hydrate(&self, rows: Vec<PgRow>) -> Result<Vec<Genre>, DomainError> {
        let ids: Vec<Uuid> = rows
            .iter()
            .map(|row| get_column(row, "id"))
            .collect::<Result<_, _>>()?;
        let mut categories =
            load_relation(&self.pool, "genres_categories", "genre_id", "category_id", &ids)
                .await?;

        rows.iter()
            .map(|row| row_to_genre(row, &mut categories))
            .collect()
    }
}

#[async_trait]
impl SearchableRepository<Genre, GenreId> for PostgresGenreRepository {
    async fn get(&self, id: GenreId, cancel: &CancellationToken) -> Result<Genre, DomainError> {
        ensure_not_cancelled(cancel)?;
        let row = sqlx::query(&format!("SELECT {} FROM genres WHERE id = $1", COLUMNS))
            .bind(*id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?
            .ok_or_else(|| DomainError::not_found("Genre", id))?;

        self.hydrate(vec![row])
            .await?
            .pop()
            .ok_or_else(|| DomainError::not_found("Genre", id))
    }

    async fn insert(&self, aggregate: Genre, cancel: &CancellationToken) -> Result<(), DomainError> {
        ensure_not_cancelled(cancel)?;
        self.session.stage(StagedChange::insert(aggregate)).await;
        Ok(())
    }

    async fn update(&self, aggregate: Genre, cancel: &CancellationToken) -> Result<(), DomainError> {
        ensure_not_cancelled(cancel)?;
        self.session.stage(StagedChange::update(aggregate)).await;
        Ok(())
    }

    async fn delete(&self, aggregate: Genre, cancel: &CancellationToken) -> Result<(), DomainError> {
        ensure_not_cancelled(cancel)?;
        self.session.stage(StagedChange::delete(aggregate)).await;
        Ok(())
    }

    async fn search(
        &self,
        input: &SearchInput,
        cancel: &CancellationToken,
    ) -> Result<SearchOutput<Genre>, DomainError> {
        ensure_not_cancelled(cancel)?;
        let spec = input.sort_spec::<Genre>();
        let (rows, total) =
            search_page(&self.pool, "genres", COLUMNS, "name", spec, input).await?;

        Ok(SearchOutput {
            current_page: input.page(),
            per_page: input.per_page(),
            total,
            items: self.hydrate(rows).await?,
        })
    }
}

#[async_trait]
impl BatchRepository<Genre, GenreId> for PostgresGenreRepository {
    async fn get_list_by_ids(
        &self,
        ids: &[GenreId],
        cancel: &CancellationToken,
    ) -> Result<Vec<Genre>, DomainError> {
        ensure_not_cancelled(cancel)?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows = sqlx::query(&format!("SELECT {} FROM genres WHERE id = ANY($1)", COLUMNS))
            .bind(&uuids)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        self.hydrate(rows).await
    }

    async fn get_ids_list_by_ids(
        &self,
        ids: &[GenreId],
        cancel: &CancellationToken,
    ) -> Result<Vec<GenreId>, DomainError> {
        ensure_not_cancelled(cancel)?;
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let found = existing_ids(&self.pool, "genres", &uuids).await?;
        Ok(found.into_iter().map(GenreId::from_uuid).collect())
    }
}

impl GenreRepository for PostgresGenreRepository {}

/// Applies one staged change inside the session transaction.
pub(super) async fn write(
    conn: &mut PgConnection,
    operation: StagedOperation,
    genre: &Genre,
) -> Result<(), DomainError> {
    let id = *genre.id().as_uuid();
    let query = match operation {
        StagedOperation::Insert => sqlx::query(
            "INSERT INTO genres (id, name, is_active, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(genre.name())
        .bind(genre.is_active())
        .bind(*genre.created_at().as_datetime()),
        StagedOperation::Update => {
            sqlx::query("UPDATE genres SET name = $2, is_active = $3 WHERE id = $1")
                .bind(id)
                .bind(genre.name())
                .bind(genre.is_active())
        }
        StagedOperation::Delete => sqlx::query("DELETE FROM genres WHERE id = $1").bind(id),
    };
    query.execute(&mut *conn).await.map_err(db_error)?;

    if operation != StagedOperation::Delete {
        let categories = genre.categories_id().iter().map(|c| *c.as_uuid()).collect();
        replace_relation(
            conn,
            "genres_categories",
            "genre_id",
            "category_id",
            id,
            categories,
        )
        .await?;
    }
    Ok(())
}

fn row_to_genre(
    row: &PgRow,
    categories: &mut HashMap<Uuid, Vec<Uuid>>,
) -> Result<Genre, DomainError> {
    let id: Uuid = get_column(row, "id")?;
    let category_ids = categories
        .remove(&id)
        .unwrap_or_default()
        .into_iter()
        .map(CategoryId::from_uuid);

    Ok(Genre::reconstitute(
        GenreId::from_uuid(id),
        get_column(row, "name")?,
        get_column(row, "is_active")?,
        category_ids,
        timestamp(row)?,
    ))
}
