//! PostgreSQL implementation of CategoryRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::domain::category::Category;
use crate::domain::foundation::{
    ensure_not_cancelled, AggregateRoot, BatchRepository, CategoryId, DomainError, SearchInput,
    SearchOutput, SearchableRepository,
};
use crate::ports::{CategoryRepository, PersistenceSession, StagedChange, StagedOperation};

use super::support::{db_error, existing_ids, get_column, search_page, timestamp};

const COLUMNS: &str = "id, name, description, is_active, created_at";

/// PostgreSQL implementation of CategoryRepository.
#[derive(Clone)]
pub struct PostgresCategoryRepository {
    pool: PgPool,
    session: Arc<dyn PersistenceSession>,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool, session: Arc<dyn PersistenceSession>) -> Self {
        Self { pool, session }
    }
}

#[async_trait]
impl SearchableRepository<Category, CategoryId> for PostgresCategoryRepository {
    async fn get(&self, id: CategoryId, cancel: &CancellationToken) -> Result<Category, DomainError> {
        ensure_not_cancelled(cancel)?;
        let row = sqlx::query(&format!("SELECT {} FROM categories WHERE id = $1", COLUMNS))
            .bind(*id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        match row {
            Some(row) => row_to_category(&row),
            None => Err(DomainError::not_found("Category", id)),
        }
    }

    async fn insert(&self, aggregate: Category, cancel: &CancellationToken) -> Result<(), DomainError> {
        ensure_not_cancelled(cancel)?;
        self.session.stage(StagedChange::insert(aggregate)).await;
        Ok(())
    }

    async fn update(&self, aggregate: Category, cancel: &CancellationToken) -> Result<(), DomainError> {
        ensure_not_cancelled(cancel)?;
        self.session.stage(StagedChange::update(aggregate)).await;
        Ok(())
    }

    async fn delete(&self, aggregate: Category, cancel: &CancellationToken) -> Result<(), DomainError> {
        ensure_not_cancelled(cancel)?;
        self.session.stage(StagedChange::delete(aggregate)).await;
        Ok(())
    }

    async fn search(
        &self,
        input: &SearchInput,
        cancel: &CancellationToken,
    ) -> Result<SearchOutput<Category>, DomainError> {
        ensure_not_cancelled(cancel)?;
        let spec = input.sort_spec::<Category>();
        let (rows, total) =
            search_page(&self.pool, "categories", COLUMNS, "name", spec, input).await?;

        Ok(SearchOutput {
            current_page: input.page(),
            per_page: input.per_page(),
            total,
            items: rows.iter().map(row_to_category).collect::<Result<_, _>>()?,
        })
    }
}

#[async_trait]
impl BatchRepository<Category, CategoryId> for PostgresCategoryRepository {
    async fn get_list_by_ids(
        &self,
        ids: &[CategoryId],
        cancel: &CancellationToken,
    ) -> Result<Vec<Category>, DomainError> {
        ensure_not_cancelled(cancel)?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows = sqlx::query(&format!(
            "SELECT {} FROM categories WHERE id = ANY($1)",
            COLUMNS
        ))
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.iter().map(row_to_category).collect()
    }

    async fn get_ids_list_by_ids(
        &self,
        ids: &[CategoryId],
        cancel: &CancellationToken,
    ) -> Result<Vec<CategoryId>, DomainError> {
        ensure_not_cancelled(cancel)?;
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let found = existing_ids(&self.pool, "categories", &uuids).await?;
        Ok(found.into_iter().map(CategoryId::from_uuid).collect())
    }
}

impl CategoryRepository for PostgresCategoryRepository {}

/// Applies one staged change inside the session transaction.
pub(super) async fn write(
    conn: &mut PgConnection,
    operation: StagedOperation,
    category: &Category,
) -> Result<(), DomainError> {
    let query = match operation {
        StagedOperation::Insert => sqlx::query(
            r#"
            INSERT INTO categories (id, name, description, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(*category.id().as_uuid())
        .bind(category.name())
        .bind(category.description())
        .bind(category.is_active())
        .bind(*category.created_at().as_datetime()),
        StagedOperation::Update => sqlx::query(
            r#"
            UPDATE categories SET
                name = $2,
                description = $3,
                is_active = $4
            WHERE id = $1
            "#,
        )
        .bind(*category.id().as_uuid())
        .bind(category.name())
        .bind(category.description())
        .bind(category.is_active()),
        StagedOperation::Delete => {
            sqlx::query("DELETE FROM categories WHERE id = $1").bind(*category.id().as_uuid())
        }
    };

    query.execute(&mut *conn).await.map_err(db_error)?;
    Ok(())
}

fn row_to_category(row: &PgRow) -> Result<Category, DomainError> {
    Ok(Category::reconstitute(
        CategoryId::from_uuid(get_column(row, "id")?),
        get_column(row, "name")?,
        get_column(row, "description")?,
        get_column(row, "is_active")?,
        timestamp(row)?,
    ))
}
