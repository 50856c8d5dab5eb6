//! PostgreSQL implementation of CastMemberRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::domain::cast_member::{CastMember, CastMemberType};
use crate::domain::foundation::{
    ensure_not_cancelled, AggregateRoot, BatchRepository, CastMemberId, DomainError, SearchInput,
    SearchOutput, SearchableRepository,
};
use crate::ports::{CastMemberRepository, PersistenceSession, StagedChange, StagedOperation};

use super::support::{db_error, existing_ids, get_column, search_page, timestamp};

const COLUMNS: &str = "id, name, type, created_at";

/// PostgreSQL implementation of CastMemberRepository.
#[derive(Clone)]
pub struct PostgresCastMemberRepository {
    pool: PgPool,
    session: Arc<dyn PersistenceSession>,
}

impl PostgresCastMemberRepository {
    pub fn new(pool: PgPool, session: Arc<dyn PersistenceSession>) -> Self {
        Self { pool, session }
    }
}

#[async_trait]
impl SearchableRepository<CastMember, CastMemberId> for PostgresCastMemberRepository {
    async fn get(
        &self,
        id: CastMemberId,
        cancel: &CancellationToken,
    ) -> Result<CastMember, DomainError> {
        ensure_not_cancelled(cancel)?;
        let row = sqlx::query(&format!("SELECT {} FROM cast_members WHERE id = $1", COLUMNS))
            .bind(*id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        match row {
            Some(row) => row_to_cast_member(&row),
            None => Err(DomainError::not_found("CastMember", id)),
        }
    }

    async fn insert(
        &self,
        aggregate: CastMember,
        cancel: &CancellationToken,
    ) -> Result<(), DomainError> {
        ensure_not_cancelled(cancel)?;
        self.session.stage(StagedChange::insert(aggregate)).await;
        Ok(())
    }

    async fn update(
        &self,
        aggregate: CastMember,
        cancel: &CancellationToken,
    ) -> Result<(), DomainError> {
        ensure_not_cancelled(cancel)?;
        self.session.stage(StagedChange::update(aggregate)).await;
        Ok(())
    }

    async fn delete(
        &self,
        aggregate: CastMember,
        cancel: &CancellationToken,
    ) -> Result<(), DomainError> {
        ensure_not_cancelled(cancel)?;
        self.session.stage(StagedChange::delete(aggregate)).await;
        Ok(())
    }

    async fn search(
        &self,
        input: &SearchInput,
        cancel: &CancellationToken,
    ) -> Result<SearchOutput<CastMember>, DomainError> {
        ensure_not_cancelled(cancel)?;
        let spec = input.sort_spec::<CastMember>();
        let (rows, total) =
            search_page(&self.pool, "cast_members", COLUMNS, "name", spec, input).await?;

        Ok(SearchOutput {
            current_page: input.page(),
            per_page: input.per_page(),
            total,
            items: rows.iter().map(row_to_cast_member).collect::<Result<_, _>>()?,
        })
    }
}

#[async_trait]
impl BatchRepository<CastMember, CastMemberId> for PostgresCastMemberRepository {
    async fn get_list_by_ids(
        &self,
        ids: &[CastMemberId],
        cancel: &CancellationToken,
    ) -> Result<Vec<CastMember>, DomainError> {
        ensure_not_cancelled(cancel)?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows = sqlx::query(&format!(
            "SELECT {} FROM cast_members WHERE id = ANY($1)",
            COLUMNS
        ))
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.iter().map(row_to_cast_member).collect()
    }

    async fn get_ids_list_by_ids(
        &self,
        ids: &[CastMemberId],
        cancel: &CancellationToken,
    ) -> Result<Vec<CastMemberId>, DomainError> {
        ensure_not_cancelled(cancel)?;
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let found = existing_ids(&self.pool, "cast_members", &uuids).await?;
        Ok(found.into_iter().map(CastMemberId::from_uuid).collect())
    }
}

impl CastMemberRepository for PostgresCastMemberRepository {}

/// Applies one staged change inside the session transaction.
pub(super) async fn write(
    conn: &mut PgConnection,
    operation: StagedOperation,
    member: &CastMember,
) -> Result<(), DomainError> {
    let id = *member.id().as_uuid();
    let query = match operation {
        StagedOperation::Insert => sqlx::query(
            "INSERT INTO cast_members (id, name, type, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(member.name())
        .bind(member.member_type().code())
        .bind(*member.created_at().as_datetime()),
        StagedOperation::Update => {
            sqlx::query("UPDATE cast_members SET name = $2, type = $3 WHERE id = $1")
                .bind(id)
                .bind(member.name())
                .bind(member.member_type().code())
        }
        StagedOperation::Delete => sqlx::query("DELETE FROM cast_members WHERE id = $1").bind(id),
    };

    query.execute(&mut *conn).await.map_err(db_error)?;
    Ok(())
}

fn row_to_cast_member(row: &PgRow) -> Result<CastMember, DomainError> {
    let code: i16 = get_column(row, "type")?;
    let member_type = CastMemberType::from_code(code)
        .map_err(|err| DomainError::upstream("postgres", err))?;

    Ok(CastMember::reconstitute(
        CastMemberId::from_uuid(get_column(row, "id")?),
        get_column(row, "name")?,
        member_type,
        timestamp(row)?,
    ))
}
