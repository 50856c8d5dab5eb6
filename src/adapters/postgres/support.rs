//! SQL helpers shared by the Postgres repositories.

use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool, Row};
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, SearchInput, SortField, SortSpec, Timestamp};

pub(super) fn db_error(err: sqlx::Error) -> DomainError {
    DomainError::upstream("postgres", err)
}

pub(super) fn get_column<'r, T>(row: &'r PgRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column).map_err(db_error)
}

pub(super) fn timestamp(row: &PgRow) -> Result<Timestamp, DomainError> {
    Ok(Timestamp::from_datetime(get_column(row, "created_at")?))
}

/// `ILIKE` pattern for a substring match, with wildcard characters escaped.
pub(super) fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// `ORDER BY` body for a resolved sort. Text sorts use byte order so results
/// match the in-memory adapter; ties break on id ascending.
pub(super) fn order_clause(spec: SortSpec, text_column: &str) -> String {
    let column = match spec.field {
        SortField::PrimaryText => format!("{} COLLATE \"C\"", text_column),
        SortField::Id => "id".to_string(),
        SortField::CreatedAt => "created_at".to_string(),
    };
    format!("{} {}, id ASC", column, spec.order.as_sql())
}

/// Rows and total count for one page of `table`, filtered on `text_column`.
pub(super) async fn search_page(
    pool: &PgPool,
    table: &str,
    columns: &str,
    text_column: &str,
    spec: SortSpec,
    input: &SearchInput,
) -> Result<(Vec<PgRow>, u64), DomainError> {
    let filter = format!("($1 = '' OR {} ILIKE $2)", text_column);
    let pattern = like_pattern(input.search());

    let total: i64 = sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM {} WHERE {}",
        table, filter
    ))
    .bind(input.search())
    .bind(&pattern)
    .fetch_one(pool)
    .await
    .map_err(db_error)?;
    let total = total.max(0) as u64;

    // Past any row Postgres could return; same answer as the in-memory adapter.
    let Some(offset) = page_offset(input) else {
        return Ok((Vec::new(), total));
    };

    let rows = sqlx::query(&format!(
        "SELECT {} FROM {} WHERE {} ORDER BY {} LIMIT $3 OFFSET $4",
        columns,
        table,
        filter,
        order_clause(spec, text_column)
    ))
    .bind(input.search())
    .bind(&pattern)
    .bind(i64::from(input.per_page()))
    .bind(offset)
    .fetch_all(pool)
    .await
    .map_err(db_error)?;

    Ok((rows, total))
}

/// `OFFSET` for `input`, or `None` when it does not fit a Postgres BIGINT.
pub(super) fn page_offset(input: &SearchInput) -> Option<i64> {
    i64::try_from(input.offset()).ok()
}

/// Loads `owner -> [target]` pairs from a relation table for the given owners.
pub(super) async fn load_relation(
    pool: &PgPool,
    table: &str,
    owner_column: &str,
    target_column: &str,
    owners: &[Uuid],
) -> Result<HashMap<Uuid, Vec<Uuid>>, DomainError> {
    let mut relation: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    if owners.is_empty() {
        return Ok(relation);
    }

    let rows = sqlx::query(&format!(
        "SELECT {owner}, {target} FROM {table} WHERE {owner} = ANY($1)",
        owner = owner_column,
        target = target_column,
        table = table
    ))
    .bind(owners)
    .fetch_all(pool)
    .await
    .map_err(db_error)?;

    for row in rows {
        let owner: Uuid = get_column(&row, owner_column)?;
        let target: Uuid = get_column(&row, target_column)?;
        relation.entry(owner).or_default().push(target);
    }
    Ok(relation)
}

/// Replaces the targets of one owner in a relation table.
pub(super) async fn replace_relation(
    conn: &mut PgConnection,
    table: &str,
    owner_column: &str,
    target_column: &str,
    owner: Uuid,
    targets: Vec<Uuid>,
) -> Result<(), DomainError> {
    sqlx::query(&format!("DELETE FROM {} WHERE {} = $1", table, owner_column))
        .bind(owner)
        .execute(&mut *conn)
        .await
        .map_err(db_error)?;

    if targets.is_empty() {
        return Ok(());
    }

    sqlx::query(&format!(
        "INSERT INTO {} ({}, {}) SELECT $1, UNNEST($2::uuid[])",
        table, owner_column, target_column
    ))
    .bind(owner)
    .bind(targets)
    .execute(&mut *conn)
    .await
    .map_err(db_error)?;
    Ok(())
}

/// Ids among `ids` present in `table`.
pub(super) async fn existing_ids(
    pool: &PgPool,
    table: &str,
    ids: &[Uuid],
) -> Result<Vec<Uuid>, DomainError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    sqlx::query_scalar(&format!("SELECT id FROM {} WHERE id = ANY($1)", table))
        .bind(ids)
        .fetch_all(pool)
        .await
        .map_err(db_error)
}
