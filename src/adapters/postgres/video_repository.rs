//! PostgreSQL implementation of VideoRepository.
//!
//! Media slots are flattened into columns on `videos`. Category, genre and
//! cast member references each live in their own relation table.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool};
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::domain::foundation::{
    ensure_not_cancelled, AggregateRoot, BatchRepository, CastMemberId, CategoryId, DomainError,
    GenreId, SearchInput, SearchOutput, SearchableRepository, VideoId,
};
use crate::domain::video::{
    AudioVideoMedia, ImageMedia, MediaStatus, Rating, Video, VideoAttributes, VideoState,
};
use crate::ports::{PersistenceSession, StagedChange, StagedOperation, VideoRepository};

use super::support::{
    db_error, existing_ids, get_column, load_relation, replace_relation, search_page, timestamp,
};

const COLUMNS: &str = r#"
    id, title, description, year_launched, duration, rating, opened, published,
    media_raw_path, media_encoded_path, media_status,
    trailer_raw_path, trailer_encoded_path, trailer_status,
    thumb_path, thumb_half_path, banner_path, created_at
"#;

/// Relation tables hung off `videos`: (table, target column).
const CATEGORIES: (&str, &str) = ("videos_categories", "category_id");
const GENRES: (&str, &str) = ("videos_genres", "genre_id");
const CAST_MEMBERS: (&str, &str) = ("videos_cast_members", "cast_member_id");

#[derive(Default)]
struct Relations {
    categories: HashMap<Uuid, Vec<Uuid>>,
    genres: HashMap<Uuid, Vec<Uuid>>,
    cast_members: HashMap<Uuid, Vec<Uuid>>,
}

/// PostgreSQL implementation of VideoRepository.
#[derive(Clone)]
pub struct PostgresVideoRepository {
    pool: PgPool,
    session: Arc<dyn PersistenceSession>,
}

impl PostgresVideoRepository {
    pub fn new(pool: PgPool, session: Arc<dyn PersistenceSession>) -> Self {
        Self { pool, session }
    }

    async fn hydrate(&self, rows: Vec<PgRow>) -> Result<Vec<Video>, DomainError> {
        let ids: Vec<Uuid> = rows
            .iter()
            .map(|row| get_column(row, "id"))
            .collect::<Result<_, _>>()?;

        let mut relations = Relations {
            categories: self.relation(CATEGORIES, &ids).await?,
            genres: self.relation(GENRES, &ids).await?,
            cast_members: self.relation(CAST_MEMBERS, &ids).await?,
        };

        rows.iter()
            .map(|row| row_to_video(row, &mut relations))
            .collect()
    }

    async fn relation(
        &self,
        (table, target): (&str, &str),
        owners: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Uuid>>, DomainError> {
        load_relation(&self.pool, table, "video_id", target, owners).await
    }
}

#[async_trait]
impl SearchableRepository<Video, VideoId> for PostgresVideoRepository {
    async fn get(&self, id: VideoId, cancel: &CancellationToken) -> Result<Video, DomainError> {
        ensure_not_cancelled(cancel)?;
        let row = sqlx::query(&format!("SELECT {} FROM videos WHERE id = $1", COLUMNS))
            .bind(*id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?
            .ok_or_else(|| DomainError::not_found("Video", id))?;

        self.hydrate(vec![row])
            .await?
            .pop()
            .ok_or_else(|| DomainError::not_found("Video", id))
    }

    async fn insert(&self, aggregate: Video, cancel: &CancellationToken) -> Result<(), DomainError> {
        ensure_not_cancelled(cancel)?;
        self.session.stage(StagedChange::insert(aggregate)).await;
        Ok(())
    }

    async fn update(&self, aggregate: Video, cancel: &CancellationToken) -> Result<(), DomainError> {
        ensure_not_cancelled(cancel)?;
        self.session.stage(StagedChange::update(aggregate)).await;
        Ok(())
    }

    async fn delete(&self, aggregate: Video, cancel: &CancellationToken) -> Result<(), DomainError> {
        ensure_not_cancelled(cancel)?;
        self.session.stage(StagedChange::delete(aggregate)).await;
        Ok(())
    }

    async fn search(
        &self,
        input: &SearchInput,
        cancel: &CancellationToken,
    ) -> Result<SearchOutput<Video>, DomainError> {
        ensure_not_cancelled(cancel)?;
        let spec = input.sort_spec::<Video>();
        let (rows, total) =
            search_page(&self.pool, "videos", COLUMNS, "title", spec, input).await?;

        Ok(SearchOutput {
            current_page: input.page(),
            per_page: input.per_page(),
            total,
            items: self.hydrate(rows).await?,
        })
    }
}

#[async_trait]
impl BatchRepository<Video, VideoId> for PostgresVideoRepository {
    async fn get_list_by_ids(
        &self,
        ids: &[VideoId],
        cancel: &CancellationToken,
    ) -> Result<Vec<Video>, DomainError> {
        ensure_not_cancelled(cancel)?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows = sqlx::query(&format!("SELECT {} FROM videos WHERE id = ANY($1)", COLUMNS))
            .bind(&uuids)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        self.hydrate(rows).await
    }

    async fn get_ids_list_by_ids(
        &self,
        ids: &[VideoId],
        cancel: &CancellationToken,
    ) -> Result<Vec<VideoId>, DomainError> {
        ensure_not_cancelled(cancel)?;
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let found = existing_ids(&self.pool, "videos", &uuids).await?;
        Ok(found.into_iter().map(VideoId::from_uuid).collect())
    }
}

impl VideoRepository for PostgresVideoRepository {}

/// Applies one staged change inside the session transaction.
pub(super) async fn write(
    conn: &mut PgConnection,
    operation: StagedOperation,
    video: &Video,
) -> Result<(), DomainError> {
    let id = *video.id().as_uuid();
    let media = video.media();
    let trailer = video.trailer();

    let query = match operation {
        StagedOperation::Insert => sqlx::query(
            r#"
            INSERT INTO videos (
                id, title, description, year_launched, duration, rating, opened, published,
                media_raw_path, media_encoded_path, media_status,
                trailer_raw_path, trailer_encoded_path, trailer_status,
                thumb_path, thumb_half_path, banner_path, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(id)
        .bind(video.title())
        .bind(video.description())
        .bind(video.year_launched())
        .bind(video.duration())
        .bind(video.rating().as_str())
        .bind(video.opened())
        .bind(video.published())
        .bind(media.map(|m| m.raw_path.clone()))
        .bind(media.and_then(|m| m.encoded_path.clone()))
        .bind(media.map(|m| m.status.as_str()))
        .bind(trailer.map(|m| m.raw_path.clone()))
        .bind(trailer.and_then(|m| m.encoded_path.clone()))
        .bind(trailer.map(|m| m.status.as_str()))
        .bind(video.thumb().map(|m| m.path.clone()))
        .bind(video.thumb_half().map(|m| m.path.clone()))
        .bind(video.banner().map(|m| m.path.clone()))
        .bind(*video.created_at().as_datetime()),
        StagedOperation::Update => sqlx::query(
            r#"
            UPDATE videos SET
                title = $2,
                description = $3,
                year_launched = $4,
                duration = $5,
                rating = $6,
                opened = $7,
                published = $8,
                media_raw_path = $9,
                media_encoded_path = $10,
                media_status = $11,
                trailer_raw_path = $12,
                trailer_encoded_path = $13,
                trailer_status = $14,
                thumb_path = $15,
                thumb_half_path = $16,
                banner_path = $17
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(video.title())
        .bind(video.description())
        .bind(video.year_launched())
        .bind(video.duration())
        .bind(video.rating().as_str())
        .bind(video.opened())
        .bind(video.published())
        .bind(media.map(|m| m.raw_path.clone()))
        .bind(media.and_then(|m| m.encoded_path.clone()))
        .bind(media.map(|m| m.status.as_str()))
        .bind(trailer.map(|m| m.raw_path.clone()))
        .bind(trailer.and_then(|m| m.encoded_path.clone()))
        .bind(trailer.map(|m| m.status.as_str()))
        .bind(video.thumb().map(|m| m.path.clone()))
        .bind(video.thumb_half().map(|m| m.path.clone()))
        .bind(video.banner().map(|m| m.path.clone())),
        StagedOperation::Delete => sqlx::query("DELETE FROM videos WHERE id = $1").bind(id),
    };
    query.execute(&mut *conn).await.map_err(db_error)?;

    if operation == StagedOperation::Delete {
        return Ok(());
    }

    let categories = video.categories_id().iter().map(|c| *c.as_uuid()).collect();
    let genres = video.genres_id().iter().map(|g| *g.as_uuid()).collect();
    let cast_members = video.cast_members_id().iter().map(|c| *c.as_uuid()).collect();

    for ((table, target), targets) in [
        (CATEGORIES, categories),
        (GENRES, genres),
        (CAST_MEMBERS, cast_members),
    ] {
        replace_relation(conn, table, "video_id", target, id, targets).await?;
    }
    Ok(())
}

fn audio_video(
    row: &PgRow,
    prefix: &str,
) -> Result<Option<AudioVideoMedia>, DomainError> {
    let raw_path: Option<String> = get_column(row, &format!("{}_raw_path", prefix))?;
    let Some(raw_path) = raw_path else {
        return Ok(None);
    };
    let encoded_path: Option<String> = get_column(row, &format!("{}_encoded_path", prefix))?;
    let status: Option<String> = get_column(row, &format!("{}_status", prefix))?;
    let status = match status {
        Some(code) => code
            .parse::<MediaStatus>()
            .map_err(|err| DomainError::upstream("postgres", err))?,
        None => MediaStatus::Pending,
    };

    Ok(Some(AudioVideoMedia {
        raw_path,
        encoded_path,
        status,
    }))
}

fn image(row: &PgRow, column: &str) -> Result<Option<ImageMedia>, DomainError> {
    let path: Option<String> = get_column(row, column)?;
    Ok(path.map(ImageMedia::new))
}

fn row_to_video(row: &PgRow, relations: &mut Relations) -> Result<Video, DomainError> {
    let id: Uuid = get_column(row, "id")?;
    let rating: String = get_column(row, "rating")?;
    let rating = rating
        .parse::<Rating>()
        .map_err(|err| DomainError::upstream("postgres", err))?;

    let state = VideoState {
        attributes: VideoAttributes {
            title: get_column(row, "title")?,
            description: get_column(row, "description")?,
            year_launched: get_column(row, "year_launched")?,
            duration: get_column(row, "duration")?,
            rating,
            opened: get_column(row, "opened")?,
        },
        published: get_column(row, "published")?,
        categories_id: take_ids(&mut relations.categories, &id, CategoryId::from_uuid),
        genres_id: take_ids(&mut relations.genres, &id, GenreId::from_uuid),
        cast_members_id: take_ids(&mut relations.cast_members, &id, CastMemberId::from_uuid),
        media: audio_video(row, "media")?,
        trailer: audio_video(row, "trailer")?,
        thumb: image(row, "thumb_path")?,
        thumb_half: image(row, "thumb_half_path")?,
        banner: image(row, "banner_path")?,
    };

    Ok(Video::reconstitute(VideoId::from_uuid(id), state, timestamp(row)?))
}

fn take_ids<I: Ord>(
    relation: &mut HashMap<Uuid, Vec<Uuid>>,
    owner: &Uuid,
    make: fn(Uuid) -> I,
) -> std::collections::BTreeSet<I> {
    relation
        .remove(owner)
        .unwrap_or_default()
        .into_iter()
        .map(make)
        .collect()
}
