use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::videos::dtos::{
    SubmitVideoDto, UpdateVideoDto, VideoListQuery, VideoResponseDto,
};
use crate::features::videos::models::{ModerationStatus, Video, VideoWithAuthor};
use crate::features::videos::services::VisibilityFilter;
use crate::shared::constants::MAX_CATEGORIES_PER_VIDEO;
use crate::shared::validation::YOUTUBE_LINK_REGEX;

const SELECT_VIDEO_WITH_AUTHOR: &str = r#"
    SELECT v.id, v.link, v.description, v.user_id, v.status, v.like_count, v.created_at,
           u.username AS submitted_by
    FROM videos v
    JOIN users u ON u.id = v.user_id
"#;

/// Service for video submission, listing and moderation
pub struct VideoService {
    pool: PgPool,
}

impl VideoService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List videos visible to the caller, per the visibility rules
    pub async fn list(
        &self,
        caller: Option<&AuthenticatedUser>,
        query: &VideoListQuery,
    ) -> Result<Vec<VideoResponseDto>> {
        let filter = VisibilityFilter::for_caller(caller, query);

        let mut builder = QueryBuilder::new(SELECT_VIDEO_WITH_AUTHOR);
        builder.push(" WHERE 1=1");

        if let Some(status) = filter.status {
            builder.push(" AND v.status = ").push_bind(status);
        }

        // Both category filters intersect: a video must carry each of them
        for category_id in [filter.category_1, filter.category_2].into_iter().flatten() {
            builder
                .push(
                    " AND EXISTS (SELECT 1 FROM video_categories vc \
                     WHERE vc.video_id = v.id AND vc.category_id = ",
                )
                .push_bind(category_id)
                .push(")");
        }

        builder.push(" ORDER BY v.id");

        let rows: Vec<VideoWithAuthor> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list videos: {:?}", e);
                AppError::Database(e)
            })?;

        self.attach_categories(rows).await
    }

    /// Get a single video, hiding non-approved ones from callers who may not
    /// see them
    pub async fn get(
        &self,
        caller: Option<&AuthenticatedUser>,
        id: Uuid,
    ) -> Result<VideoResponseDto> {
        let row = self.fetch_with_author(id).await?;

        if !VisibilityFilter::can_view(caller, row.status, row.user_id) {
            return Err(AppError::NotFound("Video not found".to_string()));
        }

        let categories = self.get_video_categories(row.id).await?;
        Ok(VideoResponseDto::from_row(row, categories))
    }

    /// Submit a new video, pending moderation
    pub async fn create(
        &self,
        caller: &AuthenticatedUser,
        dto: SubmitVideoDto,
    ) -> Result<VideoResponseDto> {
        let category_ids = self.normalize_categories(dto.categories)?;
        self.validate_link(&dto.link, None).await?;
        self.ensure_categories_exist(&category_ids).await?;

        let video_id = Uuid::now_v7();

        let mut tx = self.pool.begin().await?;

        let insert = sqlx::query(
            r#"
            INSERT INTO videos (id, link, description, user_id)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(video_id)
        .bind(&dto.link)
        .bind(&dto.description)
        .bind(caller.id)
        .execute(&mut *tx)
        .await;

        // The unique constraint on link is the authoritative duplicate guard;
        // the earlier existence check only gives a friendlier fast path
        if let Err(e) = insert {
            if is_unique_violation(&e) {
                return Err(AppError::Validation(
                    "This video link has already been submitted".to_string(),
                ));
            }
            tracing::error!("Failed to insert video: {:?}", e);
            return Err(AppError::Database(e));
        }

        for category_id in &category_ids {
            sqlx::query(
                r#"INSERT INTO video_categories (video_id, category_id) VALUES ($1, $2)"#,
            )
            .bind(video_id)
            .bind(category_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to attach category: {:?}", e);
                AppError::Database(e)
            })?;
        }

        tx.commit().await?;

        tracing::info!("Video {} submitted by {}", video_id, caller.username);

        let row = self.fetch_with_author(video_id).await?;
        let categories = self.get_video_categories(video_id).await?;
        Ok(VideoResponseDto::from_row(row, categories))
    }

    /// Edit a submission; only the owner or staff may do this
    pub async fn update(
        &self,
        caller: &AuthenticatedUser,
        id: Uuid,
        dto: UpdateVideoDto,
    ) -> Result<VideoResponseDto> {
        let video = self.fetch_video(id).await?;

        if video.user_id != caller.id && !caller.is_staff {
            return Err(AppError::Forbidden(
                "You may only edit your own submissions".to_string(),
            ));
        }

        let link = match dto.link {
            Some(link) if link != video.link => {
                self.validate_link(&link, Some(id)).await?;
                link
            }
            Some(link) => link,
            None => video.link,
        };

        let description = dto.description.unwrap_or(video.description);

        let category_ids = match dto.categories {
            Some(ids) => {
                let ids = self.normalize_categories(ids)?;
                self.ensure_categories_exist(&ids).await?;
                Some(ids)
            }
            None => None,
        };

        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE videos
            SET link = $1, description = $2
            WHERE id = $3
            "#,
        )
        .bind(&link)
        .bind(&description)
        .bind(id)
        .execute(&mut *tx)
        .await;

        if let Err(e) = updated {
            if is_unique_violation(&e) {
                return Err(AppError::Validation(
                    "This video link has already been submitted".to_string(),
                ));
            }
            tracing::error!("Failed to update video: {:?}", e);
            return Err(AppError::Database(e));
        }

        if let Some(ids) = category_ids {
            sqlx::query(r#"DELETE FROM video_categories WHERE video_id = $1"#)
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;

            for category_id in &ids {
                sqlx::query(
                    r#"INSERT INTO video_categories (video_id, category_id) VALUES ($1, $2)"#,
                )
                .bind(id)
                .bind(category_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
            }
        }

        tx.commit().await?;

        let row = self.fetch_with_author(id).await?;
        let categories = self.get_video_categories(id).await?;
        Ok(VideoResponseDto::from_row(row, categories))
    }

    /// Delete a submission; only the owner or staff may do this
    pub async fn delete(&self, caller: &AuthenticatedUser, id: Uuid) -> Result<()> {
        let video = self.fetch_video(id).await?;

        if video.user_id != caller.id && !caller.is_staff {
            return Err(AppError::Forbidden(
                "You may only delete your own submissions".to_string(),
            ));
        }

        sqlx::query(r#"DELETE FROM videos WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete video: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Video {} deleted by {}", id, caller.username);

        Ok(())
    }

    /// Set the moderation status (staff only, guarded at the handler)
    pub async fn set_status(&self, id: Uuid, status: ModerationStatus) -> Result<VideoResponseDto> {
        let result = sqlx::query(r#"UPDATE videos SET status = $1 WHERE id = $2"#)
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to set video status: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Video not found".to_string()));
        }

        tracing::info!("Video {} moderation status set to {:?}", id, status);

        let row = self.fetch_with_author(id).await?;
        let categories = self.get_video_categories(id).await?;
        Ok(VideoResponseDto::from_row(row, categories))
    }

    /// Videos the caller has liked, most recently liked first
    pub async fn liked_videos(&self, user_id: Uuid) -> Result<Vec<VideoResponseDto>> {
        let rows = sqlx::query_as::<_, VideoWithAuthor>(
            r#"
            SELECT v.id, v.link, v.description, v.user_id, v.status, v.like_count, v.created_at,
                   u.username AS submitted_by
            FROM videos v
            JOIN users u ON u.id = v.user_id
            JOIN likes lk ON lk.video_id = v.id
            WHERE lk.user_id = $1
            ORDER BY lk.created_at DESC, lk.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list liked videos: {:?}", e);
            AppError::Database(e)
        })?;

        self.attach_categories(rows).await
    }

    /// The caller's own submissions, newest first
    pub async fn user_videos(&self, user_id: Uuid) -> Result<Vec<VideoResponseDto>> {
        let rows = sqlx::query_as::<_, VideoWithAuthor>(
            r#"
            SELECT v.id, v.link, v.description, v.user_id, v.status, v.like_count, v.created_at,
                   u.username AS submitted_by
            FROM videos v
            JOIN users u ON u.id = v.user_id
            WHERE v.user_id = $1
            ORDER BY v.created_at DESC, v.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list user videos: {:?}", e);
            AppError::Database(e)
        })?;

        self.attach_categories(rows).await
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn normalize_categories(&self, ids: Vec<Uuid>) -> Result<Vec<Uuid>> {
        let mut unique = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }

        if unique.is_empty() {
            return Err(AppError::Validation(
                "A video must have at least one category".to_string(),
            ));
        }
        if unique.len() > MAX_CATEGORIES_PER_VIDEO {
            return Err(AppError::Validation(format!(
                "A video can only have up to {} categories",
                MAX_CATEGORIES_PER_VIDEO
            )));
        }

        Ok(unique)
    }

    async fn validate_link(&self, link: &str, exclude_video: Option<Uuid>) -> Result<()> {
        if !YOUTUBE_LINK_REGEX.is_match(link) {
            return Err(AppError::Validation(
                "This is not a valid YouTube link".to_string(),
            ));
        }

        let duplicate = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM videos WHERE link = $1 AND id IS DISTINCT FROM $2)"#,
        )
        .bind(link)
        .bind(exclude_video)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check link uniqueness: {:?}", e);
            AppError::Database(e)
        })?;

        if duplicate {
            return Err(AppError::Validation(
                "This video link has already been submitted".to_string(),
            ));
        }

        Ok(())
    }

    async fn ensure_categories_exist(&self, ids: &[Uuid]) -> Result<()> {
        let found = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM categories WHERE id = ANY($1)"#,
        )
        .bind(ids)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check categories: {:?}", e);
            AppError::Database(e)
        })?;

        if found != ids.len() as i64 {
            return Err(AppError::Validation(
                "One or more categories do not exist".to_string(),
            ));
        }

        Ok(())
    }

    async fn fetch_video(&self, id: Uuid) -> Result<Video> {
        sqlx::query_as::<_, Video>(
            r#"
            SELECT id, link, description, user_id, status, like_count, created_at
            FROM videos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load video: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))
    }

    async fn fetch_with_author(&self, id: Uuid) -> Result<VideoWithAuthor> {
        let mut builder = QueryBuilder::new(SELECT_VIDEO_WITH_AUTHOR);
        builder.push(" WHERE v.id = ").push_bind(id);

        builder
            .build_query_as::<VideoWithAuthor>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load video: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))
    }

    async fn get_video_categories(&self, video_id: Uuid) -> Result<Vec<CategoryResponseDto>> {
        let categories = sqlx::query_as::<_, crate::features::categories::models::Category>(
            r#"
            SELECT c.id, c.name
            FROM video_categories vc
            JOIN categories c ON c.id = vc.category_id
            WHERE vc.video_id = $1
            ORDER BY c.name
            "#,
        )
        .bind(video_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load video categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    async fn attach_categories(
        &self,
        rows: Vec<VideoWithAuthor>,
    ) -> Result<Vec<VideoResponseDto>> {
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let categories = self.get_video_categories(row.id).await?;
            items.push(VideoResponseDto::from_row(row, categories));
        }
        Ok(items)
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}
