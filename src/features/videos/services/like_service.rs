use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::videos::models::{Like, ModerationStatus};
use crate::features::videos::services::VisibilityFilter;

/// Service for the like ledger.
///
/// The ledger (likes table) is the authoritative record; the denormalized
/// `like_count` on videos is maintained in the same transaction as every
/// ledger change so the two can never diverge under concurrent calls.
pub struct LikeService {
    pool: PgPool,
}

impl LikeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a like; fails if the caller already liked this video
    pub async fn like(&self, caller: &AuthenticatedUser, video_id: Uuid) -> Result<()> {
        let (status, owner_id) = self.fetch_video_status(video_id).await?;
        if !VisibilityFilter::can_view(Some(caller), status, owner_id) {
            return Err(AppError::NotFound("Video not found".to_string()));
        }

        let mut tx = self.pool.begin().await?;

        // The unique constraint on (user_id, video_id) is the authoritative
        // duplicate guard; ON CONFLICT turns the race into an empty result
        let inserted = sqlx::query_as::<_, Like>(
            r#"
            INSERT INTO likes (id, user_id, video_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, video_id) DO NOTHING
            RETURNING id, user_id, video_id, created_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(caller.id)
        .bind(video_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert like: {:?}", e);
            AppError::Database(e)
        })?;

        let Some(like) = inserted else {
            return Err(AppError::AlreadyLiked);
        };
        tracing::debug!(
            "Like {} recorded by {} on video {}",
            like.id,
            caller.username,
            video_id
        );

        sqlx::query(r#"UPDATE videos SET like_count = like_count + 1 WHERE id = $1"#)
            .bind(video_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to increment like count: {:?}", e);
                AppError::Database(e)
            })?;

        tx.commit().await?;

        Ok(())
    }

    /// Remove a like; fails if the caller has not liked this video
    pub async fn unlike(&self, caller: &AuthenticatedUser, video_id: Uuid) -> Result<()> {
        // Distinguish "no such video" from "not liked"
        self.fetch_video_status(video_id).await?;

        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query(r#"DELETE FROM likes WHERE user_id = $1 AND video_id = $2"#)
            .bind(caller.id)
            .bind(video_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete like: {:?}", e);
                AppError::Database(e)
            })?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotLiked);
        }

        // Guarded decrement: the counter must never go negative. Affecting
        // zero rows here means the counter and ledger already disagreed.
        let decremented = sqlx::query(
            r#"UPDATE videos SET like_count = like_count - 1 WHERE id = $1 AND like_count > 0"#,
        )
        .bind(video_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to decrement like count: {:?}", e);
            AppError::Database(e)
        })?;

        if decremented.rows_affected() == 0 {
            return Err(AppError::Internal(format!(
                "Like counter for video {} is out of sync with the ledger",
                video_id
            )));
        }

        tx.commit().await?;

        Ok(())
    }

    /// Rewrite drifted counters from the ledger; returns the number of
    /// repaired videos
    pub async fn reconcile_like_counts(&self) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE videos v
            SET like_count = sub.actual
            FROM (
                SELECT v2.id, COALESCE(COUNT(lk.id), 0)::int AS actual
                FROM videos v2
                LEFT JOIN likes lk ON lk.video_id = v2.id
                GROUP BY v2.id
            ) sub
            WHERE sub.id = v.id AND v.like_count <> sub.actual
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to reconcile like counts: {:?}", e);
            AppError::Database(e)
        })?;

        let repaired = result.rows_affected();
        if repaired > 0 {
            tracing::warn!("Reconciled like counters on {} videos", repaired);
        }

        Ok(repaired)
    }

    async fn fetch_video_status(&self, video_id: Uuid) -> Result<(ModerationStatus, Uuid)> {
        sqlx::query_as::<_, (ModerationStatus, Uuid)>(
            r#"SELECT status, user_id FROM videos WHERE id = $1"#,
        )
        .bind(video_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load video: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))
    }
}
