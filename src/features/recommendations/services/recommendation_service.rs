use std::collections::HashSet;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::categories::models::Category;
use crate::features::recommendations::dtos::RecommendationsDto;
use crate::features::videos::dtos::VideoResponseDto;
use crate::features::videos::models::{ModerationStatus, VideoWithAuthor};
use crate::shared::constants::{RECENT_LIKES_WINDOW, RECOMMENDATION_LIMIT};

/// Service for category-based video recommendations
pub struct RecommendationService {
    pool: PgPool,
}

impl RecommendationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Recommend up to 5 approved videos from the caller's favorite category,
    /// excluding everything they have ever liked
    pub async fn recommend(&self, user_id: Uuid) -> Result<RecommendationsDto> {
        let recent_categories = self.load_recent_like_categories(user_id).await?;

        let favorite =
            favorite_category(&recent_categories).ok_or(AppError::NoFavoriteCategory)?;

        let liked = self.load_liked_video_ids(user_id).await?;
        let candidates = self.load_candidates(&favorite).await?;

        let ranked = rank_candidates(candidates, &liked, RECOMMENDATION_LIMIT);

        let mut videos = Vec::with_capacity(ranked.len());
        for row in ranked {
            let categories = self.get_video_categories(row.id).await?;
            videos.push(VideoResponseDto::from_row(row, categories));
        }

        Ok(RecommendationsDto {
            favorite_category: favorite,
            videos,
        })
    }

    /// Category names of the caller's most recent likes, flattened into a
    /// multiset: most recent like first, categories in attachment order
    async fn load_recent_like_categories(&self, user_id: Uuid) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT c.name
            FROM (
                SELECT id, video_id, created_at
                FROM likes
                WHERE user_id = $1
                ORDER BY created_at DESC, id DESC
                LIMIT $2
            ) recent
            JOIN video_categories vc ON vc.video_id = recent.video_id
            JOIN categories c ON c.id = vc.category_id
            ORDER BY recent.created_at DESC, recent.id DESC, c.id
            "#,
        )
        .bind(user_id)
        .bind(RECENT_LIKES_WINDOW)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load recent like categories: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Every video the user has ever liked, not just the recent sample
    async fn load_liked_video_ids(&self, user_id: Uuid) -> Result<HashSet<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"SELECT video_id FROM likes WHERE user_id = $1"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load liked video ids: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(ids.into_iter().collect())
    }

    /// Approved videos carrying the favorite category (matched by name)
    async fn load_candidates(&self, category_name: &str) -> Result<Vec<VideoWithAuthor>> {
        sqlx::query_as::<_, VideoWithAuthor>(
            r#"
            SELECT v.id, v.link, v.description, v.user_id, v.status, v.like_count, v.created_at,
                   u.username AS submitted_by
            FROM videos v
            JOIN users u ON u.id = v.user_id
            WHERE v.status = $1
            AND EXISTS (
                SELECT 1
                FROM video_categories vc
                JOIN categories c ON c.id = vc.category_id
                WHERE vc.video_id = v.id AND c.name = $2
            )
            "#,
        )
        .bind(ModerationStatus::Approved)
        .bind(category_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load candidate videos: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn get_video_categories(&self, video_id: Uuid) -> Result<Vec<CategoryResponseDto>> {
        let categories = sqlx::query_as::<_, Category>(
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
}

/// Most frequent category name in the multiset; ties break by
/// first-encountered order, so the result is stable for a given like history.
/// `None` when the user has no likes at all.
pub fn favorite_category(recent_categories: &[String]) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for name in recent_categories {
        match counts.iter_mut().find(|(n, _)| *n == name.as_str()) {
            Some((_, count)) => *count += 1,
            None => counts.push((name, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (name, count) in counts {
        match best {
            // Strictly greater keeps the first-encountered winner on ties
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((name, count)),
        }
    }

    best.map(|(name, _)| name.to_string())
}

/// Drop every video the user has liked, rank the rest by like count
/// descending (ties by id ascending) and keep the top `limit`
pub fn rank_candidates(
    candidates: Vec<VideoWithAuthor>,
    liked: &HashSet<Uuid>,
    limit: usize,
) -> Vec<VideoWithAuthor> {
    let mut unseen: Vec<VideoWithAuthor> = candidates
        .into_iter()
        .filter(|v| !liked.contains(&v.id))
        .collect();

    unseen.sort_by(|a, b| {
        b.like_count
            .cmp(&a.like_count)
            .then_with(|| a.id.cmp(&b.id))
    });
    unseen.truncate(limit);
    unseen
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn make_video(id: u128, like_count: i32) -> VideoWithAuthor {
        VideoWithAuthor {
            id: Uuid::from_u128(id),
            link: format!("https://youtube.com/watch?v=video{}", id),
            description: String::new(),
            user_id: Uuid::from_u128(9999),
            status: ModerationStatus::Approved,
            like_count,
            created_at: Utc::now(),
            submitted_by: "uploader".to_string(),
        }
    }

    #[test]
    fn test_favorite_category_empty() {
        assert_eq!(favorite_category(&[]), None);
    }

    #[test]
    fn test_favorite_category_majority_wins() {
        // Likes: V1 (Science), V2 (Science), V3 (Art)
        let favorite = favorite_category(&names(&["Science", "Science", "Art"]));
        assert_eq!(favorite.as_deref(), Some("Science"));
    }

    #[test]
    fn test_favorite_category_tie_breaks_by_first_encountered() {
        let favorite = favorite_category(&names(&["Art", "Science", "Art", "Science"]));
        assert_eq!(favorite.as_deref(), Some("Art"));
    }

    #[test]
    fn test_favorite_category_single_like_multiple_categories() {
        let favorite = favorite_category(&names(&["Music", "Comedy"]));
        assert_eq!(favorite.as_deref(), Some("Music"));
    }

    #[test]
    fn test_rank_excludes_liked_videos() {
        let liked: HashSet<Uuid> = [Uuid::from_u128(1), Uuid::from_u128(2)].into();
        let candidates = vec![make_video(1, 50), make_video(2, 40), make_video(3, 10)];

        let ranked = rank_candidates(candidates, &liked, 5);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id, Uuid::from_u128(3));
    }

    #[test]
    fn test_rank_orders_by_like_count_descending() {
        let candidates = vec![make_video(1, 3), make_video(2, 10), make_video(3, 7)];

        let ranked = rank_candidates(candidates, &HashSet::new(), 5);

        let counts: Vec<i32> = ranked.iter().map(|v| v.like_count).collect();
        assert_eq!(counts, vec![10, 7, 3]);
    }

    #[test]
    fn test_rank_tie_breaks_by_id_ascending() {
        let candidates = vec![make_video(7, 5), make_video(3, 5), make_video(5, 5)];

        let ranked = rank_candidates(candidates, &HashSet::new(), 5);

        let ids: Vec<Uuid> = ranked.iter().map(|v| v.id).collect();
        assert_eq!(
            ids,
            vec![Uuid::from_u128(3), Uuid::from_u128(5), Uuid::from_u128(7)]
        );
    }

    #[test]
    fn test_rank_truncates_to_limit() {
        let candidates = (1..=8).map(|i| make_video(i, i as i32)).collect();

        let ranked = rank_candidates(candidates, &HashSet::new(), 5);

        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0].like_count, 8);
        assert_eq!(ranked[4].like_count, 4);
    }
}
