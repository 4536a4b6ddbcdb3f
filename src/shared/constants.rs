/// Maximum number of categories a video may carry at submission time
pub const MAX_CATEGORIES_PER_VIDEO: usize = 2;

/// How many of the user's most recent likes feed the favorite-category vote
pub const RECENT_LIKES_WINDOW: i64 = 7;

/// Maximum number of videos returned by the recommender
pub const RECOMMENDATION_LIMIT: usize = 5;
