use uuid::Uuid;

use crate::features::auth::model::AuthenticatedUser;
use crate::features::videos::dtos::VideoListQuery;
use crate::features::videos::models::ModerationStatus;

/// Effective listing filter for a given caller.
///
/// Non-staff callers (including anonymous ones) are always pinned to
/// approved videos regardless of what they asked for; staff get exactly the
/// filter they supplied, or no status restriction at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityFilter {
    pub status: Option<ModerationStatus>,
    pub category_1: Option<Uuid>,
    pub category_2: Option<Uuid>,
}

impl VisibilityFilter {
    pub fn for_caller(caller: Option<&AuthenticatedUser>, query: &VideoListQuery) -> Self {
        let is_staff = caller.map(|u| u.is_staff).unwrap_or(false);

        let status = if is_staff {
            query.status
        } else {
            Some(ModerationStatus::Approved)
        };

        Self {
            status,
            category_1: query.category_1,
            category_2: query.category_2,
        }
    }

    /// Whether a single video may be shown to the caller
    pub fn can_view(
        caller: Option<&AuthenticatedUser>,
        status: ModerationStatus,
        owner_id: Uuid,
    ) -> bool {
        if status == ModerationStatus::Approved {
            return true;
        }
        match caller {
            Some(user) => user.is_staff || user.id == owner_id,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{create_regular_user, create_staff_user};

    #[test]
    fn test_non_staff_is_pinned_to_approved() {
        let user = create_regular_user();
        let query = VideoListQuery {
            status: Some(ModerationStatus::Pending),
            ..Default::default()
        };

        let filter = VisibilityFilter::for_caller(Some(&user), &query);
        assert_eq!(filter.status, Some(ModerationStatus::Approved));
    }

    #[test]
    fn test_anonymous_is_pinned_to_approved() {
        let filter = VisibilityFilter::for_caller(None, &VideoListQuery::default());
        assert_eq!(filter.status, Some(ModerationStatus::Approved));
    }

    #[test]
    fn test_staff_filter_passes_through() {
        let staff = create_staff_user();

        let unfiltered =
            VisibilityFilter::for_caller(Some(&staff), &VideoListQuery::default());
        assert_eq!(unfiltered.status, None);

        let denied_only = VisibilityFilter::for_caller(
            Some(&staff),
            &VideoListQuery {
                status: Some(ModerationStatus::Denied),
                ..Default::default()
            },
        );
        assert_eq!(denied_only.status, Some(ModerationStatus::Denied));
    }

    #[test]
    fn test_category_filters_are_carried() {
        let c1 = Uuid::now_v7();
        let c2 = Uuid::now_v7();
        let query = VideoListQuery {
            category_1: Some(c1),
            category_2: Some(c2),
            status: None,
        };

        let filter = VisibilityFilter::for_caller(None, &query);
        assert_eq!(filter.category_1, Some(c1));
        assert_eq!(filter.category_2, Some(c2));
    }

    #[test]
    fn test_can_view_approved_for_everyone() {
        let owner = Uuid::now_v7();
        assert!(VisibilityFilter::can_view(
            None,
            ModerationStatus::Approved,
            owner
        ));
    }

    #[test]
    fn test_can_view_pending_only_for_staff_or_owner() {
        let user = create_regular_user();
        let staff = create_staff_user();

        assert!(!VisibilityFilter::can_view(
            None,
            ModerationStatus::Pending,
            user.id
        ));
        assert!(!VisibilityFilter::can_view(
            Some(&user),
            ModerationStatus::Pending,
            Uuid::now_v7()
        ));
        assert!(VisibilityFilter::can_view(
            Some(&user),
            ModerationStatus::Pending,
            user.id
        ));
        assert!(VisibilityFilter::can_view(
            Some(&staff),
            ModerationStatus::Denied,
            Uuid::now_v7()
        ));
    }
}
