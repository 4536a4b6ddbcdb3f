pub mod like_service;
pub mod video_service;
pub mod visibility;

pub use like_service::LikeService;
pub use video_service::VideoService;
pub use visibility::VisibilityFilter;
