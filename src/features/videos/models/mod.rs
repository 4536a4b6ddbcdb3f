mod like;
mod video;

pub use like::Like;
pub use video::{ModerationStatus, Video, VideoWithAuthor};
