pub mod video_handler;

pub use video_handler::*;
