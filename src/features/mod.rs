pub mod auth;
pub mod categories;
pub mod recommendations;
pub mod users;
pub mod videos;
