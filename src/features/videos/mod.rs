//! Video submission, listing and moderation feature.
//!
//! Carries the visibility rules (who may see which submissions), the like
//! ledger with its denormalized counter, and the staff moderation controls.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{LikeService, VideoService};
