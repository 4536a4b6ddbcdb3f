//! Video recommendation feature.
//!
//! Derives the caller's favorite category from their most recent likes and
//! ranks videos they have not seen within it. Selection is a pure
//! computation over already-loaded rows.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::RecommendationService;
