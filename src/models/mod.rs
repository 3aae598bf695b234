//! Core data models for the recommendation engine.

pub mod filter;
pub mod place;
pub mod result;

pub use filter::{Filter, Weather};
pub use place::{Category, GeoPoint, ParseCategoryError, Place, Polygon};
pub use result::RecommendationResult;
