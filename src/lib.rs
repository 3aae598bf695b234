//! Tripscout - travel place recommendations over a place-search provider
//!
//! This library provides the search strategies, geometry helpers and
//! ranking passes used by the `recommend` binary.

pub mod config;
pub mod kakao;
pub mod models;
pub mod pip;
pub mod provider;
pub mod regions;
pub mod search;

pub use models::{Category, Filter, GeoPoint, Place, Polygon, RecommendationResult, Weather};
pub use search::{SearchOrchestrator, SearchRequest};
