//! Interfaces to the external services the engine depends on.
//!
//! The engine only talks to these traits; concrete HTTP clients live in
//! their own modules (see [`crate::kakao`]).

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Category, Filter, GeoPoint, Place, Weather};

/// Errors raised by external collaborators
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed provider response: {0}")]
    Decode(String),

    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("missing API key for {0}")]
    MissingApiKey(String),

    #[error("timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("{0}")]
    Other(String),
}

/// Place-search backend: turns text into coordinates and finds places
/// around a coordinate.
#[async_trait]
pub trait CandidateProvider: Send + Sync {
    /// Resolve a region or address to a single center. `Ok(None)` when
    /// the provider knows nothing about the text.
    async fn geocode(&self, text: &str) -> Result<Option<GeoPoint>, ProviderError>;

    /// Places of the given categories within `radius_meters` of `center`,
    /// at most `max_results` per provider page.
    async fn search_by_categories(
        &self,
        center: GeoPoint,
        categories: &BTreeSet<Category>,
        radius_meters: u32,
        max_results: u32,
    ) -> Result<Vec<Place>, ProviderError>;
}

/// Output of an AI re-ranking pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RerankOutput {
    pub places: Vec<Place>,
    pub reasons: BTreeMap<String, String>,
    pub ai_top_ids: BTreeSet<String>,
}

impl RerankOutput {
    /// The fallback used whenever reranking is skipped or fails
    pub fn passthrough(places: Vec<Place>) -> Self {
        Self {
            places,
            ..Self::default()
        }
    }
}

/// Optional re-ordering of candidates with per-place reasons
#[async_trait]
pub trait Reranker: Send + Sync {
    async fn rerank(
        &self,
        filter: &Filter,
        weather: Option<&Weather>,
        candidates: &[Place],
    ) -> Result<RerankOutput, ProviderError>;
}

/// Current weather lookup
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, at: GeoPoint) -> Result<Weather, ProviderError>;
}
