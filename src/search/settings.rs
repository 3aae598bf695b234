//! Tunables for the search strategies.

use serde::Deserialize;
use std::time::Duration;

use super::RebalanceOptions;

/// Largest radius the place-search provider accepts
pub const PROVIDER_MAX_RADIUS_METERS: u32 = 20_000;

/// Largest page the place-search provider returns per call
pub const PROVIDER_MAX_PAGE_SIZE: u32 = 15;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Region searched when the query is blank or cannot be geocoded
    pub default_region: String,

    pub narrow_radius_meters: u32,
    pub narrow_page_size: u32,

    /// Per sub-region
    pub wide_radius_meters: u32,
    pub wide_page_size: u32,

    /// Grid step in degrees (0.05° is roughly 5 km)
    pub grid_spacing_degrees: f64,
    pub max_grid_points: usize,
    /// Per grid point
    pub polygon_radius_meters: u32,
    pub polygon_page_size: u32,

    pub expand_page_size: u32,

    pub min_per_category: usize,
    pub top_per_category: usize,
    pub total_cap: Option<usize>,

    /// `None` waits for the reranker indefinitely
    pub rerank_timeout_secs: Option<u64>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_region: "서울".to_string(),
            narrow_radius_meters: 3_000,
            narrow_page_size: 15,
            wide_radius_meters: 3_000,
            wide_page_size: 5,
            grid_spacing_degrees: 0.05,
            max_grid_points: 50,
            polygon_radius_meters: 3_000,
            polygon_page_size: 15,
            expand_page_size: 15,
            min_per_category: 4,
            top_per_category: 1,
            total_cap: None,
            rerank_timeout_secs: Some(30),
        }
    }
}

impl SearchSettings {
    /// Bound a radius to what the provider accepts
    pub fn clamp_radius(radius_meters: u32) -> u32 {
        radius_meters.clamp(1, PROVIDER_MAX_RADIUS_METERS)
    }

    /// Bound a page size to what the provider accepts
    pub fn clamp_page_size(size: u32) -> u32 {
        size.clamp(1, PROVIDER_MAX_PAGE_SIZE)
    }

    pub fn rebalance_options(&self) -> RebalanceOptions {
        RebalanceOptions {
            min_per_category: self.min_per_category,
            top_per_category: self.top_per_category,
            total_cap: self.total_cap,
        }
    }

    pub fn rerank_timeout(&self) -> Option<Duration> {
        self.rerank_timeout_secs.map(Duration::from_secs)
    }
}
