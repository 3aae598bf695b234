//! Top-level recommendation flow.
//!
//! A request is served by exactly one strategy:
//! - NARROW: geocode the region once and search around that center.
//! - WIDE: geocode each catalog sub-region and search around all of them
//!   concurrently.
//! - Polygon: search around grid points sampled inside a drawn area, then
//!   keep only places that fall inside the area itself.
//!
//! Every strategy ends in the same tail: optional rerank, then category
//! rebalancing. No collaborator failure escapes; they all shrink the result.

use futures::FutureExt;
use hashbrown::{HashMap, HashSet};
use std::collections::BTreeSet;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{fetch_all, merge, rebalance, Rebalanced, SearchSettings};
use crate::models::{Category, Filter, GeoPoint, Place, Polygon, RecommendationResult, Weather};
use crate::pip::{centroid, generate_grid, point_in_polygon};
use crate::provider::{CandidateProvider, ProviderError, RerankOutput, Reranker, WeatherProvider};
use crate::regions::{classify, sub_regions_of, SearchType};

/// One recommendation request
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub filter: Filter,
    /// Search inside this area instead of resolving `filter.region`
    pub polygon: Option<Polygon>,
    /// Ask the reranker (when one is configured) to reorder candidates
    pub use_ai: bool,
}

impl SearchRequest {
    pub fn region(filter: Filter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn polygon(filter: Filter, polygon: Polygon) -> Self {
        Self {
            filter,
            polygon: Some(polygon),
            use_ai: false,
        }
    }

    pub fn with_ai(mut self, use_ai: bool) -> Self {
        self.use_ai = use_ai;
        self
    }
}

pub struct SearchOrchestrator {
    provider: Arc<dyn CandidateProvider>,
    reranker: Option<Arc<dyn Reranker>>,
    weather: Option<Arc<dyn WeatherProvider>>,
    settings: SearchSettings,
}

impl SearchOrchestrator {
    pub fn new(provider: Arc<dyn CandidateProvider>, settings: SearchSettings) -> Self {
        Self {
            provider,
            reranker: None,
            weather: None,
            settings,
        }
    }

    pub fn with_reranker(mut self, reranker: Arc<dyn Reranker>) -> Self {
        self.reranker = Some(reranker);
        self
    }

    pub fn with_weather(mut self, weather: Arc<dyn WeatherProvider>) -> Self {
        self.weather = Some(weather);
        self
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Pick a strategy for the request and run it to a final result
    pub async fn recommend(&self, request: &SearchRequest) -> RecommendationResult {
        let categories = request.filter.effective_categories();
        let mut filter = request.filter.clone();
        filter.categories = categories.clone();

        if let Some(polygon) = &request.polygon {
            info!(
                "Polygon search: {} vertices, categories {:?}",
                polygon.len(),
                categories
            );
            let weather = match centroid(polygon) {
                Some(center) => self.weather_at(center).await,
                None => None,
            };
            let candidates = self.search_polygon(polygon, &categories).await;
            return self.finish(&filter, weather, candidates, request.use_ai).await;
        }

        let region = match filter.region.trim() {
            "" => self.settings.default_region.clone(),
            region => region.to_string(),
        };
        filter.region = region.clone();

        let search_type = classify(&region);
        info!(
            "Region '{}' classified as {:?}, categories {:?}",
            region, search_type, categories
        );

        if search_type == SearchType::Wide {
            if let Some(sub_regions) = sub_regions_of(&region) {
                let weather = self.weather_for_region(&region).await;
                let candidates = self
                    .search_sub_regions(&region, sub_regions, &categories)
                    .await;
                return self.finish(&filter, weather, candidates, request.use_ai).await;
            }
            warn!("No sub-regions for '{}', falling back to NARROW", region);
        }

        let Some(center) = self.resolve_center(&region).await else {
            warn!("Could not resolve any center for '{}'", region);
            return RecommendationResult::empty(None);
        };
        let weather = self.weather_at(center).await;
        let candidates = self
            .search_around(
                center,
                &categories,
                self.settings.narrow_radius_meters,
                self.settings.narrow_page_size,
            )
            .await;
        self.finish(&filter, weather, candidates, request.use_ai).await
    }

    /// Single category search around one center. Radius and page size are
    /// capped at the provider limits.
    pub async fn search_around(
        &self,
        center: GeoPoint,
        categories: &BTreeSet<Category>,
        radius_meters: u32,
        page_size: u32,
    ) -> Vec<Place> {
        let radius = SearchSettings::clamp_radius(radius_meters);
        let size = SearchSettings::clamp_page_size(page_size);

        let fetch = self
            .provider
            .search_by_categories(center, categories, radius, size);
        let label = format!("center ({}, {})", center.lat, center.lng);
        let candidates = merge(fetch_all([(label, fetch)]).await);

        info!("Single-center search returned {} places", candidates.len());
        candidates
    }

    /// Search around every sub-region of `main_region` concurrently.
    ///
    /// Each sub-region is geocoded as "`main_region` `sub_region`"; one that
    /// cannot be geocoded contributes nothing without affecting the others.
    pub async fn search_sub_regions(
        &self,
        main_region: &str,
        sub_regions: &[&str],
        categories: &BTreeSet<Category>,
    ) -> Vec<Place> {
        let radius = SearchSettings::clamp_radius(self.settings.wide_radius_meters);
        let size = SearchSettings::clamp_page_size(self.settings.wide_page_size);

        let fetches = sub_regions.iter().map(|sub_region| {
            let query = format!("{main_region} {sub_region}");
            let label = format!("sub-region '{query}'");
            let fetch = async move {
                match self.provider.geocode(&query).await? {
                    Some(center) => {
                        debug!("{} -> ({}, {})", query, center.lat, center.lng);
                        self.provider
                            .search_by_categories(center, categories, radius, size)
                            .await
                    }
                    None => {
                        warn!("Geocode failed for '{}'", query);
                        Ok(Vec::new())
                    }
                }
            };
            (label, fetch)
        });

        let batches = fetch_all(fetches).await;
        let total: usize = batches.iter().map(Vec::len).sum();
        let candidates = merge(batches);

        info!(
            "Multi-center search over {} sub-regions: {} total, {} unique",
            sub_regions.len(),
            total,
            candidates.len()
        );
        candidates
    }

    /// Search a drawn area by sampling grid centers inside it.
    ///
    /// Only places whose own coordinates lie inside `polygon` are kept; the
    /// grid merely decides where to ask.
    pub async fn search_polygon(
        &self,
        polygon: &Polygon,
        categories: &BTreeSet<Category>,
    ) -> Vec<Place> {
        if polygon.len() < 3 {
            warn!("Polygon has {} vertices, nothing to search", polygon.len());
            return Vec::new();
        }

        let grid = generate_grid(
            polygon,
            self.settings.grid_spacing_degrees,
            self.settings.max_grid_points,
        );
        if grid.is_empty() {
            warn!("No grid points fall inside the polygon");
            return Vec::new();
        }

        let radius = SearchSettings::clamp_radius(self.settings.polygon_radius_meters);
        let size = SearchSettings::clamp_page_size(self.settings.polygon_page_size);

        let fetches = grid.iter().map(|point| {
            let label = format!("grid ({}, {})", point.lat, point.lng);
            let fetch = self
                .provider
                .search_by_categories(*point, categories, radius, size);
            (label, fetch)
        });

        let batches = fetch_all(fetches).await;
        let total: usize = batches.iter().map(Vec::len).sum();
        let unique = merge(batches);
        let unique_count = unique.len();
        let inside: Vec<Place> = unique
            .into_iter()
            .filter(|p| point_in_polygon(p.location(), polygon))
            .collect();

        info!(
            "Polygon search over {} grid points: {} total, {} unique, {} inside",
            grid.len(),
            total,
            unique_count,
            inside.len()
        );
        inside
    }

    /// Grow an earlier search to `new_radius_meters` without repeating the
    /// places already shown.
    pub async fn expand_search(
        &self,
        center: GeoPoint,
        categories: &BTreeSet<Category>,
        new_radius_meters: u32,
        exclude_ids: &BTreeSet<String>,
    ) -> Vec<Place> {
        let categories = if categories.is_empty() {
            BTreeSet::from([Category::Food])
        } else {
            categories.clone()
        };

        let found = self
            .search_around(
                center,
                &categories,
                new_radius_meters,
                self.settings.expand_page_size,
            )
            .await;
        let found_count = found.len();
        let fresh: Vec<Place> = found
            .into_iter()
            .filter(|p| !exclude_ids.contains(&p.id))
            .collect();

        info!(
            "Expanded search to {} m: {} found, {} new",
            new_radius_meters,
            found_count,
            fresh.len()
        );
        fresh
    }

    async fn geocode(&self, text: &str) -> Option<GeoPoint> {
        match self.provider.geocode(text).await {
            Ok(Some(center)) => Some(center),
            Ok(None) => {
                warn!("Geocode found nothing for '{}'", text);
                None
            }
            Err(e) => {
                warn!("Geocode failed for '{}': {}", text, e);
                None
            }
        }
    }

    /// Geocode the region, retrying with the default region on failure
    async fn resolve_center(&self, region: &str) -> Option<GeoPoint> {
        if let Some(center) = self.geocode(region).await {
            return Some(center);
        }

        let fallback = self.settings.default_region.as_str();
        if fallback == region {
            return None;
        }
        info!("Falling back to default region '{}'", fallback);
        self.geocode(fallback).await
    }

    async fn weather_for_region(&self, region: &str) -> Option<Weather> {
        self.weather.as_ref()?;
        let center = self.geocode(region).await?;
        self.weather_at(center).await
    }

    async fn weather_at(&self, at: GeoPoint) -> Option<Weather> {
        let provider = self.weather.as_ref()?;
        match provider.current(at).await {
            Ok(weather) => {
                debug!("Weather at ({}, {}): {:?}", at.lat, at.lng, weather);
                Some(weather)
            }
            Err(e) => {
                warn!("Weather lookup failed: {}", e);
                None
            }
        }
    }

    /// Shared tail of every strategy: optional rerank, then rebalance
    async fn finish(
        &self,
        filter: &Filter,
        weather: Option<Weather>,
        candidates: Vec<Place>,
        use_ai: bool,
    ) -> RecommendationResult {
        if candidates.is_empty() {
            warn!("No candidates found");
            return RecommendationResult::empty(weather);
        }

        let reranked = match (&self.reranker, use_ai) {
            (Some(reranker), true) => {
                self.rerank(reranker.as_ref(), filter, weather.as_ref(), candidates)
                    .await
            }
            _ => RerankOutput::passthrough(candidates),
        };

        let Rebalanced { top_picks, places } = rebalance(
            &reranked.places,
            &filter.categories,
            self.settings.rebalance_options(),
        );

        info!(
            "Recommendation ready: {} places, {} top picks",
            places.len(),
            top_picks.len()
        );

        RecommendationResult {
            places,
            top_picks,
            weather,
            gpt_reasons: reranked.reasons,
            ai_top_ids: reranked.ai_top_ids,
        }
    }

    /// Run the reranker; any failure, timeout, panic or malformed output
    /// keeps the incoming order with no reasons.
    async fn rerank(
        &self,
        reranker: &dyn Reranker,
        filter: &Filter,
        weather: Option<&Weather>,
        candidates: Vec<Place>,
    ) -> RerankOutput {
        let call = AssertUnwindSafe(reranker.rerank(filter, weather, &candidates)).catch_unwind();
        let outcome = match self.settings.rerank_timeout() {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(outcome) => outcome,
                Err(_) => Ok(Err(ProviderError::Timeout(limit))),
            },
            None => call.await,
        };
        let outcome =
            outcome.unwrap_or_else(|_| Err(ProviderError::Other("reranker panicked".to_string())));

        match outcome.and_then(|out| validate_rerank(&candidates, out)) {
            Ok(out) => {
                info!(
                    "Reranked {} candidates ({} reasons)",
                    out.places.len(),
                    out.reasons.len()
                );
                out
            }
            Err(e) => {
                warn!("Rerank failed, keeping provider order: {}", e);
                RerankOutput::passthrough(candidates)
            }
        }
    }
}

/// Map reranked places back onto the original candidates.
///
/// The reranker may drop candidates, but naming an unknown id, repeating an
/// id or returning nothing at all is treated as malformed output.
fn validate_rerank(candidates: &[Place], out: RerankOutput) -> Result<RerankOutput, ProviderError> {
    if out.places.is_empty() && !candidates.is_empty() {
        return Err(ProviderError::Decode(
            "reranker returned no places".to_string(),
        ));
    }

    let by_id: HashMap<&str, &Place> = candidates.iter().map(|p| (p.id.as_str(), p)).collect();
    let mut seen = HashSet::new();
    let mut places = Vec::with_capacity(out.places.len());

    for place in &out.places {
        let Some(original) = by_id.get(place.id.as_str()) else {
            return Err(ProviderError::Decode(format!(
                "reranker returned unknown place id {}",
                place.id
            )));
        };
        if !seen.insert(place.id.as_str()) {
            return Err(ProviderError::Decode(format!(
                "reranker repeated place id {}",
                place.id
            )));
        }
        places.push((*original).clone());
    }

    Ok(RerankOutput {
        places,
        reasons: out.reasons,
        ai_top_ids: out.ai_top_ids,
    })
}
