//! HTTP client for the Kakao Local API.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::codes::{category_for_code, codes_for};
use crate::models::{Category, GeoPoint, Place};
use crate::provider::{CandidateProvider, ProviderError};
use crate::search::merge;

pub const DEFAULT_BASE_URL: &str = "https://dapi.kakao.com/";

const ADDRESS_PATH: &str = "v2/local/search/address.json";
const CATEGORY_PATH: &str = "v2/local/search/category.json";

/// Kakao Local client. Authenticates every request with `KakaoAK <key>`.
#[derive(Clone)]
pub struct KakaoClient {
    client: Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct AddressResponse {
    #[serde(default)]
    documents: Vec<AddressDoc>,
}

/// Kakao uses x = longitude, y = latitude, both as strings
#[derive(Debug, Deserialize)]
struct AddressDoc {
    x: String,
    y: String,
}

#[derive(Debug, Deserialize)]
struct PlaceResponse {
    #[serde(default)]
    documents: Vec<PlaceDoc>,
}

#[derive(Debug, Deserialize)]
struct PlaceDoc {
    id: String,
    place_name: String,
    category_group_code: Option<String>,
    x: String,
    y: String,
    address_name: Option<String>,
    /// Meters from the query center, as a string (empty without a center)
    distance: Option<String>,
}

impl PlaceDoc {
    fn into_place(self) -> Option<Place> {
        let lat = self.y.parse::<f64>().ok()?;
        let lng = self.x.parse::<f64>().ok()?;
        let category = category_for_code(self.category_group_code.as_deref());

        Some(Place {
            id: self.id,
            name: self.place_name,
            category,
            lat,
            lng,
            distance_meters: self.distance.and_then(|d| d.parse().ok()),
            address: self.address_name.filter(|a| !a.is_empty()),
            rating: None,
        })
    }
}

impl KakaoClient {
    /// Create a client against `base_url` (normally [`DEFAULT_BASE_URL`])
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, ProviderError> {
        if api_key.trim().is_empty() {
            return Err(ProviderError::MissingApiKey("KakaoAK".to_string()));
        }

        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;

        let mut auth = HeaderValue::from_str(&format!("KakaoAK {api_key}"))
            .map_err(|e| ProviderError::Other(format!("invalid API key: {e}")))?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, base_url })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ProviderError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Kakao request failed with status {}: {}", status, body);
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }

    /// One category-code page around a center, sorted by distance
    async fn search_code(
        &self,
        code: &str,
        center: GeoPoint,
        radius_meters: u32,
        size: u32,
    ) -> Result<Vec<Place>, ProviderError> {
        let mut url = self.base_url.join(CATEGORY_PATH)?;
        url.query_pairs_mut()
            .append_pair("category_group_code", code)
            .append_pair("x", &center.lng.to_string())
            .append_pair("y", &center.lat.to_string())
            .append_pair("radius", &radius_meters.to_string())
            .append_pair("size", &size.to_string())
            .append_pair("sort", "distance");

        let response: PlaceResponse = self.get_json(url).await?;
        Ok(response
            .documents
            .into_iter()
            .filter_map(PlaceDoc::into_place)
            .collect())
    }
}

#[async_trait]
impl CandidateProvider for KakaoClient {
    async fn geocode(&self, text: &str) -> Result<Option<GeoPoint>, ProviderError> {
        let mut url = self.base_url.join(ADDRESS_PATH)?;
        url.query_pairs_mut().append_pair("query", text);

        let response: AddressResponse = self.get_json(url).await?;
        let point = response.documents.into_iter().next().and_then(|doc| {
            let lat = doc.y.parse::<f64>().ok()?;
            let lng = doc.x.parse::<f64>().ok()?;
            Some(GeoPoint::new(lat, lng))
        });

        debug!("Geocoded '{}' -> {:?}", text, point);
        Ok(point)
    }

    /// Queries each distinct group code in turn, keeps the first place seen
    /// per id, then orders by distance (unknown distance last).
    async fn search_by_categories(
        &self,
        center: GeoPoint,
        categories: &BTreeSet<Category>,
        radius_meters: u32,
        max_results: u32,
    ) -> Result<Vec<Place>, ProviderError> {
        let codes = codes_for(categories);
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let mut batches = Vec::with_capacity(codes.len());
        for code in codes {
            batches.push(
                self.search_code(code, center, radius_meters, max_results)
                    .await?,
            );
        }

        let mut places = merge(batches);
        places.sort_by_key(|p| p.distance_meters.unwrap_or(u32::MAX));
        Ok(places)
    }
}
