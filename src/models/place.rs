//! Place, category and coordinate types shared by every search mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed set of categories a user can ask for.
///
/// Declaration order is the canonical category order: top picks and
/// rebalancing quotas are processed in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Food,
    Cafe,
    Culture,
    Photo,
    Shopping,
    Healing,
    Experience,
    Night,
    Stay,
}

impl Category {
    /// All categories in canonical order
    pub fn all() -> &'static [Category] {
        &[
            Category::Food,
            Category::Cafe,
            Category::Culture,
            Category::Photo,
            Category::Shopping,
            Category::Healing,
            Category::Experience,
            Category::Night,
            Category::Stay,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "FOOD",
            Category::Cafe => "CAFE",
            Category::Culture => "CULTURE",
            Category::Photo => "PHOTO",
            Category::Shopping => "SHOPPING",
            Category::Healing => "HEALING",
            Category::Experience => "EXPERIENCE",
            Category::Night => "NIGHT",
            Category::Stay => "STAY",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseCategoryError(wanted.to_string()))
    }
}

/// WGS-84 coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Simple polygon ring.
///
/// The ring is not required to be closed; the last vertex is implicitly
/// connected back to the first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
    vertices: Vec<GeoPoint>,
}

impl Polygon {
    pub fn new(vertices: Vec<GeoPoint>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl From<Vec<GeoPoint>> for Polygon {
    fn from(vertices: Vec<GeoPoint>) -> Self {
        Self::new(vertices)
    }
}

/// A point of interest returned by the place-search provider.
///
/// `id` is the provider-assigned identity; every list that crosses a merge
/// boundary holds at most one place per id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub lat: f64,
    pub lng: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl Place {
    /// Create a place with the required fields only
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        lat: f64,
        lng: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            lat,
            lng,
            distance_meters: None,
            address: None,
            rating: None,
        }
    }

    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}
