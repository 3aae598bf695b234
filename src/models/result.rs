//! Final output handed to the UI layer.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{Place, Weather};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    /// Final ordered list
    pub places: Vec<Place>,

    /// Highlighted places, grouped by category in canonical order
    pub top_picks: Vec<Place>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<Weather>,

    /// Place id → reranker's reason for the pick
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub gpt_reasons: BTreeMap<String, String>,

    /// Ids the reranker flagged as its best picks
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub ai_top_ids: BTreeSet<String>,
}

impl RecommendationResult {
    /// A result with no places, keeping whatever weather was resolved
    pub fn empty(weather: Option<Weather>) -> Self {
        Self {
            weather,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}
