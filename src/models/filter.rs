//! User-supplied search filter and the opaque weather passthrough.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::Category;

/// What the user asked for.
///
/// Only `region` and `categories` drive the search; the remaining fields are
/// handed to the reranker untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Free-text region, possibly blank
    #[serde(default)]
    pub region: String,

    /// Requested categories; empty means FOOD
    #[serde(default)]
    pub categories: BTreeSet<Category>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub companion: Option<String>,
}

impl Filter {
    pub fn new(region: impl Into<String>, categories: impl IntoIterator<Item = Category>) -> Self {
        Self {
            region: region.into(),
            categories: categories.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Categories to search, defaulting to FOOD when none were selected
    pub fn effective_categories(&self) -> BTreeSet<Category> {
        if self.categories.is_empty() {
            BTreeSet::from([Category::Food])
        } else {
            self.categories.clone()
        }
    }
}

/// Current weather at the search area. Passed through to the reranker and
/// the result without interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub temp_c: f64,
    pub condition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_categories_default_to_food() {
        let filter = Filter::new("부산", []);
        assert_eq!(filter.effective_categories(), BTreeSet::from([Category::Food]));
    }

    #[test]
    fn test_selected_categories_are_kept() {
        let filter = Filter::new("부산", [Category::Cafe, Category::Night]);
        assert_eq!(
            filter.effective_categories(),
            BTreeSet::from([Category::Cafe, Category::Night])
        );
    }
}
