//! Region catalog and WIDE/NARROW query classification.

mod catalog;

use serde::{Deserialize, Serialize};

pub use catalog::{sub_regions_of, wide_regions};

/// How a region query should be searched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchType {
    /// Fan out over the region's sub-region centers
    Wide,
    /// Search around a single center
    Narrow,
}

/// Whether the query mentions a known neighbourhood-level place
pub fn contains_detailed_keyword(query: &str) -> bool {
    let query = query.to_lowercase();
    catalog::DETAILED_KEYWORDS
        .iter()
        .any(|keyword| query.contains(keyword))
}

/// Classify a free-text region query.
///
/// Checks run in a fixed precedence:
/// 1. a detailed keyword anywhere in the query → NARROW
/// 2. two or more tokens split on space, `/` or `,` → NARROW
/// 3. a broad region from the catalog → WIDE
/// 4. otherwise NARROW
pub fn classify(query: &str) -> SearchType {
    let query = query.trim();

    if contains_detailed_keyword(query) {
        return SearchType::Narrow;
    }

    if query.split([' ', '/', ',']).count() >= 2 {
        return SearchType::Narrow;
    }

    if sub_regions_of(query).is_some() {
        return SearchType::Wide;
    }

    SearchType::Narrow
}
