//! Mapping between our categories and Kakao `category_group_code`s.

use std::collections::BTreeSet;

use crate::models::Category;

/// Kakao group codes searched for one category. Some categories need
/// more than one code, and some codes serve more than one category.
pub fn category_codes(category: Category) -> &'static [&'static str] {
    match category {
        Category::Food => &["FD6"],
        Category::Cafe => &["CE7"],
        Category::Culture => &["CT1"],
        // tourist attractions double as photo spots
        Category::Photo => &["AT4"],
        // large marts and convenience stores
        Category::Shopping => &["MT1", "CS2"],
        // parks fall under attractions
        Category::Healing => &["AT4"],
        Category::Experience => &["AT4", "AC5"],
        Category::Night => &["AD5"],
        Category::Stay => &["AD5"],
    }
}

/// Codes to query for a category set, without repeats, in category order
pub fn codes_for(categories: &BTreeSet<Category>) -> Vec<&'static str> {
    let mut codes: Vec<&'static str> = Vec::new();
    for code in categories.iter().flat_map(|c| category_codes(*c)) {
        if !codes.contains(code) {
            codes.push(code);
        }
    }
    codes
}

/// Category assigned to a place from its Kakao group code.
/// Codes we never ask for are treated as culture/attraction spots.
pub fn category_for_code(code: Option<&str>) -> Category {
    match code {
        Some("FD6") => Category::Food,
        Some("CE7") => Category::Cafe,
        Some("CT1") => Category::Culture,
        Some("AT4") => Category::Photo,
        Some("MT1" | "CS2") => Category::Shopping,
        Some("AD5") => Category::Night,
        _ => Category::Culture,
    }
}
