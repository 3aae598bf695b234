//! Category rebalancing of a ranked candidate list.
//!
//! The ranking coming out of the provider (or the reranker) tends to be
//! dominated by one or two categories. Rebalancing keeps that ranking but
//! guarantees each selected category a minimum number of slots near the
//! front, and picks per-category highlights.
//!
//! Algorithm:
//! 1. `limit` is `total_cap` (bounded by the candidate count), or every
//!    candidate when uncapped.
//! 2. Each selected category gets a base allowance of `min_per_category`
//!    slots. When the allowances do not fit in `limit`, they are handed out
//!    one slot per category per round, in canonical category order.
//!    A category's quota is its allowance bounded by its candidate count.
//! 3. The guarantee window is the first `min(limit, Σ allowances)` slots.
//!    Under-quota categories promote their earliest candidates from behind
//!    the window; each promotion evicts the lowest-ranked window member
//!    whose category is unselected or over quota.
//! 4. Output is the window, then everything else, each in original rank
//!    order, truncated to `limit`. Top picks come from that output only.
//!
//! Places never change relative order within a category, so re-running
//! the pass on its own output is a no-op.

use hashbrown::HashMap;
use std::collections::BTreeSet;
use tracing::debug;

use crate::models::{Category, Place};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebalanceOptions {
    /// Slots guaranteed per selected category (if it has that many)
    pub min_per_category: usize,
    /// Top picks taken per selected category
    pub top_per_category: usize,
    /// Maximum length of the ordered output
    pub total_cap: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rebalanced {
    pub top_picks: Vec<Place>,
    pub places: Vec<Place>,
}

/// Rebalance `candidates` (already ranked) for the `selected` categories.
/// Only reorders and selects; never creates places.
pub fn rebalance(
    candidates: &[Place],
    selected: &BTreeSet<Category>,
    options: RebalanceOptions,
) -> Rebalanced {
    let limit = options
        .total_cap
        .map_or(candidates.len(), |cap| cap.min(candidates.len()));

    let allowances = allowances(selected, options.min_per_category, limit);
    let window: usize = allowances.iter().map(|(_, allowance)| allowance).sum();

    let mut quotas: HashMap<Category, usize> = HashMap::new();
    for (category, allowance) in &allowances {
        let available = candidates.iter().filter(|p| p.category == *category).count();
        quotas.insert(*category, (*allowance).min(available));
    }

    let mut in_window: Vec<bool> = (0..candidates.len()).map(|i| i < window).collect();

    let mut window_counts: HashMap<Category, usize> = HashMap::new();
    for place in &candidates[..window] {
        *window_counts.entry(place.category).or_default() += 1;
    }

    // Earliest out-of-window candidates of each under-quota category
    let mut promoted = Vec::new();
    for category in selected {
        let quota = quotas.get(category).copied().unwrap_or(0);
        let have = window_counts.get(category).copied().unwrap_or(0);
        if have < quota {
            promoted.extend(
                (window..candidates.len())
                    .filter(|&i| candidates[i].category == *category)
                    .take(quota - have),
            );
        }
    }

    // Lowest-ranked window members that can give up their slot
    let mut evicted = Vec::with_capacity(promoted.len());
    for i in (0..window).rev() {
        if evicted.len() == promoted.len() {
            break;
        }
        let category = candidates[i].category;
        match quotas.get(&category) {
            None => evicted.push(i),
            Some(&quota) => {
                let count = window_counts.entry(category).or_default();
                if *count > quota {
                    *count -= 1;
                    evicted.push(i);
                }
            }
        }
    }
    debug_assert_eq!(evicted.len(), promoted.len());

    for &i in &evicted {
        in_window[i] = false;
    }
    for &i in &promoted {
        in_window[i] = true;
    }

    if !promoted.is_empty() {
        debug!(
            "Rebalance promoted {} places into the first {} slots",
            promoted.len(),
            window
        );
    }

    let front = (0..candidates.len()).filter(|&i| in_window[i]);
    let back = (0..candidates.len()).filter(|&i| !in_window[i]);
    let places: Vec<Place> = front
        .chain(back)
        .take(limit)
        .map(|i| candidates[i].clone())
        .collect();
    let top_picks = top_picks(&places, selected, options.top_per_category);

    Rebalanced { top_picks, places }
}

/// First `per_category` kept places of each selected category, in category
/// order then rank order.
fn top_picks(
    candidates: &[Place],
    selected: &BTreeSet<Category>,
    per_category: usize,
) -> Vec<Place> {
    selected
        .iter()
        .flat_map(|category| {
            candidates
                .iter()
                .filter(move |p| p.category == *category)
                .take(per_category)
        })
        .cloned()
        .collect()
}

/// Slots reserved per category. Depends only on the selection, the
/// minimum and the limit, never on candidate counts.
fn allowances(
    selected: &BTreeSet<Category>,
    min_per_category: usize,
    limit: usize,
) -> Vec<(Category, usize)> {
    let mut allowances: Vec<(Category, usize)> = selected.iter().map(|c| (*c, 0)).collect();
    let mut remaining = limit;
    if allowances.is_empty() {
        return allowances;
    }

    for _ in 0..min_per_category {
        for (_, allowance) in allowances.iter_mut() {
            if remaining == 0 {
                return allowances;
            }
            *allowance += 1;
            remaining -= 1;
        }
    }

    allowances
}
