//! Search orchestration: strategy selection, concurrent fan-out, merging
//! and category rebalancing.

mod fetch;
mod merge;
mod orchestrator;
mod rebalance;
mod settings;

pub use fetch::fetch_all;
pub use merge::merge;
pub use orchestrator::{SearchOrchestrator, SearchRequest};
pub use rebalance::{rebalance, RebalanceOptions, Rebalanced};
pub use settings::{SearchSettings, PROVIDER_MAX_PAGE_SIZE, PROVIDER_MAX_RADIUS_METERS};
