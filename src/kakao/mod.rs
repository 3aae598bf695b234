//! Kakao Local REST API provider (geocoding and category search).

mod client;
mod codes;

pub use client::{KakaoClient, DEFAULT_BASE_URL};
pub use codes::{category_codes, category_for_code, codes_for};
