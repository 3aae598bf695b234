//! Point-in-polygon and grid sampling over user-drawn areas.
//!
//! Everything here is pure: no I/O and no logging side effects beyond
//! `debug!` traces.

mod grid;
mod ray;

pub use grid::{bounding_box, centroid, generate_grid, BoundingBox, MAX_GRID_CELLS};
pub use ray::point_in_polygon;
