use geo::{BoundingRect, Centroid};
use geo_types::{Coord, LineString};
use tracing::{debug, warn};

use super::point_in_polygon;
use crate::models::{GeoPoint, Polygon};

/// Most bounding-box cells a single grid walk may visit
pub const MAX_GRID_CELLS: usize = 1_000_000;

/// Axis-aligned bounds of a polygon, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

fn to_line_string(polygon: &Polygon) -> LineString<f64> {
    polygon
        .vertices()
        .iter()
        .map(|p| Coord { x: p.lng, y: p.lat })
        .collect()
}

/// Get the bounding box of a polygon. `None` for an empty polygon.
pub fn bounding_box(polygon: &Polygon) -> Option<BoundingBox> {
    to_line_string(polygon).bounding_rect().map(|rect| BoundingBox {
        min_lat: rect.min().y,
        max_lat: rect.max().y,
        min_lng: rect.min().x,
        max_lng: rect.max().x,
    })
}

/// Area centroid of the polygon, used as its reference point (e.g. for
/// weather). Falls back to the vertex average when the ring has no area.
pub fn centroid(polygon: &Polygon) -> Option<GeoPoint> {
    if polygon.is_empty() {
        return None;
    }

    let ring = geo_types::Polygon::new(to_line_string(polygon), vec![]);
    if let Some(c) = ring.centroid() {
        if c.x().is_finite() && c.y().is_finite() {
            return Some(GeoPoint::new(c.y(), c.x()));
        }
    }

    let n = polygon.len() as f64;
    let (lat, lng) = polygon
        .vertices()
        .iter()
        .fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat, lng + p.lng));
    Some(GeoPoint::new(lat / n, lng / n))
}

/// Sample search centers inside a polygon.
///
/// Walks the bounding box row-major (latitude rows, longitude columns) in
/// `spacing` degree steps starting at the south-west corner, keeping points
/// that pass [`point_in_polygon`]. Generation stops as soon as `max_points`
/// points are kept. A bounding box spanning more than [`MAX_GRID_CELLS`]
/// cells at this spacing yields an empty grid.
pub fn generate_grid(polygon: &Polygon, spacing: f64, max_points: usize) -> Vec<GeoPoint> {
    let mut points = Vec::new();

    if polygon.len() < 3 || max_points == 0 || !(spacing.is_finite() && spacing > 0.0) {
        return points;
    }

    let Some(bbox) = bounding_box(polygon) else {
        return points;
    };

    let rows = ((bbox.max_lat - bbox.min_lat) / spacing).floor() + 1.0;
    let cols = ((bbox.max_lng - bbox.min_lng) / spacing).floor() + 1.0;
    if rows * cols > MAX_GRID_CELLS as f64 {
        warn!(
            "Grid of {} x {} cells exceeds {} (spacing {}), skipping",
            rows, cols, MAX_GRID_CELLS, spacing
        );
        return points;
    }

    // Step by index rather than accumulating, so long rows don't drift
    let mut row = 0usize;
    'rows: loop {
        let lat = bbox.min_lat + row as f64 * spacing;
        if lat > bbox.max_lat {
            break;
        }

        let mut col = 0usize;
        loop {
            let lng = bbox.min_lng + col as f64 * spacing;
            if lng > bbox.max_lng {
                break;
            }

            let candidate = GeoPoint::new(lat, lng);
            if point_in_polygon(candidate, polygon) {
                points.push(candidate);
                if points.len() >= max_points {
                    break 'rows;
                }
            }
            col += 1;
        }
        row += 1;
    }

    debug!(
        "Generated {} grid points (spacing {}, max {})",
        points.len(),
        spacing,
        max_points
    );

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f64) -> Polygon {
        Polygon::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, size),
            GeoPoint::new(size, size),
            GeoPoint::new(size, 0.0),
        ])
    }

    #[test]
    fn test_bounding_box() {
        let polygon = Polygon::new(vec![
            GeoPoint::new(35.1, 129.0),
            GeoPoint::new(35.3, 129.2),
            GeoPoint::new(35.0, 129.1),
        ]);
        let bbox = bounding_box(&polygon).unwrap();
        assert_eq!(bbox.min_lat, 35.0);
        assert_eq!(bbox.max_lat, 35.3);
        assert_eq!(bbox.min_lng, 129.0);
        assert_eq!(bbox.max_lng, 129.2);
    }

    #[test]
    fn test_bounding_box_empty() {
        assert!(bounding_box(&Polygon::default()).is_none());
    }

    #[test]
    fn test_grid_points_are_inside() {
        let polygon = square(1.0);
        let grid = generate_grid(&polygon, 0.1, 1000);
        assert!(!grid.is_empty());
        assert!(grid.iter().all(|p| point_in_polygon(*p, &polygon)));
    }

    #[test]
    fn test_grid_respects_cap() {
        let polygon = square(1.0);
        for cap in [1, 5, 17, 50] {
            assert_eq!(generate_grid(&polygon, 0.01, cap).len(), cap);
        }
    }

    #[test]
    fn test_grid_cap_keeps_row_major_prefix() {
        let polygon = square(1.0);
        let full = generate_grid(&polygon, 0.25, 1000);
        let capped = generate_grid(&polygon, 0.25, 3);
        assert_eq!(capped[..], full[..3]);
        // first row shares one latitude
        assert!(capped.iter().all(|p| p.lat == capped[0].lat));
    }

    #[test]
    fn test_grid_degenerate_inputs() {
        assert!(generate_grid(&Polygon::default(), 0.1, 10).is_empty());
        assert!(generate_grid(&square(1.0), 0.0, 10).is_empty());
        assert!(generate_grid(&square(1.0), -0.1, 10).is_empty());
        assert!(generate_grid(&square(1.0), f64::NAN, 10).is_empty());
        assert!(generate_grid(&square(1.0), 0.1, 0).is_empty());
    }

    #[test]
    fn test_grid_too_fine_for_bounding_box() {
        // thin sliver whose bounding box is 1° x 1e-6°
        let sliver = Polygon::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 0.000_001),
            GeoPoint::new(0.0, 0.000_001),
        ]);
        assert!(generate_grid(&sliver, 1e-9, 10).is_empty());
        assert!(generate_grid(&square(10.0), 1e-6, 10).is_empty());
    }

    #[test]
    fn test_grid_at_cell_limit_still_generates() {
        // 1000 x 1000 cells
        let grid = generate_grid(&square(0.999), 0.001, 5);
        assert_eq!(grid.len(), 5);
    }

    #[test]
    fn test_centroid_of_square() {
        let c = centroid(&square(2.0)).unwrap();
        assert!((c.lat - 1.0).abs() < 1e-9);
        assert!((c.lng - 1.0).abs() < 1e-9);
    }
}
