use crate::models::{GeoPoint, Polygon};

/// Ray-casting containment test.
///
/// Longitude is treated as x and latitude as y. The ring is closed
/// implicitly. Points lying exactly on an edge or vertex get whatever answer
/// the crossing count produces; no special handling is applied.
pub fn point_in_polygon(point: GeoPoint, polygon: &Polygon) -> bool {
    let vertices = polygon.vertices();
    if vertices.len() < 3 {
        return false;
    }

    let (x, y) = (point.lng, point.lat);
    let mut inside = false;
    let mut j = vertices.len() - 1;

    for (i, vi) in vertices.iter().enumerate() {
        let vj = &vertices[j];
        let (xi, yi) = (vi.lng, vi.lat);
        let (xj, yj) = (vj.lng, vj.lat);

        // (yi > y) != (yj > y) guarantees yj != yi, so the division is safe
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }

    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(1.0, 0.0),
        ])
    }

    #[test]
    fn test_centroid_of_convex_polygon_is_inside() {
        assert!(point_in_polygon(GeoPoint::new(0.5, 0.5), &square()));
    }

    #[test]
    fn test_far_point_is_outside() {
        assert!(!point_in_polygon(GeoPoint::new(10.0, -40.0), &square()));
        assert!(!point_in_polygon(GeoPoint::new(0.5, 1.5), &square()));
    }

    #[test]
    fn test_closed_and_open_rings_agree() {
        let mut closed = square().vertices().to_vec();
        closed.push(closed[0]);
        let closed = Polygon::new(closed);

        for p in [GeoPoint::new(0.25, 0.75), GeoPoint::new(1.25, 0.5)] {
            assert_eq!(point_in_polygon(p, &square()), point_in_polygon(p, &closed));
        }
    }

    #[test]
    fn test_concave_notch_is_outside() {
        // U shape opening to the north
        let u = Polygon::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 3.0),
            GeoPoint::new(3.0, 3.0),
            GeoPoint::new(3.0, 2.0),
            GeoPoint::new(1.0, 2.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(3.0, 1.0),
            GeoPoint::new(3.0, 0.0),
        ]);
        assert!(point_in_polygon(GeoPoint::new(0.5, 1.5), &u));
        assert!(point_in_polygon(GeoPoint::new(2.5, 0.5), &u));
        assert!(!point_in_polygon(GeoPoint::new(2.0, 1.5), &u));
    }

    #[test]
    fn test_degenerate_polygons_contain_nothing() {
        let p = GeoPoint::new(0.0, 0.0);
        assert!(!point_in_polygon(p, &Polygon::default()));
        assert!(!point_in_polygon(
            p,
            &Polygon::new(vec![GeoPoint::new(-1.0, -1.0), GeoPoint::new(1.0, 1.0)])
        ));
    }
}
