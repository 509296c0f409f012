//! Geometry kernel: pure polygon and segment queries.
//!
//! Stateless functions over [`Point`] slices. Polygons are ordered vertex
//! sequences without a repeated closing vertex; edges wrap from the last
//! vertex back to the first. All "no result" outcomes are `None`, never
//! errors; misses are an expected, frequent case for these queries.

use super::bounds::Bounds;
use super::point::Point;

/// Result of a point-to-segment distance query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentDistance {
    /// Distance from the query point to the closest point on the segment.
    pub distance: f32,
    /// The closest point on the segment (an endpoint if the projection
    /// falls outside the segment).
    pub closest_point: Point,
}

/// A ray-versus-polygon hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Intersection point on the polygon boundary.
    pub point: Point,
    /// Distance from the ray origin to the hit.
    pub distance: f32,
}

/// A vertex found within radius of a query point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexMatch {
    /// Index of the vertex in the polygon.
    pub index: usize,
    /// The vertex position.
    pub point: Point,
    /// Distance from the query point.
    pub distance: f32,
}

/// An edge found within radius of a query point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeMatch {
    /// Index of the edge (edge i runs from vertex i to vertex i+1, wrapping).
    pub index: usize,
    /// Closest point on the edge to the query point.
    pub closest_point: Point,
    /// Distance from the query point.
    pub distance: f32,
}

/// Point-in-polygon via the ray-crossing test.
///
/// Boundary behavior is a fixed half-open tie-break: each edge counts
/// crossings for `(a.y > p.y) != (b.y > p.y)`, so a point exactly on a
/// horizontal boundary is classified consistently (one of the two sides,
/// never both). Travelability checks rely on this consistency, not on a
/// particular side.
///
/// Returns `false` for polygons with fewer than 3 vertices.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Distance from a point to a line segment, with the closest point.
///
/// The projection parameter is clamped to `[0, 1]`: inside the segment the
/// result is the true perpendicular distance, outside it is the distance to
/// the nearer endpoint. A degenerate segment (`a == b`) reduces to
/// point-to-point distance.
pub fn point_to_segment_distance(point: Point, a: Point, b: Point) -> SegmentDistance {
    let ab = b - a;
    let len_sq = ab.dot(&ab);

    let t = if len_sq > 0.0 {
        ((point - a).dot(&ab) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let closest = a + ab * t;
    SegmentDistance {
        distance: point.distance(&closest),
        closest_point: closest,
    }
}

/// Intersection of two line segments.
///
/// Returns the intersection point if the segments properly cross (both
/// parameters in `[0, 1]`). Parallel and collinear-overlapping segments
/// yield `None`; collinear overlap is deliberately not treated as an
/// intersection.
pub fn line_segment_intersection(p1: Point, p2: Point, q1: Point, q2: Point) -> Option<Point> {
    let r = p2 - p1;
    let s = q2 - q1;
    let denom = r.cross(&s);

    if denom.abs() < f32::EPSILON {
        return None;
    }

    let qp = q1 - p1;
    let t = qp.cross(&s) / denom;
    let u = qp.cross(&r) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(p1 + r * t)
    } else {
        None
    }
}

/// Intersection of a ray with a line segment.
///
/// `direction` must be pre-normalized by the caller so the returned
/// parameter is a distance. Returns the distance along the ray, or `None`
/// if the ray misses the segment or the hit is behind the origin.
pub fn ray_segment_intersection(
    origin: Point,
    direction: Point,
    a: Point,
    b: Point,
) -> Option<f32> {
    let s = b - a;
    let denom = direction.cross(&s);

    if denom.abs() < f32::EPSILON {
        return None;
    }

    let ap = a - origin;
    let t = ap.cross(&s) / denom; // distance along the ray
    let u = ap.cross(&direction) / denom; // parameter on the segment

    if t > 0.0 && (0.0..=1.0).contains(&u) {
        Some(t)
    } else {
        None
    }
}

/// Nearest intersection of a ray with a polygon boundary.
///
/// Tests the ray against every edge and returns the closest
/// strictly-positive hit, or `None` if the ray misses entirely.
/// `direction` must be pre-normalized by the caller.
pub fn ray_polygon_intersection(
    origin: Point,
    direction: Point,
    polygon: &[Point],
) -> Option<RayHit> {
    if polygon.len() < 3 {
        return None;
    }

    let mut closest: Option<f32> = None;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[(i + 1) % polygon.len()];
        if let Some(t) = ray_segment_intersection(origin, direction, a, b) {
            if closest.map_or(true, |c| t < c) {
                closest = Some(t);
            }
        }
    }

    closest.map(|t| RayHit {
        point: origin + direction * t,
        distance: t,
    })
}

/// Signed polygon area via the shoelace formula.
///
/// Positive for counter-clockwise winding in a y-up frame (clockwise in
/// image space). Callers that need the geometric area take the absolute
/// value. Returns 0 for fewer than 3 vertices.
pub fn polygon_area(polygon: &[Point]) -> f32 {
    if polygon.len() < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        sum += polygon[j].cross(&polygon[i]);
        j = i;
    }
    sum * 0.5
}

/// Area-weighted polygon centroid.
///
/// Falls back to the plain vertex average when the signed area is near
/// zero (collinear or degenerate polygons), so every non-empty polygon
/// gets a finite centroid.
pub fn polygon_centroid(polygon: &[Point]) -> Point {
    if polygon.is_empty() {
        return Point::ZERO;
    }

    let area = polygon_area(polygon);
    if area.abs() > 1e-6 {
        let mut cx = 0.0;
        let mut cy = 0.0;
        let mut j = polygon.len() - 1;
        for i in 0..polygon.len() {
            let cross = polygon[j].cross(&polygon[i]);
            cx += (polygon[j].x + polygon[i].x) * cross;
            cy += (polygon[j].y + polygon[i].y) * cross;
            j = i;
        }
        let factor = 1.0 / (6.0 * area);
        Point::new(cx * factor, cy * factor)
    } else {
        let n = polygon.len() as f32;
        let sum = polygon
            .iter()
            .fold(Point::ZERO, |acc, p| acc + *p);
        Point::new(sum.x / n, sum.y / n)
    }
}

/// Axis-aligned bounding box of a polygon.
pub fn polygon_bounds(polygon: &[Point]) -> Bounds {
    Bounds::from_polygon(polygon)
}

/// Find the polygon vertex nearest to a point, within `max_distance`.
///
/// Returns `None` if no vertex lies within the radius. Ties resolve to
/// the lowest vertex index.
pub fn find_closest_vertex(
    point: Point,
    polygon: &[Point],
    max_distance: f32,
) -> Option<VertexMatch> {
    let mut best: Option<VertexMatch> = None;
    for (index, vertex) in polygon.iter().enumerate() {
        let distance = point.distance(vertex);
        if distance <= max_distance && best.map_or(true, |b| distance < b.distance) {
            best = Some(VertexMatch {
                index,
                point: *vertex,
                distance,
            });
        }
    }
    best
}

/// Find the polygon edge nearest to a point, within `max_distance`.
///
/// Returns `None` if no edge lies within the radius. Ties resolve to the
/// lowest edge index.
pub fn find_closest_edge(point: Point, polygon: &[Point], max_distance: f32) -> Option<EdgeMatch> {
    if polygon.len() < 2 {
        return None;
    }

    let mut best: Option<EdgeMatch> = None;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[(i + 1) % polygon.len()];
        let hit = point_to_segment_distance(point, a, b);
        if hit.distance <= max_distance && best.map_or(true, |e| hit.distance < e.distance) {
            best = Some(EdgeMatch {
                index: i,
                closest_point: hit.closest_point,
                distance: hit.distance,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_point_in_polygon_interior() {
        let square = unit_square();
        assert!(point_in_polygon(Point::new(5.0, 5.0), &square));
        assert!(point_in_polygon(Point::new(0.1, 0.1), &square));
    }

    #[test]
    fn test_point_in_polygon_far_outside() {
        let square = unit_square();
        assert!(!point_in_polygon(Point::new(100.0, 100.0), &square));
        assert!(!point_in_polygon(Point::new(-50.0, 5.0), &square));
    }

    #[test]
    fn test_point_in_polygon_degenerate() {
        let line = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        assert!(!point_in_polygon(Point::new(0.5, 0.5), &line));
    }

    #[test]
    fn test_segment_distance_on_segment() {
        let hit = point_to_segment_distance(
            Point::new(5.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert_relative_eq!(hit.distance, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_segment_distance_perpendicular() {
        let hit = point_to_segment_distance(
            Point::new(5.0, 3.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert_relative_eq!(hit.distance, 3.0, epsilon = 1e-6);
        assert_relative_eq!(hit.closest_point.x, 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_segment_distance_clamps_to_endpoint() {
        // Projection falls past b, so distance is to b itself
        let hit = point_to_segment_distance(
            Point::new(13.0, 4.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert_relative_eq!(hit.distance, 5.0, epsilon = 1e-6);
        assert_eq!(hit.closest_point, Point::new(10.0, 0.0));
    }

    #[test]
    fn test_segment_intersection_crossing() {
        let p = line_segment_intersection(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 0.0),
        )
        .unwrap();
        assert_relative_eq!(p.x, 5.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 5.0, epsilon = 1e-5);
    }

    #[test]
    fn test_segment_intersection_collinear_is_none() {
        let p = line_segment_intersection(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(15.0, 0.0),
        );
        assert!(p.is_none());
    }

    #[test]
    fn test_ray_polygon_nearest_hit() {
        let square = unit_square();
        // Ray from inside pointing east: crosses x=10 at distance 5
        let hit = ray_polygon_intersection(Point::new(5.0, 5.0), Point::new(1.0, 0.0), &square)
            .unwrap();
        assert_relative_eq!(hit.distance, 5.0, epsilon = 1e-5);
        assert_relative_eq!(hit.point.x, 10.0, epsilon = 1e-5);
    }

    #[test]
    fn test_ray_polygon_miss() {
        let square = unit_square();
        let hit =
            ray_polygon_intersection(Point::new(20.0, 5.0), Point::new(1.0, 0.0), &square);
        assert!(hit.is_none());
    }

    #[test]
    fn test_area_orientation_independent() {
        let square = unit_square();
        let mut reversed = square.clone();
        reversed.reverse();
        assert_relative_eq!(
            polygon_area(&square).abs(),
            polygon_area(&reversed).abs(),
            epsilon = 1e-5
        );
        assert_relative_eq!(polygon_area(&square).abs(), 100.0, epsilon = 1e-5);
    }

    #[test]
    fn test_centroid_of_square() {
        let c = polygon_centroid(&unit_square());
        assert_relative_eq!(c.x, 5.0, epsilon = 1e-5);
        assert_relative_eq!(c.y, 5.0, epsilon = 1e-5);
    }

    #[test]
    fn test_centroid_degenerate_falls_back_to_average() {
        let line = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(10.0, 0.0),
        ];
        let c = polygon_centroid(&line);
        assert_relative_eq!(c.x, 5.0, epsilon = 1e-5);
        assert_relative_eq!(c.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_closest_vertex_within_radius() {
        let square = unit_square();
        let m = find_closest_vertex(Point::new(1.0, 1.0), &square, 5.0).unwrap();
        assert_eq!(m.index, 0);

        assert!(find_closest_vertex(Point::new(50.0, 50.0), &square, 5.0).is_none());
    }

    #[test]
    fn test_closest_edge_within_radius() {
        let square = unit_square();
        let m = find_closest_edge(Point::new(5.0, -2.0), &square, 5.0).unwrap();
        assert_eq!(m.index, 0); // bottom edge
        assert_relative_eq!(m.distance, 2.0, epsilon = 1e-5);

        assert!(find_closest_edge(Point::new(5.0, -20.0), &square, 5.0).is_none());
    }
}
