//! Fundamental types and the geometry kernel.

mod bounds;
pub mod geometry;
mod id;
mod point;

pub use bounds::Bounds;
pub use geometry::{
    find_closest_edge, find_closest_vertex, line_segment_intersection, point_in_polygon,
    point_to_segment_distance, polygon_area, polygon_bounds, polygon_centroid,
    ray_polygon_intersection, ray_segment_intersection, EdgeMatch, RayHit, SegmentDistance,
    VertexMatch,
};
pub use id::ZoneIdGenerator;
pub use point::Point;
