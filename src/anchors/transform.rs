//! The millimeter/pixel conversion boundary.
//!
//! Anchors, measurements, and coverage polygons arrive in millimeters;
//! every algorithm in this crate works in pixels. This trait is the sole
//! place coordinates change frames; nothing else assumes a scale.

use crate::core::Point;

/// Converts between floorplan millimeters and image pixels.
pub trait FloorplanTransform {
    /// Convert a millimeter point to pixels.
    fn to_pixels(&self, mm: Point) -> Point;

    /// Convert a pixel point to millimeters.
    fn to_mm(&self, px: Point) -> Point;

    /// Convert a millimeter polygon to pixels.
    fn polygon_to_pixels(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|p| self.to_pixels(*p)).collect()
    }

    /// Convert a pixel polygon to millimeters.
    fn polygon_to_mm(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|p| self.to_mm(*p)).collect()
    }
}

/// Uniform scale-and-offset transform.
///
/// Pixel = (mm - origin) / mm_per_pixel, same scale on both axes.
#[derive(Clone, Copy, Debug)]
pub struct ScaleTransform {
    /// Millimeters represented by one pixel.
    pub mm_per_pixel: f32,
    /// Millimeter position of the image's (0, 0) pixel.
    pub origin_mm: Point,
}

impl ScaleTransform {
    /// Create a transform with the given scale and origin.
    pub fn new(mm_per_pixel: f32, origin_mm: Point) -> Self {
        Self {
            mm_per_pixel,
            origin_mm,
        }
    }

    /// An identity transform (1 mm per pixel, origin at zero), handy in
    /// tests and for data already expressed in pixels.
    pub fn identity() -> Self {
        Self::new(1.0, Point::ZERO)
    }
}

impl FloorplanTransform for ScaleTransform {
    fn to_pixels(&self, mm: Point) -> Point {
        Point::new(
            (mm.x - self.origin_mm.x) / self.mm_per_pixel,
            (mm.y - self.origin_mm.y) / self.mm_per_pixel,
        )
    }

    fn to_mm(&self, px: Point) -> Point {
        Point::new(
            px.x * self.mm_per_pixel + self.origin_mm.x,
            px.y * self.mm_per_pixel + self.origin_mm.y,
        )
    }
}
