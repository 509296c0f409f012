//! Point type for the shared pixel coordinate frame.
//!
//! Every coordinate in this crate (zone vertices, graph waypoints,
//! route output) lives in the same pixel frame as the floorplan image.
//! Millimeter inputs are converted at the [`FloorplanTransform`]
//! boundary before they reach any algorithm here.
//!
//! [`FloorplanTransform`]: crate::anchors::FloorplanTransform

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A 2D point (or vector) in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate (pixels, rightward)
    pub x: f32,
    /// Y coordinate (pixels, downward in image space)
    pub y: f32,
}

impl Point {
    /// Create a new point
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero point (origin)
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Squared distance (faster, avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Midpoint between this point and another
    #[inline]
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    /// Length (magnitude) of this point as a vector from origin
    #[inline]
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Normalize to unit length (returns self unchanged if zero-length)
    #[inline]
    pub fn normalized(&self) -> Point {
        let len = self.length();
        if len > 0.0 {
            Point::new(self.x / len, self.y / len)
        } else {
            *self
        }
    }

    /// Dot product with another point (as vectors)
    #[inline]
    pub fn dot(&self, other: &Point) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Cross product (z-component of the 3D cross product)
    #[inline]
    pub fn cross(&self, other: &Point) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Perpendicular vector (rotated 90° counter-clockwise)
    #[inline]
    pub fn perpendicular(&self) -> Point {
        Point::new(-self.y, self.x)
    }
}

impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Point {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Point::new(self.x * scalar, self.y * scalar)
    }
}
