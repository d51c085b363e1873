//! Point and vector types for joint positions.
//!
//! Coordinates are in source pixel units. `z` is a relative depth proxy
//! scaled like `x`, not a metric depth.

use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A 3D point, also used as a 3D vector (velocity, acceleration).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    /// The origin / zero vector.
    pub const ZERO: Point3D = Point3D {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Dot product with another vector.
    pub fn dot(&self, other: &Point3D) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point3D) -> f64 {
        (*other - *self).norm()
    }

    /// Projection onto the image plane (drops depth).
    pub fn xy(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl Add for Point3D {
    type Output = Point3D;

    fn add(self, rhs: Point3D) -> Point3D {
        Point3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3D {
    type Output = Point3D;

    fn sub(self, rhs: Point3D) -> Point3D {
        Point3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Point3D {
    type Output = Point3D;

    fn mul(self, rhs: f64) -> Point3D {
        Point3D::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f64> for Point3D {
    type Output = Point3D;

    fn div(self, rhs: f64) -> Point3D {
        Point3D::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

/// A 2D point in image space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_arithmetic() {
        let a = Point3D::new(1.0, 2.0, 3.0);
        let b = Point3D::new(4.0, 6.0, 3.0);
        assert_eq!(b - a, Point3D::new(3.0, 4.0, 0.0));
        assert_eq!(a + b, Point3D::new(5.0, 8.0, 6.0));
        assert_eq!(a * 2.0, Point3D::new(2.0, 4.0, 6.0));
        assert_eq!(b / 2.0, Point3D::new(2.0, 3.0, 1.5));
    }

    #[test]
    fn test_norm_and_distance() {
        let a = Point3D::ZERO;
        let b = Point3D::new(3.0, 4.0, 0.0);
        assert!((b.norm() - 5.0).abs() < 1e-12);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert_eq!(a.dot(&b), 0.0);
        assert!(a.is_zero());
    }

    #[test]
    fn test_projection_keeps_first_two_coordinates() {
        let p = Point3D::new(10.5, 20.25, -7.0);
        assert_eq!(p.xy(), Point2D::new(10.5, 20.25));
    }
}
