//! 2D coordinate value type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// An immutable point in a rib's cross-section plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    /// The origin (0, 0).
    pub const ORIGIN: Point2D = Point2D { x: 0.0, y: 0.0 };

    /// Creates a new point with the given X and Y coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Rotates this point around `origin` by `angle_deg` degrees (counter-clockwise).
    pub fn rotate(&self, origin: Point2D, angle_deg: f64) -> Point2D {
        if angle_deg.abs() < 1e-9 {
            return *self;
        }
        let (sin_a, cos_a) = angle_deg.to_radians().sin_cos();
        let dx = self.x - origin.x;
        let dy = self.y - origin.y;
        Point2D {
            x: origin.x + dx * cos_a - dy * sin_a,
            y: origin.y + dx * sin_a + dy * cos_a,
        }
    }

    /// Scales this point about the origin.
    pub fn scale(&self, factor: f64) -> Point2D {
        Point2D::new(self.x * factor, self.y * factor)
    }

    /// Moves this point by `offset`.
    pub fn translate(&self, offset: Point2D) -> Point2D {
        *self + offset
    }

    /// Linear interpolation toward `other`; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(&self, other: &Point2D, t: f64) -> Point2D {
        Point2D::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Component-wise comparison with a tolerance.
    pub fn approx_eq(&self, other: &Point2D, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Point2D {
    type Output = Point2D;

    fn add(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Add<f64> for Point2D {
    type Output = Point2D;

    fn add(self, rhs: f64) -> Point2D {
        Point2D::new(self.x + rhs, self.y + rhs)
    }
}

impl Sub for Point2D {
    type Output = Point2D;

    fn sub(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Sub<f64> for Point2D {
    type Output = Point2D;

    fn sub(self, rhs: f64) -> Point2D {
        Point2D::new(self.x - rhs, self.y - rhs)
    }
}

impl Mul<f64> for Point2D {
    type Output = Point2D;

    fn mul(self, rhs: f64) -> Point2D {
        self.scale(rhs)
    }
}

impl Neg for Point2D {
    type Output = Point2D;

    fn neg(self) -> Point2D {
        Point2D::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Point2D::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Point2D::new(1.0, 2.0);
        let b = Point2D::new(0.5, -1.0);
        assert_eq!(a + b, Point2D::new(1.5, 1.0));
        assert_eq!(a - b, Point2D::new(0.5, 3.0));
        assert_eq!(a + 1.0, Point2D::new(2.0, 3.0));
        assert_eq!(a - 1.0, Point2D::new(0.0, 1.0));
        assert_eq!(-a, Point2D::new(-1.0, -2.0));
        assert_eq!(a * 2.0, Point2D::new(2.0, 4.0));
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let p = Point2D::new(1.0, 0.0);
        let r = p.rotate(Point2D::ORIGIN, 90.0);
        assert!(r.approx_eq(&Point2D::new(0.0, 1.0), 1e-12));

        let r = p.rotate(Point2D::new(1.0, 1.0), 180.0);
        assert!(r.approx_eq(&Point2D::new(1.0, 2.0), 1e-12));
    }

    #[test]
    fn test_translate_round_trip_is_exact() {
        let p = Point2D::new(0.25, -0.75);
        let offset = Point2D::new(2.5, 1.0);
        assert_eq!(p.translate(offset).translate(-offset), p);
    }

    #[test]
    fn test_distance_and_lerp() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(a.lerp(&b, 0.5), Point2D::new(1.5, 2.0));
    }
}
