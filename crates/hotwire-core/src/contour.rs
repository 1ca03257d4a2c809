//! Open contours describing one side of an airfoil.
//!
//! A [`Contour`] is an ordered run of points. The stored order is the cut
//! direction, so every operation here preserves it. Points do not have to
//! be monotonic in x; lookups scan in stored order and take the first
//! bracketing segment.

use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, ProfileResult};
use crate::point::Point2D;

/// Segments whose x extent is below this are treated as vertical.
const DEGENERATE_DX: f64 = 1e-12;

/// One directed side (top or bottom) of an airfoil cross-section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point2D>", into = "Vec<Point2D>")]
pub struct Contour {
    points: Vec<Point2D>,
}

impl TryFrom<Vec<Point2D>> for Contour {
    type Error = ProfileError;

    fn try_from(points: Vec<Point2D>) -> ProfileResult<Self> {
        Contour::new(points)
    }
}

impl From<Contour> for Vec<Point2D> {
    fn from(contour: Contour) -> Self {
        contour.points
    }
}

impl Contour {
    /// Creates a contour, rejecting fewer than two points.
    pub fn new(points: Vec<Point2D>) -> ProfileResult<Self> {
        if points.len() < 2 {
            return Err(ProfileError::insufficient("contour", points.len(), 2));
        }
        Ok(Self { points })
    }

    /// Maps every point, keeping order and count.
    fn map_points(&self, f: impl Fn(&Point2D) -> Point2D) -> Self {
        Self {
            points: self.points.iter().map(f).collect(),
        }
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a contour holds at least two points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Point2D {
        self.points[0]
    }

    pub fn last(&self) -> Point2D {
        self.points[self.points.len() - 1]
    }

    /// Component-wise (min, max) corners over all points.
    pub fn bounds(&self) -> (Point2D, Point2D) {
        self.points.iter().skip(1).fold(
            (self.points[0], self.points[0]),
            |(min, max), p| {
                (
                    Point2D::new(min.x.min(p.x), min.y.min(p.y)),
                    Point2D::new(max.x.max(p.x), max.y.max(p.y)),
                )
            },
        )
    }

    /// The first point holding the minimum x.
    pub fn left(&self) -> Point2D {
        self.points
            .iter()
            .skip(1)
            .fold(self.points[0], |best, p| if p.x < best.x { *p } else { best })
    }

    /// The first point holding the maximum x.
    pub fn right(&self) -> Point2D {
        self.points
            .iter()
            .skip(1)
            .fold(self.points[0], |best, p| if p.x > best.x { *p } else { best })
    }

    /// Total length travelled along the contour.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum()
    }

    /// Point on the contour at `x`.
    ///
    /// Uses the first segment (in stored order) whose x-range contains `x`.
    /// Outside the contour's x-range the end segment nearest to `x` is
    /// extended. Vertical segments yield the y of the nearer endpoint.
    pub fn interpolate(&self, x: f64) -> Point2D {
        for pair in self.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if x >= a.x.min(b.x) && x <= a.x.max(b.x) {
                return point_on_segment(a, b, x);
            }
        }

        let n = self.points.len();
        let (a, b) = if (x - self.points[0].x).abs() <= (x - self.points[n - 1].x).abs() {
            (self.points[0], self.points[1])
        } else {
            (self.points[n - 2], self.points[n - 1])
        };
        point_on_segment(a, b, x)
    }

    /// Point reached after travelling `distance` along the contour from its start.
    pub fn interpolate_by_distance(&self, distance: f64) -> Point2D {
        if distance <= 0.0 {
            return self.first();
        }

        let mut travelled = 0.0;
        for pair in self.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let segment = a.distance_to(&b);
            if travelled + segment >= distance {
                if segment <= 0.0 {
                    return a;
                }
                let t = (distance - travelled) / segment;
                return if t >= 1.0 { b } else { a.lerp(&b, t) };
            }
            travelled += segment;
        }
        self.last()
    }

    /// Point at a fraction (0..=1) of the contour's total length.
    pub fn interpolate_by_distance_percent(&self, pct: f64) -> Point2D {
        let pct = pct.clamp(0.0, 1.0);
        if pct >= 1.0 {
            return self.last();
        }
        self.interpolate_by_distance(pct * self.length())
    }

    /// Displaces every point along its local normal by `distance`.
    ///
    /// The normal is the perpendicular of the neighbour-to-neighbour direction
    /// (one-sided at the ends), oriented toward +y. A positive distance moves a
    /// top surface outward; bottoms take the negated distance.
    pub fn offset(&self, distance: f64) -> Self {
        let n = self.points.len();
        let points = (0..n)
            .map(|i| {
                let prev = self.points[i.saturating_sub(1)];
                let next = self.points[(i + 1).min(n - 1)];
                self.points[i] + upward_normal(prev, next) * distance
            })
            .collect();
        Self { points }
    }

    pub fn scale(&self, factor: f64) -> Self {
        self.map_points(|p| p.scale(factor))
    }

    pub fn translate(&self, offset: Point2D) -> Self {
        self.map_points(|p| p.translate(offset))
    }

    pub fn rotate(&self, origin: Point2D, angle_deg: f64) -> Self {
        self.map_points(|p| p.rotate(origin, angle_deg))
    }

    /// Cuts the contour down to `[x_min, x_max]`.
    ///
    /// Points outside the range are dropped and exact boundary points are
    /// synthesized with [`Contour::interpolate`], placed at the matching end
    /// for the contour's direction. A missing bound leaves that side as is.
    pub fn trim(&self, x_min: Option<f64>, x_max: Option<f64>) -> ProfileResult<Self> {
        let inside = |p: &Point2D| {
            x_min.map_or(true, |min| p.x > min) && x_max.map_or(true, |max| p.x < max)
        };

        let ascending = self.first().x <= self.last().x;
        let (head, tail) = if ascending {
            (x_min, x_max)
        } else {
            (x_max, x_min)
        };

        let mut points = Vec::with_capacity(self.points.len() + 2);
        if let Some(x) = head {
            points.push(self.interpolate(x));
        }
        points.extend(self.points.iter().filter(|p| inside(p)).copied());
        if let Some(x) = tail {
            points.push(self.interpolate(x));
        }

        if points.len() < 2 {
            return Err(ProfileError::insufficient("trimmed contour", points.len(), 2));
        }
        Ok(Self { points })
    }

    /// Builds an intermediate contour between `self` and `other`.
    ///
    /// Both contours are resampled at `point_count` equal distance fractions
    /// and each pair is blended by `span_at_target / span_between`.
    pub fn blend(
        &self,
        other: &Contour,
        span_between: f64,
        span_at_target: f64,
        point_count: usize,
    ) -> ProfileResult<Self> {
        if point_count < 2 {
            return Err(ProfileError::insufficient("blended contour", point_count, 2));
        }
        let fraction = if span_between.abs() > f64::EPSILON {
            span_at_target / span_between
        } else {
            0.0
        };

        let last = (point_count - 1) as f64;
        let points = (0..point_count)
            .map(|i| {
                let pct = i as f64 / last;
                let a = self.interpolate_by_distance_percent(pct);
                let b = other.interpolate_by_distance_percent(pct);
                a.lerp(&b, fraction)
            })
            .collect();
        Ok(Self { points })
    }
}

fn point_on_segment(a: Point2D, b: Point2D, x: f64) -> Point2D {
    let dx = b.x - a.x;
    if dx.abs() < DEGENERATE_DX {
        let y = if (x - a.x).abs() <= (x - b.x).abs() { a.y } else { b.y };
        return Point2D::new(x, y);
    }
    let t = (x - a.x) / dx;
    Point2D::new(x, a.y + t * (b.y - a.y))
}

fn upward_normal(prev: Point2D, next: Point2D) -> Point2D {
    let dir = next - prev;
    let len = dir.x.hypot(dir.y);
    if len < f64::EPSILON {
        return Point2D::new(0.0, 1.0);
    }
    let normal = Point2D::new(-dir.y / len, dir.x / len);
    if normal.y < 0.0 {
        -normal
    } else {
        normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contour(points: &[(f64, f64)]) -> Contour {
        Contour::new(points.iter().map(|&p| p.into()).collect()).unwrap()
    }

    #[test]
    fn test_requires_two_points() {
        let err = Contour::new(vec![Point2D::new(0.0, 0.0)]).unwrap_err();
        assert!(matches!(
            err,
            ProfileError::InsufficientPoints { found: 1, required: 2, .. }
        ));
    }

    #[test]
    fn test_bounds_and_extremes() {
        let c = contour(&[(1.0, 0.0), (0.5, 0.2), (0.0, 0.0)]);
        let (min, max) = c.bounds();
        assert_eq!(min, Point2D::new(0.0, 0.0));
        assert_eq!(max, Point2D::new(1.0, 0.2));
        assert_eq!(c.left(), Point2D::new(0.0, 0.0));
        assert_eq!(c.right(), Point2D::new(1.0, 0.0));
    }

    #[test]
    fn test_interpolate_inside_range() {
        let c = contour(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        assert!(c.interpolate(0.5).approx_eq(&Point2D::new(0.5, 0.5), 1e-12));
        assert!(c.interpolate(1.5).approx_eq(&Point2D::new(1.5, 0.5), 1e-12));
    }

    #[test]
    fn test_interpolate_reversed_order() {
        let c = contour(&[(2.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        assert!(c.interpolate(1.5).approx_eq(&Point2D::new(1.5, 0.5), 1e-12));
    }

    #[test]
    fn test_interpolate_extrapolates_from_nearest_end() {
        let c = contour(&[(0.0, 0.0), (1.0, 1.0), (2.0, 1.0)]);
        assert!(c.interpolate(-1.0).approx_eq(&Point2D::new(-1.0, -1.0), 1e-12));
        assert!(c.interpolate(3.0).approx_eq(&Point2D::new(3.0, 1.0), 1e-12));
    }

    #[test]
    fn test_interpolate_vertical_segment_uses_endpoint() {
        let c = contour(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
        let p = c.interpolate(0.0);
        assert_eq!(p.x, 0.0);
        assert!(p.y.is_finite());
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn test_distance_percent_endpoints() {
        let c = contour(&[(0.0, 0.0), (3.0, 4.0), (6.0, 0.0)]);
        assert_eq!(c.length(), 10.0);
        assert_eq!(c.interpolate_by_distance_percent(0.0), c.first());
        assert_eq!(c.interpolate_by_distance_percent(1.0), c.last());
        assert!(c
            .interpolate_by_distance_percent(0.25)
            .approx_eq(&Point2D::new(1.5, 2.0), 1e-12));
        assert!(c
            .interpolate_by_distance_percent(0.5)
            .approx_eq(&Point2D::new(3.0, 4.0), 1e-12));
    }

    #[test]
    fn test_offset_moves_flat_contour_up() {
        let c = contour(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let up = c.offset(0.1);
        for p in up.points() {
            assert!((p.y - 0.1).abs() < 1e-12);
        }
        let reversed = contour(&[(2.0, 0.0), (1.0, 0.0), (0.0, 0.0)]);
        for p in reversed.offset(-0.1).points() {
            assert!((p.y + 0.1).abs() < 1e-12);
        }
    }

    #[test]
    fn test_trim_synthesizes_exact_bounds() {
        let c = contour(&[(0.0, 0.0), (0.5, 0.5), (1.0, 0.0)]);
        let t = c.trim(Some(0.25), Some(0.75)).unwrap();
        assert_eq!(t.first().x, 0.25);
        assert_eq!(t.last().x, 0.75);
        assert_eq!(t.len(), 3);

        let r = contour(&[(1.0, 0.0), (0.5, 0.5), (0.0, 0.0)]);
        let t = r.trim(Some(0.25), Some(0.75)).unwrap();
        assert_eq!(t.first().x, 0.75);
        assert_eq!(t.last().x, 0.25);
    }

    #[test]
    fn test_trim_with_single_bound() {
        let c = contour(&[(0.0, 0.0), (0.5, 0.5), (1.0, 0.0)]);
        let t = c.trim(None, Some(0.75)).unwrap();
        assert_eq!(t.first(), Point2D::new(0.0, 0.0));
        assert_eq!(t.last().x, 0.75);
    }

    #[test]
    fn test_blend_halfway() {
        let a = contour(&[(0.0, 0.0), (1.0, 0.0)]);
        let b = contour(&[(0.0, 1.0), (1.0, 1.0)]);
        let mid = a.blend(&b, 10.0, 5.0, 3).unwrap();
        assert_eq!(mid.len(), 3);
        for p in mid.points() {
            assert!((p.y - 0.5).abs() < 1e-12);
        }
        assert_eq!(mid.first().x, 0.0);
        assert_eq!(mid.last().x, 1.0);
    }
}
