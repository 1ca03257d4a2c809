//! Airfoil profiles
//!
//! An [`AirfoilProfile`] is a top and a bottom [`Contour`] plus an optional
//! circular spar. Profiles are values: every transform returns a new
//! profile and carries the spar along.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::airfoil_dat;
use crate::contour::Contour;
use crate::error::{ProfileError, ProfileResult};
use crate::point::Point2D;

/// Refinement passes allowed when narrowing a convergence bracket.
const CONVERGENCE_ITERATIONS: usize = 100;
/// Samples taken across each bracket.
const CONVERGENCE_STEPS: usize = 100;
/// Bracket width at which a convergence point is accepted.
const CONVERGENCE_ACCURACY: f64 = 1e-6;
/// Point count used when interpolating a new profile.
pub const DEFAULT_INTERPOLATION_POINTS: usize = 200;

/// Circular spar cavity cut through the profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spar {
    pub center: Point2D,
    pub radius: f64,
}

impl Spar {
    pub fn new(center: Point2D, radius: f64) -> Self {
        Self { center, radius }
    }
}

/// Where the coordinates of a profile come from
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileSource {
    /// Local `.dat` file
    File(PathBuf),
    /// `.dat` file served over HTTP(S)
    Url(String),
    /// Raw coordinates, split into top and bottom on load
    Coordinates(Vec<Point2D>),
    /// Already split surfaces
    Contours(Contour, Contour),
}

impl FromStr for ProfileSource {
    type Err = ProfileError;

    /// Classifies a location as a URL when it mentions `http://` or `https://`,
    /// otherwise as a file path.
    fn from_str(s: &str) -> ProfileResult<Self> {
        let location = s.trim();
        if location.is_empty() {
            return Err(ProfileError::InvalidArguments {
                reason: "empty airfoil location".to_string(),
            });
        }
        if location.contains("http://") || location.contains("https://") {
            Ok(Self::Url(location.to_string()))
        } else {
            Ok(Self::File(PathBuf::from(location)))
        }
    }
}

/// Cross-section of a wing: top surface, bottom surface and optional spar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirfoilProfile {
    top: Contour,
    bottom: Contour,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    spar: Option<Spar>,
}

impl AirfoilProfile {
    /// Load a profile from any [`ProfileSource`].
    pub fn load(source: ProfileSource) -> ProfileResult<Self> {
        match source {
            ProfileSource::File(path) => Self::from_file(path),
            ProfileSource::Url(url) => Self::from_url(&url),
            ProfileSource::Coordinates(points) => Self::from_coordinates(&points),
            ProfileSource::Contours(top, bottom) => Ok(Self::from_contours(top, bottom)),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> ProfileResult<Self> {
        let points = airfoil_dat::read_dat_file(path)?;
        Self::from_coordinates(&points)
    }

    pub fn from_url(url: &str) -> ProfileResult<Self> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ProfileError::InvalidArguments {
                reason: format!("unsupported URL scheme in '{}'", url),
            });
        }
        let points = airfoil_dat::fetch_dat_url(url)?;
        Self::from_coordinates(&points)
    }

    /// Build a profile from a single run of coordinates.
    ///
    /// The leading-edge direction is decided by a vote over the x deltas of
    /// the first four pairs. Runs that start by increasing in x are split at
    /// the first maximum-x point; a remainder that also increases is a
    /// Lednicer bottom and is used as is. Otherwise (Selig) the run is split at
    /// the first minimum-x point and both sides share that point. A bottom
    /// that does not end back at the top's first x is closed with the first
    /// coordinate.
    pub fn from_coordinates(points: &[Point2D]) -> ProfileResult<Self> {
        if points.len() < 3 {
            return Err(ProfileError::insufficient("airfoil coordinates", points.len(), 3));
        }

        let pairs = (points.len() - 1).min(4);
        let increasing = points
            .windows(2)
            .take(pairs)
            .filter(|pair| pair[1].x > pair[0].x)
            .count();
        let increasing = increasing > pairs - increasing;

        let (top, mut bottom) = if increasing {
            let split = index_of_first(points, |best, p| p.x > best.x);
            let top = points[..=split].to_vec();
            let rest = &points[split + 1..];
            if rest.len() >= 2 && rest[0].x < rest[rest.len() - 1].x {
                tracing::debug!("Splitting Lednicer coordinates at index {}", split);
                return Self::from_sides(top, rest.to_vec());
            }
            (top, points[split..].to_vec())
        } else {
            let split = index_of_first(points, |best, p| p.x < best.x);
            (points[..=split].to_vec(), points[split..].to_vec())
        };
        tracing::debug!(
            "Splitting {} coordinates ({}) into {} top / {} bottom",
            points.len(),
            if increasing { "increasing" } else { "decreasing" },
            top.len(),
            bottom.len()
        );

        if let (Some(first), Some(last)) = (top.first(), bottom.last()) {
            if last.x != first.x {
                bottom.push(*first);
            }
        }
        Self::from_sides(top, bottom)
    }

    fn from_sides(top: Vec<Point2D>, bottom: Vec<Point2D>) -> ProfileResult<Self> {
        if top.len() < 2 {
            return Err(ProfileError::insufficient("top contour", top.len(), 2));
        }
        if bottom.len() < 2 {
            return Err(ProfileError::insufficient("bottom contour", bottom.len(), 2));
        }
        Ok(Self::from_contours(Contour::new(top)?, Contour::new(bottom)?))
    }

    pub fn from_contours(top: Contour, bottom: Contour) -> Self {
        Self {
            top,
            bottom,
            spar: None,
        }
    }

    /// Attach a spar cavity
    pub fn with_spar(mut self, center: Point2D, radius: f64) -> Self {
        self.spar = Some(Spar::new(center, radius));
        self
    }

    fn with_spar_opt(mut self, spar: Option<Spar>) -> Self {
        self.spar = spar;
        self
    }

    pub fn top(&self) -> &Contour {
        &self.top
    }

    pub fn bottom(&self) -> &Contour {
        &self.bottom
    }

    pub fn spar(&self) -> Option<&Spar> {
        self.spar.as_ref()
    }

    /// (min x, max x) over both surfaces
    pub fn x_bounds(&self) -> (f64, f64) {
        let min = self.top.left().x.min(self.bottom.left().x);
        let max = self.top.right().x.max(self.bottom.right().x);
        (min, max)
    }

    /// (min y, max y) over both surfaces
    pub fn y_bounds(&self) -> (f64, f64) {
        let (top_min, top_max) = self.top.bounds();
        let (bottom_min, bottom_max) = self.bottom.bounds();
        (top_min.y.min(bottom_min.y), top_max.y.max(bottom_max.y))
    }

    /// Point at the leftmost x, halfway between the two surfaces
    pub fn left_midpoint(&self) -> Point2D {
        self.midpoint_at(self.x_bounds().0)
    }

    /// Point at the rightmost x, halfway between the two surfaces
    pub fn right_midpoint(&self) -> Point2D {
        self.midpoint_at(self.x_bounds().1)
    }

    fn midpoint_at(&self, x: f64) -> Point2D {
        let top = self.top.interpolate(x);
        let bottom = self.bottom.interpolate(x);
        Point2D::new(x, (top.y + bottom.y) / 2.0)
    }

    fn map_contours(&self, f: impl Fn(&Contour) -> Contour) -> Self {
        Self {
            top: f(&self.top),
            bottom: f(&self.bottom),
            spar: self.spar,
        }
    }

    pub fn rotate(&self, origin: Point2D, angle_deg: f64) -> Self {
        let mut rotated = self.map_contours(|c| c.rotate(origin, angle_deg));
        rotated.spar = self.spar.map(|s| Spar::new(s.center.rotate(origin, angle_deg), s.radius));
        rotated
    }

    /// Scale about the origin; the spar center and radius scale too.
    pub fn scale(&self, factor: f64) -> Self {
        let mut scaled = self.map_contours(|c| c.scale(factor));
        scaled.spar = self.spar.map(|s| Spar::new(s.center.scale(factor), s.radius * factor));
        scaled
    }

    pub fn translate(&self, offset: Point2D) -> Self {
        let mut moved = self.map_contours(|c| c.translate(offset));
        moved.spar = self.spar.map(|s| Spar::new(s.center.translate(offset), s.radius));
        moved
    }

    /// Grow the top by `top_offset` and the bottom by `bottom_offset`.
    ///
    /// The bottom offset is negated so positive values grow both surfaces
    /// away from the profile.
    pub fn offset_around(&self, top_offset: f64, bottom_offset: f64) -> Self {
        Self {
            top: self.top.offset(top_offset),
            bottom: self.bottom.offset(-bottom_offset),
            spar: self.spar,
        }
    }

    pub fn trim(&self, x_min: Option<f64>, x_max: Option<f64>) -> ProfileResult<Self> {
        Ok(Self {
            top: self.top.trim(x_min, x_max)?,
            bottom: self.bottom.trim(x_min, x_max)?,
            spar: self.spar,
        })
    }

    /// Trim both surfaces to where they cross.
    ///
    /// Sides without a crossing keep the current x-bound.
    pub fn trim_overlap(&self) -> ProfileResult<Self> {
        let (left, right) = self.find_convergence_points();
        let (min_x, max_x) = self.x_bounds();
        let x_min = left.unwrap_or(min_x);
        let x_max = right.unwrap_or(max_x);
        tracing::debug!("Trimming profile overlap to [{}, {}]", x_min, x_max);
        self.trim(Some(x_min), Some(x_max))
    }

    /// Synthesize a profile `span_at` along a span of `span_between` from `p1` to `p2`.
    ///
    /// Both surfaces are resampled at `points` positions. Spars are blended
    /// when both profiles carry one; otherwise whichever exists is kept.
    pub fn interpolate_new_profile(
        p1: &AirfoilProfile,
        p2: &AirfoilProfile,
        span_between: f64,
        span_at: f64,
        points: usize,
    ) -> ProfileResult<Self> {
        let top = p1.top.blend(&p2.top, span_between, span_at, points)?;
        let bottom = p1.bottom.blend(&p2.bottom, span_between, span_at, points)?;

        let spar = match (p1.spar, p2.spar) {
            (Some(a), Some(b)) => {
                let t = if span_between.abs() > f64::EPSILON {
                    span_at / span_between
                } else {
                    0.0
                };
                Some(Spar::new(
                    a.center.lerp(&b.center, t),
                    a.radius + (b.radius - a.radius) * t,
                ))
            }
            (a, b) => a.or(b),
        };
        Ok(Self::from_contours(top, bottom).with_spar_opt(spar))
    }

    /// Locate where the top surface dips below the bottom.
    ///
    /// Searches from the x midpoint toward each bound. Returns the left and
    /// right crossing, `None` for a side without one. Identical results on
    /// both sides are reported as `(None, None)`.
    pub fn find_convergence_points(&self) -> (Option<f64>, Option<f64>) {
        let (left_bound, right_bound) = self.x_bounds();
        let midpoint = (left_bound + right_bound) / 2.0;

        let left = self.find_convergence_point(midpoint, left_bound);
        let right = self.find_convergence_point(midpoint, right_bound);
        tracing::debug!("Convergence points: left={:?} right={:?}", left, right);

        if left == right {
            return (None, None);
        }
        (left, right)
    }

    fn find_convergence_point(&self, start: f64, stop: f64) -> Option<f64> {
        let (mut outside, mut inside) = self.find_crossing_bracket(start, stop)?;
        for _ in 0..CONVERGENCE_ITERATIONS {
            if (outside - inside).abs() < CONVERGENCE_ACCURACY {
                return Some((outside + inside) / 2.0);
            }
            // `outside` is known to have crossed
            let last_sample = sample_x(inside, outside, CONVERGENCE_STEPS - 1);
            (outside, inside) = self
                .find_crossing_bracket(inside, outside)
                .unwrap_or((outside, last_sample));
        }
        None
    }

    /// Walk from `start` toward `stop` (exclusive) and return `(first
    /// negative x, last non-negative x)` for the first sample where the
    /// surfaces have crossed.
    fn find_crossing_bracket(&self, start: f64, stop: f64) -> Option<(f64, f64)> {
        let mut previous = start;
        for k in 0..CONVERGENCE_STEPS {
            let x = sample_x(start, stop, k);
            if self.thickness_at(x) < 0.0 {
                return Some((x, previous));
            }
            previous = x;
        }
        None
    }

    fn thickness_at(&self, x: f64) -> f64 {
        self.top.interpolate(x).y - self.bottom.interpolate(x).y
    }
}

/// The `k`th of `CONVERGENCE_STEPS` equal steps from `start` toward `stop`.
fn sample_x(start: f64, stop: f64, k: usize) -> f64 {
    start + (stop - start) * k as f64 / CONVERGENCE_STEPS as f64
}

fn index_of_first(points: &[Point2D], better: impl Fn(&Point2D, &Point2D) -> bool) -> usize {
    let mut best = 0;
    for (i, p) in points.iter().enumerate().skip(1) {
        if better(&points[best], p) {
            best = i;
        }
    }
    best
}

impl Add<Point2D> for AirfoilProfile {
    type Output = AirfoilProfile;

    fn add(self, rhs: Point2D) -> AirfoilProfile {
        self.translate(rhs)
    }
}

impl Sub<Point2D> for AirfoilProfile {
    type Output = AirfoilProfile;

    fn sub(self, rhs: Point2D) -> AirfoilProfile {
        self.translate(-rhs)
    }
}

impl Mul<f64> for AirfoilProfile {
    type Output = AirfoilProfile;

    fn mul(self, rhs: f64) -> AirfoilProfile {
        self.scale(rhs)
    }
}
