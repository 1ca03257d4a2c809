//! Ribs and panels
//!
//! A [`Rib`] places an airfoil profile in the machine plane: it is scaled
//! to its chord, rotated (washout) and moved to its offset. A [`Panel`] is
//! the block of foam cut between two ribs.

use hotwire_core::{AirfoilProfile, Point2D, ProfileResult};
use hotwire_core::profile::DEFAULT_INTERPOLATION_POINTS;

/// One positioned airfoil cross-section
#[derive(Debug, Clone, PartialEq)]
pub struct Rib {
    /// Profile in unit-chord coordinates
    pub profile: AirfoilProfile,
    /// Chord length the profile is scaled to
    pub chord: f64,
    /// Rotation in degrees, counter-clockwise
    pub rotation: f64,
    /// Point the rotation is applied around, after scaling
    pub rotation_origin: Point2D,
    /// Offset from the machine origin
    pub offset: Point2D,
    /// Uncut material left behind the trailing edge
    pub tail_stock: Option<f64>,
    /// Uncut material left ahead of the leading edge
    pub front_stock: Option<f64>,
}

impl Rib {
    /// Unit chord, unrotated, at the origin
    pub fn new(profile: AirfoilProfile) -> Self {
        Self {
            profile,
            chord: 1.0,
            rotation: 0.0,
            rotation_origin: Point2D::ORIGIN,
            offset: Point2D::ORIGIN,
            tail_stock: None,
            front_stock: None,
        }
    }

    pub fn with_chord(mut self, chord: f64) -> Self {
        self.chord = chord;
        self
    }

    pub fn with_rotation(mut self, angle_deg: f64, origin: Point2D) -> Self {
        self.rotation = angle_deg;
        self.rotation_origin = origin;
        self
    }

    pub fn with_offset(mut self, offset: Point2D) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_tail_stock(mut self, stock: f64) -> Self {
        self.tail_stock = Some(stock);
        self
    }

    pub fn with_front_stock(mut self, stock: f64) -> Self {
        self.front_stock = Some(stock);
        self
    }

    /// The profile as it sits in the machine: scaled, rotated, then translated.
    pub fn positioned_profile(&self) -> AirfoilProfile {
        self.profile
            .scale(self.chord)
            .rotate(self.rotation_origin, self.rotation)
            .translate(self.offset)
    }
}

/// Foam block cut between two ribs
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub left_rib: Rib,
    pub right_rib: Rib,
    /// Span between the two ribs
    pub width: f64,
}

impl Panel {
    pub fn new(left_rib: Rib, right_rib: Rib, width: f64) -> Self {
        Self {
            left_rib,
            right_rib,
            width,
        }
    }

    /// Rib synthesized `span_at` along the panel from the left rib.
    ///
    /// The returned rib is already positioned; stock lengths are blended
    /// the same way as the profiles.
    pub fn interpolate_rib(&self, span_at: f64) -> ProfileResult<Rib> {
        let profile = AirfoilProfile::interpolate_new_profile(
            &self.left_rib.positioned_profile(),
            &self.right_rib.positioned_profile(),
            self.width,
            span_at,
            DEFAULT_INTERPOLATION_POINTS,
        )?;
        let t = if self.width.abs() > f64::EPSILON {
            span_at / self.width
        } else {
            0.0
        };
        let blend = |a: Option<f64>, b: Option<f64>| match (a, b) {
            (Some(a), Some(b)) => Some(a + (b - a) * t),
            (a, b) => a.or(b),
        };

        let mut rib = Rib::new(profile);
        rib.tail_stock = blend(self.left_rib.tail_stock, self.right_rib.tail_stock);
        rib.front_stock = blend(self.left_rib.front_stock, self.right_rib.front_stock);
        Ok(rib)
    }
}
