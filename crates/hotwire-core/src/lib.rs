//! # Hotwire Core
//!
//! Geometry engine for the Hotwire foam cutter toolpath compiler.
//! Provides the fundamental 2D types and the airfoil model consumed by
//! the cutting strategies:
//!
//! - [`Point2D`]: immutable 2D coordinate with rigid transforms
//! - [`Contour`]: one open, directed side of an airfoil cross-section
//! - [`AirfoilProfile`]: top and bottom contours plus an optional spar
//! - [`airfoil_dat`]: Selig/Lednicer `.dat` parsing and URL fetching

pub mod airfoil_dat;
pub mod contour;
pub mod error;
pub mod point;
pub mod profile;
pub mod units;

pub use contour::Contour;
pub use error::{ProfileError, ProfileResult};
pub use point::Point2D;
pub use profile::{AirfoilProfile, ProfileSource, Spar};
pub use units::Units;
