//! Machine unit handling
//!
//! Hot-wire machines are driven either in inches or millimeters. Anything
//! else is carried through verbatim so the formatters can flag it in the
//! generated program instead of refusing to produce one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Linear units of a machine program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Units {
    /// Inches (G20)
    Inches,
    /// Millimeters (G21)
    Millimeters,
    /// Unrecognized unit name, kept as given
    Unknown(String),
}

impl Default for Units {
    fn default() -> Self {
        Self::Inches
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inches => write!(f, "inches"),
            Self::Millimeters => write!(f, "millimeters"),
            Self::Unknown(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for Units {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "inches" | "inch" | "in" => Self::Inches,
            "millimeters" | "millimeter" | "mm" => Self::Millimeters,
            _ => Self::Unknown(s.to_string()),
        })
    }
}

impl From<String> for Units {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(units) => units,
            Err(never) => match never {},
        }
    }
}

impl From<Units> for String {
    fn from(value: Units) -> Self {
        value.to_string()
    }
}

impl Units {
    /// G-code word selecting these units, if they are known
    pub fn gcode_word(&self) -> Option<&'static str> {
        match self {
            Self::Inches => Some("G20"),
            Self::Millimeters => Some("G21"),
            Self::Unknown(_) => None,
        }
    }

    /// Blended path tolerance used with `G64 P<tol>`
    pub fn path_tolerance(&self) -> Option<f64> {
        match self {
            Self::Inches => Some(1.0 / 64.0),
            Self::Millimeters => Some(0.5),
            Self::Unknown(_) => None,
        }
    }
}
