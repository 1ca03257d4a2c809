//! Four-axis hot-wire machine
//!
//! The wire runs between two towers. The left tower drives `x`/`y`, the
//! right tower `u`/`v`, and the foam panel sits between them, `panel_bump`
//! from the left tower.

use hotwire_core::{AirfoilProfile, Point2D, Units};
use serde::{Deserialize, Serialize};

use crate::cutting_strategy::{CuttingStrategy, StandardCuttingStrategy};
use crate::error::{CamToolError, CamToolResult, ParameterError};
use crate::gcode::{Axes, FormatterKind, Gcode};
use crate::panel::Panel;

/// Parameters for the hot-wire machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineParameters {
    /// Distance between the two towers
    pub width: f64,
    /// Cutting feed rate, in units per minute
    pub feedrate: f64,
    /// Program units
    pub units: Units,
    /// Kerf at the left and right rib
    pub kerf: (f64, f64),
    /// Samples taken along each surface of a profile
    pub profile_points: usize,
    /// Wire height for travel moves
    pub safe_height: f64,
    /// Height of the foam block
    pub foam_height: f64,
    /// Span from the left tower to the panel's left rib
    pub panel_bump: f64,
    /// Trim kerf-offset profiles where their surfaces cross
    pub trim_overlap: bool,
    /// Output dialect
    pub formatter: FormatterKind,
}

impl Default for MachineParameters {
    fn default() -> Self {
        Self {
            width: 40.0,
            feedrate: 5.0,
            units: Units::Inches,
            kerf: (0.075, 0.075),
            profile_points: 200,
            safe_height: 5.0,
            foam_height: 3.0,
            panel_bump: 1.0,
            trim_overlap: false,
            formatter: FormatterKind::Generic,
        }
    }
}

impl MachineParameters {
    /// Validate the parameters
    pub fn validate(&self) -> CamToolResult<()> {
        if self.profile_points == 0 {
            return Err(CamToolError::InvalidParameters(
                "profile_points must be positive".to_string(),
            ));
        }
        if !(self.foam_height >= 0.0) {
            return Err(CamToolError::InvalidParameters(format!(
                "foam_height must not be negative, got {}",
                self.foam_height
            )));
        }
        if !(self.width > 0.0) {
            return Err(ParameterError::InvalidDimensions(format!(
                "machine width must be positive, got {}",
                self.width
            ))
            .into());
        }
        if !(self.feedrate > 0.0) {
            return Err(ParameterError::OutOfRange {
                name: "feedrate".to_string(),
                value: self.feedrate,
                min: 0.0,
                max: f64::MAX,
            }
            .into());
        }
        if !(self.kerf.0.is_finite() && self.kerf.1.is_finite()) {
            return Err(ParameterError::InvalidValue {
                name: "kerf".to_string(),
                reason: "must be finite".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// Machine with the panel it is set up to cut
#[derive(Debug, Clone)]
pub struct Machine {
    params: MachineParameters,
    panel: Panel,
}

impl Machine {
    /// Create a machine, validating its parameters against the panel.
    pub fn new(params: MachineParameters, panel: Panel) -> CamToolResult<Self> {
        let machine = Self { params, panel };
        machine.validate()?;
        Ok(machine)
    }

    pub fn validate(&self) -> CamToolResult<()> {
        self.params.validate()?;
        if !(self.panel.width > 0.0) {
            return Err(ParameterError::InvalidDimensions(format!(
                "panel width must be positive, got {}",
                self.panel.width
            ))
            .into());
        }
        if self.params.panel_bump < 0.0
            || self.params.panel_bump + self.panel.width > self.params.width
        {
            return Err(CamToolError::InvalidParameters(format!(
                "panel of width {} at {} does not fit a machine of width {}",
                self.panel.width, self.params.panel_bump, self.params.width
            )));
        }
        Ok(())
    }

    pub fn params(&self) -> &MachineParameters {
        &self.params
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn kerf(&self) -> (f64, f64) {
        self.params.kerf
    }

    pub fn foam_height(&self) -> f64 {
        self.params.foam_height
    }

    pub fn profile_points(&self) -> usize {
        self.params.profile_points
    }

    pub fn safe_height(&self) -> f64 {
        self.params.safe_height
    }

    /// Tower positions that put the wire through `left` and `right`.
    ///
    /// `left` lies in the plane of the left rib and `right` in the plane of
    /// the right rib. The wire through both is extended to the towers.
    pub fn calculate_move(&self, left: Point2D, right: Point2D) -> Axes {
        let bump = self.params.panel_bump;
        let span = self.panel.width;
        if span.abs() < f64::EPSILON {
            return Axes::full(left.x, left.y, right.x, right.y);
        }

        let along = right - left;
        let at_left_tower = left - along * (bump / span);
        let at_right_tower = left + along * ((self.params.width - bump) / span);
        Axes::full(
            at_left_tower.x,
            at_left_tower.y,
            at_right_tower.x,
            at_right_tower.y,
        )
    }

    /// Rib profiles with kerf applied, trimmed if requested.
    pub fn cut_profiles(&self) -> CamToolResult<(AirfoilProfile, AirfoilProfile)> {
        let (left_kerf, right_kerf) = self.params.kerf;
        let mut left = self
            .panel
            .left_rib
            .positioned_profile()
            .offset_around(left_kerf, left_kerf);
        let mut right = self
            .panel
            .right_rib
            .positioned_profile()
            .offset_around(right_kerf, right_kerf);

        if self.params.trim_overlap {
            left = left.trim_overlap()?;
            right = right.trim_overlap()?;
        }
        Ok((left, right))
    }

    /// Run the standard cutting strategy.
    pub fn generate_gcode(&self) -> CamToolResult<Gcode> {
        self.generate_gcode_with(&StandardCuttingStrategy::default())
    }

    /// Run `strategy` into a fresh program and normalize it.
    pub fn generate_gcode_with(&self, strategy: &dyn CuttingStrategy) -> CamToolResult<Gcode> {
        self.validate()?;
        tracing::info!(
            "Generating toolpath with {} strategy ({} points per surface)",
            strategy.name(),
            self.params.profile_points
        );

        let (left, right) = self.cut_profiles()?;
        let mut gcode = Gcode::new(self.params.feedrate, self.params.units.clone());
        strategy.cut(self, &left, &right, &mut gcode)?;

        if gcode.is_empty() {
            return Err(CamToolError::GenerationFailed(format!(
                "{} strategy produced no commands",
                strategy.name()
            )));
        }
        gcode.normalize();
        tracing::info!("Generated {} motion commands", gcode.len());
        Ok(gcode)
    }

    /// Generate the program text with the configured formatter.
    pub fn generate(&self) -> CamToolResult<String> {
        let gcode = self.generate_gcode()?;
        Ok(gcode.render(self.params.formatter.formatter().as_ref()))
    }
}
