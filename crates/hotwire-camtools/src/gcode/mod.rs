//! Motion command recording
//!
//! Cutting strategies talk to a [`CommandSink`]. The [`Gcode`] sink keeps an
//! append-only log of [`MotionCommand`]s that can be normalized to the
//! machine origin and rendered through a [`GcodeFormatter`].

pub mod formatter;

pub use formatter::{DebugGcodeFormatter, FormatterKind, GcodeFormatter, GenericGcodeFormatter};

use hotwire_core::Units;
use serde::{Deserialize, Serialize};

/// Partial four-axis position
///
/// `x`/`y` drive the left tower, `u`/`v` the right tower. Missing axes keep
/// their previous value when the command is executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Axes {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub u: Option<f64>,
    pub v: Option<f64>,
}

impl Axes {
    pub fn full(x: f64, y: f64, u: f64, v: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            u: Some(u),
            v: Some(v),
        }
    }

    /// Horizontal axes only (x and u)
    pub fn horizontal(x: f64, u: f64) -> Self {
        Self {
            x: Some(x),
            u: Some(u),
            ..Self::default()
        }
    }

    /// Vertical axes only (y and v)
    pub fn vertical(y: f64, v: f64) -> Self {
        Self {
            y: Some(y),
            v: Some(v),
            ..Self::default()
        }
    }

    /// Keep only the horizontal axes of this position
    pub fn horizontal_part(&self) -> Self {
        Self {
            x: self.x,
            u: self.u,
            ..Self::default()
        }
    }

    /// Applies the present axes to `position`
    pub fn apply_to(&self, position: &mut MachinePosition) {
        if let Some(x) = self.x {
            position.x = x;
        }
        if let Some(y) = self.y {
            position.y = y;
        }
        if let Some(u) = self.u {
            position.u = u;
        }
        if let Some(v) = self.v {
            position.v = v;
        }
    }

    fn shifted(&self, horizontal: f64, vertical: f64) -> Self {
        Self {
            x: self.x.map(|x| x - horizontal),
            y: self.y.map(|y| y - vertical),
            u: self.u.map(|u| u - horizontal),
            v: self.v.map(|v| v - vertical),
        }
    }
}

/// Fully known four-axis position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MachinePosition {
    pub x: f64,
    pub y: f64,
    pub u: f64,
    pub v: f64,
}

/// Per-command options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveFlags {
    /// Leave this command untouched by [`Gcode::normalize`]
    pub do_not_normalize: bool,
}

impl MoveFlags {
    pub const NONE: MoveFlags = MoveFlags {
        do_not_normalize: false,
    };
    pub const DO_NOT_NORMALIZE: MoveFlags = MoveFlags {
        do_not_normalize: true,
    };
}

/// One recorded motion command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MotionCommand {
    FastMove { axes: Axes, flags: MoveFlags },
    Move { axes: Axes, flags: MoveFlags },
    Dwell { seconds: f64 },
}

impl MotionCommand {
    /// Short tag naming the command kind
    pub fn tag(&self) -> &'static str {
        match self {
            MotionCommand::FastMove { .. } => "FAST_MOVE",
            MotionCommand::Move { .. } => "MOVE",
            MotionCommand::Dwell { .. } => "DWELL",
        }
    }

    /// Axes of a move, `None` for dwells
    pub fn axes(&self) -> Option<&Axes> {
        match self {
            MotionCommand::FastMove { axes, .. } | MotionCommand::Move { axes, .. } => Some(axes),
            MotionCommand::Dwell { .. } => None,
        }
    }

    fn is_normalizable(&self) -> bool {
        match self {
            MotionCommand::FastMove { flags, .. } | MotionCommand::Move { flags, .. } => {
                !flags.do_not_normalize
            }
            MotionCommand::Dwell { .. } => false,
        }
    }
}

/// Receiver of the motion commands emitted by a cutting strategy
pub trait CommandSink {
    /// Rapid positioning move
    fn fast_move(&mut self, axes: Axes, flags: MoveFlags);
    /// Cutting move at the program feed rate
    fn move_to(&mut self, axes: Axes, flags: MoveFlags);
    /// Pause in place, letting the wire settle
    fn dwell(&mut self, seconds: f64);
}

/// Append-only command log for one cutting run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gcode {
    commands: Vec<MotionCommand>,
    feedrate: f64,
    units: Units,
}

impl Gcode {
    pub fn new(feedrate: f64, units: Units) -> Self {
        Self {
            commands: Vec::new(),
            feedrate,
            units,
        }
    }

    pub fn commands(&self) -> &[MotionCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn feedrate(&self) -> f64 {
        self.feedrate
    }

    pub fn units(&self) -> &Units {
        &self.units
    }

    /// Shift the program so the cut starts at the machine origin.
    ///
    /// The smallest horizontal (x, u) and vertical (y, v) values over the
    /// normalizable moves are subtracted from those moves. Commands flagged
    /// `do_not_normalize` keep their absolute values.
    pub fn normalize(&mut self) {
        let mut min_horizontal: Option<f64> = None;
        let mut min_vertical: Option<f64> = None;
        let fold_min = |acc: Option<f64>, value: Option<f64>| match (acc, value) {
            (Some(a), Some(v)) => Some(a.min(v)),
            (None, v) => v,
            (a, None) => a,
        };

        for axes in self
            .commands
            .iter()
            .filter(|c| c.is_normalizable())
            .filter_map(MotionCommand::axes)
        {
            min_horizontal = fold_min(fold_min(min_horizontal, axes.x), axes.u);
            min_vertical = fold_min(fold_min(min_vertical, axes.y), axes.v);
        }

        let horizontal = min_horizontal.unwrap_or(0.0);
        let vertical = min_vertical.unwrap_or(0.0);
        tracing::debug!(
            "Normalizing program by ({}, {}) over {} commands",
            horizontal,
            vertical,
            self.commands.len()
        );

        for command in &mut self.commands {
            if !command.is_normalizable() {
                continue;
            }
            if let MotionCommand::FastMove { axes, .. } | MotionCommand::Move { axes, .. } =
                command
            {
                *axes = axes.shifted(horizontal, vertical);
            }
        }
    }

    /// Render the program with `formatter`.
    ///
    /// Axes missing from a move are filled from the position reached by the
    /// previous moves, starting at the origin.
    pub fn render(&self, formatter: &dyn GcodeFormatter) -> String {
        let mut lines = formatter.start_commands(self.feedrate, &self.units);
        let mut position = MachinePosition::default();

        for command in &self.commands {
            let line = match command {
                MotionCommand::FastMove { axes, .. } => {
                    axes.apply_to(&mut position);
                    formatter.process_fast_move(&position)
                }
                MotionCommand::Move { axes, .. } => {
                    axes.apply_to(&mut position);
                    formatter.process_move(&position)
                }
                MotionCommand::Dwell { seconds } => formatter.process_dwell(*seconds),
            };
            lines.push(line);
        }

        lines.extend(formatter.end_commands(self.feedrate, &self.units));
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// Render with the formatter registered under `name`, falling back to the default.
    pub fn render_named(&self, name: &str) -> String {
        let kind = FormatterKind::from_name(name);
        self.render(kind.formatter().as_ref())
    }
}

impl CommandSink for Gcode {
    fn fast_move(&mut self, axes: Axes, flags: MoveFlags) {
        self.commands.push(MotionCommand::FastMove { axes, flags });
    }

    fn move_to(&mut self, axes: Axes, flags: MoveFlags) {
        self.commands.push(MotionCommand::Move { axes, flags });
    }

    fn dwell(&mut self, seconds: f64) {
        self.commands.push(MotionCommand::Dwell { seconds });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_partial_axes() {
        let mut pos = MachinePosition::default();
        Axes::horizontal(1.0, 2.0).apply_to(&mut pos);
        Axes::vertical(3.0, 4.0).apply_to(&mut pos);
        assert_eq!(
            pos,
            MachinePosition {
                x: 1.0,
                y: 3.0,
                u: 2.0,
                v: 4.0
            }
        );
    }

    #[test]
    fn test_normalize_skips_flagged_commands() {
        let mut gc = Gcode::new(5.0, Units::Inches);
        gc.fast_move(Axes::vertical(10.0, 10.0), MoveFlags::DO_NOT_NORMALIZE);
        gc.move_to(Axes::full(2.0, 1.0, 3.0, 0.5), MoveFlags::NONE);
        gc.move_to(Axes::full(4.0, 2.0, 5.0, 1.5), MoveFlags::NONE);
        gc.dwell(1.0);
        gc.normalize();

        assert_eq!(
            gc.commands()[0],
            MotionCommand::FastMove {
                axes: Axes::vertical(10.0, 10.0),
                flags: MoveFlags::DO_NOT_NORMALIZE
            }
        );
        assert_eq!(
            gc.commands()[1].axes(),
            Some(&Axes::full(0.0, 0.5, 1.0, 0.0))
        );
        assert_eq!(
            gc.commands()[2].axes(),
            Some(&Axes::full(2.0, 1.5, 3.0, 1.0))
        );
        assert_eq!(gc.commands()[3], MotionCommand::Dwell { seconds: 1.0 });
    }

    #[test]
    fn test_render_fills_missing_axes() {
        let mut gc = Gcode::new(5.0, Units::Millimeters);
        gc.fast_move(Axes::horizontal(1.0, 2.0), MoveFlags::NONE);
        gc.move_to(Axes::vertical(0.5, 0.25), MoveFlags::NONE);
        gc.dwell(2.0);

        let out = gc.render(&GenericGcodeFormatter);
        let body: Vec<&str> = out
            .lines()
            .filter(|l| l.starts_with("G0 ") || l.starts_with("G1 ") || l.starts_with("G4"))
            .collect();
        assert_eq!(
            body,
            vec![
                "G0 x1.0000000000 y0.0000000000 u2.0000000000 v0.0000000000",
                "G1 x1.0000000000 y0.5000000000 u2.0000000000 v0.2500000000",
                "G4 P2.0000000000",
            ]
        );
        assert!(out.ends_with("M30\n"));
    }

    #[test]
    fn test_render_named_falls_back_to_generic() {
        let mut gc = Gcode::new(5.0, Units::Inches);
        gc.move_to(Axes::full(0.0, 0.0, 0.0, 0.0), MoveFlags::NONE);
        assert_eq!(gc.render_named("no-such-format"), gc.render(&GenericGcodeFormatter));
        assert!(gc.render_named("debug").starts_with("Units: inches"));
    }
}
