//! G-code dialects
//!
//! A formatter turns fully resolved machine positions into text lines and
//! supplies the program preamble and postamble.

use hotwire_core::Units;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::MachinePosition;

/// Serializer for one G-code dialect
pub trait GcodeFormatter {
    /// Lines emitted before the first command.
    fn start_commands(&self, feedrate: f64, units: &Units) -> Vec<String>;

    /// Lines emitted after the last command.
    fn end_commands(&self, _feedrate: f64, _units: &Units) -> Vec<String> {
        Vec::new()
    }

    fn process_move(&self, position: &MachinePosition) -> String;

    fn process_fast_move(&self, position: &MachinePosition) -> String;

    fn process_dwell(&self, seconds: f64) -> String;
}

/// Generic RS-274 output, as accepted by LinuxCNC
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericGcodeFormatter;

impl GenericGcodeFormatter {
    fn motion(word: &str, p: &MachinePosition) -> String {
        format!(
            "{} x{:.10} y{:.10} u{:.10} v{:.10}",
            word, p.x, p.y, p.u, p.v
        )
    }
}

impl GcodeFormatter for GenericGcodeFormatter {
    fn start_commands(&self, feedrate: f64, units: &Units) -> Vec<String> {
        let mut out = Vec::new();
        out.push(format!("F{}", feedrate));
        // XY working plane
        out.push("G17".to_string());
        match units.gcode_word() {
            Some(word) => out.push(word.to_string()),
            None => out.push(format!("(Unknown units '{}' specified!)", units)),
        }
        out.push("G90".to_string());
        // Blended path control with the unit's tolerance
        match (units, units.path_tolerance()) {
            (Units::Millimeters, Some(tolerance)) => out.push(format!("G64 P{:.2}", tolerance)),
            (_, Some(tolerance)) => out.push(format!("G64 P{:.6}", tolerance)),
            (_, None) => {}
        }
        out.push("G54".to_string());
        out
    }

    fn end_commands(&self, _feedrate: f64, _units: &Units) -> Vec<String> {
        vec!["M30".to_string()]
    }

    fn process_move(&self, position: &MachinePosition) -> String {
        Self::motion("G1", position)
    }

    fn process_fast_move(&self, position: &MachinePosition) -> String {
        Self::motion("G0", position)
    }

    fn process_dwell(&self, seconds: f64) -> String {
        format!("G4 P{:.10}", seconds)
    }
}

/// Tab separated dump of the command stream, for inspection
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugGcodeFormatter;

impl DebugGcodeFormatter {
    fn line(tag: &str, values: &[f64]) -> String {
        let mut fields = vec![tag.to_string()];
        fields.extend(values.iter().map(|v| format!("{:.10}", v)));
        fields.join("\t")
    }
}

impl GcodeFormatter for DebugGcodeFormatter {
    fn start_commands(&self, feedrate: f64, units: &Units) -> Vec<String> {
        vec![format!("Units: {}", units), format!("Feedrate: {}", feedrate)]
    }

    fn process_move(&self, p: &MachinePosition) -> String {
        Self::line("MOVE", &[p.x, p.y, p.u, p.v])
    }

    fn process_fast_move(&self, p: &MachinePosition) -> String {
        Self::line("FAST_MOVE", &[p.x, p.y, p.u, p.v])
    }

    fn process_dwell(&self, seconds: f64) -> String {
        Self::line("DWELL", &[seconds])
    }
}

/// Registered formatters, selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatterKind {
    /// [`GenericGcodeFormatter`]
    #[default]
    Generic,
    /// [`DebugGcodeFormatter`]
    Debug,
}

impl FormatterKind {
    /// Look up a formatter by name, case-insensitively.
    ///
    /// Accepts `generic`, `default`, `debug` and the type names
    /// (`GenericGcodeFormatter`, `DebugGcodeFormatter`). Unknown names are
    /// logged and resolve to the default formatter.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "generic" | "default" | "genericgcodeformatter" => FormatterKind::Generic,
            "debug" | "debuggcodeformatter" => FormatterKind::Debug,
            other => {
                tracing::error!(
                    "Unknown G-code formatter '{}', falling back to {}",
                    other,
                    FormatterKind::default()
                );
                FormatterKind::default()
            }
        }
    }

    pub fn formatter(&self) -> Box<dyn GcodeFormatter> {
        match self {
            FormatterKind::Generic => Box::new(GenericGcodeFormatter),
            FormatterKind::Debug => Box::new(DebugGcodeFormatter),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FormatterKind::Generic => "generic",
            FormatterKind::Debug => "debug",
        }
    }
}

impl fmt::Display for FormatterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
