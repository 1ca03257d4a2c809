//! Cut configuration for Hotwire
//!
//! A configuration file describes one panel cut: the machine it runs on and
//! the two ribs bounding the panel. JSON and TOML files are supported.
//!
//! Configuration is organized into two sections:
//! - Machine parameters (tower width, feed rate, units, kerf, heights, output format)
//! - Panel settings (panel width and the left and right ribs)

use hotwire_camtools::{Machine, MachineParameters, Panel, Rib};
use hotwire_core::{AirfoilProfile, Point2D, ProfileSource, Spar};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// One rib of the panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RibSettings {
    /// Path or `http(s)://` URL of the airfoil `.dat` file
    pub airfoil: String,
    /// Chord length
    pub chord: f64,
    /// Rotation in degrees
    pub rotation: f64,
    /// Material left behind the trailing edge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tail_stock: Option<f64>,
    /// Material left ahead of the leading edge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_stock: Option<f64>,
    /// Point the rotation is applied around
    pub rotation_origin: Point2D,
    /// Offset from the machine origin
    pub offset: Point2D,
    /// Spar cavity, in unit-chord coordinates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spar: Option<Spar>,
}

impl Default for RibSettings {
    fn default() -> Self {
        Self {
            airfoil: String::new(),
            chord: 1.0,
            rotation: 0.0,
            tail_stock: None,
            front_stock: None,
            rotation_origin: Point2D::ORIGIN,
            offset: Point2D::ORIGIN,
            spar: None,
        }
    }
}

impl RibSettings {
    fn validate(&self, key: &str) -> SettingsResult<()> {
        if self.airfoil.trim().is_empty() {
            return Err(ConfigError::MissingKey(format!("{}.airfoil", key)).into());
        }
        if !(self.chord > 0.0) {
            return Err(ConfigError::ValueOutOfRange {
                key: format!("{}.chord", key),
                value: self.chord.to_string(),
            }
            .into());
        }
        for (name, stock) in [("tail_stock", self.tail_stock), ("front_stock", self.front_stock)] {
            if let Some(stock) = stock {
                if !(stock >= 0.0) {
                    return Err(ConfigError::ValueOutOfRange {
                        key: format!("{}.{}", key, name),
                        value: stock.to_string(),
                    }
                    .into());
                }
            }
        }
        if let Some(spar) = &self.spar {
            if !(spar.radius > 0.0) {
                return Err(SettingsError::InvalidSetting {
                    key: format!("{}.spar.radius", key),
                    reason: "must be positive".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Where to load the airfoil from; relative paths are taken from `base_dir`.
    pub fn airfoil_source(&self, base_dir: Option<&Path>) -> SettingsResult<ProfileSource> {
        let source: ProfileSource = self.airfoil.parse()?;
        Ok(match (source, base_dir) {
            (ProfileSource::File(path), Some(base)) if path.is_relative() => {
                ProfileSource::File(base.join(path))
            }
            (source, _) => source,
        })
    }

    /// Load the airfoil and place it as a rib.
    pub fn build_rib(&self, base_dir: Option<&Path>) -> SettingsResult<Rib> {
        let source = self.airfoil_source(base_dir)?;
        tracing::debug!("Loading airfoil {:?}", source);
        let mut profile = AirfoilProfile::load(source)?;
        if let Some(spar) = self.spar {
            profile = profile.with_spar(spar.center, spar.radius);
        }

        let mut rib = Rib::new(profile)
            .with_chord(self.chord)
            .with_rotation(self.rotation, self.rotation_origin)
            .with_offset(self.offset);
        rib.tail_stock = self.tail_stock;
        rib.front_stock = self.front_stock;
        Ok(rib)
    }
}

/// The panel between the two ribs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSettings {
    /// Span between the ribs
    pub width: f64,
    pub left_rib: RibSettings,
    pub right_rib: RibSettings,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            width: 24.0,
            left_rib: RibSettings::default(),
            right_rib: RibSettings::default(),
        }
    }
}

/// Complete cut configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Machine parameters
    #[serde(default)]
    pub machine: MachineParameters,
    /// Panel and ribs
    #[serde(default)]
    pub panel: PanelSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        // Validate machine settings
        self.machine.validate()?;

        // Validate panel settings
        if !(self.panel.width > 0.0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "panel.width".to_string(),
                value: self.panel.width.to_string(),
            }
            .into());
        }
        if self.machine.panel_bump + self.panel.width > self.machine.width {
            return Err(SettingsError::InvalidSetting {
                key: "panel.width".to_string(),
                reason: format!(
                    "panel at {} with width {} exceeds machine width {}",
                    self.machine.panel_bump, self.panel.width, self.machine.width
                ),
            });
        }

        self.panel.left_rib.validate("panel.left_rib")?;
        self.panel.right_rib.validate("panel.right_rib")?;
        Ok(())
    }

    /// Load both airfoils and assemble the machine.
    ///
    /// Relative airfoil paths are resolved against `base_dir`, usually the
    /// directory holding the configuration file.
    pub fn build_machine(&self, base_dir: Option<&Path>) -> SettingsResult<Machine> {
        self.validate()?;
        let left = self.panel.left_rib.build_rib(base_dir)?;
        let right = self.panel.right_rib.build_rib(base_dir)?;
        let panel = Panel::new(left, right, self.panel.width);
        Ok(Machine::new(self.machine.clone(), panel)?)
    }
}

/// On-disk configuration formats, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(ConfigFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(ConfigFormat::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.map_or_else(|| path.display().to_string(), str::to_string),
            )
            .into()),
        }
    }
}
