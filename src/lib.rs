//! # Hotwire
//!
//! Offline toolpath compiler for four-axis hot-wire CNC foam cutters.
//!
//! Two airfoil ribs are cut at once by a single heated wire. Each end of the
//! wire traces its own rib while both ends stay synchronized, so tapered and
//! twisted panels come out of one pass.
//!
//! ## Architecture
//!
//! Hotwire is organized as a workspace with multiple crates:
//!
//! 1. **hotwire-core** - Points, contours, airfoil profiles and `.dat` loading
//! 2. **hotwire-camtools** - Machine model, cutting strategy, G-code sinks and formatters
//! 3. **hotwire-settings** - JSON/TOML cut configuration files
//! 4. **hotwire** - Command-line binary that ties them together

pub use hotwire_core::{
    AirfoilProfile, Contour, Point2D, ProfileError, ProfileResult, ProfileSource, Spar, Units,
};

pub use hotwire_camtools::{
    Axes, CamToolError, CamToolResult, CommandSink, CuttingStrategy, DebugGcodeFormatter,
    FormatterKind, Gcode, GcodeFormatter, GenericGcodeFormatter, Machine, MachineParameters,
    MotionCommand, MoveFlags, Panel, Rib, StandardCuttingStrategy,
};

pub use hotwire_settings::{Config, ConfigError, PanelSettings, RibSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Log lines go to stderr so generated G-code can be piped from stdout.
/// `RUST_LOG` overrides the default `info` level.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
