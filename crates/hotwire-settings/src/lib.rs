//! Hotwire Settings Crate
//!
//! Handles cut configuration files: loading, validation, saving, and
//! assembling a ready [`hotwire_camtools::Machine`] from them.

pub mod config;
pub mod error;

pub use config::{Config, PanelSettings, RibSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
