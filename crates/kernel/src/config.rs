//! Configuration system for the netlist simulator.
//!
//! This module defines the configuration structures used to parameterize a simulation
//! session. It provides:
//! 1. **Defaults:** Baseline values used when a field is omitted.
//! 2. **Structures:** Sections for general behaviour, ROM handling and netlist limits.
//! 3. **Loading:** JSON parsing from strings or files, with range validation.
//!
//! Use `Config::default()` when no configuration file is supplied.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::error::ConfigError;
use crate::common::value::MAX_BUS_WIDTH;

/// Default configuration constants for the simulator.
mod defaults {
    /// Word returned by ROM reads outside the loaded image.
    ///
    /// Zero matches the behaviour of running without a ROM image, where every
    /// ROM block reads as cleared memory.
    pub const ROM_DEFAULT_WORD: u64 = 0;

    /// Widest bus accepted when compiling a netlist.
    pub const MAX_BUS_WIDTH: u32 = super::MAX_BUS_WIDTH;
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// ROM image handling.
    #[serde(default)]
    pub rom: RomConfig,
    /// Netlist compilation limits.
    #[serde(default)]
    pub netlist: NetlistConfig,
}

impl Config {
    /// Parses a configuration from a JSON string.
    ///
    /// Missing sections and fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and [`ConfigError::Invalid`]
    /// for values outside their accepted range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the errors
    /// of [`Config::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let width = self.netlist.max_bus_width;
        if width == 0 || width > MAX_BUS_WIDTH {
            return Err(ConfigError::Invalid(format!(
                "netlist.max_bus_width must be between 1 and {MAX_BUS_WIDTH}, got {width}"
            )));
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Log every step's inputs and outputs at debug level.
    #[serde(default)]
    pub trace_steps: bool,

    /// Maintain step and gate counters in [`SimStats`](crate::stats::SimStats).
    #[serde(default = "GeneralConfig::default_collect_stats")]
    pub collect_stats: bool,
}

impl GeneralConfig {
    /// Statistics collection is on unless disabled.
    const fn default_collect_stats() -> bool {
        true
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_steps: false,
            collect_stats: true,
        }
    }
}

/// ROM image handling.
#[derive(Debug, Clone, Deserialize)]
pub struct RomConfig {
    /// Word returned for ROM addresses beyond the loaded image.
    #[serde(default = "RomConfig::default_word")]
    pub default_word: u64,

    /// Reject images holding fewer words than the ROM blocks can address.
    #[serde(default)]
    pub strict_image_length: bool,
}

impl RomConfig {
    /// Returns the default word for unloaded ROM addresses.
    const fn default_word() -> u64 {
        defaults::ROM_DEFAULT_WORD
    }
}

impl Default for RomConfig {
    /// Creates a lenient ROM configuration: unloaded addresses read zero and short
    /// images are accepted.
    fn default() -> Self {
        Self {
            default_word: defaults::ROM_DEFAULT_WORD,
            strict_image_length: false,
        }
    }
}

/// Netlist compilation limits.
#[derive(Debug, Clone, Deserialize)]
pub struct NetlistConfig {
    /// Widest bus accepted; may be lowered but never raised above 64.
    #[serde(default = "NetlistConfig::default_max_bus_width")]
    pub max_bus_width: u32,
}

impl NetlistConfig {
    /// Returns the default bus width limit.
    const fn default_max_bus_width() -> u32 {
        defaults::MAX_BUS_WIDTH
    }
}

impl Default for NetlistConfig {
    fn default() -> Self {
        Self {
            max_bus_width: defaults::MAX_BUS_WIDTH,
        }
    }
}
