//! Configuration for nvfields
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a file-backed store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Device Configuration
    // -------------------------------------------------------------------------
    /// File emulating the non-volatile byte array
    pub data_path: PathBuf,

    /// Byte value of a never-written cell (erased EEPROM reads as 0xFF)
    pub erased_byte: u8,

    // -------------------------------------------------------------------------
    // Schema Configuration
    // -------------------------------------------------------------------------
    /// What to do with a schema that fails validation
    pub validation: ValidationMode,

    // -------------------------------------------------------------------------
    // Diagnostics Configuration
    // -------------------------------------------------------------------------
    /// Prefix put in front of every dump line
    pub dump_prefix: String,
}

/// Schema validation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Report issues to diagnostics and keep the schema as given
    #[default]
    Lenient,

    /// Refuse to build a schema that has any issue
    Strict,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("./nvfields.bin"),
            erased_byte: 0xFF,
            validation: ValidationMode::Lenient,
            dump_prefix: "  ".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing file path
    pub fn data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_path = path.into();
        self
    }

    /// Set the fill byte used for fresh storage
    pub fn erased_byte(mut self, byte: u8) -> Self {
        self.config.erased_byte = byte;
        self
    }

    /// Set the schema validation mode
    pub fn validation(mut self, mode: ValidationMode) -> Self {
        self.config.validation = mode;
        self
    }

    /// Set the dump line prefix
    pub fn dump_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.dump_prefix = prefix.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
