// src/config/mod.rs
pub mod types;

pub use self::types::{Config, ReportConfig, SimulationConfig};

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SimError};

pub const CONFIG_FILE: &str = "pathsim.toml";

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `pathsim.toml` from the working directory, or defaults if absent.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::new());
        }
        Self::load_from(path)
    }

    /// Loads an explicit config file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, parsed, or validated.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| SimError::Io {
            source,
            path: path.to_path_buf(),
        })?;
        let config = Self::parse_toml(&content).map_err(|source| SimError::Config {
            source,
            path: path.to_path_buf(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates configuration.
    ///
    /// # Errors
    /// Returns `InvalidSetting` if a simulation value is out of range.
    pub fn validate(&self) -> Result<()> {
        self.simulation.settings().validate()
    }

    /// Parses TOML text; missing sections and keys take their defaults.
    ///
    /// # Errors
    /// Returns the TOML error on malformed input.
    pub fn parse_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Writes the configuration as TOML.
    ///
    /// # Errors
    /// Returns error if the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| SimError::Io {
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            path: path.to_path_buf(),
        })?;
        fs::write(path, content).map_err(|source| SimError::Io {
            source,
            path: PathBuf::from(path),
        })
    }
}
