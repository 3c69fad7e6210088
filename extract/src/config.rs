//! YAML configuration for ping runs.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! ping:
//!   count: 4
//!   concurrency: 10
//!   timeout_secs: 60
//!   analyze: true
//! ```
//!
//! Missing keys fall back to [`PingSettings::default`].

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::ping::PingSettings;

pub const CONFIG_VERSION: &str = "1.0";

/// Top-level configuration file.
///
/// # Examples
///
/// ```
/// use netsift_extract::config::SiftConfig;
///
/// let config: SiftConfig = serde_yaml::from_str("version: \"1.0\"\nping:\n  count: 2\n").unwrap();
/// assert_eq!(config.ping.count, 2);
/// assert_eq!(config.ping.concurrency, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiftConfig {
    /// Configuration format version (e.g., `"1.0"`).
    pub version: String,
    #[serde(default)]
    pub ping: PingSettings,
}

impl Default for SiftConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            ping: PingSettings::default(),
        }
    }
}

impl SiftConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::SiftError::Io) if the file cannot be read,
    /// [`Yaml`](crate::SiftError::Yaml) if parsing fails, or
    /// [`InvalidInput`](crate::SiftError::InvalidInput) if the ping settings
    /// are unusable.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(reader)?;
        config.ping.validate()?;
        debug!(path = %path.display(), version = %config.version, "Loaded config");
        Ok(config)
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SiftError;
    use tempfile::TempDir;

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("netsift.yml");
        let config = SiftConfig {
            version: CONFIG_VERSION.to_string(),
            ping: PingSettings {
                count: 2,
                concurrency: 3,
                timeout_secs: 5,
                analyze: true,
            },
        };

        config.save(&path).unwrap();
        assert_eq!(SiftConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_ping_section_uses_defaults() {
        let config: SiftConfig = serde_yaml::from_str("version: \"1.0\"").unwrap();
        assert_eq!(config.ping, PingSettings::default());
    }

    #[test]
    fn test_load_missing_file() {
        let err = SiftConfig::load("/nonexistent/netsift.yml").unwrap_err();
        assert!(matches!(err, SiftError::Io(_)));
    }

    #[test]
    fn test_load_rejects_zero_concurrency() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("netsift.yml");
        std::fs::write(&path, "version: \"1.0\"\nping:\n  concurrency: 0\n").unwrap();
        assert!(matches!(SiftConfig::load(&path), Err(SiftError::InvalidInput(_))));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("netsift.yml");
        std::fs::write(&path, "ping: [").unwrap();
        assert!(matches!(SiftConfig::load(&path), Err(SiftError::Yaml(_))));
    }
}
