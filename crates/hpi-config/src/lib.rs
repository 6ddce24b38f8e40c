//! Configuration for the hpi manifest generator
//!
//! The configuration file (`hpi.toml`) tells the generator where the compiled
//! classes live, where to write the manifest, and which dependency scopes end
//! up in `Plugin-Dependencies`.

pub mod build_paths;

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Scopes whose plugin dependencies are listed in the manifest when nothing is configured
pub const DEFAULT_INCLUDED_SCOPES: &[&str] = &["compile", "runtime"];

/// Error type for loading the configuration file
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Project base directory, relative paths below are resolved against it
    pub basedir: Option<String>,
    /// Compiled classes directory holding `META-INF/services/hudson.Plugin`
    pub output_directory: Option<String>,
    pub manifest_file: Option<String>,
    /// Explicit Jenkins core version, bypasses the jenkins-core dependency lookup
    pub jenkins_version: Option<String>,
    /// Comma separated list of dependency scopes, matched exactly
    pub included_scopes: Option<String>,
    /// Console verbosity: 0 = warnings only, 1 = info, 2 = steps
    pub verbosity: Option<u8>,
    /// Log file, defaults to `hpi.log` in the config directory
    pub log_file: Option<String>,
}

impl Config {
    /// `HPI_CONFIG` when set, else `hpi.toml` in the user config directory
    pub fn path() -> PathBuf {
        // Honor explicit override via HPI_CONFIG for tests / isolated runs.
        if let Ok(env_path) = std::env::var("HPI_CONFIG") {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }

        #[cfg(not(target_os = "windows"))]
        let default = dirs::home_dir().map_or_else(
            || PathBuf::from(".config/hpi/hpi.toml"),
            |h| h.join(".config").join("hpi").join("hpi.toml"),
        );

        #[cfg(target_os = "windows")]
        let default = dirs::config_dir().map_or_else(
            || PathBuf::from("config\\hpi\\hpi.toml"),
            |c| c.join("hpi").join("hpi.toml"),
        );

        default
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(&Self::path())
    }

    /// Load from a specific path, an absent file yields the default config
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Config::default())
        }
    }

    /// Scopes to list in `Plugin-Dependencies`, trimmed but otherwise verbatim
    pub fn included_scopes(&self) -> Vec<String> {
        match self.included_scopes.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            _ => DEFAULT_INCLUDED_SCOPES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}
