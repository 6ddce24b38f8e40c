//! Build descriptor loading
//!
//! A build descriptor pairs the project model with the plugin settings:
//!
//! ```toml
//! [project]
//! group-id = "io.jenkins.plugins"
//! artifact-id = "example"
//! version = "1.0-SNAPSHOT"
//!
//! [plugin]
//! minimum-java-version = "11"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::errors::ManifestError;
use crate::types::{PluginSettings, ProjectDescriptor};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDescriptor {
    pub project: ProjectDescriptor,
    #[serde(default)]
    pub plugin: PluginSettings,
}

impl BuildDescriptor {
    pub fn load_from_path(path: &Path) -> Result<Self, ManifestError> {
        debug!("Loading build descriptor from {:?}", path);
        let content = fs::read_to_string(path).map_err(|source| ManifestError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        content.parse()
    }
}

impl FromStr for BuildDescriptor {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}
