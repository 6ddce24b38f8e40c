use hpi_config::build_paths::BuildPathError;
use hpi_config::ConfigError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while deriving or writing a plugin manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse build descriptor: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{0} must be set")]
    MissingRequiredField(&'static str),

    #[error(
        "Unsupported Java version string: `{0}`. If you use Java 9 or above, see https://openjdk.java.net/jeps/223"
    )]
    UnsupportedJavaVersion(String),

    #[error(
        "The snapshot plugin version override of {override_version} does not start with the current target release version {version}"
    )]
    VersionOverrideMismatch {
        override_version: String,
        version: String,
    },

    #[error("{0} is marked as 'provided' scope dependency, but it should be the 'compile' scope.")]
    MisconfiguredScope(String),

    #[error("Duplicate manifest attribute: {0}")]
    DuplicateAttribute(String),

    #[error("Invalid manifest attribute name: '{0}'")]
    InvalidAttributeName(String),

    #[error("Manifest attribute {0} has a value spanning multiple lines")]
    InvalidAttributeValue(String),

    #[error("Plugin marker file is empty: {0}")]
    EmptyPluginMarker(PathBuf),

    #[error("Failed to determine Jenkins version this plugin depends on.")]
    PlatformVersionUnresolved,

    #[error("Invalid manifest at line {line}: {message}")]
    InvalidManifest { line: usize, message: String },

    #[error("Invalid build path: {0}")]
    BuildPath(#[from] BuildPathError),

    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to initialize logging: {0}")]
    Logger(String),
}
