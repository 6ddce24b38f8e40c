//! Path resolution for the manifest generation step
//!
//! This module resolves, relative to the project base directory:
//! - the compiled classes directory and the plugin marker file inside it
//! - the manifest output file
//!
//! Both the attribute builder and the writer use these so that a relative
//! path in `hpi.toml` means the same thing everywhere.

use std::path::{Path, PathBuf};

/// Marker file naming the plugin entry point class, relative to the classes directory
pub const PLUGIN_MARKER_FILE: &str = "META-INF/services/hudson.Plugin";

/// Classes directory used when `output-directory` is not configured
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "target/classes";

/// Manifest location used when `manifest-file` is not configured
pub const DEFAULT_MANIFEST_FILE: &str = "target/MANIFEST.MF";

/// Error type for build path resolution
#[derive(Debug, Clone)]
pub enum BuildPathError {
    /// The project base directory does not exist or is not a directory
    BasedirNotFound(PathBuf),
    /// A configured path points at something unusable
    PathResolution(String),
}

impl std::fmt::Display for BuildPathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildPathError::BasedirNotFound(path) => {
                write!(f, "Project base directory not found: {}", path.display())
            }
            BuildPathError::PathResolution(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for BuildPathError {}

fn resolve_against(basedir: &Path, configured: Option<&str>, default: &str) -> PathBuf {
    let raw = configured
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default);
    let path = Path::new(raw);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        basedir.join(path)
    }
}

/// Resolve the compiled classes directory
///
/// The directory itself may not exist yet (a plugin without compiled classes is
/// still a valid build), only the base directory is required.
pub fn resolve_output_directory(
    basedir: &Path,
    configured: Option<&str>,
) -> Result<PathBuf, BuildPathError> {
    if !basedir.is_dir() {
        return Err(BuildPathError::BasedirNotFound(basedir.to_path_buf()));
    }

    let output_dir = resolve_against(basedir, configured, DEFAULT_OUTPUT_DIRECTORY);
    if output_dir.is_file() {
        return Err(BuildPathError::PathResolution(format!(
            "output directory is a file: {}",
            output_dir.display()
        )));
    }
    Ok(output_dir)
}

/// Path of the plugin marker file inside a classes directory
pub fn plugin_marker_path(output_dir: &Path) -> PathBuf {
    output_dir.join(PLUGIN_MARKER_FILE)
}

/// Resolve where the manifest gets written
pub fn resolve_manifest_path(
    basedir: &Path,
    configured: Option<&str>,
) -> Result<PathBuf, BuildPathError> {
    if !basedir.is_dir() {
        return Err(BuildPathError::BasedirNotFound(basedir.to_path_buf()));
    }

    let manifest = resolve_against(basedir, configured, DEFAULT_MANIFEST_FILE);
    if manifest.is_dir() {
        return Err(BuildPathError::PathResolution(format!(
            "manifest path is a directory: {}",
            manifest.display()
        )));
    }
    if manifest.file_name().is_none() {
        return Err(BuildPathError::PathResolution(format!(
            "manifest path has no file name: {}",
            manifest.display()
        )));
    }
    Ok(manifest)
}
