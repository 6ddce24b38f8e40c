//! Manifest file writing and reading
//!
//! The writer creates missing parent directories and writes the rendered
//! manifest as UTF-8. Reading parses the main section of an existing
//! manifest, e.g. one produced by an earlier build.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::errors::ManifestError;
use crate::manifest::ManifestAttributes;

/// Write manifest attributes to `output_path`
pub fn write_to_path(attrs: &ManifestAttributes, output_path: &Path) -> Result<(), ManifestError> {
    debug!("Writing manifest to: {:?}", output_path);

    let write_err = |source: std::io::Error| ManifestError::WriteFile {
        path: output_path.to_path_buf(),
        source,
    };

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }

    let file = fs::File::create(output_path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(attrs.render().as_bytes())
        .map_err(write_err)?;
    writer.flush().map_err(write_err)?;

    info!("Manifest written to {:?} ({} attributes)", output_path, attrs.len());
    Ok(())
}

/// Read and parse the manifest at `manifest_path`
pub fn read_from_path(manifest_path: &Path) -> Result<ManifestAttributes, ManifestError> {
    debug!("Reading manifest from: {:?}", manifest_path);

    let content = fs::read_to_string(manifest_path).map_err(|source| ManifestError::ReadFile {
        path: manifest_path.to_path_buf(),
        source,
    })?;
    let attrs = ManifestAttributes::parse(&content)?;

    debug!("Loaded {} manifest attributes", attrs.len());
    Ok(attrs)
}
