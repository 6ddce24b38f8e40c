//! The manifest generation step
//!
//! Loads the tool configuration, resolves paths from it, wires up the default
//! collaborators, derives the attributes and writes the manifest file. The
//! file is only touched once derivation has fully succeeded.

use hpi_config::build_paths::{resolve_manifest_path, resolve_output_directory};
use hpi_config::Config;
use std::path::{Path, PathBuf};

use crate::builder::{AttributeBuilder, BuildReport};
use crate::collaborators::{
    Collaborators, CoreDependencyResolver, GitRepository, OutputDirectoryLocator, ScopeSet,
    SystemClock,
};
use crate::descriptor::BuildDescriptor;
use crate::errors::ManifestError;
use crate::manifest_writer::write_to_path;

/// Filesystem, git and environment backed collaborators
#[derive(Debug, Clone)]
pub struct DefaultCollaborators {
    locator: OutputDirectoryLocator,
    git: GitRepository,
    platform: CoreDependencyResolver,
    scopes: ScopeSet,
    clock: SystemClock,
}

impl DefaultCollaborators {
    pub fn from_config(basedir: &Path, config: &Config) -> Result<Self, ManifestError> {
        let output_dir = resolve_output_directory(basedir, config.output_directory.as_deref())?;
        Ok(DefaultCollaborators {
            locator: OutputDirectoryLocator::new(&output_dir),
            git: GitRepository::new(basedir),
            platform: CoreDependencyResolver::new(config.jenkins_version.clone()),
            scopes: ScopeSet::new(config.included_scopes()),
            clock: SystemClock,
        })
    }

    pub fn as_collaborators(&self) -> Collaborators<'_> {
        Collaborators {
            plugin_class: &self.locator,
            source_control: &self.git,
            platform_version: &self.platform,
            scope_filter: &self.scopes,
            clock: &self.clock,
        }
    }
}

/// Derive the attributes for `descriptor` and write them to `manifest_path`
pub fn generate_manifest_with(
    descriptor: &BuildDescriptor,
    collaborators: Collaborators<'_>,
    manifest_path: &Path,
) -> Result<BuildReport, ManifestError> {
    hpi_logger::info(&format!("Generating {}", manifest_path.display()));

    hpi_logger::step("Deriving manifest attributes");
    let report = AttributeBuilder::new(&descriptor.plugin, collaborators).build(&descriptor.project)?;

    hpi_logger::step("Writing manifest");
    write_to_path(&report.attributes, manifest_path)?;
    Ok(report)
}

fn generate_configured(descriptor: &BuildDescriptor, config: &Config) -> Result<PathBuf, ManifestError> {
    let basedir = match config.basedir {
        Some(ref dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };
    let manifest_path = resolve_manifest_path(&basedir, config.manifest_file.as_deref())?;
    let collaborators = DefaultCollaborators::from_config(&basedir, config)?;
    generate_manifest_with(descriptor, collaborators.as_collaborators(), &manifest_path)?;
    Ok(manifest_path)
}

/// Generate the manifest for `descriptor` as configured by `config`
///
/// Returns the path of the written manifest.
pub fn generate_manifest(descriptor: &BuildDescriptor, config: &Config) -> Result<PathBuf, ManifestError> {
    let result = generate_configured(descriptor, config);
    match result {
        Ok(ref path) => {
            hpi_logger::success(&format!("Manifest written to {}", path.display()));
        }
        Err(ref e) => {
            hpi_logger::error(&format!("Error preparing the manifest: {}", e));
            report_log_location();
        }
    }
    result
}

fn report_log_location() {
    if let Some(log_path) = hpi_logger::get_log_path() {
        hpi_logger::warn(&format!("See {} for details", log_path.display()));
    }
}

/// Generate the manifest for the descriptor at `descriptor_path`
///
/// Loads `hpi.toml` from [`Config::path`], starts the run log with the
/// configured verbosity and log file, then generates as configured.
pub fn generate(descriptor_path: &Path) -> Result<PathBuf, ManifestError> {
    let config = Config::load()?;
    let log_file = config.log_file.as_deref().map(Path::new);
    hpi_logger::init_with_verbosity(config.verbosity.unwrap_or(0), false, log_file)
        .map_err(ManifestError::Logger)?;

    let descriptor = match BuildDescriptor::load_from_path(descriptor_path) {
        Ok(descriptor) => descriptor,
        Err(e) => {
            hpi_logger::error(&format!("Error preparing the manifest: {}", e));
            report_log_location();
            return Err(e);
        }
    };
    generate_manifest(&descriptor, &config)
}
