//! `Plugin-Version` resolution
//!
//! Starting from the project version:
//! 1. a snapshot version may be replaced by the configured override, which
//!    should stay on the same release line
//! 2. a version that is (still) a snapshot gets a description derived from the
//!    head revision, or the build time when source control is unavailable
//! 3. a description, configured or derived, is appended in parentheses

use crate::collaborators::{BuildClock, SourceControl};
use crate::errors::ManifestError;
use crate::types::PluginSettings;

pub const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// Build time format used when no head revision is available
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%Y %H:%M";

/// Final plugin version plus the warning raised on a lenient override mismatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub version: String,
    pub warning: Option<String>,
}

pub fn resolve_plugin_version(
    project_version: &str,
    settings: &PluginSettings,
    source_control: &dyn SourceControl,
    clock: &dyn BuildClock,
) -> Result<ResolvedVersion, ManifestError> {
    let mut version = project_version.to_string();
    let mut warning = None;

    if let (Some(base), Some(override_version)) = (
        project_version.strip_suffix(SNAPSHOT_SUFFIX),
        settings.snapshot_plugin_version_override.as_deref(),
    ) {
        if !override_version.starts_with(base) {
            let mismatch = ManifestError::VersionOverrideMismatch {
                override_version: override_version.to_string(),
                version: project_version.to_string(),
            };
            if settings.fail_on_version_override_to_different_release {
                return Err(mismatch);
            }
            let message = mismatch.to_string();
            hpi_logger::warn(&message);
            warning = Some(message);
        }
        hpi_logger::info(&format!(
            "Snapshot plugin version override enabled. Using {} in place of {}",
            override_version, project_version
        ));
        version = override_version.to_string();
    }

    let description = match settings.plugin_version_description {
        Some(ref description) => Some(description.clone()),
        None if version.ends_with(SNAPSHOT_SUFFIX) => {
            Some(snapshot_description(source_control, clock))
        }
        None => None,
    };

    if let Some(description) = description {
        version = format!("{} ({})", version, description);
    }

    Ok(ResolvedVersion { version, warning })
}

/// `private-<revision or timestamp>-<user>`
pub fn snapshot_description(source_control: &dyn SourceControl, clock: &dyn BuildClock) -> String {
    let stamp = source_control
        .head_revision()
        .unwrap_or_else(|| clock.now().format(TIMESTAMP_FORMAT).to_string());
    format!("private-{}-{}", stamp, clock.user_name())
}
