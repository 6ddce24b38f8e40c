//! Manifest attribute derivation
//!
//! [`AttributeBuilder::build`] applies the attribute rules in a fixed order,
//! each adding at most one attribute (the platform version is written under
//! two names). Any failure discards the whole attribute set.

use tracing::debug;

use crate::collaborators::Collaborators;
use crate::dependencies::{format_developers, format_plugin_dependencies};
use crate::errors::ManifestError;
use crate::manifest::ManifestAttributes;
use crate::types::{PluginSettings, ProjectDescriptor};
use crate::validation::{check_provided_plugin_scopes, validate_minimum_java_version};
use crate::version::resolve_plugin_version;

pub const PLUGIN_CLASS: &str = "Plugin-Class";
pub const GROUP_ID: &str = "Group-Id";
pub const SHORT_NAME: &str = "Short-Name";
pub const LONG_NAME: &str = "Long-Name";
pub const URL: &str = "Url";
pub const COMPATIBLE_SINCE_VERSION: &str = "Compatible-Since-Version";
pub const MINIMUM_JAVA_VERSION: &str = "Minimum-Java-Version";
pub const SANDBOX_STATUS: &str = "Sandbox-Status";
pub const PLUGIN_VERSION: &str = "Plugin-Version";
pub const HUDSON_VERSION: &str = "Hudson-Version";
pub const JENKINS_VERSION: &str = "Jenkins-Version";
pub const MASK_CLASSES: &str = "Mask-Classes";
pub const GLOBAL_MASK_CLASSES: &str = "Global-Mask-Classes";
pub const PLUGIN_FIRST_CLASS_LOADER: &str = "PluginFirstClassLoader";
pub const PLUGIN_DEPENDENCIES: &str = "Plugin-Dependencies";
pub const PLUGIN_DEVELOPERS: &str = "Plugin-Developers";
pub const SUPPORT_DYNAMIC_LOADING: &str = "Support-Dynamic-Loading";

/// Derived attributes plus warnings raised along the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub attributes: ManifestAttributes,
    pub warnings: Vec<String>,
}

pub struct AttributeBuilder<'a> {
    settings: &'a PluginSettings,
    collaborators: Collaborators<'a>,
}

impl<'a> AttributeBuilder<'a> {
    pub fn new(settings: &'a PluginSettings, collaborators: Collaborators<'a>) -> Self {
        AttributeBuilder {
            settings,
            collaborators,
        }
    }

    pub fn build(&self, project: &ProjectDescriptor) -> Result<BuildReport, ManifestError> {
        let settings = self.settings;
        let host = self.collaborators;
        let mut attrs = ManifestAttributes::new();
        let mut warnings = Vec::new();

        if let Some(class_name) = host.plugin_class.plugin_class()? {
            attrs.add_attribute_and_check(PLUGIN_CLASS, class_name)?;
        }
        attrs.add_attribute_and_check(GROUP_ID, project.group_id.as_str())?;
        attrs.add_attribute_and_check(SHORT_NAME, project.artifact_id.as_str())?;
        attrs.add_attribute_and_check(LONG_NAME, project.display_name())?;
        if let Some(ref url) = project.url {
            attrs.add_attribute_and_check(URL, url.as_str())?;
        }

        if let Some(ref since) = settings.compatible_since_version {
            attrs.add_attribute_and_check(COMPATIBLE_SINCE_VERSION, since.as_str())?;
        }

        let java_version = validate_minimum_java_version(settings.minimum_java_version.as_deref())?;
        hpi_logger::info(&format!("Minimum Java version for the plugin: {}", java_version));
        attrs.add_attribute_and_check(MINIMUM_JAVA_VERSION, java_version)?;

        if let Some(ref status) = settings.sandbox_status {
            attrs.add_attribute_and_check(SANDBOX_STATUS, status.as_str())?;
        }

        let resolved = resolve_plugin_version(
            &project.version,
            settings,
            host.source_control,
            host.clock,
        )?;
        warnings.extend(resolved.warning);
        // Older tooling identified plugins by this attribute, so modules never carry it
        if project.packaging.is_module() {
            debug!("Packaging is {}, skipping {}", project.packaging.as_str(), PLUGIN_VERSION);
        } else {
            attrs.add_attribute_and_check(PLUGIN_VERSION, resolved.version)?;
        }

        let platform_version = host.platform_version.platform_version(project)?;
        attrs.add_attribute_and_check(HUDSON_VERSION, platform_version.as_str())?;
        attrs.add_attribute_and_check(JENKINS_VERSION, platform_version)?;

        if let Some(ref mask) = settings.mask_classes {
            attrs.add_attribute_and_check(MASK_CLASSES, mask.as_str())?;
        }
        if let Some(ref mask) = settings.global_mask_classes {
            attrs.add_attribute_and_check(GLOBAL_MASK_CLASSES, mask.as_str())?;
        }
        if settings.plugin_first_class_loader {
            attrs.add_attribute_and_check(PLUGIN_FIRST_CLASS_LOADER, "true")?;
        }

        let dependencies = format_plugin_dependencies(project, host.scope_filter);
        check_provided_plugin_scopes(&project.dependencies)?;
        if !dependencies.is_empty() {
            attrs.add_attribute_and_check(PLUGIN_DEPENDENCIES, dependencies)?;
        }

        if !project.developers.is_empty() {
            attrs.add_attribute_and_check(PLUGIN_DEVELOPERS, format_developers(&project.developers))?;
        }

        if let Some(dynamic) = settings.support_dynamic_loading {
            attrs.add_attribute_and_check(SUPPORT_DYNAMIC_LOADING, dynamic.to_string())?;
        }

        debug!("Derived {} manifest attributes", attrs.len());
        Ok(BuildReport {
            attributes: attrs,
            warnings,
        })
    }
}

/// Derive the manifest attributes for `project`
pub fn build_attributes(
    project: &ProjectDescriptor,
    settings: &PluginSettings,
    collaborators: Collaborators<'_>,
) -> Result<ManifestAttributes, ManifestError> {
    AttributeBuilder::new(settings, collaborators)
        .build(project)
        .map(|report| report.attributes)
}
