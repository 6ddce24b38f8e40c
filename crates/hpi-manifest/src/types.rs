//! Input data model for manifest generation
//!
//! These types describe what the host build knows about the project: its
//! coordinates, developers and dependency artifacts, plus the plugin settings
//! that steer attribute derivation. They are plain read-only values and
//! deserialize from the kebab-case TOML build descriptor.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// =============================================================================
// SCOPE / PACKAGING - string-backed enums with an open fallback
// =============================================================================

/// Dependency scope as declared in the project model
///
/// Names are matched exactly as Maven writes them; anything else, including
/// a differently cased spelling, is kept verbatim as `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Scope {
    #[default]
    Compile,
    Provided,
    Runtime,
    Test,
    System,
    Import,
    Other(String),
}

impl Scope {
    pub fn as_str(&self) -> &str {
        match self {
            Scope::Compile => "compile",
            Scope::Provided => "provided",
            Scope::Runtime => "runtime",
            Scope::Test => "test",
            Scope::System => "system",
            Scope::Import => "import",
            Scope::Other(s) => s,
        }
    }
}

impl From<String> for Scope {
    fn from(value: String) -> Self {
        match value.as_str() {
            "compile" => Scope::Compile,
            "provided" => Scope::Provided,
            "runtime" => Scope::Runtime,
            "test" => Scope::Test,
            "system" => Scope::System,
            "import" => Scope::Import,
            _ => Scope::Other(value),
        }
    }
}

impl From<&str> for Scope {
    fn from(value: &str) -> Self {
        Scope::from(value.to_string())
    }
}

impl From<Scope> for String {
    fn from(value: Scope) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Packaging kind of the artifact being built
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Packaging {
    #[default]
    Hpi,
    Jar,
    /// Core platform component, never advertised as a plugin
    JenkinsModule,
    Other(String),
}

impl Packaging {
    pub fn as_str(&self) -> &str {
        match self {
            Packaging::Hpi => "hpi",
            Packaging::Jar => "jar",
            Packaging::JenkinsModule => "jenkins-module",
            Packaging::Other(s) => s,
        }
    }

    pub fn is_module(&self) -> bool {
        matches!(self, Packaging::JenkinsModule)
    }
}

impl From<String> for Packaging {
    fn from(value: String) -> Self {
        match value.as_str() {
            "hpi" => Packaging::Hpi,
            "jar" => Packaging::Jar,
            "jenkins-module" => Packaging::JenkinsModule,
            _ => Packaging::Other(value),
        }
    }
}

impl From<Packaging> for String {
    fn from(value: Packaging) -> Self {
        value.as_str().to_string()
    }
}

// =============================================================================
// PROJECT
// =============================================================================

/// A developer entry from the project model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Developer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A resolved dependency artifact of the project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DependencyArtifact {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(default)]
    pub scope: Scope,
    #[serde(default)]
    pub optional: bool,
    /// The artifact is itself a Jenkins plugin
    #[serde(default)]
    pub plugin: bool,
    /// Declared directly by the project rather than pulled in transitively
    #[serde(default = "default_true")]
    pub direct: bool,
}

impl Default for DependencyArtifact {
    fn default() -> Self {
        DependencyArtifact {
            group_id: String::new(),
            artifact_id: String::new(),
            version: String::new(),
            scope: Scope::Compile,
            optional: false,
            plugin: false,
            direct: true,
        }
    }
}

impl DependencyArtifact {
    /// `groupId:artifactId:version` identifier used in error messages
    pub fn id(&self) -> String {
        format!("{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }

    /// Whether this artifact has the same group and artifact id as the project
    pub fn has_same_ga_as(&self, project: &ProjectDescriptor) -> bool {
        self.group_id == project.group_id && self.artifact_id == project.artifact_id
    }
}

/// Read-only description of the project being packaged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectDescriptor {
    pub group_id: String,
    pub artifact_id: String,
    /// Display name; falls back to the artifact id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub version: String,
    #[serde(default)]
    pub packaging: Packaging,
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub developers: SmallVec<[Developer; 2]>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<DependencyArtifact>,
}

impl ProjectDescriptor {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.artifact_id)
    }

    /// Dependencies declared directly by the project
    pub fn direct_dependencies(&self) -> impl Iterator<Item = &DependencyArtifact> {
        self.dependencies.iter().filter(|d| d.direct)
    }
}

// =============================================================================
// PLUGIN SETTINGS
// =============================================================================

/// Plugin specific settings, fixed for the duration of one build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PluginSettings {
    /// Oldest plugin version the current one is configuration-compatible with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatible_since_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandbox_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_java_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask_classes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_mask_classes: Option<String>,
    #[serde(default)]
    pub plugin_first_class_loader: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_plugin_version_override: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_version_description: Option<String>,
    #[serde(default = "default_true")]
    pub fail_on_version_override_to_different_release: bool,
    /// `None` leaves `Support-Dynamic-Loading` out of the manifest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_dynamic_loading: Option<bool>,
}

impl Default for PluginSettings {
    fn default() -> Self {
        PluginSettings {
            compatible_since_version: None,
            sandbox_status: None,
            minimum_java_version: None,
            mask_classes: None,
            global_mask_classes: None,
            plugin_first_class_loader: false,
            snapshot_plugin_version_override: None,
            plugin_version_description: None,
            fail_on_version_override_to_different_release: true,
            support_dynamic_loading: None,
        }
    }
}

fn default_true() -> bool {
    true
}
