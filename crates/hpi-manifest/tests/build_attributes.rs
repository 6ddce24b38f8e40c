//! Attribute derivation through the public API with stubbed host services

use chrono::{NaiveDate, NaiveDateTime};
use hpi_manifest::collaborators::ScopeSet;
use hpi_manifest::{
    build_attributes, AttributeBuilder, BuildClock, Collaborators, DependencyArtifact, Developer,
    ManifestAttributes, ManifestError, Packaging, PlatformVersionResolver, PluginClassLocator,
    PluginSettings, ProjectDescriptor, Scope, SourceControl,
};
use std::path::PathBuf;

struct Stubs {
    plugin_class: Option<&'static str>,
    marker_unreadable: bool,
    revision: Option<&'static str>,
    platform: Option<&'static str>,
    scopes: ScopeSet,
}

impl Default for Stubs {
    fn default() -> Self {
        Stubs {
            plugin_class: None,
            marker_unreadable: false,
            revision: None,
            platform: Some("2.401.3"),
            scopes: ScopeSet::default(),
        }
    }
}

impl PluginClassLocator for Stubs {
    fn plugin_class(&self) -> Result<Option<String>, ManifestError> {
        if self.marker_unreadable {
            return Err(ManifestError::ReadFile {
                path: PathBuf::from("target/classes/META-INF/services/hudson.Plugin"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            });
        }
        Ok(self.plugin_class.map(str::to_string))
    }
}

impl SourceControl for Stubs {
    fn head_revision(&self) -> Option<String> {
        self.revision.map(str::to_string)
    }
}

impl PlatformVersionResolver for Stubs {
    fn platform_version(&self, _project: &ProjectDescriptor) -> Result<String, ManifestError> {
        self.platform
            .map(str::to_string)
            .ok_or(ManifestError::PlatformVersionUnresolved)
    }
}

impl BuildClock for Stubs {
    fn now(&self) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 11, 2)
            .and_then(|d| d.and_hms_opt(14, 30, 59))
            .unwrap_or_default()
    }

    fn user_name(&self) -> String {
        "alice".to_string()
    }
}

impl Stubs {
    fn collaborators(&self) -> Collaborators<'_> {
        Collaborators {
            plugin_class: self,
            source_control: self,
            platform_version: self,
            scope_filter: &self.scopes,
            clock: self,
        }
    }
}

fn project(version: &str) -> ProjectDescriptor {
    ProjectDescriptor {
        group_id: "io.jenkins.plugins".into(),
        artifact_id: "example".into(),
        name: Some("Example plugin".into()),
        version: version.into(),
        ..Default::default()
    }
}

fn settings() -> PluginSettings {
    PluginSettings {
        minimum_java_version: Some("11".into()),
        ..Default::default()
    }
}

fn plugin_dep(artifact: &str, version: &str) -> DependencyArtifact {
    DependencyArtifact {
        group_id: "org.jenkins-ci.plugins".into(),
        artifact_id: artifact.into(),
        version: version.into(),
        plugin: true,
        ..Default::default()
    }
}

fn build(
    project: &ProjectDescriptor,
    settings: &PluginSettings,
    stubs: &Stubs,
) -> Result<ManifestAttributes, ManifestError> {
    build_attributes(project, settings, stubs.collaborators())
}

#[test]
fn test_full_attribute_order() {
    let stubs = Stubs {
        plugin_class: Some("io.jenkins.plugins.example.ExamplePlugin"),
        ..Default::default()
    };
    let mut project = project("1.4");
    project.url = Some("https://plugins.jenkins.io/example/".into());
    project.developers.push(Developer {
        name: Some("Alice".into()),
        id: Some("alice".into()),
        email: Some("alice@example.org".into()),
    });
    project.dependencies.push(plugin_dep("structs", "1.24"));

    let settings = PluginSettings {
        compatible_since_version: Some("1.0".into()),
        sandbox_status: Some("approved".into()),
        mask_classes: Some("org.apache.commons.".into()),
        global_mask_classes: Some("org.kohsuke.".into()),
        plugin_first_class_loader: true,
        support_dynamic_loading: Some(true),
        ..settings()
    };

    let result = build(&project, &settings, &stubs);
    assert!(result.is_ok(), "Failed to derive attributes: {:?}", result.as_ref().err());
    let Ok(attrs) = result else {
        return;
    };

    assert_eq!(
        attrs.names(),
        vec![
            "Plugin-Class",
            "Group-Id",
            "Short-Name",
            "Long-Name",
            "Url",
            "Compatible-Since-Version",
            "Minimum-Java-Version",
            "Sandbox-Status",
            "Plugin-Version",
            "Hudson-Version",
            "Jenkins-Version",
            "Mask-Classes",
            "Global-Mask-Classes",
            "PluginFirstClassLoader",
            "Plugin-Dependencies",
            "Plugin-Developers",
            "Support-Dynamic-Loading",
        ]
    );
    assert_eq!(attrs.get("Plugin-Version"), Some("1.4"));
    assert_eq!(attrs.get("PluginFirstClassLoader"), Some("true"));
    assert_eq!(attrs.get("Plugin-Developers"), Some("Alice:alice:alice@example.org"));
    assert_eq!(attrs.get("Support-Dynamic-Loading"), Some("true"));
}

#[test]
fn test_minimal_project_omits_optional_attributes() {
    let result = build(&project("1.0"), &settings(), &Stubs::default());
    assert!(result.is_ok_and(|attrs| attrs.names()
        == vec![
            "Group-Id",
            "Short-Name",
            "Long-Name",
            "Minimum-Java-Version",
            "Plugin-Version",
            "Hudson-Version",
            "Jenkins-Version",
        ]));
}

#[test]
fn test_output_is_deterministic() {
    let stubs = Stubs::default();
    let project = project("2.0-SNAPSHOT");
    let first = build(&project, &settings(), &stubs).map(|a| a.render());
    let second = build(&project, &settings(), &stubs).map(|a| a.render());
    assert!(matches!((first, second), (Ok(a), Ok(b)) if a == b));
}

#[test]
fn test_minimum_java_version_rules() {
    let stubs = Stubs::default();
    let project = project("1.0");

    for (value, accepted) in [("9", true), ("1.8", true), ("1.9", false), ("17", true)] {
        let settings = PluginSettings {
            minimum_java_version: Some(value.into()),
            ..Default::default()
        };
        let result = build(&project, &settings, &stubs);
        if accepted {
            assert!(
                result.is_ok_and(|a| a.get("Minimum-Java-Version") == Some(value)),
                "{value} should be accepted"
            );
        } else {
            assert!(
                matches!(result, Err(ManifestError::UnsupportedJavaVersion(ref v)) if v == value),
                "{value} should be rejected"
            );
        }
    }

    let result = build(&project, &PluginSettings::default(), &stubs);
    assert!(matches!(result, Err(ManifestError::MissingRequiredField(_))));
}

#[test]
fn test_snapshot_description_from_clock_and_user() {
    let result = build(&project("2.0-SNAPSHOT"), &settings(), &Stubs::default());
    assert!(result.is_ok_and(
        |a| a.get("Plugin-Version") == Some("2.0-SNAPSHOT (private-11/02/2024 14:30-alice)")
    ));
}

#[test]
fn test_snapshot_description_from_revision() {
    let stubs = Stubs {
        revision: Some("1a2b3c4d"),
        ..Default::default()
    };
    let result = build(&project("2.0-SNAPSHOT"), &settings(), &stubs);
    assert!(result
        .is_ok_and(|a| a.get("Plugin-Version") == Some("2.0-SNAPSHOT (private-1a2b3c4d-alice)")));
}

#[test]
fn test_override_on_same_release() {
    let settings = PluginSettings {
        snapshot_plugin_version_override: Some("1.0-rc1".into()),
        ..settings()
    };
    let result = build(&project("1.0-SNAPSHOT"), &settings, &Stubs::default());
    assert!(result.is_ok_and(|a| a.get("Plugin-Version") == Some("1.0-rc1")));
}

#[test]
fn test_override_to_different_release() {
    let strict = PluginSettings {
        snapshot_plugin_version_override: Some("2.0-beta".into()),
        ..settings()
    };
    let stubs = Stubs::default();
    let project = project("1.0-SNAPSHOT");

    let result = build(&project, &strict, &stubs);
    assert!(matches!(result, Err(ManifestError::VersionOverrideMismatch { .. })));

    let lenient = PluginSettings {
        fail_on_version_override_to_different_release: false,
        ..strict
    };
    let report = AttributeBuilder::new(&lenient, stubs.collaborators()).build(&project);
    assert!(report.is_ok_and(|r| r.attributes.get("Plugin-Version") == Some("2.0-beta")
        && r.warnings.len() == 1
        && r.warnings[0].contains("does not start with")));
}

#[test]
fn test_module_packaging_never_has_plugin_version() {
    let stubs = Stubs::default();
    let overridden = PluginSettings {
        snapshot_plugin_version_override: Some("1.0-rc1".into()),
        plugin_version_description: Some("custom".into()),
        ..settings()
    };

    for version in ["1.0", "1.0-SNAPSHOT"] {
        for settings in [settings(), overridden.clone()] {
            let mut module = project(version);
            module.packaging = Packaging::JenkinsModule;
            let result = build(&module, &settings, &stubs);
            assert!(result.is_ok_and(|a| !a.contains("Plugin-Version") && a.contains("Jenkins-Version")));
        }
    }
}

#[test]
fn test_platform_version_written_twice() {
    let result = build(&project("1.0"), &settings(), &Stubs::default());
    assert!(result.is_ok_and(|a| a.get("Hudson-Version") == Some("2.401.3")
        && a.get("Jenkins-Version") == Some("2.401.3")));

    let stubs = Stubs {
        platform: None,
        ..Default::default()
    };
    let result = build(&project("1.0"), &settings(), &stubs);
    assert!(matches!(result, Err(ManifestError::PlatformVersionUnresolved)));
}

#[test]
fn test_provided_plugin_dependency_fails() {
    let mut project = project("1.0");
    project.dependencies.push(plugin_dep("structs", "1.24"));
    project.dependencies.push(DependencyArtifact {
        scope: Scope::Provided,
        ..plugin_dep("credentials", "2.6")
    });

    let result = build(&project, &settings(), &Stubs::default());
    assert!(matches!(
        result,
        Err(ManifestError::MisconfiguredScope(ref id)) if id == "org.jenkins-ci.plugins:credentials:2.6"
    ));
}

#[test]
fn test_plugin_dependency_filtering() {
    let mut project = project("1.0");
    project.dependencies.push(DependencyArtifact {
        scope: Scope::Test,
        ..plugin_dep("junit", "1.0")
    });
    project.dependencies.push(DependencyArtifact {
        group_id: "io.jenkins.plugins".into(),
        ..plugin_dep("example", "0.9")
    });
    project.dependencies.push(DependencyArtifact {
        optional: true,
        ..plugin_dep("foo", "1.2")
    });

    let result = build(&project, &settings(), &Stubs::default());
    assert!(result.is_ok_and(|a| a.get("Plugin-Dependencies") == Some("foo:1.2;resolution:=optional")));
}

#[test]
fn test_custom_scope_filter() {
    let mut project = project("1.0");
    project.dependencies.push(DependencyArtifact {
        scope: Scope::Test,
        ..plugin_dep("junit", "1.0")
    });
    let stubs = Stubs {
        scopes: ScopeSet::new(["compile", "test"]),
        ..Default::default()
    };

    let result = build(&project, &settings(), &stubs);
    assert!(result.is_ok_and(|a| a.get("Plugin-Dependencies") == Some("junit:1.0")));
}

#[test]
fn test_marker_read_failure_propagates() {
    let stubs = Stubs {
        marker_unreadable: true,
        ..Default::default()
    };
    let result = build(&project("1.0"), &settings(), &stubs);
    assert!(matches!(result, Err(ManifestError::ReadFile { .. })));
}
