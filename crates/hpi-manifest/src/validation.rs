//! Validation rules that abort manifest generation

use crate::errors::ManifestError;
use crate::types::{DependencyArtifact, Scope};

/// Pre-Java 9 version strings accepted alongside plain integers
pub const LEGACY_JAVA_VERSIONS: &[&str] = &["1.6", "1.7", "1.8"];

/// Check the configured minimum Java version and return it for emission
pub fn validate_minimum_java_version(value: Option<&str>) -> Result<&str, ManifestError> {
    let Some(version) = value else {
        return Err(ManifestError::MissingRequiredField("minimum-java-version"));
    };

    if version.parse::<i32>().is_ok() || LEGACY_JAVA_VERSIONS.contains(&version) {
        Ok(version)
    } else {
        Err(ManifestError::UnsupportedJavaVersion(version.to_string()))
    }
}

/// Reject plugin dependencies declared with `provided` scope
///
/// Runs over every dependency artifact, not only the ones listed in
/// `Plugin-Dependencies`.
pub fn check_provided_plugin_scopes(dependencies: &[DependencyArtifact]) -> Result<(), ManifestError> {
    match dependencies
        .iter()
        .find(|d| d.scope == Scope::Provided && d.plugin)
    {
        Some(dep) => Err(ManifestError::MisconfiguredScope(dep.id())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_versions_accepted() {
        assert!(validate_minimum_java_version(Some("9")).is_ok_and(|v| v == "9"));
        assert!(validate_minimum_java_version(Some("17")).is_ok());
    }

    #[test]
    fn test_legacy_versions_accepted() {
        for legacy in LEGACY_JAVA_VERSIONS {
            assert!(validate_minimum_java_version(Some(legacy)).is_ok());
        }
    }

    #[test]
    fn test_unsupported_versions_rejected() {
        for bad in ["1.9", "1.5", "11.0", "java8", ""] {
            let result = validate_minimum_java_version(Some(bad));
            assert!(
                matches!(result, Err(ManifestError::UnsupportedJavaVersion(ref v)) if v == bad),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_missing_version() {
        assert!(matches!(
            validate_minimum_java_version(None),
            Err(ManifestError::MissingRequiredField("minimum-java-version"))
        ));
    }

    #[test]
    fn test_provided_plugin_rejected_even_if_transitive() {
        let deps = vec![
            DependencyArtifact {
                group_id: "org.jenkins-ci.main".into(),
                artifact_id: "jenkins-core".into(),
                version: "2.401.3".into(),
                scope: Scope::Provided,
                ..Default::default()
            },
            DependencyArtifact {
                group_id: "org.jenkins-ci.plugins".into(),
                artifact_id: "credentials".into(),
                version: "1.0".into(),
                scope: Scope::Provided,
                plugin: true,
                direct: false,
                ..Default::default()
            },
        ];
        let result = check_provided_plugin_scopes(&deps);
        assert!(
            matches!(result, Err(ManifestError::MisconfiguredScope(ref id)) if id == "org.jenkins-ci.plugins:credentials:1.0")
        );
        assert!(check_provided_plugin_scopes(&deps[..1]).is_ok());
    }

    #[test]
    fn test_scope_check_is_case_sensitive() {
        let deps = vec![DependencyArtifact {
            group_id: "org.jenkins-ci.plugins".into(),
            artifact_id: "credentials".into(),
            version: "1.0".into(),
            scope: Scope::from("Provided"),
            plugin: true,
            ..Default::default()
        }];
        assert!(check_provided_plugin_scopes(&deps).is_ok());
    }
}
