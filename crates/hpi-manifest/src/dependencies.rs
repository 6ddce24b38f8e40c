//! `Plugin-Dependencies` and `Plugin-Developers` values

use crate::collaborators::ScopeFilter;
use crate::types::{Developer, ProjectDescriptor};

/// Suffix marking an optional plugin dependency
pub const OPTIONAL_RESOLUTION: &str = ";resolution:=optional";

/// Comma separated `artifactId:version` list of direct plugin dependencies
///
/// Dependencies are listed in declaration order. Non-plugins, scopes rejected
/// by `filter` and the project's own coordinates are skipped.
pub fn format_plugin_dependencies(project: &ProjectDescriptor, filter: &dyn ScopeFilter) -> String {
    let mut buf = String::new();
    for dep in project.direct_dependencies() {
        if !dep.plugin || !filter.include(&dep.scope) || dep.has_same_ga_as(project) {
            continue;
        }
        if !buf.is_empty() {
            buf.push(',');
        }
        buf.push_str(&dep.artifact_id);
        buf.push(':');
        buf.push_str(&dep.version);
        if dep.optional {
            buf.push_str(OPTIONAL_RESOLUTION);
        }
    }
    buf
}

/// Comma separated `name:id:email` list, missing fields left empty
pub fn format_developers(developers: &[Developer]) -> String {
    developers
        .iter()
        .map(|d| {
            format!(
                "{}:{}:{}",
                d.name.as_deref().unwrap_or(""),
                d.id.as_deref().unwrap_or(""),
                d.email.as_deref().unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join(",")
}
