//! Host services consulted while deriving manifest attributes
//!
//! Each trait is a narrow, read-only view of something the build host knows:
//! the compiled classes directory, source control, the platform version, the
//! scope filter, and the clock. The default implementations back them with the
//! filesystem, the git repository and the environment; tests substitute
//! fixed values.

use chrono::NaiveDateTime;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::ManifestError;
use crate::types::{ProjectDescriptor, Scope};

/// Locates the plugin entry point class name
pub trait PluginClassLocator {
    /// `Ok(None)` when the project declares no plugin class
    fn plugin_class(&self) -> Result<Option<String>, ManifestError>;
}

/// Source control state of the project checkout
pub trait SourceControl {
    /// Abbreviated head revision, `None` when unavailable
    fn head_revision(&self) -> Option<String>;
}

/// Resolves the Jenkins version the plugin is built against
pub trait PlatformVersionResolver {
    fn platform_version(&self, project: &ProjectDescriptor) -> Result<String, ManifestError>;
}

/// Decides which dependency scopes are listed in `Plugin-Dependencies`
pub trait ScopeFilter {
    fn include(&self, scope: &Scope) -> bool;
}

/// Wall clock and identity used for snapshot version descriptions
pub trait BuildClock {
    fn now(&self) -> NaiveDateTime;
    fn user_name(&self) -> String;
}

/// One of each collaborator, borrowed for the duration of a build
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub plugin_class: &'a dyn PluginClassLocator,
    pub source_control: &'a dyn SourceControl,
    pub platform_version: &'a dyn PlatformVersionResolver,
    pub scope_filter: &'a dyn ScopeFilter,
    pub clock: &'a dyn BuildClock,
}

// =============================================================================
// OUTPUT DIRECTORY
// =============================================================================

/// Reads the plugin class from `META-INF/services/hudson.Plugin` in the classes directory
#[derive(Debug, Clone)]
pub struct OutputDirectoryLocator {
    marker: PathBuf,
}

impl OutputDirectoryLocator {
    pub fn new(output_dir: &Path) -> Self {
        OutputDirectoryLocator {
            marker: hpi_config::build_paths::plugin_marker_path(output_dir),
        }
    }

    pub fn marker_path(&self) -> &Path {
        &self.marker
    }
}

impl PluginClassLocator for OutputDirectoryLocator {
    fn plugin_class(&self) -> Result<Option<String>, ManifestError> {
        if !self.marker.exists() {
            return Ok(None);
        }

        let read_err = |source: std::io::Error| ManifestError::ReadFile {
            path: self.marker.clone(),
            source,
        };
        let file = File::open(&self.marker).map_err(read_err)?;
        let mut first_line = String::new();
        BufReader::new(file)
            .read_line(&mut first_line)
            .map_err(read_err)?;

        let class_name = first_line.trim();
        if class_name.is_empty() {
            return Err(ManifestError::EmptyPluginMarker(self.marker.clone()));
        }
        debug!("Plugin class from {:?}: {}", self.marker, class_name);
        Ok(Some(class_name.to_string()))
    }
}

// =============================================================================
// GIT
// =============================================================================

/// How many directories (base directory included) are searched for `.git`
const GIT_SEARCH_DEPTH: usize = 3;

/// Hex characters of the head commit kept in the version description
const SHORT_SHA_LEN: usize = 8;

/// Reads the head commit of the enclosing git checkout
///
/// The checkout root may sit a little above the project (multi-module layouts),
/// but the search stops after a few levels so it never crosses into an
/// unrelated repository.
#[derive(Debug, Clone)]
pub struct GitRepository {
    basedir: PathBuf,
}

impl GitRepository {
    pub fn new(basedir: &Path) -> Self {
        GitRepository {
            basedir: basedir.to_path_buf(),
        }
    }

    fn find_checkout_root(&self) -> Option<PathBuf> {
        self.basedir
            .ancestors()
            .take(GIT_SEARCH_DEPTH)
            .find(|dir| dir.join(".git").exists())
            .map(Path::to_path_buf)
    }
}

impl SourceControl for GitRepository {
    fn head_revision(&self) -> Option<String> {
        let root = self.find_checkout_root()?;

        let repo = match gix::open(&root) {
            Ok(repo) => repo,
            Err(e) => {
                debug!("Failed to open repository at {:?}: {}", root, e);
                return None;
            }
        };
        let head = match repo.head() {
            Ok(head) => head,
            Err(e) => {
                debug!("Failed to read HEAD in {:?}: {}", root, e);
                return None;
            }
        };

        // Unborn branches have no commit yet
        let id = head.id()?;
        Some(id.to_hex_with_len(SHORT_SHA_LEN).to_string())
    }
}

// =============================================================================
// PLATFORM VERSION
// =============================================================================

/// Core artifacts whose version is the platform version, newest naming first
pub const CORE_ARTIFACTS: &[(&str, &str)] = &[
    ("org.jenkins-ci.main", "jenkins-core"),
    ("org.jvnet.hudson.main", "hudson-core"),
];

/// Takes the platform version from configuration or the core dependency
#[derive(Debug, Clone, Default)]
pub struct CoreDependencyResolver {
    explicit: Option<String>,
}

impl CoreDependencyResolver {
    pub fn new(explicit: Option<String>) -> Self {
        CoreDependencyResolver {
            explicit: explicit.filter(|v| !v.trim().is_empty()),
        }
    }
}

impl PlatformVersionResolver for CoreDependencyResolver {
    fn platform_version(&self, project: &ProjectDescriptor) -> Result<String, ManifestError> {
        if let Some(ref version) = self.explicit {
            return Ok(version.clone());
        }

        CORE_ARTIFACTS
            .iter()
            .find_map(|(group, artifact)| {
                project
                    .dependencies
                    .iter()
                    .find(|d| d.group_id == *group && d.artifact_id == *artifact)
            })
            .map(|d| d.version.clone())
            .ok_or(ManifestError::PlatformVersionUnresolved)
    }
}

// =============================================================================
// SCOPE FILTER
// =============================================================================

/// Includes a fixed set of scopes; the default matches a runtime classpath
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeSet {
    scopes: Vec<Scope>,
}

impl ScopeSet {
    pub fn new<I, S>(scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Scope>,
    {
        ScopeSet {
            scopes: scopes.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for ScopeSet {
    fn default() -> Self {
        ScopeSet::new([Scope::Compile, Scope::Runtime])
    }
}

impl ScopeFilter for ScopeSet {
    fn include(&self, scope: &Scope) -> bool {
        self.scopes.contains(scope)
    }
}

// =============================================================================
// CLOCK
// =============================================================================

/// Local time and the login name from the environment
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl BuildClock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }

    fn user_name(&self) -> String {
        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| "unknown".to_string())
    }
}
