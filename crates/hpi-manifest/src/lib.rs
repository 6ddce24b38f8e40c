//! Jenkins plugin manifest generation
//!
//! This crate derives the main-section attributes of a plugin manifest
//! (`Short-Name`, `Plugin-Version`, `Plugin-Dependencies`, ...) from the
//! project model and plugin settings, validates them, and writes the
//! `MANIFEST.MF` consumed by the archiving step.
//!
//! Everything the host build knows beyond the project model (compiled
//! classes, source control, platform version, scope filter, clock) is reached
//! through the traits in [`collaborators`].

pub mod builder;
pub mod collaborators;
pub mod dependencies;
pub mod descriptor;
pub mod errors;
pub mod generate;
pub mod manifest;
pub mod manifest_writer;
pub mod types;
pub mod validation;
pub mod version;

pub use builder::{build_attributes, AttributeBuilder, BuildReport};
pub use collaborators::{
    BuildClock, Collaborators, PlatformVersionResolver, PluginClassLocator, ScopeFilter,
    SourceControl,
};
pub use descriptor::BuildDescriptor;
pub use errors::ManifestError;
pub use generate::{generate, generate_manifest, generate_manifest_with, DefaultCollaborators};
pub use manifest::ManifestAttributes;
pub use types::{DependencyArtifact, Developer, Packaging, PluginSettings, ProjectDescriptor, Scope};

// Re-export manifest writer utilities for custom paths
pub use manifest_writer::{read_from_path, write_to_path};
