//! Dependency graph model
//!
//! The graph is built once per scan from the lockfile/manifest snapshot and
//! registry responses, then consumed read-only by the analyzers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Environment a scan runs in, recorded in the graph and report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Ci,
    Prod,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Ci => write!(f, "ci"),
            Self::Prod => write!(f, "prod"),
        }
    }
}

/// Registry-derived facts relevant to analysis.
///
/// Every field is optional: absence means "unknown", not "risk-free". A
/// package with no registry record carries an empty projection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageMetadata {
    /// Publish instant of the latest dist-tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_publish: Option<DateTime<Utc>>,
    /// Number of registry maintainers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintainers: Option<usize>,
    /// Deprecation message set by the package author
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
    /// Free-text package description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One package instance from the lockfile's `packages` listing.
///
/// The same name can appear on multiple nodes when the lockfile contains
/// nested installs; analyzers group their findings per name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyNode {
    pub name: String,
    /// Declared specifier: the manifest's requested range for direct
    /// dependencies, otherwise the lockfile-resolved version
    pub version: String,
    /// Exact version the lockfile pinned for this instance
    pub resolved_version: String,
    /// True iff the name is absent from the manifest's dependency maps
    pub transitive: bool,
    /// Parent packages whose dependency declarations pulled this one in,
    /// excluding the project root
    pub introduced_by: Vec<String>,
    #[serde(default)]
    pub metadata: PackageMetadata,
}

/// Normalized dependency graph for one scan. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyGraph {
    /// Project name from the manifest
    pub root: String,
    pub environment: Environment,
    pub dependencies: Vec<DependencyNode>,
}

impl DependencyGraph {
    /// Number of package instances in the graph
    pub fn package_count(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}
