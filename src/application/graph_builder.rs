//! Dependency graph construction
//!
//! Turns the parsed manifest/lockfile pair plus fetched registry metadata into
//! the normalized [`DependencyGraph`]. Parent chains are reconstructed from
//! two independent lockfile signals, because the two lockfile representations
//! disagree about where edges live:
//!
//! 1. *Path nesting* — `node_modules/a/node_modules/b` makes `a` a parent of
//!    `b`. Covers nested-install topology in lockfiles that record no explicit
//!    per-entry dependency maps.
//! 2. *Declared dependencies* — an entry's own `dependencies` /
//!    `devDependencies` / `optionalDependencies` maps name its children.
//!    Covers flat (hoisted) installs.
//!
//! Both signals feed the same parent map; duplicates collapse via set
//! semantics. Construction never fails: absent versions, absent metadata and
//! unknown parents all degrade to empty values.

use std::collections::{BTreeSet, HashMap};

use crate::domain::graph::{DependencyGraph, DependencyNode, Environment, PackageMetadata};
use crate::domain::project::{RawProject, RegistryMetadata};

/// Build the normalized dependency graph for one scan.
///
/// Emits one node per installed lockfile entry (root and workspace-local
/// paths are skipped), so a package name can appear on multiple nodes when
/// the lockfile nests installs. The project root is never listed among a
/// node's `introduced_by` parents.
pub fn build_dependency_graph(
    project: &RawProject,
    metadata: &HashMap<String, RegistryMetadata>,
    environment: Environment,
) -> DependencyGraph {
    let root = project.manifest.root_name();
    let direct = project.manifest.direct_dependencies();
    let parents = collect_parent_map(project, root);

    let mut dependencies = Vec::new();
    for record in &project.lockfile.packages {
        let Some(name) = record.package_name() else {
            continue;
        };

        let resolved_version = record.entry.version.clone().unwrap_or_default();
        let version = direct
            .get(name)
            .map(|range| (*range).to_string())
            .unwrap_or_else(|| resolved_version.clone());

        let introduced_by = parents
            .get(name)
            .map(|set| {
                set.iter()
                    .filter(|parent| parent.as_str() != root)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        dependencies.push(DependencyNode {
            name: name.to_string(),
            version,
            resolved_version,
            transitive: !direct.contains_key(name),
            introduced_by,
            metadata: metadata.get(name).map(project_metadata).unwrap_or_default(),
        });
    }

    DependencyGraph {
        root: root.to_string(),
        environment,
        dependencies,
    }
}

/// Accumulate the name -> parent-set map from both lockfile signals.
fn collect_parent_map(project: &RawProject, root: &str) -> HashMap<String, BTreeSet<String>> {
    let mut parents: HashMap<String, BTreeSet<String>> = HashMap::new();

    for record in &project.lockfile.packages {
        // Path-nesting signal: the second-to-last node_modules segment is a
        // parent of the last one.
        let segments: Vec<&str> = record.path.split("node_modules/").collect();
        if segments.len() > 2 {
            let child = segments[segments.len() - 1];
            let parent = segments[segments.len() - 2].trim_end_matches('/');
            parents
                .entry(child.to_string())
                .or_default()
                .insert(parent.to_string());
        }

        // Declared-dependency signal: this entry is a parent of every child
        // named in its own dependency maps. The root entry contributes the
        // project name.
        let current = if record.path.is_empty() {
            root
        } else {
            record
                .path
                .split("node_modules/")
                .last()
                .unwrap_or(record.path.as_str())
        };
        for child in record.entry.declared_children() {
            parents
                .entry(child.to_string())
                .or_default()
                .insert(current.to_string());
        }
    }

    parents
}

/// Project the registry document down to the fields analysis consumes.
fn project_metadata(meta: &RegistryMetadata) -> PackageMetadata {
    PackageMetadata {
        last_publish: meta.latest_publish(),
        maintainers: meta.maintainer_count(),
        deprecated: meta.deprecated.clone(),
        description: meta.description.clone(),
    }
}
