//! Drift detection
//!
//! Two rules, applied independently and merged per dependency name:
//!
//! - *Range usage* — a direct dependency declared with a floating range
//! - *Transitive drift* — the same package resolving to more than one version
//!   across the graph
//!
//! Output order is deterministic: groups appear in first-issue order, and a
//! dependency with no triggered rule produces no group at all.

use std::collections::HashMap;

use crate::domain::graph::{DependencyGraph, DependencyNode};
use crate::domain::issues::{DriftIssue, DriftIssueGroup, DriftIssueKind};

/// Classifies a declared version specifier as floating or pinned.
///
/// Kept as a seam so range policy can evolve (e.g. recognizing `>=` or `*`)
/// without touching the grouping logic.
pub trait RangeClassifier: Send + Sync {
    /// True when `range` allows npm to install a newer version automatically.
    fn is_floating(&self, range: &str) -> bool;
}

/// Default policy: npm caret/tilde prefixes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixRangeClassifier;

impl RangeClassifier for PrefixRangeClassifier {
    fn is_floating(&self, range: &str) -> bool {
        range.starts_with('^') || range.starts_with('~')
    }
}

/// Detects version drift across a dependency graph.
pub struct DriftAnalyzer {
    classifier: Box<dyn RangeClassifier>,
}

impl Default for DriftAnalyzer {
    fn default() -> Self {
        Self::new(Box::new(PrefixRangeClassifier))
    }
}

impl DriftAnalyzer {
    pub fn new(classifier: Box<dyn RangeClassifier>) -> Self {
        Self { classifier }
    }

    /// Pure function of the graph: no I/O, no shared state, deterministic.
    pub fn detect(&self, graph: &DependencyGraph) -> Vec<DriftIssueGroup> {
        let mut findings: Vec<DriftIssue> = Vec::new();

        for node in &graph.dependencies {
            if !node.transitive && self.classifier.is_floating(&node.version) {
                findings.push(range_usage_issue(node));
            }
        }

        // name -> distinct resolved versions, both in first-seen order
        let mut names: Vec<&str> = Vec::new();
        let mut versions: HashMap<&str, Vec<&str>> = HashMap::new();
        for node in &graph.dependencies {
            let distinct = versions.entry(node.name.as_str()).or_insert_with(|| {
                names.push(node.name.as_str());
                Vec::new()
            });
            if !distinct.contains(&node.resolved_version.as_str()) {
                distinct.push(node.resolved_version.as_str());
            }
        }
        for name in names {
            let distinct = &versions[name];
            if distinct.len() > 1 {
                findings.push(transitive_drift_issue(name, distinct));
            }
        }

        fold_into_groups(graph, findings)
    }
}

fn range_usage_issue(node: &DependencyNode) -> DriftIssue {
    let symbol: String = node.version.chars().take(1).collect();
    DriftIssue {
        dependency_name: node.name.clone(),
        kind: DriftIssueKind::RangeUsage,
        expected: node.version.clone(),
        actual: node.version.clone(),
        reason: format!(
            "The dependency \"{}\" uses a \"{}\" symbol (e.g., ^ or ~). This means npm \
             might automatically install a newer version. To ensure everyone uses the exact \
             same version, it is better to use a fixed version (e.g., \"1.2.3\" instead of \
             \"{}\").",
            node.name, symbol, node.version
        ),
    }
}

fn transitive_drift_issue(name: &str, distinct: &[&str]) -> DriftIssue {
    let joined = distinct.join(", ");
    DriftIssue {
        dependency_name: name.to_string(),
        kind: DriftIssueKind::TransitiveDrift,
        expected: distinct[0].to_string(),
        actual: joined.clone(),
        reason: format!(
            "Multiple versions of \"{}\" are present in your project ({}). This often \
             happens when different libraries require incompatible versions of the same \
             dependency. This can increase project size and cause unpredictable bugs.",
            name, joined
        ),
    }
}

/// Fold the flat finding list into per-name groups, in first-issue order.
/// Group attributes are copied from the first node carrying the name.
fn fold_into_groups(graph: &DependencyGraph, findings: Vec<DriftIssue>) -> Vec<DriftIssueGroup> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, DriftIssueGroup> = HashMap::new();

    for issue in findings {
        let name = issue.dependency_name.clone();
        let group = groups.entry(name.clone()).or_insert_with(|| {
            order.push(name.clone());
            let node = graph.dependencies.iter().find(|d| d.name == name);
            DriftIssueGroup {
                dependency_name: name.clone(),
                transitive: node.map(|n| n.transitive).unwrap_or(false),
                introduced_by: node.map(|n| n.introduced_by.clone()).unwrap_or_default(),
                issues: Vec::new(),
            }
        });
        group.issues.push(issue);
    }

    order
        .into_iter()
        .filter_map(|name| groups.remove(&name))
        .collect()
}
