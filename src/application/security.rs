//! Supply-chain security heuristics
//!
//! Three heuristics, checked independently against each dependency's registry
//! metadata and combined into one group per dependency:
//!
//! - *Deprecated* — the registry carries a deprecation message (high risk)
//! - *Unmaintained* — last publish older than the staleness window (medium)
//! - *Single maintainer* — exactly one registry maintainer (low)
//!
//! Each distinct dependency name is evaluated once. When a name appears on
//! multiple nodes (nested installs), the first occurrence in graph order wins;
//! later same-named nodes are ignored. Dependencies with no metadata or no
//! triggered heuristic are excluded from the output.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Months, Utc};
use serde_json::json;

use crate::domain::graph::{DependencyGraph, DependencyNode};
use crate::domain::issues::{RiskLevel, SecurityIssue, SecurityIssueGroup, SecurityIssueKind};

/// Months without a publish after which a package counts as unmaintained.
pub const DEFAULT_UNMAINTAINED_MONTHS: u32 = 18;

/// Average Gregorian month length in days, used to report package age in
/// whole months.
pub const AVERAGE_DAYS_PER_MONTH: f64 = 30.44;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Tunable heuristic thresholds. The evaluation instant is injectable so
/// tests are deterministic.
#[derive(Debug, Clone)]
pub struct SecurityPolicy {
    pub unmaintained_after_months: u32,
    pub now: DateTime<Utc>,
}

impl Default for SecurityPolicy {
    fn default() -> Self {
        Self {
            unmaintained_after_months: DEFAULT_UNMAINTAINED_MONTHS,
            now: Utc::now(),
        }
    }
}

/// Evaluates supply-chain heuristics over a dependency graph.
pub struct SecurityAnalyzer {
    policy: SecurityPolicy,
}

impl Default for SecurityAnalyzer {
    fn default() -> Self {
        Self::new(SecurityPolicy::default())
    }
}

impl SecurityAnalyzer {
    pub fn new(policy: SecurityPolicy) -> Self {
        Self { policy }
    }

    /// Convenience constructor pinning the evaluation instant.
    pub fn with_now(now: DateTime<Utc>) -> Self {
        Self::new(SecurityPolicy {
            now,
            ..SecurityPolicy::default()
        })
    }

    /// Pure function of the graph: no I/O, no shared state.
    pub fn analyze(&self, graph: &DependencyGraph) -> Vec<SecurityIssueGroup> {
        let cutoff = self
            .policy
            .now
            .checked_sub_months(Months::new(self.policy.unmaintained_after_months))
            .unwrap_or(self.policy.now);

        let mut seen: HashSet<&str> = HashSet::new();
        let mut groups = Vec::new();

        for node in &graph.dependencies {
            // First insertion order wins for duplicated names.
            if !seen.insert(node.name.as_str()) {
                continue;
            }

            let issues = self.evaluate(node, cutoff);
            if issues.is_empty() {
                continue;
            }

            let overall_risk = issues
                .iter()
                .map(|issue| issue.risk_level)
                .max()
                .unwrap_or_default();

            groups.push(SecurityIssueGroup {
                dependency_name: node.name.clone(),
                transitive: node.transitive,
                introduced_by: node.introduced_by.clone(),
                description: node.metadata.description.clone(),
                issues,
                overall_risk,
            });
        }

        groups
    }

    fn evaluate(&self, node: &DependencyNode, cutoff: DateTime<Utc>) -> Vec<SecurityIssue> {
        let meta = &node.metadata;
        let mut issues = Vec::new();

        if let Some(message) = meta.deprecated.as_deref().filter(|m| !m.is_empty()) {
            let mut details = BTreeMap::new();
            details.insert("message".to_string(), json!(message));
            details.insert("latestVersion".to_string(), json!(node.resolved_version));
            if let Some(description) = &meta.description {
                details.insert("description".to_string(), json!(description));
            }

            issues.push(SecurityIssue {
                kind: SecurityIssueKind::Deprecated,
                risk_level: RiskLevel::High,
                reason: format!(
                    "The author of \"{}\" has marked this library as obsolete (deprecated). \
                     Message: \"{}\". It is highly recommended to find a modern alternative \
                     as it will likely no longer receive updates.",
                    node.name, message
                ),
                details,
            });
        }

        if let Some(last_publish) = meta.last_publish {
            if last_publish < cutoff {
                let age_days =
                    (self.policy.now - last_publish).num_seconds() as f64 / SECONDS_PER_DAY;
                let months_since = (age_days / AVERAGE_DAYS_PER_MONTH).round() as i64;

                let mut details = BTreeMap::new();
                details.insert(
                    "lastUpdate".to_string(),
                    json!(last_publish.format("%Y-%m-%d").to_string()),
                );
                details.insert("monthsSinceLastUpdate".to_string(), json!(months_since));
                details.insert("version".to_string(), json!(node.resolved_version));
                if let Some(description) = &meta.description {
                    details.insert("description".to_string(), json!(description));
                }

                issues.push(SecurityIssue {
                    kind: SecurityIssueKind::Unmaintained,
                    risk_level: RiskLevel::Medium,
                    reason: format!(
                        "The last update for \"{}\" was on {} (more than {} months ago). A \
                         library that is no longer updated may contain unpatched security \
                         vulnerabilities or become incompatible with newer Node.js versions.",
                        node.name,
                        last_publish.format("%Y-%m-%d"),
                        self.policy.unmaintained_after_months
                    ),
                    details,
                });
            }
        }

        if meta.maintainers == Some(1) {
            let mut details = BTreeMap::new();
            details.insert("maintainerCount".to_string(), json!(1));
            if let Some(description) = &meta.description {
                details.insert("description".to_string(), json!(description));
            }

            issues.push(SecurityIssue {
                kind: SecurityIssueKind::SingleMaintainer,
                risk_level: RiskLevel::Low,
                reason: format!(
                    "\"{}\" is managed by only one person. This is risky because if this \
                     person stops maintaining it or if their account is compromised, there \
                     is no one else to fix issues quickly.",
                    node.name
                ),
                details,
            });
        }

        issues
    }
}
