//! Findings model: risk levels, drift and security issues, per-dependency groups
//!
//! Issue kinds and risk levels serialize with the exact spellings of the
//! versioned report schema; renaming a variant is a breaking schema change.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Ordered severity attached to individual findings and aggregated per
/// dependency. Derived ordering: `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Policy-level verdict derived from aggregated findings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendedAction {
    #[default]
    Allow,
    Warn,
    Block,
}

impl std::fmt::Display for RecommendedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Allow => write!(f, "allow"),
            Self::Warn => write!(f, "warn"),
            Self::Block => write!(f, "block"),
        }
    }
}

/// Drift issue kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriftIssueKind {
    /// Declared and resolved versions disagree. Reserved in the schema; no
    /// current rule emits it.
    #[serde(rename = "version-mismatch")]
    VersionMismatch,
    /// A direct dependency uses a floating range instead of a pinned version
    #[serde(rename = "range-usage")]
    RangeUsage,
    /// The same package resolves to multiple versions across the graph
    #[serde(rename = "transitive-drift")]
    TransitiveDrift,
}

impl std::fmt::Display for DriftIssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VersionMismatch => write!(f, "version-mismatch"),
            Self::RangeUsage => write!(f, "range-usage"),
            Self::TransitiveDrift => write!(f, "transitive-drift"),
        }
    }
}

/// A single drift finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftIssue {
    pub dependency_name: String,
    #[serde(rename = "type")]
    pub kind: DriftIssueKind,
    pub expected: String,
    pub actual: String,
    pub reason: String,
}

/// All drift findings for one dependency name. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftIssueGroup {
    pub dependency_name: String,
    pub transitive: bool,
    pub introduced_by: Vec<String>,
    pub issues: Vec<DriftIssue>,
}

/// Security issue kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecurityIssueKind {
    /// The registry carries a deprecation message for the package
    #[serde(rename = "deprecated")]
    Deprecated,
    /// No publish within the configured staleness window
    #[serde(rename = "unmaintained")]
    Unmaintained,
    /// Exactly one registry maintainer
    #[serde(rename = "single-maintainer")]
    SingleMaintainer,
}

impl std::fmt::Display for SecurityIssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deprecated => write!(f, "deprecated"),
            Self::Unmaintained => write!(f, "unmaintained"),
            Self::SingleMaintainer => write!(f, "single-maintainer"),
        }
    }
}

/// A single security finding. The owning group carries the dependency name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityIssue {
    #[serde(rename = "type")]
    pub kind: SecurityIssueKind,
    pub reason: String,
    pub risk_level: RiskLevel,
    /// Structured key/value context for the finding
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, serde_json::Value>,
}

/// All security findings for one dependency name, with the aggregate risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityIssueGroup {
    pub dependency_name: String,
    pub transitive: bool,
    pub introduced_by: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub issues: Vec<SecurityIssue>,
    /// Maximum risk level among the group's issues
    pub overall_risk: RiskLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_levels_are_totally_ordered() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert_eq!(
            [RiskLevel::Medium, RiskLevel::Low, RiskLevel::High]
                .into_iter()
                .max(),
            Some(RiskLevel::High)
        );
    }

    #[test]
    fn issue_kinds_use_schema_spellings() {
        assert_eq!(
            serde_json::to_value(DriftIssueKind::RangeUsage).unwrap(),
            "range-usage"
        );
        assert_eq!(
            serde_json::to_value(DriftIssueKind::TransitiveDrift).unwrap(),
            "transitive-drift"
        );
        assert_eq!(
            serde_json::to_value(SecurityIssueKind::SingleMaintainer).unwrap(),
            "single-maintainer"
        );
        assert_eq!(serde_json::to_value(RiskLevel::High).unwrap(), "high");
        assert_eq!(
            serde_json::to_value(RecommendedAction::Block).unwrap(),
            "block"
        );
    }

    #[test]
    fn drift_issue_serializes_kind_as_type() {
        let issue = DriftIssue {
            dependency_name: "lodash".to_string(),
            kind: DriftIssueKind::RangeUsage,
            expected: "^4.17.21".to_string(),
            actual: "^4.17.21".to_string(),
            reason: "floating range".to_string(),
        };

        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["type"], "range-usage");
        assert_eq!(json["dependencyName"], "lodash");
    }
}
