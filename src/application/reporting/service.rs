//! Report assembly
//!
//! Combines both analyzers' outputs into the versioned report: summary
//! counters, an overall risk level, a recommended action and a recommended
//! process exit code. These policies are part of the stable report contract
//! and must not drift between releases.

use std::collections::BTreeSet;

use crate::domain::issues::{
    DriftIssueGroup, RecommendedAction, RiskLevel, SecurityIssueGroup,
};

use super::models::{ReportSummary, ScanMeta, ScanReport};

/// No findings at all.
pub const EXIT_CLEAN: i32 = 0;
/// Drift findings only.
pub const EXIT_DRIFT: i32 = 1;
/// Security findings only.
pub const EXIT_SECURITY: i32 = 2;
/// Both drift and security findings.
pub const EXIT_DRIFT_AND_SECURITY: i32 = 3;
/// The scan itself failed.
pub const EXIT_INTERNAL_ERROR: i32 = 4;

/// Assembles analyzer outputs into a [`ScanReport`].
pub struct ReportAssembler;

impl ReportAssembler {
    pub fn assemble(
        meta: ScanMeta,
        drift: Vec<DriftIssueGroup>,
        security: Vec<SecurityIssueGroup>,
    ) -> ScanReport {
        let drift_count: usize = drift.iter().map(|group| group.issues.len()).sum();
        let security_count = security.len();

        let (risk_level, recommended_action) = overall_policy(&drift, &security);

        let summary = ReportSummary {
            drift_count,
            security_count,
            risk_level,
            risk_reason: risk_reason(&drift, &security),
            recommended_action,
            recommended_exit_code: exit_code(drift_count, security_count),
        };

        ScanReport {
            meta,
            summary,
            drift,
            security,
        }
    }
}

/// Highest security risk wins; any drift alone still warrants a warning.
fn overall_policy(
    drift: &[DriftIssueGroup],
    security: &[SecurityIssueGroup],
) -> (RiskLevel, RecommendedAction) {
    if security
        .iter()
        .any(|group| group.overall_risk == RiskLevel::High)
    {
        (RiskLevel::High, RecommendedAction::Block)
    } else if security
        .iter()
        .any(|group| group.overall_risk == RiskLevel::Medium)
        || !drift.is_empty()
    {
        (RiskLevel::Medium, RecommendedAction::Warn)
    } else {
        (RiskLevel::Low, RecommendedAction::Allow)
    }
}

fn risk_reason(drift: &[DriftIssueGroup], security: &[SecurityIssueGroup]) -> String {
    let mut affected: BTreeSet<&str> = security
        .iter()
        .map(|group| group.dependency_name.as_str())
        .collect();
    affected.extend(drift.iter().map(|group| group.dependency_name.as_str()));

    if affected.is_empty() {
        return "No significant risks detected. Your dependencies appear healthy.".to_string();
    }

    let transitive_count = security.iter().filter(|group| group.transitive).count()
        + drift
            .iter()
            .filter(|group| {
                group.transitive
                    && !security
                        .iter()
                        .any(|s| s.dependency_name == group.dependency_name)
            })
            .count();

    let transitive_text = if transitive_count > 0 {
        format!(" ({} transitive)", transitive_count)
    } else {
        String::new()
    };

    format!(
        "{} dependenc{} security or drift issues{}, increasing breakage and security risk.",
        affected.len(),
        if affected.len() > 1 { "ies have" } else { "y has" },
        transitive_text
    )
}

fn exit_code(drift_count: usize, security_count: usize) -> i32 {
    match (drift_count > 0, security_count > 0) {
        (true, true) => EXIT_DRIFT_AND_SECURITY,
        (true, false) => EXIT_DRIFT,
        (false, true) => EXIT_SECURITY,
        (false, false) => EXIT_CLEAN,
    }
}
