//! Console report format implementation
//!
//! Human-readable rendering of a [`ScanReport`]: summary block, per-group
//! drift and security sections, and the recommended exit code footer.

use crate::application::reporting::models::ScanReport;
use crate::domain::issues::RiskLevel;

/// Generate the human-readable console report.
pub fn generate_console_report(report: &ScanReport) -> String {
    let summary = &report.summary;
    let mut output = String::new();

    output.push_str("\n=== depdrift Analysis ===\n");
    output.push_str(&format!(
        "Risk Level: {}\n",
        summary.risk_level.to_string().to_uppercase()
    ));
    output.push_str(&format!(
        "Action:     {}\n",
        summary.recommended_action.to_string().to_uppercase()
    ));
    output.push_str(&format!("Reason:     {}\n\n", summary.risk_reason));
    output.push_str(&format!("Drift Issues: {}\n", summary.drift_count));
    output.push_str(&format!("Security Issues: {}\n\n", summary.security_count));

    if !report.drift.is_empty() {
        output.push_str("--- Dependency Drift ---\n");
        for group in &report.drift {
            output.push_str(&format!(
                "{} {}{}\n",
                scope_label(group.transitive),
                group.dependency_name,
                via_parents(group.transitive, &group.introduced_by)
            ));
            output.push_str(
                "  Impact: This dependency has version fluctuations which can lead to \
                 \"works on my machine\" bugs.\n",
            );

            for issue in &group.issues {
                output.push_str(&format!(
                    "  - [{}] {}\n",
                    issue.kind.to_string().to_uppercase(),
                    issue.reason
                ));
                output.push_str(&format!(
                    "    Expected: {}, Actual: {}\n",
                    issue.expected, issue.actual
                ));
            }
            output.push('\n');
        }
    }

    if !report.security.is_empty() {
        output.push_str("--- Security Heuristics ---\n");
        for group in &report.security {
            output.push_str(&format!(
                "[{}] {} {}{}\n",
                group.overall_risk.to_string().to_uppercase(),
                scope_label(group.transitive),
                group.dependency_name,
                via_parents(group.transitive, &group.introduced_by)
            ));
            output.push_str(&format!("  Impact: {}\n", risk_impact(group.overall_risk)));

            if let Some(description) = &group.description {
                output.push_str(&format!("  Description: {}\n", description));
            }

            for issue in &group.issues {
                output.push_str(&format!(
                    "  - [{}] {}\n",
                    issue.kind.to_string().to_uppercase(),
                    issue.reason
                ));

                let details: Vec<String> = issue
                    .details
                    .iter()
                    .filter(|(key, _)| key.as_str() != "description")
                    .map(|(key, value)| format!("{}: {}", key, detail_display(value)))
                    .collect();
                if !details.is_empty() {
                    output.push_str(&format!("      Details: {}\n", details.join(", ")));
                }
            }
            output.push('\n');
        }
    }

    if summary.drift_count == 0 && summary.security_count == 0 {
        output.push_str("No issues detected. Your dependencies are healthy!\n");
    }

    output.push_str(&format!(
        "\nRecommended Exit Code: {}\n",
        summary.recommended_exit_code
    ));

    output
}

fn scope_label(transitive: bool) -> &'static str {
    if transitive {
        "[TRANSITIVE]"
    } else {
        "[DIRECT]"
    }
}

fn via_parents(transitive: bool, introduced_by: &[String]) -> String {
    if transitive && !introduced_by.is_empty() {
        format!(" (via {})", introduced_by.join(", "))
    } else {
        String::new()
    }
}

fn risk_impact(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::High => {
            "This package is deprecated or critical; it should be replaced immediately \
             to avoid security breaches."
        }
        RiskLevel::Medium => {
            "This package is unmaintained; it may have hidden vulnerabilities or \
             compatibility issues."
        }
        RiskLevel::Low => "This package has minor supply chain risks (e.g., single maintainer).",
    }
}

/// Strings render bare; everything else falls back to JSON notation.
fn detail_display(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::reporting::{ReportAssembler, ScanMeta};
    use crate::domain::issues::{
        DriftIssue, DriftIssueGroup, DriftIssueKind, SecurityIssue, SecurityIssueGroup,
        SecurityIssueKind,
    };
    use std::collections::BTreeMap;

    fn sample_report() -> ScanReport {
        let drift = vec![DriftIssueGroup {
            dependency_name: "lodash".to_string(),
            transitive: false,
            introduced_by: vec![],
            issues: vec![DriftIssue {
                dependency_name: "lodash".to_string(),
                kind: DriftIssueKind::RangeUsage,
                expected: "^4.17.21".to_string(),
                actual: "^4.17.21".to_string(),
                reason: "floating range".to_string(),
            }],
        }];

        let mut details = BTreeMap::new();
        details.insert("maintainerCount".to_string(), serde_json::json!(1));
        details.insert(
            "description".to_string(),
            serde_json::json!("hidden from details"),
        );
        let security = vec![SecurityIssueGroup {
            dependency_name: "solo-pkg".to_string(),
            transitive: true,
            introduced_by: vec!["parent-a".to_string(), "parent-b".to_string()],
            description: Some("a one-person package".to_string()),
            issues: vec![SecurityIssue {
                kind: SecurityIssueKind::SingleMaintainer,
                reason: "single maintainer".to_string(),
                risk_level: crate::domain::issues::RiskLevel::Low,
                details,
            }],
            overall_risk: crate::domain::issues::RiskLevel::Low,
        }];

        ReportAssembler::assemble(ScanMeta::generate("test-project", b"lock"), drift, security)
    }

    #[test]
    fn renders_summary_and_group_sections() {
        let output = generate_console_report(&sample_report());

        assert!(output.contains("=== depdrift Analysis ==="));
        assert!(output.contains("Risk Level: MEDIUM"));
        assert!(output.contains("Action:     WARN"));
        assert!(output.contains("--- Dependency Drift ---"));
        assert!(output.contains("[DIRECT] lodash"));
        assert!(output.contains("- [RANGE-USAGE]"));
        assert!(output.contains("Expected: ^4.17.21, Actual: ^4.17.21"));
        assert!(output.contains("--- Security Heuristics ---"));
        assert!(output.contains("[LOW] [TRANSITIVE] solo-pkg (via parent-a, parent-b)"));
        assert!(output.contains("Description: a one-person package"));
        assert!(output.contains("Recommended Exit Code: 3"));
    }

    #[test]
    fn description_is_excluded_from_detail_lines() {
        let output = generate_console_report(&sample_report());

        assert!(output.contains("Details: maintainerCount: 1"));
        assert!(!output.contains("description: hidden from details"));
    }

    #[test]
    fn clean_report_prints_healthy_message() {
        let report =
            ReportAssembler::assemble(ScanMeta::generate("test-project", b"lock"), vec![], vec![]);

        let output = generate_console_report(&report);

        assert!(output.contains("No issues detected. Your dependencies are healthy!"));
        assert!(output.contains("Recommended Exit Code: 0"));
    }
}
