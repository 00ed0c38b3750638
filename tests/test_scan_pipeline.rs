//! End-to-end pipeline tests: loader -> graph builder -> analyzers -> report

mod common;

use std::collections::HashMap;

use chrono::{TimeZone, Utc};

use depdrift::application::graph_builder::build_dependency_graph;
use depdrift::application::reporting::formats::generate_json_report;
use depdrift::application::reporting::{
    ReportAssembler, ScanMeta, ScanReport, EXIT_DRIFT, EXIT_DRIFT_AND_SECURITY,
};
use depdrift::application::{DriftAnalyzer, SecurityAnalyzer};
use depdrift::domain::graph::Environment;
use depdrift::domain::issues::{DriftIssueKind, RecommendedAction, RiskLevel};
use depdrift::domain::project::RegistryMetadata;
use depdrift::infrastructure::project::load_project;

use common::{write_project, CLEAN_LOCKFILE, CLEAN_MANIFEST, DRIFTING_LOCKFILE, DRIFTING_MANIFEST};

fn deprecated_lodash_metadata() -> HashMap<String, RegistryMetadata> {
    let document: RegistryMetadata = serde_json::from_str(
        r#"{
            "name": "lodash",
            "dist-tags": { "latest": "4.17.21" },
            "time": { "4.17.21": "2021-02-20T15:42:16.891Z" },
            "maintainers": [{ "name": "jdalton" }],
            "deprecated": "use lodash-es instead",
            "description": "Lodash modular utilities."
        }"#,
    )
    .unwrap();

    HashMap::from([("lodash".to_string(), document)])
}

#[tokio::test]
async fn drifting_project_with_deprecated_package_blocks() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path(), DRIFTING_MANIFEST, DRIFTING_LOCKFILE);

    let project = load_project(dir.path()).await.unwrap();
    let graph = build_dependency_graph(&project, &deprecated_lodash_metadata(), Environment::Ci);

    assert_eq!(graph.root, "fixture-app");
    assert_eq!(graph.environment, Environment::Ci);

    let nested_ms = graph
        .dependencies
        .iter()
        .filter(|d| d.name == "ms")
        .collect::<Vec<_>>();
    assert_eq!(nested_ms.len(), 2);
    assert!(nested_ms.iter().all(|d| d.transitive));
    assert!(nested_ms
        .iter()
        .any(|d| d.introduced_by.contains(&"debug".to_string())));

    let drift = DriftAnalyzer::default().detect(&graph);
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
    let security = SecurityAnalyzer::with_now(now).analyze(&graph);

    // lodash floats, ms resolves to two versions.
    let drift_names: Vec<&str> = drift.iter().map(|g| g.dependency_name.as_str()).collect();
    assert_eq!(drift_names, vec!["lodash", "ms"]);
    assert_eq!(drift[0].issues[0].kind, DriftIssueKind::RangeUsage);
    assert_eq!(drift[1].issues[0].kind, DriftIssueKind::TransitiveDrift);
    assert_eq!(drift[1].issues[0].actual, "2.1.2, 2.0.0");

    // lodash is deprecated + unmaintained + single-maintainer at this instant.
    assert_eq!(security.len(), 1);
    assert_eq!(security[0].dependency_name, "lodash");
    assert_eq!(security[0].issues.len(), 3);
    assert_eq!(security[0].overall_risk, RiskLevel::High);

    let meta = ScanMeta::generate(&graph.root, &project.lockfile_bytes);
    let report = ReportAssembler::assemble(meta, drift, security);

    assert_eq!(report.summary.drift_count, 2);
    assert_eq!(report.summary.security_count, 1);
    assert_eq!(report.summary.risk_level, RiskLevel::High);
    assert_eq!(report.summary.recommended_action, RecommendedAction::Block);
    assert_eq!(
        report.summary.recommended_exit_code,
        EXIT_DRIFT_AND_SECURITY
    );

    // The rendered JSON parses back into the same report.
    let rendered = generate_json_report(&report).unwrap();
    let parsed: ScanReport = serde_json::from_str(&rendered).unwrap();
    assert_eq!(parsed, report);
}

#[tokio::test]
async fn drifting_project_without_metadata_warns_on_drift_only() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path(), DRIFTING_MANIFEST, DRIFTING_LOCKFILE);

    let project = load_project(dir.path()).await.unwrap();
    let graph = build_dependency_graph(&project, &HashMap::new(), Environment::Local);

    let drift = DriftAnalyzer::default().detect(&graph);
    let security = SecurityAnalyzer::default().analyze(&graph);

    assert!(security.is_empty());

    let meta = ScanMeta::generate(&graph.root, &project.lockfile_bytes);
    let report = ReportAssembler::assemble(meta, drift, security);

    assert_eq!(report.summary.risk_level, RiskLevel::Medium);
    assert_eq!(report.summary.recommended_action, RecommendedAction::Warn);
    assert_eq!(report.summary.recommended_exit_code, EXIT_DRIFT);
}

#[tokio::test]
async fn clean_project_allows_with_exit_zero() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path(), CLEAN_MANIFEST, CLEAN_LOCKFILE);

    let project = load_project(dir.path()).await.unwrap();
    let graph = build_dependency_graph(&project, &HashMap::new(), Environment::Local);

    let drift = DriftAnalyzer::default().detect(&graph);
    let security = SecurityAnalyzer::default().analyze(&graph);
    let meta = ScanMeta::generate(&graph.root, &project.lockfile_bytes);
    let report = ReportAssembler::assemble(meta, drift, security);

    assert_eq!(report.summary.recommended_exit_code, 0);
    assert_eq!(report.summary.risk_level, RiskLevel::Low);
    assert_eq!(report.summary.recommended_action, RecommendedAction::Allow);
}

#[tokio::test]
async fn scanning_the_same_project_twice_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path(), DRIFTING_MANIFEST, DRIFTING_LOCKFILE);

    let project = load_project(dir.path()).await.unwrap();

    let first = build_dependency_graph(&project, &HashMap::new(), Environment::Local);
    let second = build_dependency_graph(&project, &HashMap::new(), Environment::Local);
    assert_eq!(first, second);

    let drift_first = DriftAnalyzer::default().detect(&first);
    let drift_second = DriftAnalyzer::default().detect(&second);
    assert_eq!(drift_first, drift_second);
}
