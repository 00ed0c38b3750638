//! Versioned scan report models
//!
//! The report is a stable wire format: machine consumers rely on its key
//! names and enum spellings, so changes here require a schema version bump.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::issues::{
    DriftIssueGroup, RecommendedAction, RiskLevel, SecurityIssueGroup,
};

/// Report schema version emitted in `meta.schemaVersion`.
pub const SCHEMA_VERSION: &str = "1.0";

/// Identity of one scan invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanMeta {
    pub schema_version: String,
    pub scan_id: Uuid,
    pub project_name: String,
    /// Stable fingerprint of the scanned lockfile
    pub project_id: String,
    pub generated_at: DateTime<Utc>,
}

impl ScanMeta {
    /// Generate scan identity: a fresh scan id plus a lockfile-stable project
    /// id (SHA-256 over the lockfile bytes).
    pub fn generate(project_name: &str, lockfile_bytes: &[u8]) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            scan_id: Uuid::new_v4(),
            project_name: project_name.to_string(),
            project_id: format!("{:x}", Sha256::digest(lockfile_bytes)),
            generated_at: Utc::now(),
        }
    }
}

/// Summary counters and the policy verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Total drift issues across all groups
    pub drift_count: usize,
    /// Distinct security-flagged dependencies
    pub security_count: usize,
    pub risk_level: RiskLevel,
    pub risk_reason: String,
    pub recommended_action: RecommendedAction,
    pub recommended_exit_code: i32,
}

/// Complete scan report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub meta: ScanMeta,
    pub summary: ReportSummary,
    pub drift: Vec<DriftIssueGroup>,
    pub security: Vec<SecurityIssueGroup>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_id_is_stable_for_identical_lockfiles() {
        let first = ScanMeta::generate("app", b"{\"packages\":{}}");
        let second = ScanMeta::generate("app", b"{\"packages\":{}}");

        assert_eq!(first.project_id, second.project_id);
        assert_eq!(first.project_id.len(), 64);
        // Scan ids are per-invocation.
        assert_ne!(first.scan_id, second.scan_id);
    }

    #[test]
    fn meta_serializes_with_schema_keys() {
        let meta = ScanMeta::generate("app", b"lock");
        let json = serde_json::to_value(&meta).unwrap();

        assert_eq!(json["schemaVersion"], SCHEMA_VERSION);
        assert!(json["scanId"].is_string());
        assert!(json["generatedAt"].is_string());
        assert_eq!(json["projectName"], "app");
    }
}
