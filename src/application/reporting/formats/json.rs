//! JSON report format implementation

use crate::application::errors::ApplicationError;
use crate::application::reporting::models::ScanReport;

/// Generate the machine-readable report: a pretty-printed rendering of the
/// versioned [`ScanReport`] schema.
pub fn generate_json_report(report: &ScanReport) -> Result<String, ApplicationError> {
    serde_json::to_string_pretty(report).map_err(ApplicationError::Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::reporting::{ReportAssembler, ScanMeta};

    #[test]
    fn json_report_round_trips_through_the_schema() {
        let report = ReportAssembler::assemble(
            ScanMeta::generate("test-project", b"lock"),
            vec![],
            vec![],
        );

        let rendered = generate_json_report(&report).unwrap();
        let parsed: ScanReport = serde_json::from_str(&rendered).unwrap();

        assert_eq!(parsed, report);
    }

    #[test]
    fn json_report_exposes_schema_keys() {
        let report = ReportAssembler::assemble(
            ScanMeta::generate("test-project", b"lock"),
            vec![],
            vec![],
        );

        let rendered = generate_json_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["meta"]["schemaVersion"], "1.0");
        assert_eq!(value["summary"]["recommendedExitCode"], 0);
        assert!(value["drift"].is_array());
        assert!(value["security"].is_array());
    }
}
