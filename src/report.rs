use crate::prelude::*;

/// One issue as reported by `bpmncode check --format json`. Positions are
/// 1-based; `start`/`end` are a half-open character-offset span into the
/// file. Reports from older checker builds omit `start`/`end`.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct DiagnosticRecord {
    #[serde(default)]
    pub(crate) severity: String,
    #[serde(default)]
    pub(crate) message: String,
    pub(crate) line: u32,
    pub(crate) column: u32,
    #[serde(default)]
    pub(crate) start: Option<u32>,
    #[serde(default)]
    pub(crate) end: Option<u32>,
    #[serde(default)]
    pub(crate) suggestions: Vec<String>,
    #[serde(default)]
    pub(crate) code: String,
}

/// Summary block of the wire format. Derivable from `errors`; carried on the
/// wire only.
#[allow(dead_code)]
#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct ReportSummary {
    #[serde(default)]
    pub(crate) error_count: u32,
    #[serde(default)]
    pub(crate) warning_count: u32,
    #[serde(default)]
    pub(crate) has_errors: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct AnalysisReport {
    #[serde(default)]
    pub(crate) file: String,
    #[serde(default)]
    pub(crate) errors: Vec<DiagnosticRecord>,
    #[serde(default)]
    pub(crate) summary: ReportSummary,
}

impl AnalysisReport {
    pub(crate) fn empty(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Default::default()
        }
    }
}

/// Strict parse of the checker's stdout. Malformed input fails as a whole;
/// partial records are never dropped silently.
pub(crate) fn parse_report(raw: &str) -> std::result::Result<AnalysisReport, serde_json::Error> {
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_report() {
        let report = parse_report(
            r#"{
                "file": "order.bpmn",
                "errors": [{
                    "severity": "warning",
                    "message": "unused pool 'billing'",
                    "line": 4,
                    "column": 1,
                    "start": 31,
                    "end": 38,
                    "suggestions": [],
                    "code": "W010"
                }],
                "summary": {"error_count": 0, "warning_count": 1, "has_errors": false}
            }"#,
        )
        .unwrap();
        assert_eq!(report.file, "order.bpmn");
        assert_eq!(report.errors.len(), 1);
        let record = &report.errors[0];
        assert_eq!(record.severity, "warning");
        assert_eq!(record.line, 4);
        assert_eq!((record.start, record.end), (Some(31), Some(38)));
        assert_eq!(record.code, "W010");
        assert_eq!(report.summary.warning_count, 1);
    }

    #[test]
    fn unknown_severity_is_not_rejected_at_parse_time() {
        let report = parse_report(
            r#"{"errors":[{"severity":"catastrophic","message":"m","line":1,"column":1}]}"#,
        )
        .unwrap();
        assert_eq!(report.errors[0].severity, "catastrophic");
    }

    #[test]
    fn record_without_message_still_parses() {
        let report = parse_report(r#"{"errors":[{"severity":"error","line":3,"column":2}]}"#).unwrap();
        assert_eq!(report.errors[0].message, "");
        assert_eq!(report.errors[0].start, None);
    }

    #[test]
    fn malformed_input_fails_loudly() {
        assert!(parse_report("not json at all").is_err());
        assert!(parse_report(r#"{"errors":[{"line":"three"}]}"#).is_err());
    }
}
