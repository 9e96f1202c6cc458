use crate::prelude::*;

/// Source tag attached to every diagnostic this server publishes. Code
/// actions only consider diagnostics carrying this tag.
pub(crate) const DIAGNOSTIC_SOURCE: &str = "bpmncode";

/// Span width used when a record predates the `start`/`end` offsets.
const LEGACY_SPAN_WIDTH: u32 = 10;

impl From<&DiagnosticRecord> for Diagnostic {
    fn from(record: &DiagnosticRecord) -> Self {
        let width = match (record.start, record.end) {
            (Some(start), Some(end)) => end.saturating_sub(start),
            _ => LEGACY_SPAN_WIDTH,
        };
        Diagnostic {
            range: editor_range(record.line, record.column, width),
            severity: Some(ReportSeverity(record.severity.as_str()).into()),
            code: Some(NumberOrString::String(record.code.clone())),
            code_description: None,
            source: Some(DIAGNOSTIC_SOURCE.to_string()),
            message: record.message.clone(),
            related_information: None,
            tags: None,
            data: None,
        }
    }
}

/// Translate a whole report, one diagnostic per record, order preserved.
/// Infallible: a degenerate record (empty message, unknown severity) still
/// yields a best-effort diagnostic rather than hiding the rest of the
/// batch. The wire `suggestions` array is informational only; quick-fix
/// candidates come from the message text instead.
pub(crate) fn translate_report(report: &AnalysisReport) -> Vec<Diagnostic> {
    report
        .errors
        .iter()
        .map(|record| {
            if !record.suggestions.is_empty() {
                log::debug!(
                    "record {code} carries wire suggestions {suggestions:?}; using message text for fixes",
                    code = record.code,
                    suggestions = record.suggestions,
                );
            }
            Diagnostic::from(record)
        })
        .collect()
}
