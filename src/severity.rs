use crate::prelude::*;

/// Severity string as it appears on the wire.
pub(crate) struct ReportSeverity<'a>(pub(crate) &'a str);

impl From<ReportSeverity<'_>> for DiagnosticSeverity {
    fn from(severity: ReportSeverity<'_>) -> Self {
        match severity.0 {
            "error" => DiagnosticSeverity::ERROR,
            "warning" => DiagnosticSeverity::WARNING,
            "info" => DiagnosticSeverity::INFORMATION,
            "hint" => DiagnosticSeverity::HINT,
            // Under-reporting severity is worse than over-reporting it.
            _ => DiagnosticSeverity::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_severities_map_distinctly() {
        assert_eq!(
            DiagnosticSeverity::from(ReportSeverity("error")),
            DiagnosticSeverity::ERROR
        );
        assert_eq!(
            DiagnosticSeverity::from(ReportSeverity("warning")),
            DiagnosticSeverity::WARNING
        );
        assert_eq!(
            DiagnosticSeverity::from(ReportSeverity("info")),
            DiagnosticSeverity::INFORMATION
        );
        assert_eq!(
            DiagnosticSeverity::from(ReportSeverity("hint")),
            DiagnosticSeverity::HINT
        );
    }

    #[test]
    fn anything_else_maps_to_error() {
        for severity in ["", "fatal", "Warning", "INFO", "notice"] {
            assert_eq!(
                DiagnosticSeverity::from(ReportSeverity(severity)),
                DiagnosticSeverity::ERROR
            );
        }
    }
}
