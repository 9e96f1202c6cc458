use std::time::Duration;

use tokio::runtime::Runtime;

use crate::prelude::*;
use crate::report::parse_report;

/// Wall-clock bound on one checker run.
pub(crate) const CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// Failure taxonomy of the check flow. Invocation failures and malformed
/// reports stay distinct kinds; both are logged at the top of the
/// per-document flow rather than crashing the server.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CheckError {
    #[error("failed to invoke checker: {0}")]
    Invocation(#[from] std::io::Error),
    #[error("checker timed out after {0:?}")]
    Timeout(Duration),
    #[error("checker failed: {0}")]
    Failed(String),
    #[error("malformed checker report: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CheckError {
    /// The one case surfaced to the user: the configured executable does not
    /// exist, which only a settings change can repair.
    pub(crate) fn is_executable_missing(&self) -> bool {
        matches!(self, CheckError::Invocation(error) if error.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Static analysis as a capability. The bridge depends only on this trait,
/// so the subprocess-backed checker can be swapped for an in-process one
/// without touching translation or suggestion logic.
pub(crate) trait Checker {
    fn check(&self, file_path: &str) -> std::result::Result<AnalysisReport, CheckError>;
}

pub(crate) struct RawOutput {
    pub(crate) stdout: String,
    pub(crate) stderr: String,
}

/// Runs `<program> check --format json <file>` and parses its report.
pub(crate) struct ProcessChecker {
    program: String,
    timeout: Duration,
    runtime: Runtime,
}

impl ProcessChecker {
    pub(crate) fn new(program: impl Into<String>) -> Result<Self> {
        Ok(Self {
            program: program.into(),
            timeout: CHECK_TIMEOUT,
            runtime: Runtime::new()?,
        })
    }

    #[cfg(test)]
    fn with_timeout(program: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut checker = Self::new(program)?;
        checker.timeout = timeout;
        Ok(checker)
    }

    fn render_command(&self, file_path: &str) -> String {
        format!(
            "{program} check --format json {file}",
            program = self.program,
            file = shlex::try_quote(file_path).unwrap_or(std::borrow::Cow::Borrowed(file_path)),
        )
    }

    /// Run the checker subprocess to completion, bounded by the timeout.
    /// The child is killed when the timeout fires.
    fn invoke(&self, file_path: &str) -> std::result::Result<RawOutput, CheckError> {
        log::info!(
            "spawning `{command}`",
            command = self.render_command(file_path)
        );
        let output = self.runtime.block_on(async {
            let child = tokio::process::Command::new(&self.program)
                .arg("check")
                .arg("--format")
                .arg("json")
                .arg(file_path)
                .stdin(std::process::Stdio::null())
                .stdout(std::process::Stdio::piped())
                .stderr(std::process::Stdio::piped())
                .kill_on_drop(true)
                .output();
            match tokio::time::timeout(self.timeout, child).await {
                Ok(output) => output.map_err(CheckError::from),
                Err(_) => Err(CheckError::Timeout(self.timeout)),
            }
        })?;
        log::info!(
            "checker `{program}` exited with status {status:?}",
            program = self.program,
            status = output.status.code(),
        );
        Ok(RawOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

impl Checker for ProcessChecker {
    fn check(&self, file_path: &str) -> std::result::Result<AnalysisReport, CheckError> {
        let raw = self.invoke(file_path)?;
        // A non-empty report is authoritative regardless of exit code: the
        // checker exits non-zero on "found errors" while still emitting a
        // valid report.
        if !raw.stdout.trim().is_empty() {
            let report = parse_report(&raw.stdout)?;
            log::info!(
                "parsed checker report [file={file}, records={count}]",
                file = report.file,
                count = report.errors.len(),
            );
            return Ok(report);
        }
        if !raw.stderr.trim().is_empty() {
            log::error!(
                "checker `{program}` stderr: {stderr}",
                program = self.program,
                stderr = raw.stderr.trim(),
            );
            return Err(CheckError::Failed(raw.stderr.trim().to_string()));
        }
        // Nothing on either stream: a healthy file.
        Ok(AnalysisReport::empty(file_path))
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    struct FakeChecker {
        path: PathBuf,
    }

    impl FakeChecker {
        /// Install a throwaway shell script standing in for the checker
        /// binary.
        fn install(name: &str, body: &str) -> Self {
            let path = std::env::temp_dir().join(format!(
                "bpmnls-test-{pid}-{name}",
                pid = std::process::id()
            ));
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            Self { path }
        }

        fn checker(&self) -> ProcessChecker {
            ProcessChecker::new(self.path.to_str().unwrap()).unwrap()
        }
    }

    impl Drop for FakeChecker {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.path);
        }
    }

    #[test]
    fn silent_exit_yields_empty_report() {
        let fake = FakeChecker::install("silent", "exit 0");
        let report = fake.checker().check("/tmp/order.bpmn").unwrap();
        assert!(report.errors.is_empty());
        assert_eq!(report.file, "/tmp/order.bpmn");
    }

    #[test]
    fn stdout_wins_over_nonzero_exit() {
        let fake = FakeChecker::install(
            "report",
            r#"echo '{"file":"f","errors":[{"severity":"error","message":"m","line":1,"column":1,"start":0,"end":1,"suggestions":[],"code":"E001"}],"summary":{"error_count":1,"warning_count":0,"has_errors":true}}'
exit 1"#,
        );
        let report = fake.checker().check("/tmp/f").unwrap();
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].code, "E001");
    }

    #[test]
    fn stderr_without_stdout_is_a_failure() {
        let fake = FakeChecker::install("stderr", "echo 'config file missing' >&2; exit 2");
        let error = fake.checker().check("/tmp/f").unwrap_err();
        match error {
            CheckError::Failed(text) => assert_eq!(text, "config file missing"),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn garbage_stdout_is_a_parse_error() {
        let fake = FakeChecker::install("garbage", "echo 'not json'");
        let error = fake.checker().check("/tmp/f").unwrap_err();
        assert!(matches!(error, CheckError::Parse(_)));
    }

    #[test]
    fn slow_checker_times_out_instead_of_hanging() {
        let fake = FakeChecker::install("slow", "sleep 30");
        let checker =
            ProcessChecker::with_timeout(fake.path.to_str().unwrap(), Duration::from_millis(200))
                .unwrap();
        let error = checker.check("/tmp/f").unwrap_err();
        assert!(matches!(error, CheckError::Timeout(_)));
    }

    #[test]
    fn missing_executable_is_detected() {
        let checker = ProcessChecker::new("/nonexistent/bpmnls-no-such-binary").unwrap();
        let error = checker.check("/tmp/f").unwrap_err();
        assert!(error.is_executable_missing());
    }

    #[test]
    fn quotes_paths_with_spaces_in_the_log_rendering() {
        let checker = ProcessChecker::new("bpmncode").unwrap();
        assert_eq!(
            checker.render_command("/tmp/my order.bpmn"),
            r#"bpmncode check --format json "/tmp/my order.bpmn""#
        );
    }
}
