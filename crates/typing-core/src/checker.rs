//! Running the external type checker and obtaining its JSON report.
//!
//! The checker is treated as a black box behind [`CheckerRunner`]: callers get
//! a parsed [`Report`] or an error, never partial output. A non-zero exit
//! status is normal whenever the checker finds errors and is not a failure;
//! only a missing program, a timeout, or output that is not a JSON report is.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread::JoinHandle;
use std::time::Duration;

use wait_timeout::ChildExt;

use crate::error::{Result, TypingError};
use crate::report::Report;

pub const DEFAULT_COMMAND: &str = "npx pyright";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const JSON_FLAG: &str = "--outputjson";
pub const PROJECT_FLAG: &str = "-p";

/// Anything that can produce a checker report for a project root.
pub trait CheckerRunner {
    fn run(&self, root: &Path) -> Result<Report>;

    /// Error count from the report summary, or `None` when no report could
    /// be obtained.
    fn baseline(&self, root: &Path) -> Option<usize> {
        match self.run(root) {
            Ok(report) => Some(report.summary.error_count),
            Err(e) => {
                tracing::debug!("no baseline: {e}");
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerSettings {
    pub program: String,
    /// Arguments placed before the JSON flag (e.g. `pyright` for `npx`).
    pub args: Vec<String>,
    /// Explicit config passed with `-p`.
    pub project: Option<PathBuf>,
    pub timeout: Duration,
}

impl Default for CheckerSettings {
    fn default() -> Self {
        Self {
            program: "npx".to_string(),
            args: vec!["pyright".to_string()],
            project: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl CheckerSettings {
    /// Build settings from a whitespace-separated command line such as
    /// `npx pyright` or `/usr/local/bin/pyright`.
    pub fn from_command(command: &str) -> Result<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(TypingError::EmptyCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
            ..Self::default()
        })
    }

    pub fn with_project(mut self, project: Option<PathBuf>) -> Self {
        self.project = project;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The command line as the user would type it, without the JSON flag.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn full_args(&self) -> Vec<String> {
        let mut args = self.args.clone();
        args.push(JSON_FLAG.to_string());
        if let Some(project) = &self.project {
            args.push(PROJECT_FLAG.to_string());
            args.push(project.to_string_lossy().into_owned());
        }
        args
    }
}

/// Spawns pyright (or a compatible command) in the project root.
#[derive(Debug, Clone, Default)]
pub struct PyrightRunner {
    settings: CheckerSettings,
}

impl PyrightRunner {
    pub fn new(settings: CheckerSettings) -> Self {
        Self { settings }
    }
}

impl CheckerRunner for PyrightRunner {
    fn run(&self, root: &Path) -> Result<Report> {
        let stdout = run_captured(&self.settings, root)?;
        Report::from_json(&stdout)
    }
}

/// Reads a report pyright already wrote, from a file or `-` for stdin.
#[derive(Debug, Clone)]
pub struct ReportFile {
    path: PathBuf,
}

impl ReportFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CheckerRunner for ReportFile {
    fn run(&self, _root: &Path) -> Result<Report> {
        let text = if self.path.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            std::fs::read_to_string(&self.path)?
        };
        Report::from_json(&text)
    }
}

/// Run the checker and return its stdout, regardless of exit status.
fn run_captured(settings: &CheckerSettings, root: &Path) -> Result<String> {
    let program = which::which(&settings.program)
        .map_err(|_| TypingError::CheckerNotFound(settings.program.clone()))?;
    let args = settings.full_args();
    tracing::debug!(program = %program.display(), ?args, "running type checker");

    let mut child = Command::new(&program)
        .args(&args)
        .current_dir(root)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| TypingError::CheckerSpawn(e.to_string()))?;

    // Drain both pipes while waiting so a large report cannot fill the pipe
    // buffer and stall the child.
    let stdout_thread = drain(child.stdout.take());
    let stderr_thread = drain(child.stderr.take());

    let status = child
        .wait_timeout(settings.timeout)
        .map_err(|e| TypingError::CheckerSpawn(format!("failed to wait for checker: {e}")))?;

    let Some(status) = status else {
        let _ = child.kill();
        let _ = child.wait();
        // Reader threads are left detached: a grandchild (node under npx) may
        // still hold the pipes open.
        return Err(TypingError::CheckerTimeout(settings.timeout.as_secs()));
    };

    let stdout = stdout_thread.join().unwrap_or_default();
    let stderr = stderr_thread.join().unwrap_or_default();
    tracing::debug!(%status, stderr_bytes = stderr.len(), "type checker finished");
    if !stderr.is_empty() {
        tracing::debug!("checker stderr: {}", String::from_utf8_lossy(&stderr).trim());
    }

    Ok(String::from_utf8_lossy(&stdout).into_owned())
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<Vec<u8>> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut r) = pipe {
            let _ = r.read_to_end(&mut buf);
        }
        buf
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_settings_run_npx_pyright() {
        let s = CheckerSettings::default();
        assert_eq!(s.display(), DEFAULT_COMMAND);
        assert_eq!(s.timeout, Duration::from_secs(120));
        assert_eq!(s.full_args(), vec!["pyright", "--outputjson"]);
    }

    #[test]
    fn from_command_splits_words() {
        let s = CheckerSettings::from_command("  uvx  basedpyright ").unwrap();
        assert_eq!(s.program, "uvx");
        assert_eq!(s.args, vec!["basedpyright"]);
        assert!(matches!(
            CheckerSettings::from_command("   "),
            Err(TypingError::EmptyCommand)
        ));
    }

    #[test]
    fn project_flag_follows_json_flag() {
        let s = CheckerSettings::default().with_project(Some(PathBuf::from("pyrightconfig-strict.json")));
        assert_eq!(
            s.full_args(),
            vec!["pyright", "--outputjson", "-p", "pyrightconfig-strict.json"]
        );
    }

    #[test]
    fn missing_program_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let runner = PyrightRunner::new(
            CheckerSettings::from_command("definitely-not-a-type-checker-7f3a").unwrap(),
        );
        let err = runner.run(dir.path()).unwrap_err();
        assert!(matches!(err, TypingError::CheckerNotFound(_)));
        assert!(err.is_unavailable());
        assert_eq!(runner.baseline(dir.path()), None);
    }

    #[test]
    fn report_file_reads_saved_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        std::fs::write(&path, r#"{"summary": {"errorCount": 3, "warningCount": 1}}"#).unwrap();
        let runner = ReportFile::new(&path);
        let report = runner.run(dir.path()).unwrap();
        assert_eq!(report.summary.error_count, 3);
        assert_eq!(runner.baseline(dir.path()), Some(3));
    }

    #[test]
    fn report_file_missing_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = ReportFile::new(dir.path().join("nope.json"))
            .run(dir.path())
            .unwrap_err();
        assert!(matches!(err, TypingError::Io(_)));
        assert!(!err.is_unavailable());
    }

    #[cfg(unix)]
    fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        crate::io::make_executable(&path).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_still_yields_report() {
        let dir = TempDir::new().unwrap();
        let fake = script(
            dir.path(),
            "fake-pyright",
            r#"echo '{"summary": {"errorCount": 2}}'; exit 1"#,
        );
        let runner = PyrightRunner::new(
            CheckerSettings::from_command(&fake.to_string_lossy()).unwrap(),
        );
        let report = runner.run(dir.path()).unwrap();
        assert_eq!(report.summary.error_count, 2);
    }

    #[cfg(unix)]
    #[test]
    fn passes_json_and_project_flags() {
        let dir = TempDir::new().unwrap();
        // Echo the arguments back inside a valid report.
        let fake = script(
            dir.path(),
            "echo-args",
            r#"printf '{"generalDiagnostics": [{"severity": "error", "message": "%s"}], "summary": {"errorCount": 1}}' "$*""#,
        );
        let settings = CheckerSettings::from_command(&fake.to_string_lossy())
            .unwrap()
            .with_project(Some(PathBuf::from("custom.json")));
        let report = PyrightRunner::new(settings).run(dir.path()).unwrap();
        assert_eq!(
            report.general_diagnostics[0].message,
            "--outputjson -p custom.json"
        );
    }

    #[cfg(unix)]
    #[test]
    fn garbage_output_is_invalid_report() {
        let dir = TempDir::new().unwrap();
        let fake = script(dir.path(), "garbage", "echo 'command not found: pyright'");
        let err = PyrightRunner::new(CheckerSettings::from_command(&fake.to_string_lossy()).unwrap())
            .run(dir.path())
            .unwrap_err();
        assert!(matches!(err, TypingError::InvalidReport(_)));
    }

    #[cfg(unix)]
    #[test]
    fn slow_checker_times_out() {
        let dir = TempDir::new().unwrap();
        let fake = script(dir.path(), "slow", "exec sleep 5");
        let settings = CheckerSettings::from_command(&fake.to_string_lossy())
            .unwrap()
            .with_timeout(Duration::from_millis(200));
        let err = PyrightRunner::new(settings).run(dir.path()).unwrap_err();
        assert!(matches!(err, TypingError::CheckerTimeout(_)));
        assert!(err.is_unavailable());
    }
}
