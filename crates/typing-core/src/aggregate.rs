//! Turns a checker report into totals and per-rule / per-file counts.
//!
//! Totals come from the report's `summary`; the breakdowns are counted from
//! the diagnostics with severity `error`. The two are not reconciled: pyright
//! can report a summary that differs from the entries it lists, and both are
//! shown as reported.

use crate::frequency::FrequencyTable;
use crate::report::Report;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Breakdown {
    pub error_count: usize,
    pub warning_count: usize,
    pub rules: FrequencyTable,
    pub files: FrequencyTable,
}

#[derive(Debug, Clone)]
pub enum Aggregate {
    /// The summary reports no errors; no tables are built.
    Clean { warning_count: usize },
    Errors(Breakdown),
}

pub fn aggregate(report: &Report, root: &Path) -> Aggregate {
    let error_count = report.summary.error_count;
    let warning_count = report.summary.warning_count;

    if error_count == 0 {
        return Aggregate::Clean { warning_count };
    }

    let mut rules = FrequencyTable::new();
    let mut files = FrequencyTable::new();
    for diag in report.errors() {
        rules.increment(diag.rule_or_unknown());
        files.increment(&display_path(diag.file_or_unknown(), root));
    }

    Aggregate::Errors(Breakdown {
        error_count,
        warning_count,
        rules,
        files,
    })
}

/// `file` relative to `root` when it lies under it, otherwise unchanged.
pub fn display_path(file: &str, root: &Path) -> String {
    match Path::new(file).strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_string_lossy().into_owned(),
        _ => file.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Diagnostic, Severity, Summary};

    fn diag(severity: Severity, rule: Option<&str>, file: &str) -> Diagnostic {
        Diagnostic {
            severity,
            rule: rule.map(str::to_string),
            file: Some(file.to_string()),
            message: String::new(),
        }
    }

    fn report(errors: usize, warnings: usize, diags: Vec<Diagnostic>) -> Report {
        Report {
            general_diagnostics: diags,
            summary: Summary {
                error_count: errors,
                warning_count: warnings,
                ..Summary::default()
            },
        }
    }

    #[test]
    fn zero_errors_short_circuits() {
        let r = report(
            0,
            3,
            vec![diag(Severity::Error, Some("reportReturnType"), "/p/a.py")],
        );
        match aggregate(&r, Path::new("/p")) {
            Aggregate::Clean { warning_count } => assert_eq!(warning_count, 3),
            other => panic!("expected clean, got {other:?}"),
        }
    }

    #[test]
    fn counts_only_errors() {
        let r = report(
            2,
            1,
            vec![
                diag(Severity::Error, Some("reportReturnType"), "/p/a.py"),
                diag(Severity::Warning, Some("reportUnusedImport"), "/p/a.py"),
                diag(Severity::Information, None, "/p/b.py"),
                diag(Severity::Error, None, "/p/b.py"),
            ],
        );
        let Aggregate::Errors(b) = aggregate(&r, Path::new("/p")) else {
            panic!("expected errors");
        };
        assert_eq!(b.rules.get("reportReturnType"), 1);
        assert_eq!(b.rules.get("unknown"), 1);
        assert_eq!(b.rules.get("reportUnusedImport"), 0);
        assert_eq!(b.files.get("a.py"), 1);
        assert_eq!(b.files.get("b.py"), 1);
    }

    #[test]
    fn summary_and_entry_counts_are_not_reconciled() {
        let r = report(
            10,
            0,
            vec![
                diag(Severity::Error, Some("reportReturnType"), "/p/a.py"),
                diag(Severity::Error, Some("reportReturnType"), "/p/a.py"),
            ],
        );
        let Aggregate::Errors(b) = aggregate(&r, Path::new("/p")) else {
            panic!("expected errors");
        };
        assert_eq!(b.error_count, 10);
        assert_eq!(b.rules.total(), 2);
        assert_eq!(b.files.total(), 2);
    }

    #[test]
    fn display_path_strips_root() {
        let root = Path::new("/home/dev/proj");
        assert_eq!(display_path("/home/dev/proj/pkg/mod.py", root), "pkg/mod.py");
        assert_eq!(display_path("/elsewhere/mod.py", root), "/elsewhere/mod.py");
        assert_eq!(display_path("pkg/mod.py", root), "pkg/mod.py");
        assert_eq!(display_path("unknown", root), "unknown");
        assert_eq!(display_path("/home/dev/proj", root), "/home/dev/proj");
    }
}
