//! Ranks the breakdowns and derives advice on where to start fixing.
//!
//! Hint text and rule lists are plain data tables below; the engine only
//! looks things up in them.

use crate::aggregate::{aggregate, Aggregate, Breakdown};
use crate::frequency::FrequencyTable;
use crate::report::{Report, RunStats};
use serde::Serialize;
use std::ops::RangeInclusive;
use std::path::Path;

// ---------------------------------------------------------------------------
// Static data
// ---------------------------------------------------------------------------

/// Rows shown per breakdown before the "... and N more" note.
pub const TOP_N: usize = 10;

/// One-line fix hints keyed by pyright rule identifier.
pub const RULE_HINTS: &[(&str, &str)] = &[
    (
        "reportUnknownMemberType",
        "Usually third-party libs → install stubs",
    ),
    ("reportMissingParameterType", "Add parameter annotations"),
    ("reportMissingTypeStubs", "pip install types-{package}"),
    ("reportUnknownArgumentType", "Check function call types"),
    (
        "reportGeneralTypeIssues",
        "Type mismatch → fix logic or annotations",
    ),
    ("reportOptionalMemberAccess", "Add None check before access"),
    ("reportUnknownVariableType", "Add variable annotation"),
    ("reportPrivateUsage", "Rename or make public"),
    ("reportAttributeAccessIssue", "Check attribute exists on type"),
    ("reportReturnType", "Add return type annotation"),
];

/// Rules that are usually fixed by adding an annotation or deleting dead code.
pub const QUICK_WIN_RULES: &[&str] = &[
    "reportMissingParameterType",
    "reportMissingTypeStubs",
    "reportUnusedImport",
    "reportUnusedVariable",
    "reportReturnType",
];

/// The easiest quick-win kinds, suggested first.
pub const QUICK_WIN_START: &[&str] = &["reportMissingParameterType", "reportReturnType"];

/// Rules that point at third-party packages without type information.
pub const STUB_RULES: &[&str] = &["reportMissingTypeStubs", "reportUnknownMemberType"];

/// Stub suggestion fires above this many stub-related errors.
pub const STUB_THRESHOLD: usize = 20;

/// Error counts considered a manageable first file.
pub const MANAGEABLE_ERRORS: RangeInclusive<usize> = 5..=20;

pub fn rule_hint(rule: &str) -> Option<&'static str> {
    RULE_HINTS
        .iter()
        .find(|(id, _)| *id == rule)
        .map(|(_, hint)| *hint)
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleRow {
    pub rule: String,
    pub count: usize,
    /// Share of the summary error count, in percent.
    pub percent: f64,
    pub hint: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRow {
    pub path: String,
    pub count: usize,
}

/// The top rows of a breakdown and the number of keys left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<T> {
    pub rows: Vec<T>,
    pub more: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Suggestion {
    QuickWins {
        errors: usize,
        start_with: &'static [&'static str],
    },
    StubPackages {
        errors: usize,
    },
    StartingFile {
        path: String,
        errors: usize,
        /// False when no file fell in the manageable range and the file with
        /// the fewest errors was picked instead.
        manageable: bool,
    },
}

impl Suggestion {
    /// Display text: a headline followed by detail lines.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Suggestion::QuickWins { errors, start_with } => vec![
                format!("Quick wins: {errors} errors from missing annotations/imports"),
                format!("Start with: {}", start_with.join(", ")),
            ],
            Suggestion::StubPackages { errors } => vec![
                format!("Third-party stubs: {errors} errors may need stub packages"),
                "Check: pip install types-requests types-pyyaml etc.".to_string(),
            ],
            Suggestion::StartingFile {
                path,
                errors,
                manageable: true,
            } => vec![
                format!("Good starting file: {path}"),
                format!("({errors} errors - manageable chunk)"),
            ],
            Suggestion::StartingFile {
                path,
                errors,
                manageable: false,
            } => vec![format!("Start small: {path} ({errors} errors)")],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Findings {
    pub error_count: usize,
    pub warning_count: usize,
    pub rules: Ranked<RuleRow>,
    pub files: Ranked<FileRow>,
    pub suggestions: Vec<Suggestion>,
    pub stats: RunStats,
}

/// Everything the renderer needs for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Analysis {
    Clean {
        warning_count: usize,
        stats: RunStats,
    },
    Errors(Findings),
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Aggregate `report` against `root` and derive the recommendations.
pub fn analyze(report: &Report, root: &Path) -> Analysis {
    let stats = RunStats::from(&report.summary);
    match aggregate(report, root) {
        Aggregate::Clean { warning_count } => Analysis::Clean {
            warning_count,
            stats,
        },
        Aggregate::Errors(breakdown) => Analysis::Errors(recommend(&breakdown, stats)),
    }
}

pub fn recommend(breakdown: &Breakdown, stats: RunStats) -> Findings {
    Findings {
        error_count: breakdown.error_count,
        warning_count: breakdown.warning_count,
        rules: rule_rows(&breakdown.rules, breakdown.error_count),
        files: file_rows(&breakdown.files),
        suggestions: suggestions(&breakdown.rules, &breakdown.files),
        stats,
    }
}

pub fn rule_rows(rules: &FrequencyTable, error_count: usize) -> Ranked<RuleRow> {
    let (top, more) = rules.top(TOP_N);
    let rows = top
        .into_iter()
        .map(|(rule, count)| RuleRow {
            rule: rule.to_string(),
            count,
            percent: percent(count, error_count),
            hint: rule_hint(rule),
        })
        .collect();
    Ranked { rows, more }
}

pub fn file_rows(files: &FrequencyTable) -> Ranked<FileRow> {
    let (top, more) = files.top(TOP_N);
    let rows = top
        .into_iter()
        .map(|(path, count)| FileRow {
            path: path.to_string(),
            count,
        })
        .collect();
    Ranked { rows, more }
}

pub fn suggestions(rules: &FrequencyTable, files: &FrequencyTable) -> Vec<Suggestion> {
    let mut out = Vec::new();

    let quick_wins = rules.sum_of(QUICK_WIN_RULES);
    if quick_wins > 0 {
        out.push(Suggestion::QuickWins {
            errors: quick_wins,
            start_with: QUICK_WIN_START,
        });
    }

    let stubs = rules.sum_of(STUB_RULES);
    if stubs > STUB_THRESHOLD {
        out.push(Suggestion::StubPackages { errors: stubs });
    }

    if let Some(start) = starting_file(files) {
        out.push(start);
    }

    out
}

/// Pick the first file to work on.
///
/// Prefers the smallest file within [`MANAGEABLE_ERRORS`]; falls back to the
/// file with the fewest errors overall. Ties go to the file seen first.
pub fn starting_file(files: &FrequencyTable) -> Option<Suggestion> {
    let in_range = fewest(
        files
            .iter()
            .filter(|(_, count)| MANAGEABLE_ERRORS.contains(count)),
    );
    if let Some((path, errors)) = in_range {
        return Some(Suggestion::StartingFile {
            path: path.to_string(),
            errors,
            manageable: true,
        });
    }
    fewest(files.iter()).map(|(path, errors)| Suggestion::StartingFile {
        path: path.to_string(),
        errors,
        manageable: false,
    })
}

// Iterator::min_by_key keeps the last of equal minima; this keeps the first.
fn fewest<'a>(entries: impl Iterator<Item = (&'a str, usize)>) -> Option<(&'a str, usize)> {
    entries.fold(None, |best, entry| match best {
        Some(b) if b.1 <= entry.1 => Some(b),
        _ => Some(entry),
    })
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}
