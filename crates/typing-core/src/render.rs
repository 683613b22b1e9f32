//! Plain-text report for the terminal.

use crate::recommend::{Analysis, FileRow, Findings, Ranked, RuleRow};
use std::fmt::Write;

pub const TITLE: &str = "Pyright Analysis";
pub const RULES_HEADING: &str = "By Error Type:";
pub const FILES_HEADING: &str = "By File (top 10):";
pub const STRATEGY_HEADING: &str = "Suggested Strategy:";
pub const ALL_CLEAR: &str = "🎉 No errors! You're done.";

const BANNER_WIDTH: usize = 60;
const SEPARATOR_WIDTH: usize = 40;

pub fn render(analysis: &Analysis) -> String {
    let mut out = String::new();
    banner(&mut out);

    match analysis {
        Analysis::Clean { warning_count, .. } => {
            totals(&mut out, 0, *warning_count);
            out.push_str(ALL_CLEAR);
            out.push('\n');
        }
        Analysis::Errors(findings) => render_findings(&mut out, findings),
    }
    out
}

fn render_findings(out: &mut String, findings: &Findings) {
    totals(out, findings.error_count, findings.warning_count);
    rules_section(out, &findings.rules);
    files_section(out, &findings.files);

    section(out, STRATEGY_HEADING);
    for (i, suggestion) in findings.suggestions.iter().enumerate() {
        let mut lines = suggestion.lines().into_iter();
        if let Some(first) = lines.next() {
            let _ = writeln!(out, "  {}. {first}", i + 1);
        }
        for line in lines {
            let _ = writeln!(out, "     {line}");
        }
    }
    out.push('\n');
}

fn banner(out: &mut String) {
    let rule = "=".repeat(BANNER_WIDTH);
    let _ = writeln!(out, "\n{rule}\n{TITLE}\n{rule}\n");
}

fn totals(out: &mut String, errors: usize, warnings: usize) {
    let _ = writeln!(out, "Total: {errors} errors, {warnings} warnings\n");
}

fn section(out: &mut String, heading: &str) {
    let _ = writeln!(out, "{heading}\n{}", "-".repeat(SEPARATOR_WIDTH));
}

fn rules_section(out: &mut String, rules: &Ranked<RuleRow>) {
    section(out, RULES_HEADING);
    for row in &rules.rows {
        let _ = writeln!(
            out,
            "  {:35} {:4} ({:4.1}%)",
            row.rule, row.count, row.percent
        );
        if let Some(hint) = row.hint {
            let _ = writeln!(out, "    └─ {hint}");
        }
    }
    if rules.more > 0 {
        let _ = writeln!(out, "  ... and {} more types", rules.more);
    }
    out.push('\n');
}

fn files_section(out: &mut String, files: &Ranked<FileRow>) {
    section(out, FILES_HEADING);
    for row in &files.rows {
        let _ = writeln!(out, "  {:40} {:4} errors", row.path, row.count);
    }
    if files.more > 0 {
        let _ = writeln!(out, "  ... and {} more files", files.more);
    }
    out.push('\n');
}
