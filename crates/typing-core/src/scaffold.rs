//! Scaffolding steps for `typing init`.
//!
//! Each step is independent: it reports what it did as a list of [`Note`]s
//! and only returns `Err` for filesystem failures it cannot recover from.
//! Existing files are either backed up, kept, or appended to, never silently
//! clobbered.

use crate::error::Result;
use crate::io;
use crate::level::Level;
use crate::paths;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;
use std::process::{Command, Stdio};

/// Marker line identifying the hook section this tool manages.
pub const HOOK_MARKER: &str = "# Pyright type check (added by typing init)";

pub const HARNESS_URL: &str = "https://github.com/tmustier/long-task-harness";
pub const RALPH_REPO: &str = "https://github.com/tmustier/claude-plugins-official";

/// What a step did, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum Note {
    Created(String),
    Updated(String),
    Exists(String),
    Warning(String),
}

impl Note {
    pub fn is_warning(&self) -> bool {
        matches!(self, Note::Warning(_))
    }
}

// ---------------------------------------------------------------------------
// Checker config
// ---------------------------------------------------------------------------

/// Write `pyrightconfig.json` for `level`, first copying any existing file to
/// `pyrightconfig.json.bak` unchanged.
pub fn write_checker_config(root: &Path, level: Level) -> Result<Vec<Note>> {
    let mut notes = Vec::new();
    let config_path = paths::pyright_config_path(root);
    let backup_path = paths::pyright_backup_path(root);

    if io::backup_file(&config_path, &backup_path)? {
        notes.push(Note::Warning(format!(
            "{} already exists, backed up to {}",
            paths::PYRIGHT_CONFIG,
            paths::PYRIGHT_CONFIG_BACKUP
        )));
    }

    let json = level.config().to_json()?;
    io::atomic_write(&config_path, json.as_bytes())?;
    notes.push(Note::Created(format!(
        "{} ({level} mode)",
        paths::PYRIGHT_CONFIG
    )));
    Ok(notes)
}

// ---------------------------------------------------------------------------
// Rule documents
// ---------------------------------------------------------------------------

/// Install the typing-discipline rule documents into the project.
///
/// The built-in copies are used unless `assets_dir` overrides them; with an
/// override, documents missing from that directory are reported and skipped.
pub fn install_rules(root: &Path, assets_dir: Option<&Path>) -> Result<Vec<Note>> {
    let rules_dir = paths::rules_dir(root);
    io::ensure_dir(&rules_dir)?;

    let mut notes = Vec::new();
    for (doc, built_in) in paths::RULE_DOCS {
        let data = match assets_dir {
            None => built_in.as_bytes().to_vec(),
            Some(dir) => {
                let src = dir.join(doc);
                if !src.is_file() {
                    notes.push(Note::Warning(format!("rule not found: {}", src.display())));
                    continue;
                }
                std::fs::read(&src)?
            }
        };
        io::atomic_write(&rules_dir.join(doc), &data)?;
        notes.push(Note::Created(format!("{}/{doc}", paths::RULES_DIR)));
    }
    Ok(notes)
}

// ---------------------------------------------------------------------------
// Findings log
// ---------------------------------------------------------------------------

const FINDINGS_HEADER: &str = "# Typing Findings Log

Document issues discovered during type migration that require investigation
or cannot be fixed with simple annotations.
";

const FINDINGS_BODY: &str = "
## Format

```markdown
### [YYYY-MM-DD] Finding Title
**File**: path/to/file.py:123
**Category**: [design-issue | api-mismatch | missing-stubs | unfixable]
**Severity**: [low | medium | high]

Description of the issue and why it couldn't be fixed.
```

---

## Findings

(Add entries as issues are discovered)
";

pub fn findings_template(baseline: Option<usize>, today: NaiveDate) -> String {
    let mut out = String::from(FINDINGS_HEADER);
    if let Some(count) = baseline {
        out.push_str(&format!(
            "\n**Baseline**: {count} errors (measured {})\n",
            today.format("%Y-%m-%d")
        ));
    }
    out.push_str(FINDINGS_BODY);
    out
}

/// Create the findings log if absent; an existing log is left untouched.
pub fn create_findings_log(
    root: &Path,
    baseline: Option<usize>,
    today: NaiveDate,
) -> Result<Vec<Note>> {
    let path = paths::findings_path(root);
    let written = io::write_if_missing(&path, findings_template(baseline, today).as_bytes())?;
    Ok(vec![if written {
        Note::Created(paths::FINDINGS_FILE.to_string())
    } else {
        Note::Exists(paths::FINDINGS_FILE.to_string())
    }])
}

// ---------------------------------------------------------------------------
// Pre-commit hook
// ---------------------------------------------------------------------------

/// Shell snippet that runs `checker` and warns about remaining errors.
/// It always lets the commit through, even under `set -e`.
pub fn hook_script(checker: &str) -> String {
    format!(
        r#"{HOOK_MARKER}
echo "Running pyright type check..."
OUTPUT=$({checker} 2>&1) && EXIT_CODE=0 || EXIT_CODE=$?
ERROR_COUNT=$(echo "$OUTPUT" | grep -oE '[0-9]+ errors?' | head -1)

if [ $EXIT_CODE -ne 0 ]; then
    echo "⚠️  Pyright: $ERROR_COUNT remaining"
    echo "   (commit allowed, but please continue fixing)"
else
    echo "✅ Pyright: No errors"
fi
"#
    )
}

/// Install or extend `.git/hooks/pre-commit`. Skipped outside git projects
/// and when the hook already carries [`HOOK_MARKER`].
pub fn install_pre_commit_hook(root: &Path, checker: &str) -> Result<Vec<Note>> {
    if !paths::git_dir(root).exists() {
        return Ok(vec![Note::Warning(
            "not a git repository, skipping pre-commit hook".to_string(),
        )]);
    }

    let hook_path = paths::pre_commit_hook_path(root);
    if let Some(parent) = hook_path.parent() {
        io::ensure_dir(parent)?;
    }

    if hook_path.exists() {
        let existing = std::fs::read_to_string(&hook_path)?;
        if existing.contains(HOOK_MARKER) {
            return Ok(vec![Note::Exists(paths::PRE_COMMIT_HOOK.to_string())]);
        }
        let sep = if existing.is_empty() || existing.ends_with('\n') {
            "\n"
        } else {
            "\n\n"
        };
        io::append_text(&hook_path, &format!("{sep}{}", hook_script(checker)))?;
        return Ok(vec![
            Note::Warning("pre-commit hook exists, appending type check".to_string()),
            Note::Updated(format!(
                "{} (warns on type errors)",
                paths::PRE_COMMIT_HOOK
            )),
        ]);
    }

    let content = format!("#!/bin/bash\n\n{}", hook_script(checker));
    io::atomic_write(&hook_path, content.as_bytes())?;
    io::make_executable(&hook_path)?;
    Ok(vec![Note::Created(format!(
        "{} (warns on type errors)",
        paths::PRE_COMMIT_HOOK
    ))])
}

// ---------------------------------------------------------------------------
// Companion tooling (--full)
// ---------------------------------------------------------------------------

/// Initialize the long-task harness through its own init script when the
/// skill is installed under `home`.
pub fn init_long_task_harness(root: &Path, home: &Path) -> Result<Vec<Note>> {
    if paths::harness_progress_path(root).exists() {
        return Ok(vec![Note::Exists("long-task-harness".to_string())]);
    }

    let skill_dir = home.join(paths::HARNESS_SKILL_DIR);
    let script = skill_dir.join(paths::HARNESS_INIT_SCRIPT);
    if !script.is_file() {
        return Ok(vec![Note::Warning(format!(
            "long-task-harness skill not found at {} (install from {HARNESS_URL})",
            skill_dir.display()
        ))]);
    }

    let Some(python) = ["python3", "python"]
        .into_iter()
        .find_map(|p| which::which(p).ok())
    else {
        return Ok(vec![Note::Warning(
            "python not found, cannot initialize long-task-harness".to_string(),
        )]);
    };

    let output = Command::new(python)
        .arg(&script)
        .arg(root)
        .current_dir(root)
        .stdin(Stdio::null())
        .output()?;
    if output.status.success() {
        Ok(vec![Note::Created("long-task-harness".to_string())])
    } else {
        tracing::debug!(
            stderr = %String::from_utf8_lossy(&output.stderr),
            "harness init script failed"
        );
        Ok(vec![Note::Warning(format!(
            "long-task-harness init script exited with {}",
            output.status
        ))])
    }
}

/// Clone the ralph-wiggum plugin marketplace under `home` if not present.
pub fn install_ralph_wiggum(home: &Path) -> Result<Vec<Note>> {
    let plugins_dir = home.join(paths::PLUGIN_MARKETPLACES_DIR);
    let ralph_dir = plugins_dir.join(paths::RALPH_PLUGIN_DIR);
    if ralph_dir.exists() {
        return Ok(vec![Note::Exists("ralph-wiggum plugin".to_string())]);
    }
    io::ensure_dir(&plugins_dir)?;

    let manual = format!(
        "install manually: git clone {RALPH_REPO} {}",
        ralph_dir.display()
    );
    let Ok(git) = which::which("git") else {
        return Ok(vec![Note::Warning(format!("git not found; {manual}"))]);
    };

    let output = Command::new(git)
        .arg("clone")
        .arg(RALPH_REPO)
        .arg(&ralph_dir)
        .stdin(Stdio::null())
        .output()?;
    if output.status.success() {
        Ok(vec![Note::Created(
            "ralph-wiggum plugin (restart Claude Code to activate)".to_string(),
        )])
    } else {
        tracing::debug!(
            stderr = %String::from_utf8_lossy(&output.stderr),
            "git clone failed"
        );
        Ok(vec![Note::Warning(format!(
            "failed to clone ralph-wiggum plugin; {manual}"
        ))])
    }
}
