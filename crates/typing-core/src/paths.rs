use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File and directory names
// ---------------------------------------------------------------------------

pub const PYRIGHT_CONFIG: &str = "pyrightconfig.json";
pub const PYRIGHT_CONFIG_BACKUP: &str = "pyrightconfig.json.bak";

pub const RULES_DIR: &str = ".long-task-harness/rules";
pub const FINDINGS_FILE: &str = ".long-task-harness/typing-findings.md";
pub const HARNESS_PROGRESS_FILE: &str = ".long-task-harness/long-task-progress.md";

pub const GIT_DIR: &str = ".git";
pub const PRE_COMMIT_HOOK: &str = ".git/hooks/pre-commit";

/// Rule documents copied into the project as (file name, built-in contents),
/// in install order.
pub const RULE_DOCS: [(&str, &str); 4] = [
    (
        "block-type-ignore.md",
        include_str!("../../../assets/rules/block-type-ignore.md"),
    ),
    (
        "block-gratuitous-assert.md",
        include_str!("../../../assets/rules/block-gratuitous-assert.md"),
    ),
    (
        "warn-any-type.md",
        include_str!("../../../assets/rules/warn-any-type.md"),
    ),
    (
        "warn-cast-overuse.md",
        include_str!("../../../assets/rules/warn-cast-overuse.md"),
    ),
];

/// Companion skill locations, relative to the user's home directory.
pub const HARNESS_SKILL_DIR: &str = ".claude/skills/long-task-harness";
pub const HARNESS_INIT_SCRIPT: &str = "scripts/init_harness.py";
pub const PLUGIN_MARKETPLACES_DIR: &str = ".claude/plugins/marketplaces";
pub const RALPH_PLUGIN_DIR: &str = "claude-plugins-official";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn pyright_config_path(root: &Path) -> PathBuf {
    root.join(PYRIGHT_CONFIG)
}

pub fn pyright_backup_path(root: &Path) -> PathBuf {
    root.join(PYRIGHT_CONFIG_BACKUP)
}

pub fn rules_dir(root: &Path) -> PathBuf {
    root.join(RULES_DIR)
}

pub fn findings_path(root: &Path) -> PathBuf {
    root.join(FINDINGS_FILE)
}

pub fn harness_progress_path(root: &Path) -> PathBuf {
    root.join(HARNESS_PROGRESS_FILE)
}

pub fn git_dir(root: &Path) -> PathBuf {
    root.join(GIT_DIR)
}

pub fn pre_commit_hook_path(root: &Path) -> PathBuf {
    root.join(PRE_COMMIT_HOOK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/proj");
        assert_eq!(
            pyright_config_path(root),
            PathBuf::from("/tmp/proj/pyrightconfig.json")
        );
        assert_eq!(
            findings_path(root),
            PathBuf::from("/tmp/proj/.long-task-harness/typing-findings.md")
        );
        assert_eq!(
            pre_commit_hook_path(root),
            PathBuf::from("/tmp/proj/.git/hooks/pre-commit")
        );
    }

    #[test]
    fn built_in_rule_docs_have_content() {
        for (name, body) in RULE_DOCS {
            assert!(name.ends_with(".md"));
            assert!(body.starts_with('#'), "{name} has no heading");
        }
    }
}
