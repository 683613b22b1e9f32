use std::path::{Path, PathBuf};

/// Resolve the project root.
///
/// Priority:
/// 1. `--root` flag / `TYPING_ROOT` env var (passed in as `explicit`)
/// 2. The current working directory
///
/// The result is canonicalized when possible so that it matches the absolute
/// paths pyright reports.
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    let dir = match explicit {
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    std::fs::canonicalize(&dir).unwrap_or(dir)
}
