use crate::error::Result;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Replace `path` in one step, so an interrupted run never leaves a
/// half-written config or hook behind. Missing parent directories are created.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Seed `path` with `data` unless the user already has a file there.
/// Returns whether anything was written.
pub fn write_if_missing(path: &Path, data: &[u8]) -> Result<bool> {
    let missing = !path.exists();
    if missing {
        atomic_write(path, data)?;
    }
    Ok(missing)
}

/// Add `text` to the end of an existing hook (or any file), creating it if
/// needed. Existing content is never rewritten.
pub fn append_text(path: &Path, text: &str) -> Result<()> {
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?
        .write_all(text.as_bytes())?;
    Ok(())
}

/// Copy `path` byte-for-byte to `backup` if it exists. Returns true if copied.
pub fn backup_file(path: &Path, backup: &Path) -> Result<bool> {
    if !path.is_file() {
        return Ok(false);
    }
    std::fs::copy(path, backup)?;
    Ok(true)
}

/// Mark a file executable (`0o755`). No-op off unix.
pub fn make_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}
