use crate::error::{Result, SteerError};
use crate::paths::is_hidden;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Atomically write `data` to `path` using a tempfile in the same directory.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Create a directory and all parents, idempotent.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Write a file only if it does not already exist. Returns true if written.
pub fn write_if_missing(path: &Path, data: &[u8]) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    atomic_write(path, data)?;
    Ok(true)
}

/// Visible entries of `dir`, sorted by path.
///
/// Load order must never depend on the filesystem, so every loader walks
/// directories through this. Read failures surface as `RepositoryLoad`.
pub(crate) fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| SteerError::load(dir, e.to_string()))?;
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| SteerError::load(dir, e.to_string()))?.path();
        if is_hidden(&path) {
            debug!(path = %path.display(), "skipping hidden entry");
            continue;
        }
        paths.push(path);
    }
    paths.sort();
    Ok(paths)
}

/// Read a UTF-8 file during catalog load.
pub(crate) fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| SteerError::load(path, e.to_string()))
}

/// Require `dir` to be an existing directory before walking it.
pub(crate) fn require_dir(dir: &Path, what: &str) -> Result<()> {
    if !dir.exists() {
        return Err(SteerError::load(dir, format!("{what} directory does not exist")));
    }
    if !dir.is_dir() {
        return Err(SteerError::load(dir, format!("{what} path is not a directory")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/c/steer.yaml");
        atomic_write(&path, b"version: 1").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "version: 1");
    }

    #[test]
    fn write_if_missing_skips_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("existing.md");
        std::fs::write(&path, b"original").unwrap();
        let written = write_if_missing(&path, b"new").unwrap();
        assert!(!written);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn sorted_entries_orders_and_hides() {
        let dir = TempDir::new().unwrap();
        for name in ["zeta.md", ".hidden", "alpha.md", "mid.txt"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        let names: Vec<String> = sorted_entries(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["alpha.md", "mid.txt", "zeta.md"]);
    }

    #[test]
    fn require_dir_rejects_files() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("rules");
        std::fs::write(&file, "").unwrap();
        assert!(matches!(
            require_dir(&file, "rules"),
            Err(SteerError::RepositoryLoad { .. })
        ));
        assert!(require_dir(dir.path(), "rules").is_ok());
    }
}
