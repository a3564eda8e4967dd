//! Per-run locations for generated files.
//!
//! Each analysis run gets a [`RunId`]; every generated file is named
//! `<identity>.<run id>.<suffix>`, so concurrent runs over the same or
//! different components never share a path. Files are owned by an
//! [`ArtifactGuard`] that removes them when dropped, on success and failure
//! paths alike.

use crate::core::ComponentIdentity;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};
use xxhash_rust::xxh64::xxh64;

static RUN_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Identifier distinguishing one analysis run from every other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunId(String);

impl RunId {
    /// Fresh id from the component path, process id, wall clock and a
    /// process-wide counter.
    pub fn generate(component_path: &Path) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let seed = format!(
            "{}:{}:{}:{}",
            component_path.display(),
            std::process::id(),
            nanos,
            RUN_COUNTER.fetch_add(1, Ordering::Relaxed)
        );
        Self(format!("{:016x}", xxh64(seed.as_bytes(), 0)))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Directory and run id used for one analysis.
#[derive(Debug, Clone)]
pub struct RunWorkspace {
    dir: PathBuf,
    run_id: RunId,
}

impl RunWorkspace {
    pub fn new(dir: impl Into<PathBuf>, run_id: RunId) -> Self {
        Self {
            dir: dir.into(),
            run_id,
        }
    }

    /// Workspace next to the component file, so relative imports in the
    /// instrumented copy still resolve.
    pub fn beside(component_path: &Path, override_dir: Option<&Path>) -> Self {
        let dir = match override_dir {
            Some(dir) => dir.to_path_buf(),
            None => component_path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        };
        Self::new(dir, RunId::generate(component_path))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    pub fn artifact_path(&self, identity: &ComponentIdentity, suffix: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}.{}", identity, self.run_id, suffix))
    }
}

/// Removes the file at `path` when dropped.
#[derive(Debug)]
pub struct ArtifactGuard {
    path: PathBuf,
}

impl ArtifactGuard {
    /// Take ownership of `path` before anything is written to it, so a
    /// partial write is cleaned up too.
    pub fn claim(path: PathBuf) -> Self {
        Self { path }
    }

    /// Claim `path` and write `contents` to it.
    pub fn write(path: PathBuf, contents: &str) -> io::Result<Self> {
        let guard = Self::claim(path);
        std::fs::write(&guard.path, contents)?;
        debug!(path = %guard.path.display(), "Wrote artifact");
        Ok(guard)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ArtifactGuard {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed artifact"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), "Failed to remove artifact: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_ids_are_unique() {
        let path = Path::new("src/TodoList.tsx");
        let a = RunId::generate(path);
        let b = RunId::generate(path);
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 16);
    }

    #[test]
    fn test_artifact_path_combines_identity_and_run() {
        let workspace = RunWorkspace::new("/work", RunId::new("abc"));
        let path = workspace.artifact_path(&ComponentIdentity::new("Card"), "instrumented.jsx");
        assert_eq!(path, PathBuf::from("/work/Card.abc.instrumented.jsx"));
    }

    #[test]
    fn test_beside_uses_component_directory() {
        let workspace = RunWorkspace::beside(Path::new("ui/Card.tsx"), None);
        assert_eq!(workspace.dir(), Path::new("ui"));

        let bare = RunWorkspace::beside(Path::new("Card.tsx"), None);
        assert_eq!(bare.dir(), Path::new("."));

        let overridden = RunWorkspace::beside(Path::new("ui/Card.tsx"), Some(Path::new("/tmp/x")));
        assert_eq!(overridden.dir(), Path::new("/tmp/x"));
    }

    #[test]
    fn test_guard_removes_file_on_drop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("artifact.jsx");
        {
            let guard = ArtifactGuard::write(path.clone(), "content").unwrap();
            assert!(guard.path().exists());
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_guard_tolerates_missing_file() {
        let dir = TempDir::new().unwrap();
        let guard = ArtifactGuard::claim(dir.path().join("never-written"));
        drop(guard);
    }

    #[test]
    fn test_failed_write_reports_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("artifact.jsx");
        assert!(ArtifactGuard::write(path.clone(), "x").is_err());
        assert!(!path.exists());
    }
}
