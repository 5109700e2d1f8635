pub mod paths;
pub mod snapshot;

pub use paths::StorePaths;
pub use snapshot::{load_history, load_settings, save_history, save_settings, HistorySnapshot};

use fs2::FileExt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable overriding the store root.
pub const HOME_ENV: &str = "FNHIST_HOME";

/// Return the per-user store root.
/// `$FNHIST_HOME`, else `<data dir>/fnhist/`, else `~/.fnhist/`.
pub fn store_root() -> PathBuf {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        PathBuf::from(home)
    } else if let Some(data_dir) = dirs::data_dir() {
        data_dir.join("fnhist")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".fnhist")
    } else {
        PathBuf::from(".fnhist-store")
    }
}

/// Atomic write: write to temp file in same dir, then rename.
pub fn write_atomic(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("no parent dir for {}", path.display()))?;
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    fs::create_dir_all(parent)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.persist(path)?;
    Ok(())
}

/// File-based exclusive lock guard. Released on drop.
pub struct LockGuard {
    _file: fs::File,
}

/// Acquire an exclusive file lock without blocking. Creates the lock file if
/// needed and fails if another process holds it.
pub fn lock_file(path: &Path) -> anyhow::Result<LockGuard> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(path)
        .map_err(|e| anyhow::anyhow!("cannot open lock file {}: {}", path.display(), e))?;
    file.try_lock_exclusive().map_err(|_| {
        anyhow::anyhow!(
            "history store is locked by another process ({})",
            path.display()
        )
    })?;
    tracing::debug!(path = %path.display(), "acquired store lock");
    Ok(LockGuard { _file: file })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_root_is_not_empty() {
        let root = store_root();
        assert!(!root.as_os_str().is_empty());
    }

    #[test]
    fn write_atomic_creates_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("test.txt");
        write_atomic(&path, b"hello world").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello world");
        write_atomic(&path, b"bye").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "bye");
    }

    #[test]
    fn lock_is_exclusive_until_dropped() {
        let tmp = tempfile::tempdir().unwrap();
        let lock_path = tmp.path().join("LOCK");
        let guard = lock_file(&lock_path).unwrap();
        assert!(lock_path.exists());
        assert!(lock_file(&lock_path).is_err());
        drop(guard);
        let _again = lock_file(&lock_path).unwrap();
    }
}
