use std::path::PathBuf;

/// Fixed file names under the store root.
pub const HISTORY_FILE: &str = "function_history.json";
pub const SETTINGS_FILE: &str = "settings.json";
pub const LOCK_FILE: &str = "LOCK";

/// All well-known paths under the store root.
#[derive(Debug, Clone)]
pub struct StorePaths {
    pub root: PathBuf,
    pub history_json: PathBuf,
    pub settings_json: PathBuf,
    pub lock_file: PathBuf,
}

impl StorePaths {
    /// Derive all paths from a store root. Pure computation, no I/O.
    pub fn discover(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            history_json: root.join(HISTORY_FILE),
            settings_json: root.join(SETTINGS_FILE),
            lock_file: root.join(LOCK_FILE),
            root,
        }
    }

    /// Paths under [`crate::store_root`].
    pub fn default_location() -> Self {
        Self::discover(crate::store_root())
    }

    /// Create the store directory. Idempotent.
    pub fn ensure_layout(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discover_builds_correct_paths() {
        let p = StorePaths::discover("/tmp/fnhist");
        assert_eq!(p.root, PathBuf::from("/tmp/fnhist"));
        assert_eq!(
            p.history_json,
            PathBuf::from("/tmp/fnhist/function_history.json")
        );
        assert_eq!(p.settings_json, PathBuf::from("/tmp/fnhist/settings.json"));
        assert_eq!(p.lock_file, PathBuf::from("/tmp/fnhist/LOCK"));
    }

    #[test]
    fn ensure_layout_creates_root() {
        let tmp = tempfile::tempdir().unwrap();
        let p = StorePaths::discover(tmp.path().join("store"));
        p.ensure_layout().unwrap();
        p.ensure_layout().unwrap();
        assert!(p.root.is_dir());
    }
}
