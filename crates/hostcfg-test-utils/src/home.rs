//! [`TestHome`] fixture for host configuration scenarios.

use hostcfg_fs::BackupManager;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory split into a fake `home/` and a `backups/` root.
///
/// # Example
///
/// ```rust,no_run
/// use hostcfg_test_utils::TestHome;
///
/// let home = TestHome::new();
/// home.write(".cursor/mcp.json", r#"{"mcpServers": {}}"#);
/// home.assert_file_exists(".cursor/mcp.json");
/// ```
pub struct TestHome {
    temp_dir: TempDir,
}

impl Default for TestHome {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHome {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("home")).unwrap();
        Self { temp_dir }
    }

    /// The fake home directory.
    pub fn home(&self) -> PathBuf {
        self.temp_dir.path().join("home")
    }

    /// Where backups go. Kept outside `home()` so scans of the home tree
    /// never see them.
    pub fn backup_root(&self) -> PathBuf {
        self.temp_dir.path().join("backups")
    }

    pub fn backups(&self) -> BackupManager {
        BackupManager::new(self.backup_root())
    }

    /// Absolute path of `rel` under the home directory.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.home().join(rel)
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel))
            .unwrap_or_else(|e| panic!("failed to read {rel}: {e}"))
    }

    /// Parse `rel` as JSON.
    pub fn read_json(&self, rel: &str) -> serde_json::Value {
        serde_json::from_str(&self.read(rel))
            .unwrap_or_else(|e| panic!("{rel} is not valid JSON: {e}"))
    }

    pub fn create_dir(&self, rel: &str) -> PathBuf {
        let path = self.path(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Backup files of `host`, sorted by name.
    pub fn backup_files(&self, host: &str) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(self.backup_root().join(host)) else {
            return Vec::new();
        };
        let mut files: Vec<PathBuf> = entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.is_file())
            .collect();
        files.sort();
        files
    }

    pub fn assert_file_exists(&self, rel: &str) {
        assert!(self.path(rel).exists(), "expected {rel} to exist");
    }

    pub fn assert_file_missing(&self, rel: &str) {
        assert!(!self.path(rel).exists(), "expected {rel} to be absent");
    }

    /// Assert no `*.tmp` or `*.lock` leftovers sit next to `rel`.
    pub fn assert_no_staging_files(&self, rel: &str) {
        let path = self.path(rel);
        let Some(dir) = path.parent() else {
            return;
        };
        let leftovers: Vec<PathBuf> = fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| {
                p.extension()
                    .is_some_and(|ext| ext == "tmp" || ext == "lock")
            })
            .collect();
        assert!(leftovers.is_empty(), "staging leftovers: {leftovers:?}");
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }
}
