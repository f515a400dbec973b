//! Atomic I/O operations with file locking

use crate::{Error, Result};
use backoff::ExponentialBackoffBuilder;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Tuning for [`write_atomic`] and [`stage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobustnessConfig {
    /// How long to keep retrying the advisory lock before failing.
    pub lock_timeout: Duration,
    /// Flush the temp file to disk before it is renamed into place.
    pub enable_fsync: bool,
}

impl Default for RobustnessConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_secs(5),
            enable_fsync: true,
        }
    }
}

/// New content for a file, written to a sibling temp file but not yet
/// renamed over the target.
///
/// The advisory lock on `<target>.lock` is held until the value is dropped.
/// Dropping without [`StagedWrite::commit`] removes the temp file.
#[derive(Debug)]
pub struct StagedWrite {
    target: PathBuf,
    temp_path: PathBuf,
    lock_path: PathBuf,
    lock: Option<File>,
    committed: bool,
}

impl StagedWrite {
    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Rename the temp file over the target.
    pub fn commit(mut self) -> Result<()> {
        fs::rename(&self.temp_path, &self.target).map_err(|e| Error::io(&self.target, e))?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagedWrite {
    fn drop(&mut self) {
        if !self.committed
            && self.temp_path.exists()
            && let Err(e) = fs::remove_file(&self.temp_path)
        {
            tracing::warn!(path = %self.temp_path.display(), error = %e, "Failed to remove temp file");
        }
        if let Some(lock) = self.lock.take() {
            let _ = lock.unlock();
            drop(lock);
            let _ = fs::remove_file(&self.lock_path);
        }
    }
}

fn sibling_path(target: &Path, suffix: &str, hidden: bool) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = if hidden {
        format!(".{name}.{}.{suffix}", std::process::id())
    } else {
        format!("{name}.{suffix}")
    };
    target.with_file_name(file_name)
}

fn acquire_lock(lock_path: &Path, target: &Path, config: RobustnessConfig) -> Result<File> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path)
        .map_err(|e| Error::io(lock_path, e))?;

    let policy = ExponentialBackoffBuilder::new()
        .with_initial_interval(Duration::from_millis(10))
        .with_max_interval(Duration::from_millis(200))
        .with_max_elapsed_time(Some(config.lock_timeout))
        .build();

    backoff::retry(policy, || {
        file.try_lock_exclusive().map_err(backoff::Error::transient)
    })
    .map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })?;

    Ok(file)
}

/// Write `content` to a temp file next to `path` and return the pending
/// replace.
///
/// Parent directories are created. The temp file lives in the same
/// directory so the final rename never crosses filesystems.
pub fn stage(path: &Path, content: &[u8], config: RobustnessConfig) -> Result<StagedWrite> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let lock_path = sibling_path(path, "lock", false);
    let lock = acquire_lock(&lock_path, path, config)?;

    let staged = StagedWrite {
        target: path.to_path_buf(),
        temp_path: sibling_path(path, "tmp", true),
        lock_path,
        lock: Some(lock),
        committed: false,
    };

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&staged.temp_path)
        .map_err(|e| Error::io(&staged.temp_path, e))?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&staged.temp_path, e))?;

    if config.enable_fsync {
        temp_file
            .sync_all()
            .map_err(|e| Error::io(&staged.temp_path, e))?;
    }

    Ok(staged)
}

/// Write content atomically to a file.
///
/// Uses write-to-temp-then-rename so readers see either the old or the new
/// file, never a partial one.
pub fn write_atomic(path: &Path, content: &[u8], config: RobustnessConfig) -> Result<()> {
    stage(path, content, config)?.commit()
}

/// Read a text file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Read a text file, treating a missing file as `None`.
pub fn read_text_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}
