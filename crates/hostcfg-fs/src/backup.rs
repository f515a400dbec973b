//! Timestamped backups of host configuration files
//!
//! Every guarded write first copies the current file to
//! `<root>/<host>/<file_name>.<host>.<timestamp>`. Backups accumulate per
//! host and are listed, restored and pruned by id (the backup file name).

use crate::checksum::{compute_checksum, compute_file_checksum};
use crate::io::{self, RobustnessConfig};
use crate::{Error, Result};
use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use std::fs;
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%6f";
const TIMESTAMP_LEN: usize = 22;

/// One backup file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupRecord {
    /// Backup file name, unique within the host directory.
    pub id: String,
    pub host: String,
    pub path: PathBuf,
    pub created: DateTime<Utc>,
    pub size: u64,
}

/// Which backups [`BackupManager::prune`] removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrunePolicy {
    /// Remove backups created more than this many days ago.
    OlderThanDays(u32),
    /// Keep the newest `n` backups and remove the rest.
    KeepLatest(usize),
}

/// What the target file must look like right before it is replaced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExpectedState {
    /// No check.
    #[default]
    Any,
    /// The file must still not exist.
    Missing,
    /// The file must still have this checksum.
    Checksum(String),
}

impl ExpectedState {
    /// Expected state for content observed at read time.
    pub fn observed(content: Option<&str>) -> Self {
        match content {
            Some(content) => Self::Checksum(compute_checksum(content.as_bytes())),
            None => Self::Missing,
        }
    }
}

/// A guarded write of one host file.
#[derive(Debug, Clone)]
pub struct WriteRequest<'a> {
    pub host: &'a str,
    pub target: &'a Path,
    pub content: &'a [u8],
    pub skip_backup: bool,
    pub expected: ExpectedState,
}

/// Manages backups under a root directory, one subdirectory per host.
#[derive(Debug, Clone)]
pub struct BackupManager {
    root: PathBuf,
    robustness: RobustnessConfig,
}

impl BackupManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            robustness: RobustnessConfig::default(),
        }
    }

    pub fn with_robustness(mut self, robustness: RobustnessConfig) -> Self {
        self.robustness = robustness;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn robustness(&self) -> RobustnessConfig {
        self.robustness
    }

    fn host_dir(&self, host: &str) -> Result<PathBuf> {
        validate_identifier(host)?;
        Ok(self.root.join(host))
    }

    /// Copy `source` into the host's backup directory.
    ///
    /// Any failure is reported as [`Error::BackupFailed`].
    pub fn create(&self, host: &str, source: &Path) -> Result<BackupRecord> {
        let dir = self.host_dir(host)?;
        let backup_failed = |source_err| Error::BackupFailed {
            path: source.to_path_buf(),
            source: source_err,
        };

        fs::create_dir_all(&dir).map_err(backup_failed)?;

        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "config".to_string());
        let created = Utc::now();
        let stamp = created.format(TIMESTAMP_FORMAT).to_string();

        let mut id = format!("{file_name}.{host}.{stamp}");
        let mut counter = 1;
        while dir.join(&id).exists() {
            id = format!("{file_name}.{host}.{stamp}_{counter}");
            counter += 1;
        }

        let path = dir.join(&id);
        let size = fs::copy(source, &path).map_err(backup_failed)?;

        tracing::info!(host, backup = %id, source = %source.display(), "Created backup");

        Ok(BackupRecord {
            id,
            host: host.to_string(),
            path,
            created: parse_created(&stamp).unwrap_or(created),
            size,
        })
    }

    /// All backups for a host, newest first.
    pub fn list(&self, host: &str) -> Result<Vec<BackupRecord>> {
        let dir = self.host_dir(host)?;
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for entry in fs::read_dir(&dir).map_err(|e| Error::io(&dir, e))? {
            let entry = entry.map_err(|e| Error::io(&dir, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if let Some(record) = read_record(host, &path) {
                records.push(record);
            }
        }

        records.sort_by(|a, b| b.created.cmp(&a.created).then_with(|| b.id.cmp(&a.id)));
        Ok(records)
    }

    /// Look up one backup by id.
    pub fn get(&self, host: &str, id: &str) -> Result<BackupRecord> {
        validate_identifier(id).map_err(|_| Error::InvalidBackupId { id: id.to_string() })?;
        let path = self.host_dir(host)?.join(id);
        if !path.is_file() {
            return Err(Error::BackupNotFound {
                host: host.to_string(),
                id: id.to_string(),
            });
        }
        read_record(host, &path).ok_or_else(|| Error::InvalidBackupId { id: id.to_string() })
    }

    /// Copy a backup back over `target` and verify the result.
    pub fn restore(&self, host: &str, id: &str, target: &Path) -> Result<BackupRecord> {
        let record = self.get(host, id)?;
        let content = fs::read(&record.path).map_err(|e| Error::io(&record.path, e))?;
        io::write_atomic(target, &content, self.robustness)?;

        let expected = compute_checksum(&content);
        let actual = compute_file_checksum(target)
            .map_err(|e| Error::io(target, e))?
            .unwrap_or_default();
        if actual != expected {
            return Err(Error::ChecksumMismatch {
                path: target.to_path_buf(),
                expected,
                actual,
            });
        }

        tracing::info!(host, backup = %id, target = %target.display(), "Restored backup");
        Ok(record)
    }

    /// Remove backups according to `policy`, returning what was removed.
    pub fn prune(&self, host: &str, policy: PrunePolicy) -> Result<Vec<BackupRecord>> {
        let records = self.list(host)?;
        let doomed: Vec<BackupRecord> = match policy {
            PrunePolicy::OlderThanDays(days) => match prune_cutoff(Utc::now(), days) {
                Some(cutoff) => records.into_iter().filter(|r| r.created < cutoff).collect(),
                None => Vec::new(),
            },
            PrunePolicy::KeepLatest(keep) => records.into_iter().skip(keep).collect(),
        };

        for record in &doomed {
            fs::remove_file(&record.path).map_err(|e| Error::io(&record.path, e))?;
        }

        if !doomed.is_empty() {
            tracing::info!(host, removed = doomed.len(), ?policy, "Pruned backups");
        }
        Ok(doomed)
    }

    /// Back up the target (unless skipped or absent), then replace it
    /// atomically with `request.content`.
    ///
    /// A failed backup aborts before anything is written. A failed replace
    /// removes the temp file and restores the backup when the target was
    /// touched.
    pub fn write_with_backup(&self, request: &WriteRequest<'_>) -> Result<Option<BackupRecord>> {
        let backup = if !request.skip_backup && request.target.exists() {
            Some(self.create(request.host, request.target)?)
        } else {
            None
        };

        match self.replace(request) {
            Ok(()) => Ok(backup),
            Err(e) => {
                if let Some(record) = &backup
                    && !matches!(e, Error::ConcurrentModification { .. })
                {
                    self.rollback(record, request.target);
                }
                Err(e)
            }
        }
    }

    fn replace(&self, request: &WriteRequest<'_>) -> Result<()> {
        let staged = io::stage(request.target, request.content, self.robustness)?;

        let current =
            compute_file_checksum(request.target).map_err(|e| Error::io(request.target, e))?;
        let unchanged = match &request.expected {
            ExpectedState::Any => true,
            ExpectedState::Missing => current.is_none(),
            ExpectedState::Checksum(expected) => current.as_deref() == Some(expected.as_str()),
        };
        if !unchanged {
            return Err(Error::ConcurrentModification {
                path: request.target.to_path_buf(),
            });
        }

        staged.commit()?;
        tracing::debug!(host = request.host, path = %request.target.display(), "Wrote configuration");
        Ok(())
    }

    fn rollback(&self, record: &BackupRecord, target: &Path) {
        let backup_sum = match compute_file_checksum(&record.path) {
            Ok(Some(sum)) => sum,
            _ => return,
        };
        if let Ok(Some(current)) = compute_file_checksum(target)
            && current == backup_sum
        {
            return;
        }
        match fs::read(&record.path)
            .map_err(|e| Error::io(&record.path, e))
            .and_then(|content| io::write_atomic(target, &content, self.robustness))
        {
            Ok(()) => tracing::info!(backup = %record.id, "Rolled back failed write"),
            Err(e) => tracing::warn!(backup = %record.id, error = %e, "Rollback failed"),
        }
    }
}

/// Reject empty names, path separators and traversal.
fn validate_identifier(value: &str) -> Result<()> {
    let invalid = value.is_empty()
        || value == "."
        || value.contains('/')
        || value.contains('\\')
        || value.contains("..");
    if invalid {
        return Err(Error::InvalidBackupId {
            id: value.to_string(),
        });
    }
    Ok(())
}

/// `now` minus `days`, `None` when that predates every representable time.
fn prune_cutoff(now: DateTime<Utc>, days: u32) -> Option<DateTime<Utc>> {
    TimeDelta::try_days(i64::from(days)).and_then(|age| now.checked_sub_signed(age))
}

fn parse_created(stamp: &str) -> Option<DateTime<Utc>> {
    let stamp = stamp.get(..TIMESTAMP_LEN)?;
    NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

fn read_record(host: &str, path: &Path) -> Option<BackupRecord> {
    let id = path.file_name()?.to_str()?.to_string();
    let mut parts = id.rsplitn(3, '.');
    let stamp = parts.next()?;
    let file_host = parts.next()?;
    parts.next()?;
    if file_host != host {
        return None;
    }
    let created = parse_created(stamp)?;
    let size = fs::metadata(path).ok()?.len();
    Some(BackupRecord {
        id,
        host: host.to_string(),
        path: path.to_path_buf(),
        created,
        size,
    })
}
