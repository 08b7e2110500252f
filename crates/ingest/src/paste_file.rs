use crate::error::{IngestError, Result};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

pub const PASTE_FILE_PREFIX: &str = "paste-text_";
pub const PASTE_FILE_SUFFIX: &str = ".txt";

const SECS_PER_HOUR: u64 = 3_600;

/// Turns pasted text into `paste-text_<n>.txt` files so it can be ingested like a dropped file.
///
/// The counter lives only as long as the factory. After a restart, names left over
/// from an earlier session are skipped by probing forward until a free one is found.
#[derive(Debug, Clone)]
pub struct EphemeralTextFileFactory {
    dir: PathBuf,
    counter: u64,
}

/// Outcome of [`EphemeralTextFileFactory::sweep_stale`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub removed: Vec<PathBuf>,
    pub failed: usize,
}

impl EphemeralTextFileFactory {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            counter: 0,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_name(n: u64) -> String {
        format!("{PASTE_FILE_PREFIX}{n}{PASTE_FILE_SUFFIX}")
    }

    pub fn is_paste_file_name(name: &str) -> bool {
        name.starts_with(PASTE_FILE_PREFIX) && name.ends_with(PASTE_FILE_SUFFIX)
    }

    /// Name the next [`Self::materialize`] call would use. Does not touch the counter.
    pub fn peek_next_name(&self) -> String {
        let (n, _) = self.next_free();
        Self::file_name(n)
    }

    /// Write `text` verbatim (UTF-8) into a fresh paste file and return its path.
    pub fn materialize(&mut self, text: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(|source| IngestError::WriteFailed {
            path: self.dir.clone(),
            source,
        })?;

        loop {
            let (n, path) = self.next_free();
            self.counter = n;
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                // Lost a race with another writer between probe and create.
                Err(err) if err.kind() == ErrorKind::AlreadyExists => continue,
                Err(source) => return Err(IngestError::WriteFailed { path, source }),
            };
            file.write_all(text.as_bytes())
                .map_err(|source| IngestError::WriteFailed {
                    path: path.clone(),
                    source,
                })?;
            log::debug!("Materialized pasted text into {}", path.display());
            return Ok(path);
        }
    }

    /// Delete paste files older than `max_age_hours`. Per-file failures are logged and
    /// counted, never fatal.
    pub fn sweep_stale(&self, max_age_hours: u64) -> SweepReport {
        self.sweep_older_than(Duration::from_secs(
            max_age_hours.saturating_mul(SECS_PER_HOUR),
        ))
    }

    pub fn sweep_older_than(&self, max_age: Duration) -> SweepReport {
        let mut report = SweepReport::default();
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) => {
                log::warn!("Failed to list {}: {err}", self.dir.display());
                return report;
            }
        };

        let now = SystemTime::now();
        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if !Self::is_paste_file_name(name) {
                continue;
            }
            let path = entry.path();
            match Self::age(&path, now) {
                Ok(age) if age > max_age => match std::fs::remove_file(&path) {
                    Ok(()) => report.removed.push(path),
                    Err(err) => {
                        log::warn!("Failed to remove stale paste file {name}: {err}");
                        report.failed += 1;
                    }
                },
                Ok(_) => {}
                Err(err) => {
                    log::warn!("Failed to inspect paste file {name}: {err}");
                    report.failed += 1;
                }
            }
        }

        if !report.removed.is_empty() {
            log::info!("Removed {} stale paste file(s)", report.removed.len());
        }
        report
    }

    fn age(path: &Path, now: SystemTime) -> std::io::Result<Duration> {
        let meta = std::fs::metadata(path)?;
        if !meta.is_file() {
            return Ok(Duration::ZERO);
        }
        let stamp = meta.created().or_else(|_| meta.modified())?;
        Ok(now.duration_since(stamp).unwrap_or(Duration::ZERO))
    }

    fn next_free(&self) -> (u64, PathBuf) {
        let mut n = self.counter + 1;
        loop {
            let path = self.dir.join(Self::file_name(n));
            if !path.exists() {
                return (n, path);
            }
            n += 1;
        }
    }
}
