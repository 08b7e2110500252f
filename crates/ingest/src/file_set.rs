use crate::error::{IngestError, Result};
use crate::reader::EncodingFallbackReader;
use crate::session::SessionStateStore;
use crate::validator::PathExtensionValidator;
use std::path::{Path, PathBuf};

/// A file in the active set with its decoded content, read once on add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub content: String,
}

impl FileEntry {
    pub fn basename(&self) -> String {
        basename(&self.path)
    }
}

/// Snapshot on the undo stack: the entry plus the index it held when removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedEntry {
    pub entry: FileEntry,
    pub original_index: usize,
}

/// Ordered set of ingested files with a LIFO undo stack for removals.
///
/// In-memory state is authoritative for the session: every mutation is followed by a
/// synchronous save, and a failed save is logged without rolling the mutation back.
pub struct FileSetStore {
    entries: Vec<FileEntry>,
    deleted: Vec<DeletedEntry>,
    reader: EncodingFallbackReader,
    session: Option<SessionStateStore>,
}

impl FileSetStore {
    pub fn new(session: SessionStateStore) -> Self {
        Self {
            entries: Vec::new(),
            deleted: Vec::new(),
            reader: EncodingFallbackReader::new(),
            session: Some(session),
        }
    }

    /// Store that never touches the session file.
    pub fn in_memory() -> Self {
        Self {
            entries: Vec::new(),
            deleted: Vec::new(),
            reader: EncodingFallbackReader::new(),
            session: None,
        }
    }

    pub fn with_reader(mut self, reader: EncodingFallbackReader) -> Self {
        self.reader = reader;
        self
    }

    pub fn session(&self) -> Option<&SessionStateStore> {
        self.session.as_ref()
    }

    /// Repopulate from the persisted record. Per-file failures are logged and skipped.
    /// Restored undo entries re-insert at the tail. Returns the number of active files loaded.
    pub fn restore_session(&mut self) -> usize {
        let Some(record) = self.session.as_ref().and_then(SessionStateStore::load) else {
            return 0;
        };

        for path in record.active_paths {
            let path = absolute_path(&path);
            if self.contains(&path) {
                continue;
            }
            if !PathExtensionValidator::is_text_file(&path) {
                log::warn!("Skipping restored path {}: not a text file", path.display());
                continue;
            }
            match self.reader.read(&path) {
                Ok(content) => self.entries.push(FileEntry { path, content }),
                Err(err) => log::warn!("Failed to restore {}: {err}", path.display()),
            }
        }

        for path in record.deleted_paths {
            let path = absolute_path(&path);
            if self.contains(&path) {
                log::debug!("Dropping undo entry for {}: already active", path.display());
                continue;
            }
            match self.reader.read(&path) {
                Ok(content) => self.deleted.push(DeletedEntry {
                    entry: FileEntry { path, content },
                    original_index: self.entries.len(),
                }),
                Err(err) => log::warn!("Failed to restore deleted {}: {err}", path.display()),
            }
        }

        log::info!(
            "Restored session: {} file(s), {} undo entries",
            self.entries.len(),
            self.deleted.len()
        );
        self.entries.len()
    }

    /// Append `path` to the set. Relative paths are resolved against the current
    /// directory so the set and the session record only hold absolute paths.
    pub fn add(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let resolved = absolute_path(path.as_ref());
        let path = resolved.as_path();
        if !PathExtensionValidator::is_text_file(path) {
            return Err(IngestError::InvalidFile(path.to_path_buf()));
        }
        if self.contains(path) {
            return Err(IngestError::DuplicateFile(path.to_path_buf()));
        }

        let content = self
            .reader
            .read(path)
            .map_err(|source| IngestError::ReadFailed {
                path: path.to_path_buf(),
                source,
            })?;
        self.entries.push(FileEntry {
            path: path.to_path_buf(),
            content,
        });
        log::debug!("Added {} ({} file(s))", path.display(), self.entries.len());
        self.persist();
        Ok(())
    }

    /// Move the entry at `index` onto the undo stack. Out of range is a no-op.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        let entry = self.entries.remove(index);
        self.deleted.push(DeletedEntry {
            entry,
            original_index: index,
        });
        self.persist();
        true
    }

    /// Undo the most recent removal, clamping the slot to the current length.
    ///
    /// Snapshots whose path was added again after removal are discarded, so the set
    /// never holds a path twice.
    pub fn restore_last(&mut self) -> bool {
        let mut discarded = false;
        while let Some(deleted) = self.deleted.pop() {
            if self.contains(&deleted.entry.path) {
                log::debug!(
                    "Discarding undo entry for {}: already active",
                    deleted.entry.path.display()
                );
                discarded = true;
                continue;
            }
            let index = deleted.original_index.min(self.entries.len());
            self.entries.insert(index, deleted.entry);
            self.persist();
            return true;
        }
        if discarded {
            self.persist();
        }
        false
    }

    /// Every entry as `=== <basename> ===\n<content>`, separated by a blank line.
    pub fn combined_content(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("=== {} ===\n{}", entry.basename(), entry.content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Empty both the set and the undo stack and delete the persisted record.
    pub fn clear_all(&mut self) {
        self.entries.clear();
        self.deleted.clear();
        if let Some(session) = &self.session {
            session.clear();
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.iter().any(|entry| entry.path == path)
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn deleted(&self) -> &[DeletedEntry] {
        &self.deleted
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries.iter().map(|entry| entry.path.clone()).collect()
    }

    pub fn basenames(&self) -> Vec<String> {
        self.entries.iter().map(FileEntry::basename).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn deleted_len(&self) -> usize {
        self.deleted.len()
    }

    fn persist(&self) {
        let Some(session) = &self.session else {
            return;
        };
        let deleted: Vec<PathBuf> = self
            .deleted
            .iter()
            .map(|d| d.entry.path.clone())
            .collect();
        session.save(&self.paths(), &deleted);
    }
}

/// `path` joined onto the current directory when relative. Falls back to `path`
/// unchanged if the current directory cannot be resolved.
pub(crate) fn absolute_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(err) => {
            log::warn!("Failed to resolve {} against cwd: {err}", path.display());
            path.to_path_buf()
        }
    }
}

pub(crate) fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
