use crate::clipboard::{ClipboardAnalyzer, ClipboardSink, ClipboardSnapshot, ClipboardSource};
use crate::config::IngestConfig;
use crate::drop_payload::DropPayloadParser;
use crate::error::IngestError;
use crate::file_set::{basename, FileSetStore};
use crate::paste_file::{EphemeralTextFileFactory, SweepReport};
use crate::session::SessionStateStore;
use crate::stats::ContentStats;
use crate::status::{Status, StatusKey, StatusReporter};
use std::path::{Path, PathBuf};

/// Runs one user gesture (drop, paste, delete, undo, clear, copy) to completion and
/// reports its outcome.
///
/// All store mutation goes through this single owner, so a host with several threads
/// must funnel gestures to one controller instead of sharing the store.
pub struct IngestController<R> {
    store: FileSetStore,
    parser: DropPayloadParser,
    paste_files: EphemeralTextFileFactory,
    reporter: R,
}

impl<R: StatusReporter> IngestController<R> {
    pub fn new(config: &IngestConfig, reporter: R) -> Self {
        Self::with_store(
            FileSetStore::new(SessionStateStore::new(&config.state_file)),
            EphemeralTextFileFactory::new(&config.temp_dir),
            reporter,
        )
    }

    pub fn with_store(
        store: FileSetStore,
        paste_files: EphemeralTextFileFactory,
        reporter: R,
    ) -> Self {
        Self {
            store,
            parser: DropPayloadParser::new(),
            paste_files,
            reporter,
        }
    }

    pub fn store(&self) -> &FileSetStore {
        &self.store
    }

    pub fn paste_files(&self) -> &EphemeralTextFileFactory {
        &self.paste_files
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Restore the previous session. Reports `state_loaded` when anything came back.
    pub fn startup(&mut self) -> usize {
        let restored = self.resume();
        if restored > 0 {
            self.emit(Status::ok(StatusKey::StateLoaded).arg(restored));
        }
        restored
    }

    /// Restore the previous session without reporting. For hosts that reload the
    /// session on every invocation.
    pub fn resume(&mut self) -> usize {
        self.store.restore_session()
    }

    /// Ingest every file named by a drop payload. Returns how many were added.
    pub fn handle_drop(&mut self, payload: &str) -> usize {
        let paths = self.parser.parse(payload);
        if paths.is_empty() {
            log::debug!("Drop payload carried no usable files");
        }
        self.add_paths(&paths)
    }

    /// Add each path in order, reporting per file.
    pub fn add_paths(&mut self, paths: &[PathBuf]) -> usize {
        paths.iter().filter(|path| self.add_one(path)).count()
    }

    /// Paste from `source`: files are added directly, text goes through a paste file.
    pub fn paste(&mut self, source: &mut dyn ClipboardSource) -> usize {
        let snapshot = ClipboardAnalyzer::new(source).analyze();
        match snapshot {
            ClipboardSnapshot::Files(paths) => {
                let added = self.add_paths(&paths);
                if added > 0 {
                    self.emit(Status::ok(StatusKey::FilesPasted).arg(added));
                } else {
                    self.emit(Status::failed(StatusKey::NoValidFilesInClipboard));
                }
                added
            }
            ClipboardSnapshot::Text(text) => self.paste_text(&text),
            ClipboardSnapshot::Empty => {
                self.emit(Status::failed(StatusKey::ClipboardEmpty));
                0
            }
        }
    }

    fn paste_text(&mut self, text: &str) -> usize {
        let path = match self.paste_files.materialize(text) {
            Ok(path) => path,
            Err(err) => {
                self.emit(Status::failed(StatusKey::CreateTextFileFailed).arg(err.reason()));
                return 0;
            }
        };
        match self.store.add(&path) {
            Ok(()) => {
                self.emit(Status::ok(StatusKey::TextPasted).arg(basename(&path)));
                1
            }
            Err(err) => {
                if let Err(remove_err) = std::fs::remove_file(&path) {
                    log::warn!(
                        "Failed to remove unused paste file {}: {remove_err}",
                        path.display()
                    );
                }
                self.emit(Status::failed(StatusKey::PasteFailed).arg(err.reason()));
                0
            }
        }
    }

    /// Remove the selected entry. `None` means nothing is selected.
    pub fn delete(&mut self, selected: Option<usize>) -> bool {
        let Some(index) = selected else {
            self.emit(Status::failed(StatusKey::NoFileSelected));
            return false;
        };
        if self.store.remove(index) {
            self.emit(Status::ok(StatusKey::FileDeleted));
            true
        } else {
            self.emit(Status::failed(StatusKey::NoFileSelected));
            false
        }
    }

    pub fn undo(&mut self) -> bool {
        if self.store.restore_last() {
            self.emit(Status::ok(StatusKey::FileRestored));
            true
        } else {
            self.emit(Status::failed(StatusKey::NoFileToRestore));
            false
        }
    }

    pub fn clear(&mut self) {
        self.store.clear_all();
        self.emit(Status::ok(StatusKey::AllFilesCleared));
    }

    /// Put the combined document on `sink`.
    pub fn copy_content(&mut self, sink: &mut dyn ClipboardSink) -> bool {
        let content = self.store.combined_content();
        if content.is_empty() {
            self.emit(Status::failed(StatusKey::NoContentToCopy));
            return false;
        }
        match sink.set_text(&content) {
            Ok(()) => {
                self.emit(Status::ok(StatusKey::ContentCopied));
                true
            }
            Err(err) => {
                self.emit(Status::failed(StatusKey::CopyFailed).arg(err));
                false
            }
        }
    }

    /// Report line and character counts of the combined document.
    pub fn report_stats(&self) -> ContentStats {
        let stats = ContentStats::of(&self.store.combined_content());
        self.emit(
            Status::ok(StatusKey::LinesChars)
                .arg(stats.lines)
                .arg(stats.chars),
        );
        stats
    }

    pub fn sweep_stale_pastes(&self, max_age_hours: u64) -> SweepReport {
        self.paste_files.sweep_stale(max_age_hours)
    }

    fn add_one(&mut self, path: &Path) -> bool {
        match self.store.add(path) {
            Ok(()) => {
                self.emit(Status::ok(StatusKey::FileAdded).arg(basename(path)));
                true
            }
            Err(err) => {
                self.emit(add_failure(&err, path));
                false
            }
        }
    }

    fn emit(&self, status: Status) {
        self.reporter.report(&status);
    }
}

fn add_failure(err: &IngestError, path: &Path) -> Status {
    match err {
        IngestError::InvalidFile(_) => Status::failed(StatusKey::InvalidFile).arg(basename(path)),
        IngestError::DuplicateFile(_) => Status::failed(StatusKey::FileExists).arg(basename(path)),
        other => Status::failed(StatusKey::ReadFileError).arg(other.reason()),
    }
}
