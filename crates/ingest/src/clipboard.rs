use crate::error::ClipboardError;
use crate::file_set::absolute_path;
use std::path::PathBuf;

/// What the clipboard holds at the moment of a paste gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardSnapshot {
    Files(Vec<PathBuf>),
    Text(String),
    Empty,
}

/// Read side of a clipboard.
pub trait ClipboardSource {
    /// Native file-list format. `Ok(None)` when the format is absent or the platform
    /// build has no file-list support.
    fn file_list(&mut self) -> Result<Option<Vec<PathBuf>>, ClipboardError>;

    fn text(&mut self) -> Result<Option<String>, ClipboardError>;
}

impl<T: ClipboardSource + ?Sized> ClipboardSource for &mut T {
    fn file_list(&mut self) -> Result<Option<Vec<PathBuf>>, ClipboardError> {
        (**self).file_list()
    }

    fn text(&mut self) -> Result<Option<String>, ClipboardError> {
        (**self).text()
    }
}

/// Write side of a clipboard.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Classifies clipboard content as files, text, or nothing.
pub struct ClipboardAnalyzer<S> {
    source: S,
}

impl<S: ClipboardSource> ClipboardAnalyzer<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// File lists take precedence over text. Access failures count as "format absent".
    pub fn analyze(&mut self) -> ClipboardSnapshot {
        let files = self.files();
        if !files.is_empty() {
            return ClipboardSnapshot::Files(files);
        }

        match self.source.text() {
            Ok(Some(text)) if !text.trim().is_empty() => ClipboardSnapshot::Text(text),
            Ok(_) => ClipboardSnapshot::Empty,
            Err(err) => {
                log::warn!("Failed to read clipboard text: {err}");
                ClipboardSnapshot::Empty
            }
        }
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    fn files(&mut self) -> Vec<PathBuf> {
        match self.source.file_list() {
            Ok(Some(paths)) => paths
                .iter()
                .map(|p| absolute_path(p))
                .filter(|p| p.is_file())
                .collect(),
            Ok(None) => Vec::new(),
            Err(err) => {
                log::warn!("Failed to read clipboard file list: {err}");
                Vec::new()
            }
        }
    }
}

/// In-process clipboard. Backs `--stdin` pastes and test doubles.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    pub files: Option<Vec<PathBuf>>,
    pub text: Option<String>,
}

impl MemoryClipboard {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            files: None,
            text: Some(text.into()),
        }
    }

    pub fn with_files(files: Vec<PathBuf>) -> Self {
        Self {
            files: Some(files),
            text: None,
        }
    }
}

impl ClipboardSource for MemoryClipboard {
    fn file_list(&mut self) -> Result<Option<Vec<PathBuf>>, ClipboardError> {
        Ok(self.files.clone())
    }

    fn text(&mut self) -> Result<Option<String>, ClipboardError> {
        Ok(self.text.clone())
    }
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.files = None;
        self.text = Some(text.to_string());
        Ok(())
    }
}

/// Stand-in when no clipboard can be opened (headless sessions, sandboxed builds).
#[derive(Debug, Clone)]
pub struct UnavailableClipboard {
    reason: String,
}

impl UnavailableClipboard {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl ClipboardSource for UnavailableClipboard {
    fn file_list(&mut self) -> Result<Option<Vec<PathBuf>>, ClipboardError> {
        Err(ClipboardError::Access(self.reason.clone()))
    }

    fn text(&mut self) -> Result<Option<String>, ClipboardError> {
        Err(ClipboardError::Access(self.reason.clone()))
    }
}

impl ClipboardSink for UnavailableClipboard {
    fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Access(self.reason.clone()))
    }
}

#[cfg(feature = "system-clipboard")]
pub use system::SystemClipboard;

#[cfg(feature = "system-clipboard")]
mod system {
    use super::{ClipboardSink, ClipboardSource};
    use crate::error::ClipboardError;
    use std::path::PathBuf;

    /// OS clipboard through `arboard`.
    pub struct SystemClipboard {
        inner: arboard::Clipboard,
    }

    impl SystemClipboard {
        pub fn open() -> Result<Self, ClipboardError> {
            let inner =
                arboard::Clipboard::new().map_err(|err| ClipboardError::Access(err.to_string()))?;
            Ok(Self { inner })
        }
    }

    fn absent_or<T>(result: Result<T, arboard::Error>) -> Result<Option<T>, ClipboardError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(arboard::Error::ClipboardNotSupported) => {
                Err(ClipboardError::Access("clipboard not supported".to_string()))
            }
            Err(err) => Err(ClipboardError::Content(err.to_string())),
        }
    }

    impl ClipboardSource for SystemClipboard {
        #[cfg(feature = "clipboard-file-list")]
        fn file_list(&mut self) -> Result<Option<Vec<PathBuf>>, ClipboardError> {
            absent_or(self.inner.get().file_list())
        }

        #[cfg(not(feature = "clipboard-file-list"))]
        fn file_list(&mut self) -> Result<Option<Vec<PathBuf>>, ClipboardError> {
            Ok(None)
        }

        fn text(&mut self) -> Result<Option<String>, ClipboardError> {
            absent_or(self.inner.get_text())
        }
    }

    impl ClipboardSink for SystemClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            self.inner
                .set_text(text.to_owned())
                .map_err(|err| ClipboardError::Content(err.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn empty_clipboard_is_empty() {
        let mut analyzer = ClipboardAnalyzer::new(MemoryClipboard::default());
        assert_eq!(analyzer.analyze(), ClipboardSnapshot::Empty);
    }

    #[test]
    fn plain_text_is_returned_verbatim() {
        let mut analyzer = ClipboardAnalyzer::new(MemoryClipboard::with_text("hello"));
        assert_eq!(analyzer.analyze(), ClipboardSnapshot::Text("hello".to_string()));

        let mut padded = ClipboardAnalyzer::new(MemoryClipboard::with_text("  hi \n"));
        assert_eq!(padded.analyze(), ClipboardSnapshot::Text("  hi \n".to_string()));
    }

    #[test]
    fn blank_text_counts_as_empty() {
        let mut analyzer = ClipboardAnalyzer::new(MemoryClipboard::with_text(" \t\n"));
        assert_eq!(analyzer.analyze(), ClipboardSnapshot::Empty);
    }

    #[test]
    fn file_list_wins_over_text_and_is_filtered() {
        let temp = tempdir().unwrap();
        let real = temp.path().join("real.txt");
        fs::write(&real, "x").unwrap();
        let clipboard = MemoryClipboard {
            files: Some(vec![real.clone(), temp.path().join("gone.txt")]),
            text: Some("fallback".to_string()),
        };

        let mut analyzer = ClipboardAnalyzer::new(clipboard);
        assert_eq!(analyzer.analyze(), ClipboardSnapshot::Files(vec![real]));
    }

    #[test]
    fn stale_file_list_falls_through_to_text() {
        let temp = tempdir().unwrap();
        let clipboard = MemoryClipboard {
            files: Some(vec![temp.path().join("gone.txt")]),
            text: Some("fallback".to_string()),
        };

        let mut analyzer = ClipboardAnalyzer::new(clipboard);
        assert_eq!(
            analyzer.analyze(),
            ClipboardSnapshot::Text("fallback".to_string())
        );
    }

    #[test]
    fn access_failures_degrade_to_empty() {
        let mut analyzer = ClipboardAnalyzer::new(UnavailableClipboard::new("no display"));
        assert_eq!(analyzer.analyze(), ClipboardSnapshot::Empty);
    }

    /// Text-only platform build: the file-list format cannot be accessed at all.
    struct NoFileListClipboard(&'static str);

    impl ClipboardSource for NoFileListClipboard {
        fn file_list(&mut self) -> Result<Option<Vec<PathBuf>>, ClipboardError> {
            Err(ClipboardError::Access("file lists unsupported".to_string()))
        }

        fn text(&mut self) -> Result<Option<String>, ClipboardError> {
            Ok(Some(self.0.to_string()))
        }
    }

    #[test]
    fn file_list_failure_falls_through_to_text() {
        let mut analyzer = ClipboardAnalyzer::new(NoFileListClipboard("x"));
        assert_eq!(analyzer.analyze(), ClipboardSnapshot::Text("x".to_string()));
    }

    #[test]
    fn memory_sink_replaces_content() {
        let mut clipboard = MemoryClipboard::with_files(vec![PathBuf::from("/a.txt")]);
        clipboard.set_text("copied").unwrap();
        assert_eq!(clipboard.files, None);
        assert_eq!(clipboard.text.as_deref(), Some("copied"));
    }
}
