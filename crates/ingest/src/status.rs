use serde::Serialize;

/// Message keys for the status line. The host owns the translations; the core only
/// picks a key and positional arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKey {
    FileAdded,
    InvalidFile,
    FileExists,
    ReadFileError,
    FileDeleted,
    NoFileSelected,
    FileRestored,
    NoFileToRestore,
    AllFilesCleared,
    StateLoaded,
    ClipboardEmpty,
    PasteFailed,
    FilesPasted,
    NoValidFilesInClipboard,
    TextPasted,
    CreateTextFileFailed,
    ContentCopied,
    NoContentToCopy,
    CopyFailed,
    LinesChars,
}

impl StatusKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            StatusKey::FileAdded => "file_added",
            StatusKey::InvalidFile => "invalid_file",
            StatusKey::FileExists => "file_exists",
            StatusKey::ReadFileError => "read_file_error",
            StatusKey::FileDeleted => "file_deleted",
            StatusKey::NoFileSelected => "no_file_selected",
            StatusKey::FileRestored => "file_restored",
            StatusKey::NoFileToRestore => "no_file_to_restore",
            StatusKey::AllFilesCleared => "all_files_cleared",
            StatusKey::StateLoaded => "state_loaded",
            StatusKey::ClipboardEmpty => "clipboard_empty",
            StatusKey::PasteFailed => "paste_failed",
            StatusKey::FilesPasted => "files_pasted",
            StatusKey::NoValidFilesInClipboard => "no_valid_files_in_clipboard",
            StatusKey::TextPasted => "text_pasted",
            StatusKey::CreateTextFileFailed => "create_text_file_failed",
            StatusKey::ContentCopied => "content_copied",
            StatusKey::NoContentToCopy => "no_content_to_copy",
            StatusKey::CopyFailed => "copy_failed",
            StatusKey::LinesChars => "lines_chars",
        }
    }
}

impl std::fmt::Display for StatusKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub key: StatusKey,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    pub ok: bool,
}

impl Status {
    pub fn ok(key: StatusKey) -> Self {
        Self {
            key,
            args: Vec::new(),
            ok: true,
        }
    }

    pub fn failed(key: StatusKey) -> Self {
        Self {
            key,
            args: Vec::new(),
            ok: false,
        }
    }

    pub fn arg(mut self, value: impl ToString) -> Self {
        self.args.push(value.to_string());
        self
    }
}

/// Receives one [`Status`] per gesture outcome.
pub trait StatusReporter {
    fn report(&self, status: &Status);
}

/// Drops every status. For hosts that only care about return values.
pub struct SilentReporter;

impl StatusReporter for SilentReporter {
    fn report(&self, _status: &Status) {}
}
