//! # Dropcat Ingest
//!
//! Collects text files from drag-and-drop payloads and the clipboard into one ordered
//! set, and renders them as a single combined document.
//!
//! ## Pipeline
//!
//! ```text
//! Drop payload / Clipboard
//!     │
//!     ├──> DropPayloadParser (ordered rules)     ClipboardAnalyzer (files > text)
//!     │      └─> Candidate paths                    └─> paths or paste-text_<n>.txt
//!     │
//!     ├──> PathExtensionValidator (allow-list)
//!     │
//!     ├──> EncodingFallbackReader (UTF-8, BOM, GBK, Big5, Latin-1)
//!     │
//!     └──> FileSetStore (ordered set + undo stack)
//!            ├─> combined document
//!            └─> SessionStateStore (JSON, saved after every mutation)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use dropcat_ingest::{IngestConfig, IngestController, SilentReporter};
//!
//! let mut controller = IngestController::new(&IngestConfig::from_env(), SilentReporter);
//! controller.startup();
//! controller.handle_drop("{/home/me/notes one.md} /home/me/todo.txt");
//! println!("{}", controller.store().combined_content());
//! ```

mod clipboard;
mod config;
mod controller;
mod drop_payload;
mod error;
mod file_set;
mod paste_file;
mod reader;
mod session;
mod stats;
mod status;
mod validator;

#[cfg(feature = "system-clipboard")]
pub use clipboard::SystemClipboard;
pub use clipboard::{
    ClipboardAnalyzer, ClipboardSink, ClipboardSnapshot, ClipboardSource, MemoryClipboard,
    UnavailableClipboard,
};
pub use config::{
    IngestConfig, DEFAULT_PASTE_MAX_AGE_HOURS, PASTE_MAX_AGE_ENV, STATE_PATH_ENV, TEMP_DIR_ENV,
};
pub use controller::IngestController;
pub use drop_payload::{
    BraceGroupsRule, DropPayloadParser, ExistingPathRule, LinesRule, PayloadRule,
    SingleBraceRule, TokensRule, WholePayloadRule,
};
pub use error::{ClipboardError, IngestError, ReadError, Result};
pub use file_set::{DeletedEntry, FileEntry, FileSetStore};
pub use paste_file::{EphemeralTextFileFactory, SweepReport, PASTE_FILE_PREFIX, PASTE_FILE_SUFFIX};
pub use reader::{Candidate, EncodingFallbackReader, DEFAULT_CANDIDATES};
pub use session::{SessionRecord, SessionStateStore, SESSION_FILE_NAME, SESSION_RECORD_VERSION};
pub use stats::ContentStats;
pub use status::{SilentReporter, Status, StatusKey, StatusReporter};
pub use validator::PathExtensionValidator;
