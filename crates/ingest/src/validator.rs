use std::path::Path;

/// Gate for files that may enter the file set.
pub struct PathExtensionValidator;

impl PathExtensionValidator {
    /// True when `path` is an existing regular file with an allow-listed extension.
    ///
    /// Existence is checked again here even when the caller already filtered for it,
    /// since the file may disappear between enumeration and read.
    pub fn is_text_file(path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        if !path.is_file() {
            return false;
        }
        Self::has_text_extension(path)
    }

    /// Extension check only, no filesystem access.
    pub fn has_text_extension(path: &Path) -> bool {
        let Some(ext) = Self::extension(path) else {
            return false;
        };
        SUPPORTED_TEXT_EXTENSIONS
            .iter()
            .any(|candidate| candidate == &ext)
    }

    /// Lowercased extension without the leading dot.
    pub fn extension(path: &Path) -> Option<String> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
    }

    pub fn supported_extensions() -> &'static [&'static str] {
        SUPPORTED_TEXT_EXTENSIONS
    }
}

const SUPPORTED_TEXT_EXTENSIONS: &[&str] = &[
    // Plain text / docs
    "txt",
    "md",
    "mdc",
    "rst",
    "log",
    // Config / data
    "json",
    "xml",
    "yaml",
    "yml",
    "ini",
    "cfg",
    "conf",
    "sql",
    // Web
    "html",
    "css",
    "js",
    "php",
    // Scripts
    "py",
    "sh",
    "bat",
    "ps1",
    "rb",
    "pl",
    "lua",
    "tcl",
    "r",
    // Compiled languages
    "c",
    "h",
    "cpp",
    "hpp",
    "java",
    "go",
    "rs",
    "swift",
    "kt",
    "scala",
    "m",
    "mm",
    "cs",
    "vb",
    // Assembly
    "asm",
    "s",
];

#[cfg(test)]
mod tests {
    use super::PathExtensionValidator;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    #[test]
    fn accepts_existing_allow_listed_files() {
        let temp = tempdir().unwrap();
        let notes = temp.path().join("notes.txt");
        let script = temp.path().join("Build.PS1");
        fs::write(&notes, "hello").unwrap();
        fs::write(&script, "Write-Host hi").unwrap();

        assert!(PathExtensionValidator::is_text_file(&notes));
        assert!(PathExtensionValidator::is_text_file(&script));
    }

    #[test]
    fn rejects_unknown_extensions_and_missing_files() {
        let temp = tempdir().unwrap();
        let image = temp.path().join("photo.png");
        let bare = temp.path().join("Makefile");
        fs::write(&image, [0x89, b'P', b'N', b'G']).unwrap();
        fs::write(&bare, "all:").unwrap();

        assert!(!PathExtensionValidator::is_text_file(&image));
        assert!(!PathExtensionValidator::is_text_file(&bare));
        assert!(!PathExtensionValidator::is_text_file(
            temp.path().join("missing.txt")
        ));
    }

    #[test]
    fn rejects_directories_with_text_like_names() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("folder.txt");
        fs::create_dir(&dir).unwrap();

        assert!(!PathExtensionValidator::is_text_file(&dir));
        assert!(PathExtensionValidator::has_text_extension(&dir));
    }

    #[test]
    fn allow_list_is_closed_and_lowercase() {
        let exts = PathExtensionValidator::supported_extensions();
        assert_eq!(exts.len(), 42);
        assert!(exts.iter().all(|e| e.chars().all(|c| !c.is_ascii_uppercase())));
        assert!(!PathExtensionValidator::has_text_extension(Path::new(
            "archive.tar.gz"
        )));
    }
}
