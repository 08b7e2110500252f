use clap::ValueEnum;
use dropcat_ingest::{Status, StatusKey};

/// Languages with a message catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Language {
    #[default]
    #[value(name = "en_US", alias = "en")]
    EnUs,
    #[value(name = "zh_TW", alias = "zh")]
    ZhTw,
}

impl Language {
    pub const fn code(self) -> &'static str {
        match self {
            Language::EnUs => "en_US",
            Language::ZhTw => "zh_TW",
        }
    }

    fn catalog(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::EnUs => EN_US,
            Language::ZhTw => ZH_TW,
        }
    }

    pub fn template(self, key: &str) -> Option<&'static str> {
        self.catalog()
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, text)| *text)
    }

    /// Localized text for `status`. Unknown keys render as the key itself.
    pub fn render(self, status: &Status) -> String {
        let key = status.key.as_str();
        match self.template(key) {
            Some(template) => fill(template, &status.args),
            None => key.to_string(),
        }
    }
}

/// Substitute `{}` placeholders positionally. Missing arguments leave the placeholder
/// empty, surplus arguments are ignored.
pub fn fill(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;
    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        if let Some(arg) = args.next() {
            out.push_str(arg);
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}

const EN_US: &[(&str, &str)] = &[
    (StatusKey::FileAdded.as_str(), "Added: {}"),
    (StatusKey::InvalidFile.as_str(), "Not a valid text file: {}"),
    (StatusKey::FileExists.as_str(), "File already exists in list: {}"),
    (StatusKey::ReadFileError.as_str(), "Failed to read file: {}"),
    (StatusKey::FileDeleted.as_str(), "File deleted"),
    (
        StatusKey::NoFileSelected.as_str(),
        "Please select a file to delete first",
    ),
    (StatusKey::FileRestored.as_str(), "File restored"),
    (StatusKey::NoFileToRestore.as_str(), "No file to restore"),
    (StatusKey::AllFilesCleared.as_str(), "All files cleared"),
    (StatusKey::StateLoaded.as_str(), "Loaded {} files"),
    (StatusKey::ClipboardEmpty.as_str(), "Clipboard is empty"),
    (StatusKey::PasteFailed.as_str(), "Paste failed: {}"),
    (StatusKey::FilesPasted.as_str(), "Pasted {} files"),
    (
        StatusKey::NoValidFilesInClipboard.as_str(),
        "No valid text files in clipboard",
    ),
    (StatusKey::TextPasted.as_str(), "Pasted text file: {}"),
    (
        StatusKey::CreateTextFileFailed.as_str(),
        "Failed to create text file: {}",
    ),
    (StatusKey::ContentCopied.as_str(), "Content copied to clipboard"),
    (StatusKey::NoContentToCopy.as_str(), "No content to copy"),
    (StatusKey::CopyFailed.as_str(), "Copy failed: {}"),
    (StatusKey::LinesChars.as_str(), "Lines: {}, Characters: {}"),
];

const ZH_TW: &[(&str, &str)] = &[
    (StatusKey::FileAdded.as_str(), "已新增: {}"),
    (StatusKey::InvalidFile.as_str(), "不是合法的文字檔案: {}"),
    (StatusKey::FileExists.as_str(), "檔案已存在於列表中: {}"),
    (StatusKey::ReadFileError.as_str(), "讀取檔案失敗: {}"),
    (StatusKey::FileDeleted.as_str(), "檔案已刪除"),
    (StatusKey::NoFileSelected.as_str(), "請先選擇要刪除的檔案"),
    (StatusKey::FileRestored.as_str(), "檔案已復原"),
    (StatusKey::NoFileToRestore.as_str(), "沒有可復原的檔案"),
    (StatusKey::AllFilesCleared.as_str(), "所有檔案已清空"),
    (StatusKey::StateLoaded.as_str(), "已載入 {} 個檔案"),
    (StatusKey::ClipboardEmpty.as_str(), "剪貼簿為空"),
    (StatusKey::PasteFailed.as_str(), "貼上失敗: {}"),
    (StatusKey::FilesPasted.as_str(), "已貼上 {} 個檔案"),
    (
        StatusKey::NoValidFilesInClipboard.as_str(),
        "剪貼簿中沒有有效的文字檔案",
    ),
    (StatusKey::TextPasted.as_str(), "已貼上文字檔案: {}"),
    (StatusKey::CreateTextFileFailed.as_str(), "創建文字檔案失敗: {}"),
    (StatusKey::ContentCopied.as_str(), "內容已複製到剪貼簿"),
    (StatusKey::NoContentToCopy.as_str(), "沒有內容可複製"),
    (StatusKey::CopyFailed.as_str(), "複製失敗: {}"),
    (StatusKey::LinesChars.as_str(), "行數: {}, 字元數: {}"),
];
