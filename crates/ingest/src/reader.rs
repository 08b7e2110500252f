use crate::error::ReadError;
use encoding_rs::{Encoding, BIG5, GBK};
use std::borrow::Cow;
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// One decoding attempt in the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    /// Strict UTF-8. Declines BOM-prefixed input so [`Candidate::Utf8Bom`] can strip it.
    Utf8,
    Utf8Bom,
    Gbk,
    Big5,
    /// ISO-8859-1: every byte maps to the code point of the same value.
    Latin1,
}

impl Candidate {
    pub const fn label(self) -> &'static str {
        match self {
            Candidate::Utf8 => "utf-8",
            Candidate::Utf8Bom => "utf-8-sig",
            Candidate::Gbk => "gbk",
            Candidate::Big5 => "big5",
            Candidate::Latin1 => "latin-1",
        }
    }

    /// Decode the whole buffer or return `None` on the first malformed sequence.
    pub fn decode(self, bytes: &[u8]) -> Option<Cow<'_, str>> {
        match self {
            Candidate::Utf8 => {
                if bytes.starts_with(UTF8_BOM) {
                    return None;
                }
                std::str::from_utf8(bytes).ok().map(Cow::Borrowed)
            }
            Candidate::Utf8Bom => {
                let rest = bytes.strip_prefix(UTF8_BOM)?;
                std::str::from_utf8(rest).ok().map(Cow::Borrowed)
            }
            Candidate::Gbk => decode_strict(GBK, bytes),
            Candidate::Big5 => decode_strict(BIG5, bytes),
            Candidate::Latin1 => Some(Cow::Owned(
                bytes.iter().map(|&b| char::from(b)).collect(),
            )),
        }
    }
}

fn decode_strict<'a>(encoding: &'static Encoding, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
    encoding.decode_without_bom_handling_and_without_replacement(bytes)
}

pub const DEFAULT_CANDIDATES: &[Candidate] = &[
    Candidate::Utf8,
    Candidate::Utf8Bom,
    Candidate::Gbk,
    Candidate::Big5,
    Candidate::Latin1,
];

/// Reads whole files, trying each candidate encoding in order until one decodes.
#[derive(Debug, Clone)]
pub struct EncodingFallbackReader {
    candidates: Vec<Candidate>,
}

impl Default for EncodingFallbackReader {
    fn default() -> Self {
        Self::new()
    }
}

impl EncodingFallbackReader {
    pub fn new() -> Self {
        Self {
            candidates: DEFAULT_CANDIDATES.to_vec(),
        }
    }

    pub fn with_candidates(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Read `path` fully. I/O failures abort immediately; decode failures fall through
    /// to the next candidate.
    pub fn read(&self, path: impl AsRef<Path>) -> Result<String, ReadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let (text, candidate) = self.decode(&bytes)?;
        log::debug!("Decoded {} as {}", path.display(), candidate.label());
        Ok(text)
    }

    /// Decode an in-memory buffer with the same fallback chain as [`Self::read`].
    pub fn decode(&self, bytes: &[u8]) -> Result<(String, Candidate), ReadError> {
        for candidate in &self.candidates {
            if let Some(text) = candidate.decode(bytes) {
                return Ok((normalize_newlines(text), *candidate));
            }
        }
        let tried = self
            .candidates
            .iter()
            .map(|c| c.label())
            .collect::<Vec<_>>()
            .join(", ");
        Err(ReadError::Undecodable { tried })
    }
}

/// `\r\n` and lone `\r` become `\n`.
fn normalize_newlines(text: Cow<'_, str>) -> String {
    if !text.contains('\r') {
        return text.into_owned();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::{Candidate, EncodingFallbackReader};
    use crate::error::ReadError;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn plain_utf8_wins_first() {
        let reader = EncodingFallbackReader::new();
        let (text, used) = reader.decode("héllo wörld".as_bytes()).unwrap();
        assert_eq!(text, "héllo wörld");
        assert_eq!(used, Candidate::Utf8);
    }

    #[test]
    fn bom_is_stripped_by_second_candidate() {
        let reader = EncodingFallbackReader::new();
        let (text, used) = reader.decode(b"\xEF\xBB\xBFfn main() {}").unwrap();
        assert_eq!(text, "fn main() {}");
        assert_eq!(used, Candidate::Utf8Bom);
    }

    #[test]
    fn gbk_bytes_fall_back_past_utf8() {
        // "中文" in GBK
        let reader = EncodingFallbackReader::new();
        let (text, used) = reader.decode(&[0xD6, 0xD0, 0xCE, 0xC4]).unwrap();
        assert_eq!(text, "中文");
        assert_eq!(used, Candidate::Gbk);
    }

    #[test]
    fn latin1_accepts_anything_left_over() {
        let reader = EncodingFallbackReader::new();
        // 0xFF is not a valid lead byte in GBK or Big5.
        let (text, used) = reader.decode(&[b'a', 0xFF]).unwrap();
        assert_eq!(used, Candidate::Latin1);
        assert_eq!(text, "a\u{ff}");
    }

    #[test]
    fn exhausted_candidates_report_undecodable() {
        let reader = EncodingFallbackReader::with_candidates(vec![Candidate::Utf8]);
        let err = reader.decode(&[0xFF, 0xFE, 0xFD]).unwrap_err();
        assert!(matches!(err, ReadError::Undecodable { .. }));
        assert!(err.to_string().contains("utf-8"));
    }

    #[test]
    fn newlines_are_normalized() {
        let reader = EncodingFallbackReader::new();
        let (text, _) = reader.decode(b"a\r\nb\rc\n").unwrap();
        assert_eq!(text, "a\nb\nc\n");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let temp = tempdir().unwrap();
        let err = EncodingFallbackReader::new()
            .read(temp.path().join("gone.txt"))
            .unwrap_err();
        assert!(matches!(err, ReadError::Io(_)));
    }

    #[test]
    fn reads_file_from_disk() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("a.txt");
        fs::write(&path, "hi").unwrap();
        assert_eq!(EncodingFallbackReader::new().read(&path).unwrap(), "hi");
    }
}
