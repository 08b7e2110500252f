use serde::{Deserialize, Serialize};

/// Size of the combined document as shown next to the content view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentStats {
    /// Number of lines; a trailing newline opens one more (empty) line.
    pub lines: usize,

    /// Number of Unicode scalar values
    pub chars: usize,
}

impl ContentStats {
    pub fn of(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        Self {
            lines: text.matches('\n').count() + 1,
            chars: text.chars().count(),
        }
    }
}
