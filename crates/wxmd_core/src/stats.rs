//! Document statistics for the editor status bar.

use serde::{Deserialize, Serialize};

/// Characters read per minute, CJK text is counted per character.
const CHARACTERS_PER_MINUTE: usize = 400;

/// Statistics of the raw Markdown text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Total character count, whitespace and Markdown syntax included
    pub characters: usize,
    /// Number of whitespace-separated runs
    pub words: usize,
    /// Estimated reading time in minutes, at least 1
    pub reading_minutes: usize,
}

/// Calculate document statistics from markdown content.
///
/// # Example
///
/// ```
/// use wxmd_core::stats::calculate_document_stats;
///
/// let stats = calculate_document_stats("Hello world!\n\n你好");
/// assert_eq!(stats.characters, 16);
/// assert_eq!(stats.words, 3);
/// assert_eq!(stats.reading_minutes, 1);
/// ```
pub fn calculate_document_stats(content: &str) -> DocumentStats {
    let characters = content.chars().count();
    let words = content.split_whitespace().count();
    let reading_minutes = characters.div_ceil(CHARACTERS_PER_MINUTE).max(1);

    DocumentStats {
        characters,
        words,
        reading_minutes,
    }
}
