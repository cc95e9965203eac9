//! Plain-text word list format, one entry per line:
//!
//! ```text
//! 기술,기량|skill
//! 주의 깊게,신중히|carefully
//! ```
//!
//! Korean forms go left of the `|`, English forms right, comma-separated.
//! This is also what gets persisted.

use super::ExportError;
use crate::models::{WordDraft, WordListError, WordPair, WordStore};
use std::fs;
use std::path::Path;

/// Parses the line format.
///
/// Blank lines are ignored and entries with an empty side are dropped. A
/// line without exactly one `|` fails the whole parse.
pub fn parse_word_list(text: &str) -> Result<Vec<WordDraft>, WordListError> {
    let mut drafts = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut sides = line.split('|');
        let (Some(korean), Some(english), None) = (sides.next(), sides.next(), sides.next())
        else {
            return Err(WordListError::Malformed { line: index + 1 });
        };
        let draft = WordDraft::parse(korean, english);
        if draft.korean.is_empty() || draft.english.is_empty() {
            continue;
        }
        drafts.push(draft);
    }
    Ok(drafts)
}

pub fn format_pair(pair: &WordPair) -> String {
    format!("{}|{}", pair.korean().join(", "), pair.english().join(", "))
}

pub fn format_word_list(pairs: &[WordPair]) -> String {
    pairs.iter().map(format_pair).collect::<Vec<_>>().join("\n")
}

/// Writes the store to `path` in the line format.
pub fn export_text_to_path(store: &WordStore, path: &Path) -> Result<(), ExportError> {
    fs::write(path, format_word_list(store.list()))?;
    Ok(())
}

/// Reads a word list in the line format from `path`.
pub fn import_text(path: &Path) -> Result<WordStore, ExportError> {
    let contents = fs::read_to_string(path)?;
    let drafts = parse_word_list(&contents)?;
    Ok(WordStore::from_drafts(drafts))
}
