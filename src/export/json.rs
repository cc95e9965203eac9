//! JSON import/export of the word list.
//! The document keeps pair ids, unlike the line format.

use super::ExportError;
use crate::models::{WordPair, WordStore};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

#[derive(Serialize, Deserialize)]
struct WordListDocument {
    pairs: Vec<WordPair>,
}

pub fn to_json(store: &WordStore) -> Result<String, ExportError> {
    let document = WordListDocument {
        pairs: store.snapshot(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Every pair is validated while deserializing; one bad entry rejects the document.
pub fn from_json(contents: &str) -> Result<WordStore, ExportError> {
    let document: WordListDocument = serde_json::from_str(contents)?;
    Ok(WordStore::from_pairs(document.pairs)?)
}

/// Exports the word list to a JSON file at the specified path.
pub fn export_json_to_path(store: &WordStore, path: &Path) -> Result<(), ExportError> {
    let json_string = to_json(store)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    Ok(())
}

/// Imports a word list from a JSON file.
pub fn import_json(path: &Path) -> Result<WordStore, ExportError> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let store = from_json(&contents)?;
    info!("imported {} word pairs from {}", store.len(), path.display());
    Ok(store)
}
