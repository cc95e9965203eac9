//! Word list import/export, as plain text or JSON.

pub mod json;
pub mod text;

use crate::models::WordListError;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    WordList(#[from] WordListError),
}
