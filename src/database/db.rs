//! Database operations for the word quiz
//!
//! The word list lives in a small SQLite key/value table, stored in the same
//! `korean|english` line format used for export. Anything unreadable falls
//! back to the built-in list instead of failing the application.

use crate::export::text::{format_word_list, parse_word_list};
use crate::models::{WordListError, WordStore};
use chrono::{DateTime, Utc};
use log::{info, warn};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use thiserror::Error;

const WORD_LIST_KEY: &str = "word_quiz_custom_data";
const SAVED_AT_KEY: &str = "word_quiz_saved_at";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PersistError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("saved word list is corrupt: {0}")]
    Corrupt(#[from] WordListError),
}

/// Opens (or creates) the database at `path` and makes sure the tables exist.
pub fn init_database(path: &Path) -> Result<Connection, PersistError> {
    let conn = Connection::open(path)?;
    create_tables(&conn)?;
    info!("opened word database at {}", path.display());
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection, PersistError> {
    let conn = Connection::open_in_memory()?;
    create_tables(&conn)?;
    Ok(conn)
}

fn create_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;
    Ok(())
}

fn set_value(conn: &Connection, key: &str, value: &str) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO app_state (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

fn get_value(conn: &Connection, key: &str) -> rusqlite::Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM app_state WHERE key = ?1",
        params![key],
        |row| row.get(0),
    )
    .optional()
}

/// Saves the whole word list, replacing whatever was saved before.
pub fn persist(store: &mut WordStore, conn: &mut Connection) -> Result<(), PersistError> {
    let tx = conn.transaction()?;
    set_value(&tx, WORD_LIST_KEY, &format_word_list(store.list()))?;
    set_value(&tx, SAVED_AT_KEY, &Utc::now().timestamp().to_string())?;
    tx.commit()?;

    store.mark_saved();
    info!("saved {} word pairs", store.len());
    Ok(())
}

/// Loads the saved word list. `Ok(None)` means nothing has been saved yet.
pub fn load_persisted(conn: &Connection) -> Result<Option<WordStore>, PersistError> {
    match get_value(conn, WORD_LIST_KEY)? {
        Some(text) => Ok(Some(WordStore::from_drafts(parse_word_list(&text)?))),
        None => Ok(None),
    }
}

/// When the word list was last saved, if ever.
pub fn last_saved_at(conn: &Connection) -> Result<Option<DateTime<Utc>>, PersistError> {
    let timestamp = get_value(conn, SAVED_AT_KEY)?;
    Ok(timestamp
        .and_then(|secs| secs.parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0)))
}

/// Saved word list, or the built-in one if there is none or it can't be read.
pub fn load_store_or_default(conn: &Connection) -> WordStore {
    match load_persisted(conn) {
        Ok(Some(store)) => {
            info!("loaded {} saved word pairs", store.len());
            store
        }
        Ok(None) => {
            info!("no saved word list, using the built-in one");
            WordStore::with_default_words()
        }
        Err(e) => {
            warn!("failed to load saved word list, using the built-in one: {}", e);
            WordStore::with_default_words()
        }
    }
}
