//! Runtime settings read from the environment.
//!
//! `WORD_QUIZ_DB` sets the database file, `WORD_QUIZ_QUESTIONS` the question
//! count pre-filled in the quiz screen and `WORD_QUIZ_FONT` a font file with
//! Hangul glyphs. Unset or empty variables use the defaults.

use crate::models::{clamp_question_count, parse_question_count};
use std::env;
use std::path::PathBuf;

pub const DATABASE_PATH_VAR: &str = "WORD_QUIZ_DB";
pub const QUESTION_COUNT_VAR: &str = "WORD_QUIZ_QUESTIONS";
pub const FONT_PATH_VAR: &str = "WORD_QUIZ_FONT";
const DEFAULT_DATABASE_PATH: &str = "word_quiz.sqlite3";

/// Where common systems keep a font that covers Hangul.
const SYSTEM_KOREAN_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    "C:\\Windows\\Fonts\\malgun.ttf",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub default_question_count: usize,
    pub font_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            default_question_count: clamp_question_count(None),
            font_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let database_path = match env::var(DATABASE_PATH_VAR) {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => defaults.database_path,
        };

        let default_question_count = match env::var(QUESTION_COUNT_VAR) {
            Ok(value) => clamp_question_count(parse_question_count(&value)),
            Err(_) => defaults.default_question_count,
        };

        let font_path = match env::var(FONT_PATH_VAR) {
            Ok(path) if !path.trim().is_empty() => Some(PathBuf::from(path)),
            _ => None,
        };

        Self {
            database_path,
            default_question_count,
            font_path,
        }
    }

    /// Configured font, else the first system Korean font that exists.
    pub fn korean_font(&self) -> Option<PathBuf> {
        if let Some(path) = &self.font_path {
            return Some(path.clone());
        }
        SYSTEM_KOREAN_FONTS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.is_file())
    }
}
