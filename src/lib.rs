pub mod config;
pub mod database;
pub mod export;
pub mod models;

pub use models::{QuizMode, QuizSession, WordPair, WordStore};
