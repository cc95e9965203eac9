//! Quiz session: question queue, grading and score keeping.
//!
//! A session works on its own copy of the word list, taken from the
//! [`WordStore`] on `start` and `reset`. It never renders anything; the UI
//! reads its state back after every call.

use super::answer::matches_any;
use super::{WordPair, WordStore};
use log::{debug, info};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_QUESTION_COUNT: i64 = 10;
pub const MIN_QUESTION_COUNT: i64 = 1;
pub const MAX_QUESTION_COUNT: i64 = 100;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("the word list is empty, add some words first")]
    EmptyWordList,
    #[error("no quiz is in progress")]
    NotActive,
}

/// Quiz direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizMode {
    /// Korean shown, English typed.
    #[default]
    KoreanToEnglish,
    /// English shown, Korean typed.
    EnglishToKorean,
}

impl QuizMode {
    /// Forms shown to the user as the question.
    pub fn prompt_forms(self, pair: &WordPair) -> &[String] {
        match self {
            QuizMode::KoreanToEnglish => pair.korean(),
            QuizMode::EnglishToKorean => pair.english(),
        }
    }

    /// Forms accepted as a correct answer.
    pub fn target_forms(self, pair: &WordPair) -> &[String] {
        match self {
            QuizMode::KoreanToEnglish => pair.english(),
            QuizMode::EnglishToKorean => pair.korean(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QuizMode::KoreanToEnglish => "Korean → English",
            QuizMode::EnglishToKorean => "English → Korean",
        }
    }

    pub fn cue(self) -> &'static str {
        match self {
            QuizMode::KoreanToEnglish => "Read the meaning, type the English spelling",
            QuizMode::EnglishToKorean => "Read the spelling, type the Korean meaning",
        }
    }

    pub fn answer_hint(self) -> &'static str {
        match self {
            QuizMode::KoreanToEnglish => "Type the English word",
            QuizMode::EnglishToKorean => "Type the Korean meaning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    Idle,
    InProgress,
    Complete,
}

/// One graded answer, with the user's text kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub pair: WordPair,
    pub user_answer: String,
    pub was_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub was_correct: bool,
    pub pair: WordPair,
}

/// Lenient integer parse for the question count field: optional leading
/// whitespace and sign, then digits. Trailing garbage is ignored (`"12abc"` is 12).
pub fn parse_question_count(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    // Overlong digit strings saturate; they get clamped anyway.
    let value = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// Question count after defaulting and clamping.
pub fn clamp_question_count(requested: Option<i64>) -> usize {
    let count = requested
        .unwrap_or(DEFAULT_QUESTION_COUNT)
        .clamp(MIN_QUESTION_COUNT, MAX_QUESTION_COUNT);
    count as usize
}

#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    words: Vec<WordPair>,
    mode: QuizMode,
    total_questions: usize,
    queue: Vec<WordPair>,
    current_index: usize,
    correct_count: usize,
    history: Vec<AnswerRecord>,
    active: bool,
}

impl QuizSession {
    /// Idle session holding a snapshot of `store`.
    pub fn new(store: &WordStore) -> Self {
        let mut session = Self::default();
        session.reset(store);
        session
    }

    /// Discards any progress and re-snapshots the store. Mode goes back to the default.
    pub fn reset(&mut self, store: &WordStore) {
        self.words = store.snapshot();
        self.mode = QuizMode::default();
        self.total_questions = 0;
        self.queue.clear();
        self.current_index = 0;
        self.correct_count = 0;
        self.history.clear();
        self.active = false;
    }

    /// Resets and switches the direction, as when the user changes quiz tab.
    pub fn set_mode(&mut self, store: &WordStore, mode: QuizMode) {
        self.reset(store);
        self.mode = mode;
    }

    pub fn start(
        &mut self,
        store: &WordStore,
        requested_count: Option<i64>,
        mode: QuizMode,
    ) -> Result<(), QuizError> {
        self.start_with_rng(store, requested_count, mode, &mut rand::rng())
    }

    /// Starts a new quiz with questions drawn from a fresh snapshot of `store`.
    ///
    /// The snapshot is repeated `ceil(total / len)` times, shuffled and cut
    /// to `total`, so every pair shows up once before any pair repeats.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyWordList` if the store has no pairs; the
    /// session is left idle.
    pub fn start_with_rng<R: Rng + ?Sized>(
        &mut self,
        store: &WordStore,
        requested_count: Option<i64>,
        mode: QuizMode,
        rng: &mut R,
    ) -> Result<(), QuizError> {
        self.reset(store);
        self.mode = mode;

        if self.words.is_empty() {
            info!("cannot start quiz: word list is empty");
            return Err(QuizError::EmptyWordList);
        }

        let total = clamp_question_count(requested_count);
        let repeats = total.div_ceil(self.words.len());

        let mut pool: Vec<WordPair> = Vec::with_capacity(repeats * self.words.len());
        for _ in 0..repeats {
            pool.extend(self.words.iter().cloned());
        }
        pool.shuffle(rng);
        pool.truncate(total);

        self.total_questions = total;
        self.queue = pool;
        self.active = true;
        info!(
            "quiz started: {} questions from {} pairs ({:?})",
            total,
            self.words.len(),
            mode
        );
        Ok(())
    }

    /// The pair being asked, or `None` if no quiz is in progress.
    pub fn current(&self) -> Option<&WordPair> {
        if !self.active {
            return None;
        }
        self.queue.get(self.current_index)
    }

    /// Grades `answer` against the current pair and moves to the next question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotActive` without changing anything when no quiz
    /// is in progress.
    pub fn submit_answer(&mut self, answer: &str) -> Result<AnswerOutcome, QuizError> {
        let pair = self.current().cloned().ok_or(QuizError::NotActive)?;

        let was_correct = matches_any(answer, self.mode.target_forms(&pair));
        self.history.push(AnswerRecord {
            pair: pair.clone(),
            user_answer: answer.to_string(),
            was_correct,
        });
        if was_correct {
            self.correct_count += 1;
        }

        self.current_index += 1;
        if self.current_index >= self.total_questions {
            self.active = false;
            info!(
                "quiz complete: {} / {} correct",
                self.correct_count, self.total_questions
            );
        }
        debug!(
            "answer {} for pair {}: {}",
            self.current_index,
            pair.id(),
            if was_correct { "correct" } else { "wrong" }
        );

        Ok(AnswerOutcome { was_correct, pair })
    }

    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    pub fn total_questions(&self) -> usize {
        self.total_questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Number of questions answered so far, never more than the total.
    pub fn answered_count(&self) -> usize {
        self.current_index.min(self.total_questions)
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn history(&self) -> &[AnswerRecord] {
        &self.history
    }

    pub fn queue(&self) -> &[WordPair] {
        &self.queue
    }

    /// Pairs the session was built from.
    pub fn words(&self) -> &[WordPair] {
        &self.words
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn state(&self) -> QuizState {
        if self.active {
            QuizState::InProgress
        } else if self.total_questions > 0 && self.current_index >= self.total_questions {
            QuizState::Complete
        } else {
            QuizState::Idle
        }
    }

    /// Completion in whole percent, 0 before a quiz starts.
    pub fn progress_percent(&self) -> u32 {
        if self.total_questions == 0 {
            return 0;
        }
        let ratio = self.current_index as f64 / self.total_questions as f64;
        (ratio * 100.0).round() as u32
    }
}
