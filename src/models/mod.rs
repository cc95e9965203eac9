pub mod answer;
pub mod quiz_session;
pub mod word_pair;
pub mod word_store;

pub use answer::{is_blank_answer, matches_any, normalize};
pub use quiz_session::{
    AnswerOutcome, AnswerRecord, QuizError, QuizMode, QuizSession, QuizState,
    clamp_question_count, parse_question_count,
};
pub use word_pair::{WordListError, WordPair, WordPairId, split_forms};
pub use word_store::{WordDraft, WordStore};
