//! WordPair is one vocabulary entry: accepted Korean forms and accepted English forms.
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WordListError {
    #[error(
        "both the Korean and the English side need at least one word, \
         and words can't contain `|`, `,` or line breaks"
    )]
    InvalidEntry,

    #[error("no word ids left")]
    IdsExhausted,

    #[error("line {line}: expected `korean forms|english forms`")]
    Malformed { line: usize },
}

/// Unique identifier for a WordPair within a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordPairId(u64);

impl WordPairId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WordPairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWordPair")]
pub struct WordPair {
    id: WordPairId,
    korean: Vec<String>,
    english: Vec<String>,
}

/// Unvalidated shape used when deserializing.
#[derive(Deserialize)]
struct RawWordPair {
    id: WordPairId,
    korean: Vec<String>,
    english: Vec<String>,
}

impl TryFrom<RawWordPair> for WordPair {
    type Error = WordListError;

    fn try_from(raw: RawWordPair) -> Result<Self, Self::Error> {
        WordPair::new(raw.id, raw.korean, raw.english)
    }
}

impl WordPair {
    /// Builds a pair, trimming every form and dropping empty ones.
    ///
    /// Fails with `WordListError::InvalidEntry` if either side ends up empty,
    /// or if a form holds a separator of the line format and could not be
    /// saved and read back as the same pair.
    pub fn new<K, E>(id: WordPairId, korean: K, english: E) -> Result<Self, WordListError>
    where
        K: IntoIterator,
        K::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        let korean = clean_forms(korean);
        let english = clean_forms(english);
        if korean.is_empty() || english.is_empty() {
            return Err(WordListError::InvalidEntry);
        }
        if korean.iter().chain(&english).any(|form| has_separator(form)) {
            return Err(WordListError::InvalidEntry);
        }
        Ok(Self {
            id,
            korean,
            english,
        })
    }

    pub fn id(&self) -> WordPairId {
        self.id
    }

    pub fn korean(&self) -> &[String] {
        &self.korean
    }

    pub fn english(&self) -> &[String] {
        &self.english
    }
}

fn clean_forms<I>(forms: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    forms
        .into_iter()
        .map(|form| form.as_ref().trim().to_string())
        .filter(|form| !form.is_empty())
        .collect()
}

fn has_separator(form: &str) -> bool {
    form.contains(['|', ',', '\n', '\r'])
}

/// Splits a comma-separated list of surface forms, e.g. `"기술, 기량"`.
pub fn split_forms(text: &str) -> Vec<String> {
    clean_forms(text.split(','))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_pair_creation() {
        let pair = WordPair::new(WordPairId::new(1), ["비행기"], ["airplane"]).unwrap();

        assert_eq!(pair.id().value(), 1);
        assert_eq!(pair.korean(), ["비행기"]);
        assert_eq!(pair.english(), ["airplane"]);
    }

    #[test]
    fn test_word_pair_trims_and_drops_empty_forms() {
        let pair = WordPair::new(WordPairId::new(2), [" 기술 ", "", "기량"], ["skill "]).unwrap();

        assert_eq!(pair.korean(), ["기술", "기량"]);
        assert_eq!(pair.english(), ["skill"]);
    }

    #[test]
    fn test_word_pair_rejects_empty_side() {
        let empty: [&str; 0] = [];
        assert_eq!(
            WordPair::new(WordPairId::new(1), empty, ["skill"]),
            Err(WordListError::InvalidEntry)
        );
        assert_eq!(
            WordPair::new(WordPairId::new(1), ["기술"], ["  ", ""]),
            Err(WordListError::InvalidEntry)
        );
    }

    #[test]
    fn test_word_pair_rejects_line_format_separators() {
        for bad in ["a|b", "line\nbreak", "carriage\rreturn", "one,two"] {
            assert_eq!(
                WordPair::new(WordPairId::new(1), [bad], ["x"]),
                Err(WordListError::InvalidEntry),
                "{:?} should be rejected",
                bad
            );
            assert_eq!(
                WordPair::new(WordPairId::new(1), ["가"], ["ok", bad]),
                Err(WordListError::InvalidEntry)
            );
        }
    }

    #[test]
    fn test_split_forms() {
        assert_eq!(
            split_forms("주의 깊게, 신중히,,"),
            vec!["주의 깊게".to_string(), "신중히".to_string()]
        );
        assert!(split_forms(" , ").is_empty());
    }

    #[test]
    fn test_deserialize_rejects_invalid_pair() {
        let json = r#"{"id": 3, "korean": [], "english": ["moment"]}"#;
        assert!(serde_json::from_str::<WordPair>(json).is_err());

        let json = r#"{"id": 3, "korean": ["순간"], "english": ["moment"]}"#;
        let pair: WordPair = serde_json::from_str(json).unwrap();
        assert_eq!(pair.id(), WordPairId::new(3));
    }
}
