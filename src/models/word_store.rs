//! The authoritative word list edited in the word manager.
//!
//! Quiz sessions never hold a reference into the store; they take a
//! [`WordStore::snapshot`] so edits made afterwards don't touch a running quiz.

use super::word_pair::{WordListError, WordPair, WordPairId, split_forms};
use log::debug;

/// Built-in list used on first launch and whenever saved data can't be read.
const DEFAULT_WORDS: &[(&str, &str)] = &[
    ("사진촬영술,사진술,촬영술", "photography"),
    ("비행기", "airplane"),
    ("관리자", "manager"),
    ("촬영하다", "shoot"),
    ("운동하다", "work out"),
    ("기술,기량", "skill"),
    ("주의 깊게,신중히", "carefully"),
    ("작업실", "studio"),
    (
        "~을 담당하다,~를 담당하다,-을 담당하다,-를 담당하다",
        "be in charge of",
    ),
    ("순간", "moment"),
    ("물론", "of course"),
    ("신호", "signal"),
    ("훈련하다", "train"),
    ("편집자", "editor"),
    ("이야기하기", "storytelling"),
];

/// A parsed but not yet stored entry (no id assigned).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordDraft {
    pub korean: Vec<String>,
    pub english: Vec<String>,
}

impl WordDraft {
    pub fn parse(korean_text: &str, english_text: &str) -> Self {
        Self {
            korean: split_forms(korean_text),
            english: split_forms(english_text),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WordStore {
    pairs: Vec<WordPair>,
    next_id: u64,
    unsaved_changes: bool,
}

impl WordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_words() -> Self {
        let drafts = DEFAULT_WORDS
            .iter()
            .map(|(korean, english)| WordDraft::parse(korean, english));
        Self::from_drafts(drafts)
    }

    /// Builds a store from parsed entries, assigning ids in order.
    /// Entries that don't make a valid pair are skipped.
    pub fn from_drafts(drafts: impl IntoIterator<Item = WordDraft>) -> Self {
        let mut store = Self::new();
        for draft in drafts {
            if let Err(e) = store.insert(draft.korean, draft.english) {
                debug!("skipping word list entry: {}", e);
            }
        }
        store.unsaved_changes = false;
        store
    }

    /// Rebuilds a store from pairs that already carry ids (e.g. a JSON import).
    /// Later duplicates of an id, and ids with no successor, get a fresh one.
    pub fn from_pairs(pairs: impl IntoIterator<Item = WordPair>) -> Result<Self, WordListError> {
        let mut store = Self::new();
        for pair in pairs {
            let next = pair.id().value().checked_add(1);
            match next {
                Some(next) if store.get(pair.id()).is_none() => {
                    store.next_id = store.next_id.max(next);
                    store.pairs.push(pair);
                }
                _ => {
                    let fresh = store.insert(pair.korean().to_vec(), pair.english().to_vec())?;
                    debug!("word pair {} renumbered to {}", pair.id(), fresh.id());
                }
            }
        }
        store.unsaved_changes = false;
        Ok(store)
    }

    pub fn list(&self) -> &[WordPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, id: WordPairId) -> Option<&WordPair> {
        self.pairs.iter().find(|pair| pair.id() == id)
    }

    /// Adds an entry from the raw comma-separated text of each side.
    pub fn add(
        &mut self,
        korean_text: &str,
        english_text: &str,
    ) -> Result<&WordPair, WordListError> {
        let draft = WordDraft::parse(korean_text, english_text);
        self.insert(draft.korean, draft.english)
    }

    fn insert(
        &mut self,
        korean: Vec<String>,
        english: Vec<String>,
    ) -> Result<&WordPair, WordListError> {
        let next_id = self
            .next_id
            .checked_add(1)
            .ok_or(WordListError::IdsExhausted)?;
        let pair = WordPair::new(WordPairId::new(self.next_id), korean, english)?;
        self.next_id = next_id;
        self.unsaved_changes = true;
        debug!("added word pair {}", pair.id());
        self.pairs.push(pair);
        Ok(&self.pairs[self.pairs.len() - 1])
    }

    /// Removes the pair with `id`. Does nothing if it isn't there.
    pub fn remove(&mut self, id: WordPairId) -> Option<WordPair> {
        let index = self.pairs.iter().position(|pair| pair.id() == id)?;
        self.unsaved_changes = true;
        debug!("removed word pair {}", id);
        Some(self.pairs.remove(index))
    }

    /// Owned copy of the current list.
    pub fn snapshot(&self) -> Vec<WordPair> {
        self.pairs.clone()
    }

    /// Swaps in a whole new list, e.g. after an import. Counts as an unsaved edit.
    pub fn replace(&mut self, other: WordStore) {
        self.pairs = other.pairs;
        self.next_id = other.next_id;
        self.unsaved_changes = true;
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved_changes
    }

    pub fn mark_saved(&mut self) {
        self.unsaved_changes = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_words() {
        let store = WordStore::with_default_words();

        assert_eq!(store.len(), 15);
        assert_eq!(store.list()[0].korean(), ["사진촬영술", "사진술", "촬영술"]);
        assert_eq!(store.list()[8].korean().len(), 4);
        assert_eq!(store.list()[14].english(), ["storytelling"]);
        assert!(!store.has_unsaved_changes());
    }

    #[test]
    fn test_add_splits_forms_and_assigns_unique_ids() {
        let mut store = WordStore::new();
        let first = store.add("기술, 기량", "skill").unwrap().id();
        let second = store.add("순간", "moment").unwrap().id();

        assert_ne!(first, second);
        assert_eq!(store.get(first).unwrap().korean(), ["기술", "기량"]);
        assert!(store.has_unsaved_changes());
    }

    #[test]
    fn test_add_rejects_empty_side() {
        let mut store = WordStore::new();

        assert_eq!(store.add(" , ", "skill").unwrap_err(), WordListError::InvalidEntry);
        assert_eq!(store.add("기술", "").unwrap_err(), WordListError::InvalidEntry);
        assert!(store.is_empty());
        assert!(!store.has_unsaved_changes());
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let mut store = WordStore::with_default_words();

        assert!(store.remove(WordPairId::new(999)).is_none());
        assert_eq!(store.len(), 15);
        assert!(!store.has_unsaved_changes());
    }

    #[test]
    fn test_add_rejects_separator_in_form() {
        let mut store = WordStore::new();

        assert_eq!(store.add("a|b", "x").unwrap_err(), WordListError::InvalidEntry);
        assert_eq!(store.add("가", "x\ny").unwrap_err(), WordListError::InvalidEntry);
        assert!(store.is_empty());
    }

    #[test]
    fn test_from_pairs_renumbers_max_id() {
        let max = WordPair::new(WordPairId::new(u64::MAX), ["가"], ["a"]).unwrap();
        let mut store = WordStore::from_pairs(vec![max]).unwrap();

        assert_eq!(store.len(), 1);
        assert_ne!(store.list()[0].id().value(), u64::MAX);
        assert!(store.add("나", "b").is_ok());
        assert_ne!(store.list()[0].id(), store.list()[1].id());
    }

    #[test]
    fn test_from_pairs_reports_exhausted_ids() {
        let a = WordPair::new(WordPairId::new(u64::MAX - 1), ["가"], ["a"]).unwrap();
        let b = WordPair::new(WordPairId::new(u64::MAX - 1), ["나"], ["b"]).unwrap();

        assert_eq!(
            WordStore::from_pairs(vec![a, b]).unwrap_err(),
            WordListError::IdsExhausted
        );
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut store = WordStore::new();
        let a = store.add("가", "a").unwrap().id();
        store.remove(a);
        let b = store.add("나", "b").unwrap().id();

        assert_ne!(a, b);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut store = WordStore::with_default_words();
        let snapshot = store.snapshot();
        let first = store.list()[0].id();
        store.remove(first);

        assert_eq!(snapshot.len(), 15);
        assert_eq!(store.len(), 14);
    }

    #[test]
    fn test_replace_marks_unsaved() {
        let mut store = WordStore::with_default_words();
        let mut imported = WordStore::new();
        imported.add("신호", "signal").unwrap();

        store.replace(imported);

        assert_eq!(store.len(), 1);
        assert!(store.has_unsaved_changes());
        let next = store.add("물론", "of course").unwrap().id();
        assert_ne!(next, store.list()[0].id());
    }

    #[test]
    fn test_from_pairs_reassigns_duplicate_ids() {
        let a = WordPair::new(WordPairId::new(4), ["가"], ["a"]).unwrap();
        let b = WordPair::new(WordPairId::new(4), ["나"], ["b"]).unwrap();
        let store = WordStore::from_pairs(vec![a, b]).unwrap();

        assert_eq!(store.len(), 2);
        assert_ne!(store.list()[0].id(), store.list()[1].id());
    }
}
