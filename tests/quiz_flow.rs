use rand::SeedableRng;
use rand::rngs::StdRng;
use word_quiz_app::database::db;
use word_quiz_app::export::text;
use word_quiz_app::models::{QuizError, QuizMode, QuizSession, QuizState, WordStore};

#[test]
fn edit_save_reload_and_quiz() {
    let mut conn = db::open_in_memory().unwrap();
    let mut words = db::load_store_or_default(&conn);
    assert_eq!(words.len(), 15);

    let ids: Vec<_> = words.list().iter().map(|pair| pair.id()).collect();
    for id in ids {
        words.remove(id);
    }
    words.add("기술, 기량", "skill").unwrap();
    words.add("촬영하다", "shoot").unwrap();
    db::persist(&mut words, &mut conn).unwrap();

    let reloaded = db::load_store_or_default(&conn);
    assert_eq!(reloaded.len(), 2);

    let mut session = QuizSession::new(&reloaded);
    let mut rng = StdRng::seed_from_u64(42);
    session
        .start_with_rng(&reloaded, Some(4), QuizMode::EnglishToKorean, &mut rng)
        .unwrap();
    assert_eq!(session.queue().len(), 4);

    while let Some(pair) = session.current().cloned() {
        let answer = match pair.english()[0].as_str() {
            "skill" => "기량",
            _ => "wrong on purpose",
        };
        session.submit_answer(answer).unwrap();
    }

    assert_eq!(session.state(), QuizState::Complete);
    assert_eq!(session.correct_count(), 2);
    assert_eq!(session.history().len(), 4);
    assert_eq!(
        session.history().iter().filter(|r| r.was_correct).count(),
        session.correct_count()
    );
    assert_eq!(session.submit_answer("기술"), Err(QuizError::NotActive));

    session.reset(&reloaded);
    assert_eq!(session.state(), QuizState::Idle);
}

#[test]
fn quiz_on_emptied_list_is_refused() {
    let mut words = WordStore::with_default_words();
    let mut session = QuizSession::new(&words);

    let ids: Vec<_> = words.list().iter().map(|pair| pair.id()).collect();
    for id in ids {
        words.remove(id);
    }

    assert_eq!(
        session.start(&words, Some(5), QuizMode::KoreanToEnglish),
        Err(QuizError::EmptyWordList)
    );
    assert!(!session.is_active());
}

#[test]
fn exported_text_list_drives_a_quiz() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("words.txt");
    std::fs::write(&path, "비행기|airplane\n").unwrap();

    let words = text::import_text(&path).unwrap();
    let mut session = QuizSession::new(&words);
    session.start(&words, Some(3), QuizMode::KoreanToEnglish).unwrap();

    for _ in 0..3 {
        assert!(session.submit_answer(" AIRPLANE").unwrap().was_correct);
    }
    assert_eq!(session.correct_count(), 3);
    assert!(!session.is_active());
}
