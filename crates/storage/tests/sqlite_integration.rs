use storage::repository::{PicklistSource, QuestionSource, StorageError, TriviaStore};
use storage::sqlite::SqliteRepository;
use trivia_core::model::{QuestionDraft, QuestionField, TriviaSetId, TriviaTitle};
use trivia_core::time::{fixed_clock, fixed_now};

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url)
        .await
        .expect("connect")
        .with_clock(fixed_clock());
    repo.migrate().await.expect("migrate");
    repo
}

fn draft(row_key: u32, set_id: Option<TriviaSetId>, text: &str, correct: &str) -> QuestionDraft {
    let mut draft = QuestionDraft::blank(row_key, set_id);
    draft.set(QuestionField::Text, text);
    draft.set(QuestionField::OptionA, "one");
    draft.set(QuestionField::OptionB, "two");
    draft.set(QuestionField::OptionC, "three");
    draft.set(QuestionField::CorrectAnswer, correct);
    draft
}

#[tokio::test]
async fn sqlite_persists_header_and_questions_in_order() {
    let repo = connect("memdb_trivia_roundtrip").await;

    let title = TriviaTitle::new("Science Quiz").unwrap();
    let set_id = repo
        .create_header(&title, Some("Physics and chemistry"))
        .await
        .expect("create header");

    let ids = repo
        .create_question_batch(&[
            draft(1, Some(set_id), "How many legs has a spider?", "C"),
            draft(2, Some(set_id), "H2O is?", "A"),
        ])
        .await
        .expect("create batch");
    assert_eq!(ids.len(), 2);
    assert!(ids[0] < ids[1]);

    let questions = repo.list_questions(set_id).await.expect("list questions");
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].id, ids[0]);
    assert_eq!(questions[0].text, "How many legs has a spider?");
    assert_eq!(questions[0].option_b, "two");
    assert_eq!(questions[1].correct_answer, "A");
    assert!(questions.iter().all(|q| q.trivia_set_id == set_id));

    let sets = repo.list_sets().await.expect("list sets");
    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0].title().as_str(), "Science Quiz");
    assert_eq!(sets[0].description(), Some("Physics and chemistry"));
    assert_eq!(sets[0].created_at(), fixed_now());
}

#[tokio::test]
async fn sqlite_batch_is_all_or_nothing() {
    let repo = connect("memdb_trivia_atomic").await;
    let set_id = repo
        .create_header(&TriviaTitle::new("History").unwrap(), None)
        .await
        .expect("create header");

    let err = repo
        .create_question_batch(&[
            draft(1, Some(set_id), "First emperor of Rome?", "A"),
            draft(2, Some(TriviaSetId::new(9_999)), "Orphan", "B"),
        ])
        .await
        .expect_err("orphaned draft must fail");
    assert!(matches!(err, StorageError::NotFound));

    let questions = repo.list_questions(set_id).await.expect("list questions");
    assert!(questions.is_empty());
}

#[tokio::test]
async fn sqlite_rejects_draft_without_header() {
    let repo = connect("memdb_trivia_unattached").await;
    let err = repo
        .create_question_batch(&[draft(1, None, "Q", "A")])
        .await
        .expect_err("draft without header must fail");
    assert!(matches!(err, StorageError::InvalidRecord(_)));
}

#[tokio::test]
async fn sqlite_seeds_default_picklist_once() {
    let repo = connect("memdb_trivia_picklist").await;
    // Running migrations again must not duplicate seeded values.
    repo.migrate().await.expect("migrate twice");

    let options = repo.correct_answer_options().await.expect("picklist");
    let values: Vec<_> = options.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, ["A", "B", "C"]);
    assert_eq!(options[0].label, "Option A");
}

#[tokio::test]
async fn sqlite_unknown_set_has_no_questions() {
    let repo = connect("memdb_trivia_unknown").await;
    let questions = repo
        .list_questions(TriviaSetId::new(42))
        .await
        .expect("list questions");
    assert!(questions.is_empty());
}
