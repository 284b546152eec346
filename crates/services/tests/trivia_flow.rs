use std::sync::Arc;

use services::{QuizMode, RecordingSink, TriviaServices, WizardSnapshot, WizardStep};
use trivia_core::model::{QuestionField, Severity};

async fn author_science_quiz(services: &TriviaServices) {
    let mut wizard = services.authoring_wizard().await;
    assert_eq!(wizard.correct_answer_options().len(), 3);

    wizard.set_title("Science Quiz");
    wizard.set_description("A short warm-up");
    wizard.next().await.expect("create header");
    assert_eq!(wizard.step(), WizardStep::QuestionEntry);

    wizard.add_row().expect("add row");
    let rows = [
        ("Water boils at?", "100C", "50C", "0C", "A"),
        ("Closest star to Earth?", "Sirius", "The Sun", "Vega", "B"),
    ];
    for (index, (text, a, b, c, correct)) in rows.into_iter().enumerate() {
        wizard.edit_field(index, QuestionField::Text, text).unwrap();
        wizard.edit_field(index, QuestionField::OptionA, a).unwrap();
        wizard.edit_field(index, QuestionField::OptionB, b).unwrap();
        wizard.edit_field(index, QuestionField::OptionC, c).unwrap();
        wizard
            .edit_field(index, QuestionField::CorrectAnswer, correct)
            .unwrap();
    }

    let ids = wizard.submit().await.expect("submit batch");
    assert_eq!(ids.len(), 2);
    assert_eq!(wizard.snapshot(), WizardSnapshot::initial());
}

#[tokio::test]
async fn authored_set_can_be_played_in_memory() {
    let sink = RecordingSink::new();
    let services = TriviaServices::in_memory(Arc::new(sink.clone()));
    author_science_quiz(&services).await;

    let sets = services.catalog().list_sets().await.expect("list sets");
    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0].title().as_str(), "Science Quiz");

    let mut session = services.quiz_session();
    session.start(sets[0].id()).await.expect("load questions");
    let questions = session.questions().to_vec();
    assert_eq!(questions.len(), 2);

    session.select_answer(questions[0].id, "A");
    session.select_answer(questions[1].id, "C");
    let first = session.submit().expect("complete attempt");
    assert_eq!(first.correct_count, 1);
    assert_eq!(session.mode(), QuizMode::Taking);

    session.select_answer(questions[1].id, "B");
    let second = session.submit().expect("complete attempt");
    assert!(second.is_perfect());
    assert_eq!(session.mode(), QuizMode::Listing);

    let severities: Vec<_> = sink.take().into_iter().map(|n| n.severity).collect();
    assert_eq!(
        severities,
        [Severity::Success, Severity::Warning, Severity::Success]
    );
}

#[tokio::test]
async fn authored_set_survives_sqlite_round_trip() {
    let sink = RecordingSink::new();
    let services = TriviaServices::new_sqlite(
        "sqlite:file:memdb_trivia_flow?mode=memory&cache=shared",
        Arc::new(sink.clone()),
    )
    .await
    .expect("connect sqlite");
    author_science_quiz(&services).await;

    let sets = services.catalog().list_sets().await.expect("list sets");
    let mut session = services.quiz_session();
    let count = session.start(sets[0].id()).await.expect("load questions");
    assert_eq!(count, 2);
    assert_eq!(session.questions()[1].option_b, "The Sun");
}
