use std::error::Error;
use std::io::{BufRead, Write};

use services::{AuthoringError, QuizMode, TriviaServices, WizardStep};
use trivia_core::model::{
    AnswerHighlight, Notification, QuestionField, Severity, TriviaSetId,
};

pub type ConsoleResult<T> = Result<T, Box<dyn Error>>;

/// Prints notifications to stdout, one line each.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalSink;

impl services::NotificationSink for TerminalSink {
    fn show(&self, notification: Notification) {
        let marker = match notification.severity {
            Severity::Success => "[ok]",
            Severity::Warning => "[!]",
            Severity::Error => "[error]",
            Severity::Info => "[i]",
        };
        println!("{marker} {}: {}", notification.title, notification.message);
    }
}

/// Read one trimmed line; `None` at end of input.
fn prompt(
    input: &mut impl BufRead,
    output: &mut impl Write,
    label: &str,
) -> ConsoleResult<Option<String>> {
    write!(output, "{label}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

pub async fn list_sets(services: &TriviaServices, output: &mut impl Write) -> ConsoleResult<()> {
    let sets = services.catalog().list_sets().await?;
    if sets.is_empty() {
        writeln!(output, "No trivia sets yet. Run `trivia author` to create one.")?;
    }
    for set in sets {
        match set.description() {
            Some(description) => writeln!(output, "{:>4}  {} - {description}", set.id(), set.title())?,
            None => writeln!(output, "{:>4}  {}", set.id(), set.title())?,
        }
    }
    Ok(())
}

/// Play one trivia set until every answer is right or input ends.
///
/// Returns the number of attempts graded.
pub async fn play(
    services: &TriviaServices,
    trivia_set_id: TriviaSetId,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> ConsoleResult<usize> {
    let mut session = services.quiz_session();
    // A failed load is already logged; show whatever is loaded.
    let _ = session.start(trivia_set_id).await;
    if session.questions().is_empty() {
        writeln!(output, "No questions available.")?;
        session.cancel();
        return Ok(0);
    }

    let mut attempts = 0;
    while session.mode() == QuizMode::Taking {
        let questions = session.questions().to_vec();
        for (number, question) in (1..).zip(&questions) {
            if attempts > 0 && session.highlight(question.id) == Some(AnswerHighlight::Correct) {
                continue;
            }
            writeln!(output, "{number}. {}", question.text)?;
            for (value, label) in question.options() {
                writeln!(output, "   {value}) {label}")?;
            }
            let Some(answer) = prompt(input, output, "> ")? else {
                session.cancel();
                return Ok(attempts);
            };
            session.select_answer(question.id, answer.to_uppercase());
        }

        let result = session.submit()?;
        attempts += 1;
        if !result.is_perfect() {
            for (number, question) in (1..).zip(&questions) {
                let mark = match session.highlight(question.id) {
                    Some(AnswerHighlight::Correct) => "correct",
                    Some(AnswerHighlight::Incorrect) => "wrong",
                    None => "-",
                };
                writeln!(output, "   {number}. {mark}")?;
            }
            writeln!(output, "Answer the wrong ones again (end input to stop).")?;
        }
    }
    Ok(attempts)
}

/// Run the authoring wizard; returns the number of questions created.
pub async fn author(
    services: &TriviaServices,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> ConsoleResult<usize> {
    let mut wizard = services.authoring_wizard().await;

    while wizard.step() == WizardStep::HeaderEntry {
        let Some(title) = prompt(input, output, "Title: ")? else {
            wizard.close();
            return Ok(0);
        };
        let description = prompt(input, output, "Description: ")?.unwrap_or_default();
        wizard.set_title(title);
        wizard.set_description(description);
        match wizard.next().await {
            Ok(_) => {}
            Err(AuthoringError::Validation(_)) => continue,
            Err(e) => return Err(e.into()),
        }
    }

    let choices: Vec<String> = wizard
        .correct_answer_options()
        .iter()
        .map(|o| o.value.clone())
        .collect();
    let answer_label = if choices.is_empty() {
        "Correct answer: ".to_string()
    } else {
        format!("Correct answer ({}): ", choices.join("/"))
    };

    let mut row = 0;
    loop {
        let Some(text) = prompt(input, output, "Question (empty to finish): ")? else {
            break;
        };
        if text.is_empty() {
            break;
        }
        if row > 0 {
            wizard.add_row()?;
        }
        wizard.edit_field(row, QuestionField::Text, text)?;
        for (field, label) in [
            (QuestionField::OptionA, "Option A: "),
            (QuestionField::OptionB, "Option B: "),
            (QuestionField::OptionC, "Option C: "),
            (QuestionField::CorrectAnswer, answer_label.as_str()),
        ] {
            let value = prompt(input, output, label)?.unwrap_or_default();
            wizard.edit_field(row, field, value)?;
        }
        row += 1;
    }

    if row == 0 {
        writeln!(output, "No questions entered; nothing saved.")?;
        wizard.close();
        return Ok(0);
    }

    let ids = wizard.submit().await?;
    Ok(ids.len())
}
