//! Answer selection and grading.
//!
//! Grading is a pure function of the loaded questions and the player's
//! selections; it never touches storage.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;
use crate::model::question::Question;

/// Selected option value per question for one quiz attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSelection {
    answers: HashMap<QuestionId, String>,
}

impl AnswerSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the selection for a question.
    ///
    /// Returns the previous value, if any. The value is not checked against
    /// the question's options.
    pub fn select(&mut self, question_id: QuestionId, value: impl Into<String>) -> Option<String> {
        self.answers.insert(question_id, value.into())
    }

    #[must_use]
    pub fn get(&self, question_id: QuestionId) -> Option<&str> {
        self.answers.get(&question_id).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    /// Size-only completeness gate: true iff there is one selection per question.
    ///
    /// Keys are not matched against the questions, so stale selections from a
    /// previous set can make a partial attempt look complete.
    #[must_use]
    pub fn covers(&self, questions: &[Question]) -> bool {
        self.answers.len() == questions.len()
    }
}

impl<S: Into<String>> FromIterator<(QuestionId, S)> for AnswerSelection {
    fn from_iter<T: IntoIterator<Item = (QuestionId, S)>>(iter: T) -> Self {
        Self {
            answers: iter.into_iter().map(|(id, v)| (id, v.into())).collect(),
        }
    }
}

/// Per-question visual mark applied after an imperfect attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerHighlight {
    Correct,
    Incorrect,
}

/// Outcome of grading one attempt. Ids keep question order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeResult {
    pub correct_count: usize,
    pub total: usize,
    pub correct_ids: Vec<QuestionId>,
    pub incorrect_ids: Vec<QuestionId>,
}

impl GradeResult {
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.correct_count == self.total
    }

    /// Human readable score line, e.g. `"2 out of 3 are correct."`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} out of {} are correct.", self.correct_count, self.total)
    }

    /// Highlight marks in question order: incorrect first, then correct.
    pub fn highlights(&self) -> impl Iterator<Item = (QuestionId, AnswerHighlight)> + '_ {
        self.incorrect_ids
            .iter()
            .map(|id| (*id, AnswerHighlight::Incorrect))
            .chain(
                self.correct_ids
                    .iter()
                    .map(|id| (*id, AnswerHighlight::Correct)),
            )
    }
}

/// Compare each question's selection to its correct answer.
///
/// A question with no selection counts as incorrect.
#[must_use]
pub fn grade(questions: &[Question], selection: &AnswerSelection) -> GradeResult {
    let (correct, incorrect): (Vec<&Question>, Vec<&Question>) = questions
        .iter()
        .partition(|q| selection.get(q.id).is_some_and(|v| q.is_answered_by(v)));

    GradeResult {
        correct_count: correct.len(),
        total: questions.len(),
        correct_ids: correct.iter().map(|q| q.id).collect(),
        incorrect_ids: incorrect.iter().map(|q| q.id).collect(),
    }
}
