//! One player's pass through a trivia set: load, answer, grade.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use storage::repository::QuestionSource;
use trivia_core::model::{
    AnswerHighlight, AnswerSelection, GradeResult, Notification, Question, QuestionId,
    TriviaSetId, grade,
};

use crate::error::QuizError;
use crate::events::Listeners;
use crate::notify::NotificationSink;

/// Whether the player is browsing the listing or answering questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizMode {
    #[default]
    Listing,
    Taking,
}

/// State changes observers may react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    ModeChanged(QuizMode),
    QuestionsLoaded {
        trivia_set_id: TriviaSetId,
        count: usize,
    },
    AnswerSelected {
        question_id: QuestionId,
    },
    Graded(GradeResult),
}

pub struct QuizSession {
    source: Arc<dyn QuestionSource>,
    notifier: Arc<dyn NotificationSink>,
    mode: QuizMode,
    active_set: Option<TriviaSetId>,
    questions: Vec<Question>,
    selection: AnswerSelection,
    highlights: HashMap<QuestionId, AnswerHighlight>,
    listeners: Listeners<QuizEvent>,
}

impl QuizSession {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            source,
            notifier,
            mode: QuizMode::Listing,
            active_set: None,
            questions: Vec::new(),
            selection: AnswerSelection::new(),
            highlights: HashMap::new(),
            listeners: Listeners::default(),
        }
    }

    pub fn subscribe(&mut self, listener: impl Fn(&QuizEvent) + Send + Sync + 'static) {
        self.listeners.subscribe(listener);
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    /// Trivia set whose questions are currently loaded.
    #[must_use]
    pub fn active_set(&self) -> Option<TriviaSetId> {
        self.active_set
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn selection(&self) -> &AnswerSelection {
        &self.selection
    }

    /// Visual mark for a question after an imperfect attempt.
    #[must_use]
    pub fn highlight(&self, question_id: QuestionId) -> Option<AnswerHighlight> {
        self.highlights.get(&question_id).copied()
    }

    /// Enter quiz-taking mode and load the chosen set.
    ///
    /// The mode switch happens before the load, so a failed load leaves an
    /// empty (or previous) question list on screen.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Load` if the questions cannot be fetched.
    pub async fn start(&mut self, trivia_set_id: TriviaSetId) -> Result<usize, QuizError> {
        self.set_mode(QuizMode::Taking);
        self.load_questions(trivia_set_id).await
    }

    /// Replace the active questions with those of `trivia_set_id`.
    ///
    /// On success the selection and highlights are cleared. On failure the
    /// error is logged and all prior state is kept; no notification is shown.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Load` if the questions cannot be fetched.
    pub async fn load_questions(&mut self, trivia_set_id: TriviaSetId) -> Result<usize, QuizError> {
        match self.source.list_questions(trivia_set_id).await {
            Ok(questions) => {
                let count = questions.len();
                self.questions = questions;
                self.active_set = Some(trivia_set_id);
                self.selection.clear();
                self.highlights.clear();
                tracing::debug!(%trivia_set_id, count, "loaded trivia questions");
                self.listeners.emit(&QuizEvent::QuestionsLoaded {
                    trivia_set_id,
                    count,
                });
                Ok(count)
            }
            Err(source) => {
                tracing::error!(%trivia_set_id, error = %source, "failed to load trivia questions");
                Err(QuizError::Load {
                    trivia_set_id,
                    source,
                })
            }
        }
    }

    /// Record `value` as the answer to `question_id`, replacing any earlier choice.
    pub fn select_answer(&mut self, question_id: QuestionId, value: impl Into<String>) {
        self.selection.select(question_id, value);
        self.listeners
            .emit(&QuizEvent::AnswerSelected { question_id });
    }

    /// One selection per loaded question (count only, keys are not compared).
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.selection.covers(&self.questions)
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.is_complete()
    }

    /// Grade after checking the submission gate.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Incomplete` when not every question has a selection.
    pub fn submit(&mut self) -> Result<GradeResult, QuizError> {
        if !self.can_submit() {
            return Err(QuizError::Incomplete {
                answered: self.selection.len(),
                total: self.questions.len(),
            });
        }
        Ok(self.grade())
    }

    /// Score the current selection against the loaded questions.
    ///
    /// A perfect score clears the selection and returns to the listing. Any
    /// other score keeps the attempt open and marks each question correct or
    /// incorrect.
    pub fn grade(&mut self) -> GradeResult {
        let result = grade(&self.questions, &self.selection);
        tracing::info!(
            correct = result.correct_count,
            total = result.total,
            "graded trivia attempt"
        );

        if result.is_perfect() {
            self.notifier.show(Notification::success(
                "Congratulations!",
                "All answers are correct.",
            ));
            self.selection.clear();
            self.highlights.clear();
            self.listeners.emit(&QuizEvent::Graded(result.clone()));
            self.set_mode(QuizMode::Listing);
        } else {
            self.notifier.show(Notification::warning(
                "Better Luck Next Time!",
                result.summary(),
            ));
            self.highlights = result.highlights().collect();
            self.listeners.emit(&QuizEvent::Graded(result.clone()));
        }

        result
    }

    /// Leave quiz-taking mode, keeping questions and selections.
    pub fn cancel(&mut self) {
        self.set_mode(QuizMode::Listing);
    }

    fn set_mode(&mut self, mode: QuizMode) {
        if self.mode != mode {
            self.mode = mode;
            self.listeners.emit(&QuizEvent::ModeChanged(mode));
        }
    }
}
