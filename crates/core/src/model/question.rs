use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::{QuestionId, TriviaSetId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("draft row {row_key} is not attached to a trivia set")]
    MissingTriviaSet { row_key: u32 },

    #[error("unknown question field: {0}")]
    UnknownField(String),
}

/// A persisted multiple-choice question belonging to one trivia set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub trivia_set_id: TriviaSetId,
    pub text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    /// Picklist value of the right option (e.g. `"A"`).
    pub correct_answer: String,
}

impl Question {
    /// Exact, case-sensitive comparison against the stored correct answer.
    #[must_use]
    pub fn is_answered_by(&self, value: &str) -> bool {
        self.correct_answer == value
    }

    /// Options in display order, keyed by their picklist value.
    #[must_use]
    pub fn options(&self) -> [(&'static str, &str); 3] {
        [
            ("A", self.option_a.as_str()),
            ("B", self.option_b.as_str()),
            ("C", self.option_c.as_str()),
        ]
    }
}

/// Editable field of a draft question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionField {
    Text,
    OptionA,
    OptionB,
    OptionC,
    CorrectAnswer,
}

impl QuestionField {
    pub const ALL: [QuestionField; 5] = [
        QuestionField::Text,
        QuestionField::OptionA,
        QuestionField::OptionB,
        QuestionField::OptionC,
        QuestionField::CorrectAnswer,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionField::Text => "text",
            QuestionField::OptionA => "option_a",
            QuestionField::OptionB => "option_b",
            QuestionField::OptionC => "option_c",
            QuestionField::CorrectAnswer => "correct_answer",
        }
    }
}

impl fmt::Display for QuestionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionField {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestionField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| QuestionError::UnknownField(s.to_string()))
    }
}

/// An in-memory question row being edited in the authoring wizard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub row_key: u32,
    pub trivia_set_id: Option<TriviaSetId>,
    pub text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub correct_answer: String,
}

impl QuestionDraft {
    /// A blank row with the given key, optionally attached to a trivia set.
    #[must_use]
    pub fn blank(row_key: u32, trivia_set_id: Option<TriviaSetId>) -> Self {
        Self {
            row_key,
            trivia_set_id,
            ..Self::default()
        }
    }

    pub fn set(&mut self, field: QuestionField, value: impl Into<String>) {
        let value = value.into();
        match field {
            QuestionField::Text => self.text = value,
            QuestionField::OptionA => self.option_a = value,
            QuestionField::OptionB => self.option_b = value,
            QuestionField::OptionC => self.option_c = value,
            QuestionField::CorrectAnswer => self.correct_answer = value,
        }
    }

    #[must_use]
    pub fn get(&self, field: QuestionField) -> &str {
        match field {
            QuestionField::Text => &self.text,
            QuestionField::OptionA => &self.option_a,
            QuestionField::OptionB => &self.option_b,
            QuestionField::OptionC => &self.option_c,
            QuestionField::CorrectAnswer => &self.correct_answer,
        }
    }

    /// Returns the owning trivia set.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::MissingTriviaSet` when no header id is attached.
    pub fn require_trivia_set(&self) -> Result<TriviaSetId, QuestionError> {
        self.trivia_set_id.ok_or(QuestionError::MissingTriviaSet {
            row_key: self.row_key,
        })
    }

    /// Promote the draft to a persisted question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::MissingTriviaSet` when no header id is attached.
    pub fn into_question(self, id: QuestionId) -> Result<Question, QuestionError> {
        let trivia_set_id = self.require_trivia_set()?;
        Ok(Question {
            id,
            trivia_set_id,
            text: self.text,
            option_a: self.option_a,
            option_b: self.option_b,
            option_c: self.option_c,
            correct_answer: self.correct_answer,
        })
    }
}
