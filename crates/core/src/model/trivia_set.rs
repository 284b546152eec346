use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::TriviaSetId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TriviaSetError {
    #[error("trivia title cannot be empty")]
    EmptyTitle,
}

/// Validated trivia title (trimmed, non-empty).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TriviaTitle(String);

impl TriviaTitle {
    /// Create a validated title.
    ///
    /// # Errors
    ///
    /// Returns `TriviaSetError::EmptyTitle` if the title is blank after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TriviaSetError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TriviaSetError::EmptyTitle);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TriviaTitle {
    type Error = TriviaSetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TriviaTitle> for String {
    fn from(value: TriviaTitle) -> Self {
        value.0
    }
}

impl std::fmt::Display for TriviaTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, described group of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaSet {
    id: TriviaSetId,
    title: TriviaTitle,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl TriviaSet {
    /// Creates a trivia set, normalizing a blank description to `None`.
    ///
    /// # Errors
    ///
    /// Returns `TriviaSetError::EmptyTitle` when the title is blank.
    pub fn new(
        id: TriviaSetId,
        title: impl Into<String>,
        description: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, TriviaSetError> {
        let title = TriviaTitle::new(title)?;
        let description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        Ok(Self {
            id,
            title,
            description,
            created_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> TriviaSetId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &TriviaTitle {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
