use std::sync::Arc;

use storage::repository::QuestionSource;
use trivia_core::model::TriviaSet;

use crate::error::QuizError;

/// Read-only listing of trivia sets for the home view.
#[derive(Clone)]
pub struct TriviaCatalog {
    source: Arc<dyn QuestionSource>,
}

impl TriviaCatalog {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        Self { source }
    }

    /// All trivia sets, oldest first. Failures are logged, not shown.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::ListSets` if the source cannot be read.
    pub async fn list_sets(&self) -> Result<Vec<TriviaSet>, QuizError> {
        self.source.list_sets().await.map_err(|e| {
            tracing::error!(error = %e, "failed to list trivia sets");
            QuizError::ListSets(e)
        })
    }
}
