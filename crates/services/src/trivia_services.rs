use std::sync::Arc;

use storage::repository::Storage;

use crate::authoring::TriviaAuthoringWizard;
use crate::catalog::TriviaCatalog;
use crate::error::TriviaServicesError;
use crate::notify::NotificationSink;
use crate::quiz_session::QuizSession;

/// Assembles the trivia components over one storage backend and one notification sink.
#[derive(Clone)]
pub struct TriviaServices {
    storage: Storage,
    notifier: Arc<dyn NotificationSink>,
}

impl TriviaServices {
    #[must_use]
    pub fn new(storage: Storage, notifier: Arc<dyn NotificationSink>) -> Self {
        Self { storage, notifier }
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `TriviaServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        notifier: Arc<dyn NotificationSink>,
    ) -> Result<Self, TriviaServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::new(storage, notifier))
    }

    #[must_use]
    pub fn in_memory(notifier: Arc<dyn NotificationSink>) -> Self {
        Self::new(Storage::in_memory(), notifier)
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    #[must_use]
    pub fn catalog(&self) -> TriviaCatalog {
        TriviaCatalog::new(Arc::clone(&self.storage.questions))
    }

    #[must_use]
    pub fn quiz_session(&self) -> QuizSession {
        QuizSession::new(
            Arc::clone(&self.storage.questions),
            Arc::clone(&self.notifier),
        )
    }

    /// A fresh wizard with its correct-answer choices already requested.
    ///
    /// A picklist failure is logged and the wizard is returned without choices.
    pub async fn authoring_wizard(&self) -> TriviaAuthoringWizard {
        let mut wizard = TriviaAuthoringWizard::new(
            Arc::clone(&self.storage.trivia),
            Arc::clone(&self.storage.picklists),
            Arc::clone(&self.notifier),
        );
        // Logged inside `load_picklist`.
        let _ = wizard.load_picklist().await;
        wizard
    }
}
