//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use trivia_core::model::{TriviaSetError, TriviaSetId};

use crate::authoring::WizardStep;

/// Errors emitted by `QuizSession` and `TriviaCatalog`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("failed to load questions for trivia set {trivia_set_id}")]
    Load {
        trivia_set_id: TriviaSetId,
        #[source]
        source: StorageError,
    },
    #[error("failed to list trivia sets")]
    ListSets(#[source] StorageError),
    #[error("{answered} of {total} questions answered")]
    Incomplete { answered: usize, total: usize },
}

/// Errors emitted by `TriviaAuthoringWizard`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthoringError {
    #[error(transparent)]
    Validation(#[from] TriviaSetError),
    #[error("action requires the {expected} step, wizard is on {actual}")]
    WrongStep {
        expected: WizardStep,
        actual: WizardStep,
    },
    #[error("draft row {index} is out of range (rows: {len})")]
    RowOutOfRange { index: usize, len: usize },
    #[error("draft row {row_key} has no trivia header")]
    MissingHeader { row_key: u32 },
    #[error("failed to create trivia header")]
    CreateHeader(#[source] StorageError),
    #[error("failed to create trivia questions")]
    CreateBatch(#[source] StorageError),
    #[error("failed to load correct answer options")]
    Picklist(#[source] StorageError),
}

/// Errors emitted while bootstrapping trivia services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TriviaServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
