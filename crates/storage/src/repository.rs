use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use trivia_core::Clock;
use trivia_core::model::{
    DEFAULT_RECORD_TYPE, PicklistOption, Question, QuestionDraft, QuestionId, TriviaSet,
    TriviaSetId, TriviaTitle, default_correct_answer_options,
};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Read access to trivia sets and their questions.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Questions of one trivia set, in creation order.
    ///
    /// An unknown set yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn list_questions(&self, trivia_set_id: TriviaSetId)
    -> Result<Vec<Question>, StorageError>;

    /// All trivia sets, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn list_sets(&self) -> Result<Vec<TriviaSet>, StorageError>;
}

/// Write access used by the authoring wizard.
#[async_trait]
pub trait TriviaStore: Send + Sync {
    /// Persist a trivia-set header and return its new id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the header cannot be stored.
    async fn create_header(
        &self,
        title: &TriviaTitle,
        description: Option<&str>,
    ) -> Result<TriviaSetId, StorageError>;

    /// Persist every draft or none of them.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidRecord` if a draft has no trivia set,
    /// `StorageError::NotFound` if the referenced set does not exist, or other
    /// storage errors. Nothing is written on error.
    async fn create_question_batch(
        &self,
        drafts: &[QuestionDraft],
    ) -> Result<Vec<QuestionId>, StorageError>;
}

/// Valid correct-answer choices for questions.
#[async_trait]
pub trait PicklistSource: Send + Sync {
    /// Choices for the default record type, in display order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn correct_answer_options(&self) -> Result<Vec<PicklistOption>, StorageError>;
}

#[derive(Default)]
struct InMemoryState {
    sets: BTreeMap<TriviaSetId, TriviaSet>,
    questions: BTreeMap<QuestionId, Question>,
    picklists: HashMap<String, Vec<PicklistOption>>,
    next_set_id: u64,
    next_question_id: u64,
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone)]
pub struct InMemoryRepository {
    clock: Clock,
    state: Arc<Mutex<InMemoryState>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Empty store with the default correct-answer picklist.
    #[must_use]
    pub fn new() -> Self {
        let mut state = InMemoryState::default();
        state.picklists.insert(
            DEFAULT_RECORD_TYPE.to_string(),
            default_correct_answer_options(),
        );
        Self {
            clock: Clock::default(),
            state: Arc::new(Mutex::new(state)),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the correct-answer choices for the default record type.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the state lock is poisoned.
    pub fn set_correct_answer_options(
        &self,
        options: Vec<PicklistOption>,
    ) -> Result<(), StorageError> {
        self.lock()?
            .picklists
            .insert(DEFAULT_RECORD_TYPE.to_string(), options);
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, InMemoryState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl QuestionSource for InMemoryRepository {
    async fn list_questions(
        &self,
        trivia_set_id: TriviaSetId,
    ) -> Result<Vec<Question>, StorageError> {
        let guard = self.lock()?;
        Ok(guard
            .questions
            .values()
            .filter(|q| q.trivia_set_id == trivia_set_id)
            .cloned()
            .collect())
    }

    async fn list_sets(&self) -> Result<Vec<TriviaSet>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.sets.values().cloned().collect())
    }
}

#[async_trait]
impl TriviaStore for InMemoryRepository {
    async fn create_header(
        &self,
        title: &TriviaTitle,
        description: Option<&str>,
    ) -> Result<TriviaSetId, StorageError> {
        let mut guard = self.lock()?;
        guard.next_set_id += 1;
        let id = TriviaSetId::new(guard.next_set_id);
        let set = TriviaSet::new(
            id,
            title.as_str(),
            description.map(str::to_owned),
            self.clock.now(),
        )
        .map_err(|e| StorageError::InvalidRecord(e.to_string()))?;
        guard.sets.insert(id, set);
        Ok(id)
    }

    async fn create_question_batch(
        &self,
        drafts: &[QuestionDraft],
    ) -> Result<Vec<QuestionId>, StorageError> {
        let mut guard = self.lock()?;

        // Validate the whole batch before touching state.
        for draft in drafts {
            let set_id = draft
                .require_trivia_set()
                .map_err(|e| StorageError::InvalidRecord(e.to_string()))?;
            if !guard.sets.contains_key(&set_id) {
                return Err(StorageError::NotFound);
            }
        }

        let mut ids = Vec::with_capacity(drafts.len());
        for draft in drafts {
            guard.next_question_id += 1;
            let id = QuestionId::new(guard.next_question_id);
            let question = draft
                .clone()
                .into_question(id)
                .map_err(|e| StorageError::InvalidRecord(e.to_string()))?;
            guard.questions.insert(id, question);
            ids.push(id);
        }
        Ok(ids)
    }
}

#[async_trait]
impl PicklistSource for InMemoryRepository {
    async fn correct_answer_options(&self) -> Result<Vec<PicklistOption>, StorageError> {
        let guard = self.lock()?;
        guard
            .picklists
            .get(DEFAULT_RECORD_TYPE)
            .cloned()
            .ok_or(StorageError::NotFound)
    }
}

/// Aggregates the trivia collaborators behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionSource>,
    pub trivia: Arc<dyn TriviaStore>,
    pub picklists: Arc<dyn PicklistSource>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_in_memory(InMemoryRepository::new())
    }

    #[must_use]
    pub fn from_in_memory(repo: InMemoryRepository) -> Self {
        let questions: Arc<dyn QuestionSource> = Arc::new(repo.clone());
        let trivia: Arc<dyn TriviaStore> = Arc::new(repo.clone());
        let picklists: Arc<dyn PicklistSource> = Arc::new(repo);
        Self {
            questions,
            trivia,
            picklists,
        }
    }
}
