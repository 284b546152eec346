//! Two-step wizard for creating a trivia set and its questions.
//!
//! Step 1 (`HeaderEntry`) collects the title and description and creates the
//! header record. Step 2 (`QuestionEntry`) edits a growing list of draft rows
//! and submits them in one batch. A successful submit resets everything.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use storage::repository::{PicklistSource, TriviaStore};
use trivia_core::model::{
    Notification, PicklistOption, QuestionDraft, QuestionField, QuestionId, TriviaSetId,
    TriviaTitle,
};

use crate::error::AuthoringError;
use crate::events::Listeners;
use crate::notify::NotificationSink;

const CONTACT_ADMIN: &str = "Please reach out to System Administrator.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    HeaderEntry,
    QuestionEntry,
}

impl WizardStep {
    /// 1-based position for a progress indicator.
    #[must_use]
    pub fn progress_step(self) -> u8 {
        match self {
            WizardStep::HeaderEntry => 1,
            WizardStep::QuestionEntry => 2,
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardStep::HeaderEntry => f.write_str("header entry"),
            WizardStep::QuestionEntry => f.write_str("question entry"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    StepChanged(WizardStep),
    DraftsChanged { count: usize },
    /// The host should hide the wizard.
    Hidden,
}

/// Everything the wizard would lose on reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardSnapshot {
    pub step: WizardStep,
    pub title: String,
    pub description: String,
    pub header_id: Option<TriviaSetId>,
    pub drafts: Vec<QuestionDraft>,
}

impl WizardSnapshot {
    /// State of a freshly opened wizard: step 1, empty fields, one blank row.
    #[must_use]
    pub fn initial() -> Self {
        Self {
            step: WizardStep::HeaderEntry,
            title: String::new(),
            description: String::new(),
            header_id: None,
            drafts: vec![QuestionDraft::blank(1, None)],
        }
    }
}

pub struct TriviaAuthoringWizard {
    store: Arc<dyn TriviaStore>,
    picklists: Arc<dyn PicklistSource>,
    notifier: Arc<dyn NotificationSink>,
    state: WizardSnapshot,
    correct_answer_options: Vec<PicklistOption>,
    listeners: Listeners<WizardEvent>,
}

impl TriviaAuthoringWizard {
    #[must_use]
    pub fn new(
        store: Arc<dyn TriviaStore>,
        picklists: Arc<dyn PicklistSource>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            store,
            picklists,
            notifier,
            state: WizardSnapshot::initial(),
            correct_answer_options: Vec::new(),
            listeners: Listeners::default(),
        }
    }

    pub fn subscribe(&mut self, listener: impl Fn(&WizardEvent) + Send + Sync + 'static) {
        self.listeners.subscribe(listener);
    }

    #[must_use]
    pub fn step(&self) -> WizardStep {
        self.state.step
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.state.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.state.description
    }

    #[must_use]
    pub fn header_id(&self) -> Option<TriviaSetId> {
        self.state.header_id
    }

    #[must_use]
    pub fn drafts(&self) -> &[QuestionDraft] {
        &self.state.drafts
    }

    #[must_use]
    pub fn correct_answer_options(&self) -> &[PicklistOption] {
        &self.correct_answer_options
    }

    #[must_use]
    pub fn snapshot(&self) -> WizardSnapshot {
        self.state.clone()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.state.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.state.description = description.into();
    }

    /// Fetch the correct-answer choices. Failures are logged, never shown.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::Picklist` if the choices cannot be read; the
    /// previously loaded choices are kept.
    pub async fn load_picklist(&mut self) -> Result<usize, AuthoringError> {
        match self.picklists.correct_answer_options().await {
            Ok(options) => {
                self.correct_answer_options = options;
                Ok(self.correct_answer_options.len())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load correct answer options");
                Err(AuthoringError::Picklist(e))
            }
        }
    }

    /// Validate the title, create the header, and move to question entry.
    ///
    /// The new header id is attached to every existing draft. Each call
    /// creates a new header, including after `back`.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::Validation` for a blank title,
    /// `AuthoringError::CreateHeader` if the store rejects the header, and
    /// `AuthoringError::WrongStep` outside header entry. The wizard stays in
    /// header entry on every error.
    pub async fn next(&mut self) -> Result<TriviaSetId, AuthoringError> {
        self.require_step(WizardStep::HeaderEntry)?;

        let title = match TriviaTitle::new(self.state.title.as_str()) {
            Ok(title) => title,
            Err(e) => {
                self.notifier.show(Notification::error(
                    "Required field missing!!",
                    "Please enter trivia title.",
                ));
                return Err(e.into());
            }
        };
        let description = Some(self.state.description.trim()).filter(|d| !d.is_empty());

        match self.store.create_header(&title, description).await {
            Ok(id) => {
                tracing::info!(trivia_set_id = %id, %title, "created trivia header");
                self.state.header_id = Some(id);
                for draft in &mut self.state.drafts {
                    draft.trivia_set_id = Some(id);
                }
                self.set_step(WizardStep::QuestionEntry);
                Ok(id)
            }
            Err(e) => {
                tracing::error!(error = %e, %title, "failed to create trivia header");
                self.notifier
                    .show(Notification::error("Required field!", CONTACT_ADMIN));
                Err(AuthoringError::CreateHeader(e))
            }
        }
    }

    /// Append a blank draft carrying the current header id; returns the new row count.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::WrongStep` outside question entry.
    pub fn add_row(&mut self) -> Result<usize, AuthoringError> {
        self.require_step(WizardStep::QuestionEntry)?;
        let row_key = u32::try_from(self.state.drafts.len() + 1).unwrap_or(u32::MAX);
        self.state
            .drafts
            .push(QuestionDraft::blank(row_key, self.state.header_id));
        let count = self.state.drafts.len();
        self.listeners.emit(&WizardEvent::DraftsChanged { count });
        Ok(count)
    }

    /// Overwrite one field of the draft at `index` (0-based).
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::RowOutOfRange` for an unknown row and
    /// `AuthoringError::WrongStep` outside question entry.
    pub fn edit_field(
        &mut self,
        index: usize,
        field: QuestionField,
        value: impl Into<String>,
    ) -> Result<(), AuthoringError> {
        self.require_step(WizardStep::QuestionEntry)?;
        let len = self.state.drafts.len();
        let draft = self
            .state
            .drafts
            .get_mut(index)
            .ok_or(AuthoringError::RowOutOfRange { index, len })?;
        draft.set(field, value);
        Ok(())
    }

    /// Return to header entry without discarding anything.
    pub fn back(&mut self) {
        self.set_step(WizardStep::HeaderEntry);
    }

    /// Persist all drafts as one batch.
    ///
    /// On success the wizard resets to its initial state and asks the host
    /// to hide it. On failure the drafts stay in place for a retry.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::MissingHeader` if any draft lacks a header id
    /// (nothing is sent), `AuthoringError::CreateBatch` if the store rejects
    /// the batch, and `AuthoringError::WrongStep` outside question entry.
    pub async fn submit(&mut self) -> Result<Vec<QuestionId>, AuthoringError> {
        self.require_step(WizardStep::QuestionEntry)?;

        if let Some(orphan) = self
            .state
            .drafts
            .iter()
            .find(|d| d.trivia_set_id.is_none())
        {
            let row_key = orphan.row_key;
            tracing::warn!(row_key, "draft has no trivia header, batch not sent");
            self.notifier.show(Notification::error(
                "Required field missing!!",
                "Please save the trivia title before adding questions.",
            ));
            return Err(AuthoringError::MissingHeader { row_key });
        }

        match self.store.create_question_batch(&self.state.drafts).await {
            Ok(ids) => {
                tracing::info!(count = ids.len(), "created trivia questions");
                self.notifier.show(Notification::success(
                    "New trivia created successfully!",
                    "You can access new trivia by refreshing Page.",
                ));
                self.reset();
                self.listeners.emit(&WizardEvent::Hidden);
                Ok(ids)
            }
            Err(e) => {
                tracing::error!(error = %e, drafts = self.state.drafts.len(), "failed to create trivia questions");
                self.notifier
                    .show(Notification::error("An error occured!", CONTACT_ADMIN));
                Err(AuthoringError::CreateBatch(e))
            }
        }
    }

    /// Rewind the progress indicator and ask the host to hide the wizard.
    ///
    /// Title, description, header id, and drafts are kept.
    pub fn close(&mut self) {
        self.set_step(WizardStep::HeaderEntry);
        self.listeners.emit(&WizardEvent::Hidden);
    }

    fn reset(&mut self) {
        let step_changed = self.state.step != WizardStep::HeaderEntry;
        self.state = WizardSnapshot::initial();
        if step_changed {
            self.listeners
                .emit(&WizardEvent::StepChanged(WizardStep::HeaderEntry));
        }
        self.listeners.emit(&WizardEvent::DraftsChanged {
            count: self.state.drafts.len(),
        });
    }

    fn require_step(&self, expected: WizardStep) -> Result<(), AuthoringError> {
        if self.state.step == expected {
            Ok(())
        } else {
            Err(AuthoringError::WrongStep {
                expected,
                actual: self.state.step,
            })
        }
    }

    fn set_step(&mut self, step: WizardStep) {
        if self.state.step != step {
            self.state.step = step;
            self.listeners.emit(&WizardEvent::StepChanged(step));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use storage::repository::StorageError;
    use trivia_core::model::{Severity, default_correct_answer_options};

    use crate::notify::RecordingSink;

    /// Records calls and fails on demand.
    #[derive(Default)]
    struct StubStore {
        headers: Mutex<Vec<(String, Option<String>)>>,
        batches: Mutex<Vec<Vec<QuestionDraft>>>,
        fail_header: bool,
        fail_batch: bool,
    }

    #[async_trait]
    impl TriviaStore for StubStore {
        async fn create_header(
            &self,
            title: &TriviaTitle,
            description: Option<&str>,
        ) -> Result<TriviaSetId, StorageError> {
            if self.fail_header {
                return Err(StorageError::Connection("down".into()));
            }
            let mut headers = self.headers.lock().unwrap();
            headers.push((title.to_string(), description.map(str::to_owned)));
            Ok(TriviaSetId::new(100 + headers.len() as u64))
        }

        async fn create_question_batch(
            &self,
            drafts: &[QuestionDraft],
        ) -> Result<Vec<QuestionId>, StorageError> {
            if self.fail_batch {
                return Err(StorageError::Conflict);
            }
            self.batches.lock().unwrap().push(drafts.to_vec());
            Ok((1..=drafts.len() as u64).map(QuestionId::new).collect())
        }
    }

    struct StubPicklist {
        fail: bool,
    }

    #[async_trait]
    impl PicklistSource for StubPicklist {
        async fn correct_answer_options(&self) -> Result<Vec<PicklistOption>, StorageError> {
            if self.fail {
                Err(StorageError::NotFound)
            } else {
                Ok(default_correct_answer_options())
            }
        }
    }

    fn wizard_with(store: StubStore) -> (TriviaAuthoringWizard, Arc<StubStore>, RecordingSink) {
        let store = Arc::new(store);
        let sink = RecordingSink::new();
        let wizard = TriviaAuthoringWizard::new(
            Arc::clone(&store) as Arc<dyn TriviaStore>,
            Arc::new(StubPicklist { fail: false }),
            Arc::new(sink.clone()),
        );
        (wizard, store, sink)
    }

    async fn wizard_on_questions() -> (TriviaAuthoringWizard, Arc<StubStore>, RecordingSink) {
        let (mut wizard, store, sink) = wizard_with(StubStore::default());
        wizard.set_title("Science Quiz");
        wizard.next().await.unwrap();
        (wizard, store, sink)
    }

    #[test]
    fn new_wizard_is_in_initial_state() {
        let (wizard, _, _) = wizard_with(StubStore::default());
        assert_eq!(wizard.snapshot(), WizardSnapshot::initial());
        assert_eq!(wizard.step().progress_step(), 1);
        assert_eq!(wizard.drafts()[0].row_key, 1);
    }

    #[test]
    fn snapshot_serializes_for_the_view_layer() {
        let json = serde_json::to_value(WizardSnapshot::initial()).unwrap();
        assert_eq!(json["step"], "header_entry");
        assert_eq!(json["drafts"][0]["row_key"], 1);
        assert!(json["header_id"].is_null());
    }

    #[tokio::test]
    async fn blank_title_blocks_next_without_store_call() {
        let (mut wizard, store, sink) = wizard_with(StubStore::default());
        wizard.set_title("   ");

        let err = wizard.next().await.unwrap_err();
        assert!(matches!(err, AuthoringError::Validation(_)));
        assert_eq!(wizard.step(), WizardStep::HeaderEntry);
        assert!(store.headers.lock().unwrap().is_empty());

        let shown = sink.notifications();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].severity, Severity::Error);
        assert_eq!(shown[0].title, "Required field missing!!");
    }

    #[tokio::test]
    async fn next_creates_header_and_attaches_id() {
        let (mut wizard, store, _) = wizard_with(StubStore::default());
        wizard.set_title("Science Quiz");
        wizard.set_description("Atoms and stars");

        let id = wizard.next().await.unwrap();
        assert_eq!(
            *store.headers.lock().unwrap(),
            vec![("Science Quiz".to_string(), Some("Atoms and stars".to_string()))]
        );
        assert_eq!(wizard.step(), WizardStep::QuestionEntry);
        assert_eq!(wizard.step().progress_step(), 2);
        assert_eq!(wizard.header_id(), Some(id));
        assert_eq!(wizard.drafts().len(), 1);
        assert_eq!(wizard.drafts()[0].trivia_set_id, Some(id));
    }

    #[tokio::test]
    async fn blank_description_is_sent_as_none() {
        let (mut wizard, store, _) = wizard_with(StubStore::default());
        wizard.set_title("History");
        wizard.set_description("  ");
        wizard.next().await.unwrap();
        assert_eq!(store.headers.lock().unwrap()[0].1, None);
    }

    #[tokio::test]
    async fn failed_header_keeps_wizard_on_step_one() {
        let (mut wizard, _, sink) = wizard_with(StubStore {
            fail_header: true,
            ..StubStore::default()
        });
        wizard.set_title("Science Quiz");

        let err = wizard.next().await.unwrap_err();
        assert!(matches!(err, AuthoringError::CreateHeader(_)));
        assert_eq!(wizard.step(), WizardStep::HeaderEntry);
        assert_eq!(wizard.header_id(), None);
        assert_eq!(wizard.title(), "Science Quiz");
        assert_eq!(sink.notifications()[0].message, CONTACT_ADMIN);
    }

    #[tokio::test]
    async fn add_row_twice_grows_drafts_with_shared_header() {
        let (mut wizard, _, _) = wizard_on_questions().await;
        let header = wizard.header_id();

        assert_eq!(wizard.add_row().unwrap(), 2);
        assert_eq!(wizard.add_row().unwrap(), 3);

        let drafts = wizard.drafts();
        assert_eq!(drafts.len(), 3);
        for (draft, key) in drafts[1..].iter().zip([2, 3]) {
            assert_eq!(draft.row_key, key);
            assert_eq!(draft.trivia_set_id, header);
            for field in QuestionField::ALL {
                assert_eq!(draft.get(field), "");
            }
        }
    }

    #[tokio::test]
    async fn edit_field_updates_one_row() {
        let (mut wizard, _, _) = wizard_on_questions().await;
        wizard.add_row().unwrap();

        wizard
            .edit_field(1, QuestionField::Text, "Speed of light?")
            .unwrap();
        wizard
            .edit_field(1, QuestionField::CorrectAnswer, "B")
            .unwrap();

        assert_eq!(wizard.drafts()[1].text, "Speed of light?");
        assert_eq!(wizard.drafts()[1].correct_answer, "B");
        assert_eq!(wizard.drafts()[0].text, "");
    }

    #[tokio::test]
    async fn edit_field_out_of_range_is_an_error() {
        let (mut wizard, _, _) = wizard_on_questions().await;
        let err = wizard
            .edit_field(5, QuestionField::OptionA, "x")
            .unwrap_err();
        assert!(matches!(
            err,
            AuthoringError::RowOutOfRange { index: 5, len: 1 }
        ));
    }

    #[tokio::test]
    async fn question_actions_require_step_two() {
        let (mut wizard, _, _) = wizard_with(StubStore::default());
        assert!(matches!(
            wizard.add_row(),
            Err(AuthoringError::WrongStep {
                expected: WizardStep::QuestionEntry,
                actual: WizardStep::HeaderEntry
            })
        ));
        assert!(matches!(
            wizard.submit().await,
            Err(AuthoringError::WrongStep { .. })
        ));
    }

    #[tokio::test]
    async fn back_keeps_header_and_drafts() {
        let (mut wizard, _, _) = wizard_on_questions().await;
        wizard.add_row().unwrap();
        wizard.edit_field(0, QuestionField::Text, "Q1").unwrap();

        wizard.back();
        assert_eq!(wizard.step(), WizardStep::HeaderEntry);
        assert_eq!(wizard.title(), "Science Quiz");
        assert_eq!(wizard.drafts().len(), 2);
        assert_eq!(wizard.drafts()[0].text, "Q1");
        assert!(wizard.header_id().is_some());
    }

    #[tokio::test]
    async fn submit_sends_all_drafts_and_resets() {
        let (mut wizard, store, sink) = wizard_on_questions().await;
        wizard.add_row().unwrap();
        wizard.add_row().unwrap();
        for index in 0..3 {
            wizard
                .edit_field(index, QuestionField::Text, format!("Q{index}"))
                .unwrap();
        }

        let hidden = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&hidden);
        wizard.subscribe(move |event| {
            if *event == WizardEvent::Hidden {
                *counter.lock().unwrap() += 1;
            }
        });

        let ids = wizard.submit().await.unwrap();
        assert_eq!(ids.len(), 3);

        let batches = store.batches.lock().unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 3);
        assert_eq!(batches[0][2].text, "Q2");

        assert_eq!(wizard.snapshot(), WizardSnapshot::initial());
        assert_eq!(*hidden.lock().unwrap(), 1);
        assert_eq!(sink.notifications().last().unwrap().severity, Severity::Success);
    }

    #[tokio::test]
    async fn failed_submit_keeps_drafts_for_retry() {
        let (mut wizard, _, sink) = wizard_with(StubStore {
            fail_batch: true,
            ..StubStore::default()
        });
        wizard.set_title("Science Quiz");
        wizard.next().await.unwrap();
        wizard.add_row().unwrap();

        let err = wizard.submit().await.unwrap_err();
        assert!(matches!(err, AuthoringError::CreateBatch(_)));
        assert_eq!(wizard.step(), WizardStep::QuestionEntry);
        assert_eq!(wizard.drafts().len(), 2);
        assert_eq!(sink.notifications().last().unwrap().title, "An error occured!");
    }

    #[tokio::test]
    async fn close_hides_but_keeps_data() {
        let (mut wizard, _, _) = wizard_on_questions().await;
        wizard.add_row().unwrap();

        let events = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&events);
        wizard.subscribe(move |event| seen.lock().unwrap().push(event.clone()));

        wizard.close();
        assert_eq!(wizard.step(), WizardStep::HeaderEntry);
        assert_eq!(wizard.drafts().len(), 2);
        assert_eq!(wizard.title(), "Science Quiz");
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                WizardEvent::StepChanged(WizardStep::HeaderEntry),
                WizardEvent::Hidden
            ]
        );
    }

    #[tokio::test]
    async fn next_after_back_creates_another_header() {
        let (mut wizard, store, _) = wizard_on_questions().await;
        let first = wizard.header_id();
        wizard.back();
        let second = wizard.next().await.unwrap();

        assert_ne!(first, Some(second));
        assert_eq!(store.headers.lock().unwrap().len(), 2);
        assert_eq!(wizard.drafts()[0].trivia_set_id, Some(second));
    }

    #[tokio::test]
    async fn picklist_loads_and_failure_is_silent() {
        let (mut wizard, _, sink) = wizard_with(StubStore::default());
        assert_eq!(wizard.load_picklist().await.unwrap(), 3);
        assert_eq!(wizard.correct_answer_options()[2].value, "C");

        wizard.picklists = Arc::new(StubPicklist { fail: true });
        assert!(matches!(
            wizard.load_picklist().await,
            Err(AuthoringError::Picklist(_))
        ));
        assert_eq!(wizard.correct_answer_options().len(), 3);
        assert!(sink.notifications().is_empty());
    }
}
