#![forbid(unsafe_code)]

pub mod authoring;
pub mod catalog;
pub mod error;
pub mod events;
pub mod notify;
pub mod quiz_session;
pub mod trivia_services;

pub use authoring::{TriviaAuthoringWizard, WizardEvent, WizardSnapshot, WizardStep};
pub use catalog::TriviaCatalog;
pub use error::{AuthoringError, QuizError, TriviaServicesError};
pub use events::Listeners;
pub use notify::{NotificationSink, RecordingSink};
pub use quiz_session::{QuizEvent, QuizMode, QuizSession};
pub use trivia_services::TriviaServices;
