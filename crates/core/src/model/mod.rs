mod grading;
mod ids;
mod notification;
mod picklist;
mod question;
mod trivia_set;

pub use grading::{AnswerHighlight, AnswerSelection, GradeResult, grade};
pub use ids::{ParseIdError, QuestionId, TriviaSetId};
pub use notification::{Notification, Severity};
pub use picklist::{DEFAULT_RECORD_TYPE, PicklistOption, default_correct_answer_options};
pub use question::{Question, QuestionDraft, QuestionError, QuestionField};
pub use trivia_set::{TriviaSet, TriviaSetError, TriviaTitle};
