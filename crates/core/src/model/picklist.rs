use serde::{Deserialize, Serialize};

/// One entry of an externally defined value list (e.g. the correct-answer choices).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PicklistOption {
    pub label: String,
    pub value: String,
}

impl PicklistOption {
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Record type whose picklist values apply when none is specified.
pub const DEFAULT_RECORD_TYPE: &str = "default";

/// Correct-answer choices shipped with a fresh store.
#[must_use]
pub fn default_correct_answer_options() -> Vec<PicklistOption> {
    vec![
        PicklistOption::new("Option A", "A"),
        PicklistOption::new("Option B", "B"),
        PicklistOption::new("Option C", "C"),
    ]
}
