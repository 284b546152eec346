#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{
    InMemoryRepository, PicklistSource, QuestionSource, Storage, StorageError, TriviaStore,
};
