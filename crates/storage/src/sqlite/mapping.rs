use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use trivia_core::model::{PicklistOption, Question, QuestionId, TriviaSet, TriviaSetId};

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn trivia_set_id_from_i64(v: i64) -> Result<TriviaSetId, StorageError> {
    Ok(TriviaSetId::new(i64_to_u64("trivia_set_id", v)?))
}

pub(crate) fn question_id_from_i64(v: i64) -> Result<QuestionId, StorageError> {
    Ok(QuestionId::new(i64_to_u64("question_id", v)?))
}

pub(crate) fn trivia_set_id_to_i64(id: TriviaSetId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("trivia_set_id overflow".into()))
}

pub(crate) fn map_trivia_set_row(row: &SqliteRow) -> Result<TriviaSet, StorageError> {
    TriviaSet::new(
        trivia_set_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        row.try_get::<String, _>("title").map_err(ser)?,
        row.try_get::<Option<String>, _>("description").map_err(ser)?,
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_question_row(row: &SqliteRow) -> Result<Question, StorageError> {
    Ok(Question {
        id: question_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        trivia_set_id: trivia_set_id_from_i64(row.try_get::<i64, _>("trivia_set_id").map_err(ser)?)?,
        text: row.try_get("text").map_err(ser)?,
        option_a: row.try_get("option_a").map_err(ser)?,
        option_b: row.try_get("option_b").map_err(ser)?,
        option_c: row.try_get("option_c").map_err(ser)?,
        correct_answer: row.try_get("correct_answer").map_err(ser)?,
    })
}

pub(crate) fn map_picklist_row(row: &SqliteRow) -> Result<PicklistOption, StorageError> {
    Ok(PicklistOption::new(
        row.try_get::<String, _>("label").map_err(ser)?,
        row.try_get::<String, _>("value").map_err(ser)?,
    ))
}
