use trivia_core::model::{DEFAULT_RECORD_TYPE, PicklistOption};

use super::SqliteRepository;
use super::mapping::{conn, map_picklist_row};
use super::migrate::CORRECT_ANSWER_FIELD;
use crate::repository::{PicklistSource, StorageError};

#[async_trait::async_trait]
impl PicklistSource for SqliteRepository {
    async fn correct_answer_options(&self) -> Result<Vec<PicklistOption>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT label, value
            FROM picklist_values
            WHERE record_type = ?1 AND field = ?2
            ORDER BY sort_order ASC, value ASC
            ",
        )
        .bind(DEFAULT_RECORD_TYPE)
        .bind(CORRECT_ANSWER_FIELD)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        if rows.is_empty() {
            return Err(StorageError::NotFound);
        }
        rows.iter().map(map_picklist_row).collect()
    }
}
