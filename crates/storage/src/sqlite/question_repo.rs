use trivia_core::model::{Question, TriviaSet, TriviaSetId};

use super::SqliteRepository;
use super::mapping::{conn, map_question_row, map_trivia_set_row, trivia_set_id_to_i64};
use crate::repository::{QuestionSource, StorageError};

#[async_trait::async_trait]
impl QuestionSource for SqliteRepository {
    async fn list_questions(
        &self,
        trivia_set_id: TriviaSetId,
    ) -> Result<Vec<Question>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, trivia_set_id, text, option_a, option_b, option_c, correct_answer
            FROM questions
            WHERE trivia_set_id = ?1
            ORDER BY id ASC
            ",
        )
        .bind(trivia_set_id_to_i64(trivia_set_id)?)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_question_row).collect()
    }

    async fn list_sets(&self) -> Result<Vec<TriviaSet>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, title, description, created_at
            FROM trivia_sets
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_trivia_set_row).collect()
    }
}
