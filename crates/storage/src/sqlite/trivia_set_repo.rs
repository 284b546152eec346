use trivia_core::model::{QuestionDraft, QuestionId, TriviaSetId, TriviaTitle};

use super::SqliteRepository;
use super::mapping::{conn, question_id_from_i64, trivia_set_id_from_i64, trivia_set_id_to_i64};
use crate::repository::{StorageError, TriviaStore};

#[async_trait::async_trait]
impl TriviaStore for SqliteRepository {
    async fn create_header(
        &self,
        title: &TriviaTitle,
        description: Option<&str>,
    ) -> Result<TriviaSetId, StorageError> {
        let description = description.map(str::trim).filter(|d| !d.is_empty());

        let res = sqlx::query(
            r"
            INSERT INTO trivia_sets (title, description, created_at)
            VALUES (?1, ?2, ?3)
            ",
        )
        .bind(title.as_str())
        .bind(description)
        .bind(self.clock.now())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        trivia_set_id_from_i64(res.last_insert_rowid())
    }

    async fn create_question_batch(
        &self,
        drafts: &[QuestionDraft],
    ) -> Result<Vec<QuestionId>, StorageError> {
        let mut set_ids = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let set_id = draft
                .require_trivia_set()
                .map_err(|e| StorageError::InvalidRecord(e.to_string()))?;
            set_ids.push(trivia_set_id_to_i64(set_id)?);
        }

        let mut tx = self.pool.begin().await.map_err(conn)?;
        let mut ids = Vec::with_capacity(drafts.len());
        for (draft, set_id) in drafts.iter().zip(set_ids) {
            let res = sqlx::query(
                r"
                INSERT INTO questions (trivia_set_id, text, option_a, option_b, option_c, correct_answer)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ",
            )
            .bind(set_id)
            .bind(draft.text.as_str())
            .bind(draft.option_a.as_str())
            .bind(draft.option_b.as_str())
            .bind(draft.option_c.as_str())
            .bind(draft.correct_answer.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_foreign_key_violation() => StorageError::NotFound,
                other => conn(other),
            })?;
            ids.push(question_id_from_i64(res.last_insert_rowid())?);
        }
        // Dropping `tx` on an early return above rolls the batch back.
        tx.commit().await.map_err(conn)?;

        Ok(ids)
    }
}
