use chrono::Utc;
use sqlx::SqlitePool;
use trivia_core::model::{DEFAULT_RECORD_TYPE, default_correct_answer_options};

use super::SqliteInitError;

/// Picklist field name for the correct-answer choices.
pub(crate) const CORRECT_ANSWER_FIELD: &str = "correct_answer";

/// Runs a single, consolidated migration for the current schema.
///
/// Creates trivia sets, questions, and picklist values, then seeds the
/// default correct-answer choices.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    async fn is_applied(pool: &SqlitePool, version: i64) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM schema_migrations WHERE version = ?1")
            .bind(version)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
            ",
    )
    .execute(pool)
    .await?;

    // Version 1: full schema.
    if !is_applied(pool, 1).await? {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS trivia_sets (
                    id INTEGER PRIMARY KEY,
                    title TEXT NOT NULL CHECK (length(trim(title)) > 0),
                    description TEXT,
                    created_at TEXT NOT NULL
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS questions (
                    id INTEGER PRIMARY KEY,
                    trivia_set_id INTEGER NOT NULL,
                    text TEXT NOT NULL,
                    option_a TEXT NOT NULL,
                    option_b TEXT NOT NULL,
                    option_c TEXT NOT NULL,
                    correct_answer TEXT NOT NULL,
                    FOREIGN KEY (trivia_set_id) REFERENCES trivia_sets(id) ON DELETE CASCADE
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS picklist_values (
                    record_type TEXT NOT NULL,
                    field TEXT NOT NULL,
                    value TEXT NOT NULL,
                    label TEXT NOT NULL,
                    sort_order INTEGER NOT NULL,
                    PRIMARY KEY (record_type, field, value)
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE INDEX IF NOT EXISTS idx_questions_set
                    ON questions(trivia_set_id, id);
            ",
        )
        .execute(&mut *tx)
        .await?;

        for (position, option) in (0_i64..).zip(default_correct_answer_options()) {
            sqlx::query(
                r"
                    INSERT INTO picklist_values (record_type, field, value, label, sort_order)
                    VALUES (?1, ?2, ?3, ?4, ?5)
                    ON CONFLICT(record_type, field, value) DO NOTHING
                ",
            )
            .bind(DEFAULT_RECORD_TYPE)
            .bind(CORRECT_ANSWER_FIELD)
            .bind(option.value)
            .bind(option.label)
            .bind(position)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            r"
                INSERT INTO schema_migrations (version, applied_at)
                VALUES (?1, ?2)
                ON CONFLICT(version) DO NOTHING
            ",
        )
        .bind(1_i64)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::info!(version = 1, "applied schema migration");
    }

    Ok(())
}
