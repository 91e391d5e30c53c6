use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;

use crate::repository::{SessionRepository, SessionSnapshot, StorageError};

use super::SqliteRepository;

#[async_trait]
impl SessionRepository for SqliteRepository {
    async fn load(&self) -> Result<Option<SessionSnapshot>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT
                session_id,
                personal_info,
                answers,
                current_question_index,
                started_at,
                pin_number
            FROM survey_session
            WHERE id = 1
            ",
        )
        .fetch_optional(self.pool())
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let session_id: String = row
            .try_get("session_id")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        let personal_info_json: Option<String> = row
            .try_get("personal_info")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        let answers_json: String = row
            .try_get("answers")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        let current_question_index: i64 = row
            .try_get("current_question_index")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        let started_at: Option<DateTime<Utc>> = row
            .try_get("started_at")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        let pin_number: Option<String> = row
            .try_get("pin_number")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        let personal_info = personal_info_json
            .map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        let answers = serde_json::from_str(&answers_json)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        Ok(Some(SessionSnapshot {
            session_id,
            personal_info,
            answers,
            current_question_index: usize::try_from(current_question_index).unwrap_or(0),
            started_at,
            pin_number,
        }))
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StorageError> {
        let personal_info_json = snapshot
            .personal_info
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        let answers_json = serde_json::to_string(&snapshot.answers)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        let index = i64::try_from(snapshot.current_question_index)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        sqlx::query(
            r"
            INSERT INTO survey_session (
                id,
                session_id,
                personal_info,
                answers,
                current_question_index,
                started_at,
                pin_number
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(id) DO UPDATE SET
                session_id = excluded.session_id,
                personal_info = excluded.personal_info,
                answers = excluded.answers,
                current_question_index = excluded.current_question_index,
                started_at = excluded.started_at,
                pin_number = excluded.pin_number
            ",
        )
        .bind(1_i64)
        .bind(&snapshot.session_id)
        .bind(personal_info_json)
        .bind(answers_json)
        .bind(index)
        .bind(snapshot.started_at)
        .bind(&snapshot.pin_number)
        .execute(self.pool())
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM survey_session WHERE id = 1")
            .execute(self.pool())
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}
