//! SQLite Verify Book Request Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{RepositoryError, VerifyBookRequestRepositoryPort};
use crate::domain::book::{BookId, UserId};
use crate::domain::review::{VerifyBookRequest, VerifyBookRequestId};

/// SQLite Verify Book Request Repository
pub struct SqliteVerifyBookRequestRepository {
    pool: DbPool,
}

impl SqliteVerifyBookRequestRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct VerifyBookRequestRow {
    id: String,
    translator_id: String,
    book_id: String,
    is_verified: Option<bool>,
    send_date: String,
}

impl TryFrom<VerifyBookRequestRow> for VerifyBookRequest {
    type Error = RepositoryError;

    fn try_from(row: VerifyBookRequestRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        let translator_id = Uuid::parse_str(&row.translator_id)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        let book_id = Uuid::parse_str(&row.book_id)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        let send_date = DateTime::parse_from_rfc3339(&row.send_date)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?
            .with_timezone(&Utc);

        Ok(VerifyBookRequest::restore(
            VerifyBookRequestId::from_uuid(id),
            UserId::from_uuid(translator_id),
            BookId::from_uuid(book_id),
            row.is_verified,
            send_date,
        ))
    }
}

#[async_trait]
impl VerifyBookRequestRepositoryPort for SqliteVerifyBookRequestRepository {
    async fn store(&self, request: &VerifyBookRequest) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO verify_book_requests (id, translator_id, book_id, is_verified, send_date)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                is_verified = excluded.is_verified
            "#,
        )
        .bind(request.id().as_uuid().to_string())
        .bind(request.translator_id().as_uuid().to_string())
        .bind(request.book_id().as_uuid().to_string())
        .bind(request.is_verified())
        .bind(request.send_date().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        request_id: VerifyBookRequestId,
    ) -> Result<Option<VerifyBookRequest>, RepositoryError> {
        let row: Option<VerifyBookRequestRow> = sqlx::query_as(
            "SELECT id, translator_id, book_id, is_verified, send_date FROM verify_book_requests WHERE id = ?",
        )
        .bind(request_id.as_uuid().to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(VerifyBookRequest::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<VerifyBookRequest>, RepositoryError> {
        let rows: Vec<VerifyBookRequestRow> = sqlx::query_as(
            "SELECT id, translator_id, book_id, is_verified, send_date FROM verify_book_requests ORDER BY send_date DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(VerifyBookRequest::try_from).collect()
    }

    async fn delete(&self, request_id: VerifyBookRequestId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM verify_book_requests WHERE id = ?")
            .bind(request_id.as_uuid().to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "verify request {}",
                request_id
            )));
        }

        Ok(())
    }
}
