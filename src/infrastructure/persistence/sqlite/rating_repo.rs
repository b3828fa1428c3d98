//! SQLite Rating Repository

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{RatingRepositoryPort, RepositoryError};
use crate::domain::book::{BookId, BookRating, UserId};

/// SQLite Rating Repository
pub struct SqliteRatingRepository {
    pool: DbPool,
}

impl SqliteRatingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct RatingRow {
    book_id: String,
    user_id: String,
    value: i64,
}

impl TryFrom<RatingRow> for BookRating {
    type Error = RepositoryError;

    fn try_from(row: RatingRow) -> Result<Self, Self::Error> {
        let book_id = Uuid::parse_str(&row.book_id)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        let user_id = Uuid::parse_str(&row.user_id)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        Ok(BookRating::new(
            BookId::from_uuid(book_id),
            UserId::from_uuid(user_id),
            row.value as i32,
        ))
    }
}

#[async_trait]
impl RatingRepositoryPort for SqliteRatingRepository {
    async fn store(&self, rating: &BookRating) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO book_ratings (book_id, user_id, value)
            VALUES (?, ?, ?)
            ON CONFLICT(book_id, user_id) DO UPDATE SET
                value = excluded.value
            "#,
        )
        .bind(rating.book_id().as_uuid().to_string())
        .bind(rating.user_id().as_uuid().to_string())
        .bind(rating.value() as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, book_id: BookId, user_id: UserId) -> Result<(), RepositoryError> {
        // 行不存在时为空操作
        sqlx::query("DELETE FROM book_ratings WHERE book_id = ? AND user_id = ?")
            .bind(book_id.as_uuid().to_string())
            .bind(user_id.as_uuid().to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find(
        &self,
        book_id: BookId,
        user_id: UserId,
    ) -> Result<Option<BookRating>, RepositoryError> {
        let row: Option<RatingRow> = sqlx::query_as(
            "SELECT book_id, user_id, value FROM book_ratings WHERE book_id = ? AND user_id = ?",
        )
        .bind(book_id.as_uuid().to_string())
        .bind(user_id.as_uuid().to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(BookRating::try_from).transpose()
    }

    async fn average_by_book(&self, book_id: BookId) -> Result<f64, RepositoryError> {
        let average: f64 =
            sqlx::query_scalar("SELECT COALESCE(AVG(value), 0.0) FROM book_ratings WHERE book_id = ?")
                .bind(book_id.as_uuid().to_string())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(average)
    }

    async fn count_by_book(&self, book_id: BookId) -> Result<u32, RepositoryError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_ratings WHERE book_id = ?")
                .bind(book_id.as_uuid().to_string())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(count as u32)
    }
}
