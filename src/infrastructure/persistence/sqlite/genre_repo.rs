//! SQLite Genre Repository
//!
//! 含 book_genres 关联行的适配器。

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{BookGenreRepositoryPort, GenreRepositoryPort, RepositoryError};
use crate::domain::book::BookId;
use crate::domain::taxonomy::{BookGenre, Genre, GenreId};

/// SQLite Genre Repository
pub struct SqliteGenreRepository {
    pool: DbPool,
}

impl SqliteGenreRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct GenreRow {
    id: String,
    name: String,
}

impl TryFrom<GenreRow> for Genre {
    type Error = RepositoryError;

    fn try_from(row: GenreRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        Ok(Genre::new(GenreId::from_uuid(id), row.name))
    }
}

#[async_trait]
impl GenreRepositoryPort for SqliteGenreRepository {
    async fn store(&self, genre: &Genre) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO genres (id, name)
            VALUES (?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name
            "#,
        )
        .bind(genre.id().as_uuid().to_string())
        .bind(genre.name())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, genre_id: GenreId) -> Result<Option<Genre>, RepositoryError> {
        let row: Option<GenreRow> = sqlx::query_as("SELECT id, name FROM genres WHERE id = ?")
            .bind(genre_id.as_uuid().to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(Genre::try_from).transpose()
    }

    async fn delete(&self, genre_id: GenreId) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let id = genre_id.as_uuid().to_string();

        sqlx::query("DELETE FROM book_genres WHERE genre_id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let result = sqlx::query("DELETE FROM genres WHERE id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("genre {}", genre_id)));
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

/// SQLite Book-Genre 关联 Repository
pub struct SqliteBookGenreRepository {
    pool: DbPool,
}

impl SqliteBookGenreRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookGenreRepositoryPort for SqliteBookGenreRepository {
    async fn store(&self, book_genre: &BookGenre) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO book_genres (book_id, genre_id)
            VALUES (?, ?)
            ON CONFLICT(book_id, genre_id) DO NOTHING
            "#,
        )
        .bind(book_genre.book_id().as_uuid().to_string())
        .bind(book_genre.genre_id().as_uuid().to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, book_id: BookId, genre_id: GenreId) -> Result<(), RepositoryError> {
        // 行不存在时为空操作
        sqlx::query("DELETE FROM book_genres WHERE book_id = ? AND genre_id = ?")
            .bind(book_id.as_uuid().to_string())
            .bind(genre_id.as_uuid().to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::{create_pool, run_migrations, DatabaseConfig};
    use super::*;

    #[tokio::test]
    async fn test_genre_roundtrip_and_hard_delete() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        let repo = SqliteGenreRepository::new(pool);

        let mut genre = Genre::new(GenreId::new(), "奇幻");
        repo.store(&genre).await.unwrap();

        genre.set_name("史诗奇幻");
        repo.store(&genre).await.unwrap();
        let found = repo.find_by_id(genre.id()).await.unwrap().unwrap();
        assert_eq!(found.name(), "史诗奇幻");

        repo.delete(genre.id()).await.unwrap();
        let err = repo.delete(genre.id()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }
}
