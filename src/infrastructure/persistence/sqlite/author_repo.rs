//! SQLite Author Repository
//!
//! 含 book_authors 关联行的适配器。

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{AuthorRepositoryPort, BookAuthorRepositoryPort, RepositoryError};
use crate::domain::book::{BookId, ImageId};
use crate::domain::taxonomy::{Author, AuthorId, BookAuthor};

/// SQLite Author Repository
pub struct SqliteAuthorRepository {
    pool: DbPool,
}

impl SqliteAuthorRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AuthorRow {
    id: String,
    avatar_id: Option<String>,
    first_name: String,
    second_name: String,
    middle_name: Option<String>,
    nickname: Option<String>,
}

impl TryFrom<AuthorRow> for Author {
    type Error = RepositoryError;

    fn try_from(row: AuthorRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        let avatar_id = row
            .avatar_id
            .map(|raw| {
                Uuid::parse_str(&raw)
                    .map(ImageId::from_uuid)
                    .map_err(|e| RepositoryError::SerializationError(e.to_string()))
            })
            .transpose()?;

        Ok(Author::new(
            AuthorId::from_uuid(id),
            avatar_id,
            row.first_name,
            row.second_name,
            row.middle_name,
            row.nickname,
        ))
    }
}

#[async_trait]
impl AuthorRepositoryPort for SqliteAuthorRepository {
    async fn store(&self, author: &Author) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO authors (id, avatar_id, first_name, second_name, middle_name, nickname)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                avatar_id = excluded.avatar_id,
                first_name = excluded.first_name,
                second_name = excluded.second_name,
                middle_name = excluded.middle_name,
                nickname = excluded.nickname
            "#,
        )
        .bind(author.id().as_uuid().to_string())
        .bind(author.avatar_id().map(|id| id.as_uuid().to_string()))
        .bind(author.first_name())
        .bind(author.second_name())
        .bind(author.middle_name())
        .bind(author.nickname())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, author_id: AuthorId) -> Result<Option<Author>, RepositoryError> {
        let row: Option<AuthorRow> = sqlx::query_as(
            "SELECT id, avatar_id, first_name, second_name, middle_name, nickname FROM authors WHERE id = ?",
        )
        .bind(author_id.as_uuid().to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(Author::try_from).transpose()
    }

    async fn delete(&self, author_id: AuthorId) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let id = author_id.as_uuid().to_string();

        sqlx::query("DELETE FROM book_authors WHERE author_id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let result = sqlx::query("DELETE FROM authors WHERE id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("author {}", author_id)));
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

/// SQLite Book-Author 关联 Repository
pub struct SqliteBookAuthorRepository {
    pool: DbPool,
}

impl SqliteBookAuthorRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookAuthorRepositoryPort for SqliteBookAuthorRepository {
    async fn store(&self, book_author: &BookAuthor) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO book_authors (book_id, author_id)
            VALUES (?, ?)
            ON CONFLICT(book_id, author_id) DO NOTHING
            "#,
        )
        .bind(book_author.book_id().as_uuid().to_string())
        .bind(book_author.author_id().as_uuid().to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, book_id: BookId, author_id: AuthorId) -> Result<(), RepositoryError> {
        // 行不存在时为空操作
        sqlx::query("DELETE FROM book_authors WHERE book_id = ? AND author_id = ?")
            .bind(book_id.as_uuid().to_string())
            .bind(author_id.as_uuid().to_string())
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
    async fn test_optional_fields_roundtrip() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        let repo = SqliteAuthorRepository::new(pool);

        let anonymous = Author::new(AuthorId::new(), None, "Иван", "Петров", None, None);
        repo.store(&anonymous).await.unwrap();
        let found = repo.find_by_id(anonymous.id()).await.unwrap().unwrap();
        assert_eq!(found.middle_name(), None);
        assert_eq!(found.nickname(), None);

        let full = Author::new(
            AuthorId::new(),
            Some(ImageId::from_uuid(Uuid::new_v4())),
            "Лев",
            "Толстой",
            Some("Николаевич".to_string()),
            Some("классик".to_string()),
        );
        repo.store(&full).await.unwrap();
        let found = repo.find_by_id(full.id()).await.unwrap().unwrap();
        assert_eq!(found.middle_name(), Some("Николаевич"));
        assert_eq!(found.nickname(), Some("классик"));
        assert!(found.avatar_id().is_some());
    }

    #[tokio::test]
    async fn test_association_is_idempotent() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        let repo = SqliteBookAuthorRepository::new(pool);

        let link = BookAuthor::new(BookId::new(), AuthorId::new());
        repo.store(&link).await.unwrap();
        // 重复建立与重复解除都不报错
        repo.store(&link).await.unwrap();
        repo.delete(link.book_id(), link.author_id()).await.unwrap();
        repo.delete(link.book_id(), link.author_id()).await.unwrap();
    }
}
