//! SQLite Book Repository

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{BookRepositoryPort, RepositoryError};
use crate::domain::book::{Book, BookId, ImageId};

/// SQLite Book Repository
pub struct SqliteBookRepository {
    pool: DbPool,
}

impl SqliteBookRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct BookRow {
    id: String,
    cover_id: Option<String>,
    title: String,
    description: String,
    is_published: bool,
}

impl TryFrom<BookRow> for Book {
    type Error = RepositoryError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        let cover_id = row
            .cover_id
            .map(|raw| {
                Uuid::parse_str(&raw)
                    .map(ImageId::from_uuid)
                    .map_err(|e| RepositoryError::SerializationError(e.to_string()))
            })
            .transpose()?;

        Ok(Book::restore(
            BookId::from_uuid(id),
            cover_id,
            row.title,
            row.description,
            row.is_published,
        ))
    }
}

#[async_trait]
impl BookRepositoryPort for SqliteBookRepository {
    async fn store(&self, book: &Book) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO books (id, cover_id, title, description, is_published)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                cover_id = excluded.cover_id,
                title = excluded.title,
                description = excluded.description,
                is_published = excluded.is_published
            "#,
        )
        .bind(book.id().as_uuid().to_string())
        .bind(book.cover_id().map(|id| id.as_uuid().to_string()))
        .bind(book.title())
        .bind(book.description())
        .bind(book.is_published())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, book_id: BookId) -> Result<Option<Book>, RepositoryError> {
        let row: Option<BookRow> = sqlx::query_as(
            "SELECT id, cover_id, title, description, is_published FROM books WHERE id = ?",
        )
        .bind(book_id.as_uuid().to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(Book::try_from).transpose()
    }

    async fn delete(&self, book_id: BookId) -> Result<(), RepositoryError> {
        // 级联删除章节、译文、评分、关联与审核请求，使用事务确保原子性
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let id = book_id.as_uuid().to_string();

        sqlx::query(
            "DELETE FROM book_chapter_translations WHERE chapter_id IN (SELECT id FROM book_chapters WHERE book_id = ?)",
        )
        .bind(&id)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        sqlx::query("DELETE FROM book_chapters WHERE book_id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        sqlx::query("DELETE FROM book_ratings WHERE book_id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        sqlx::query("DELETE FROM book_authors WHERE book_id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        sqlx::query("DELETE FROM book_genres WHERE book_id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        sqlx::query("DELETE FROM verify_book_requests WHERE book_id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("book {}", book_id)));
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::{create_pool, run_migrations, DatabaseConfig};
    use super::*;

    async fn repo() -> SqliteBookRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteBookRepository::new(pool)
    }

    #[tokio::test]
    async fn test_store_and_find_roundtrip() {
        let repo = repo().await;

        let mut book = Book::new(BookId::new(), "标题", "描述");
        repo.store(&book).await.unwrap();

        let found = repo.find_by_id(book.id()).await.unwrap().unwrap();
        assert_eq!(found, book);

        // upsert 覆盖
        book.set_title("新标题");
        book.set_is_published(true);
        repo.store(&book).await.unwrap();

        let found = repo.find_by_id(book.id()).await.unwrap().unwrap();
        assert_eq!(found.title(), "新标题");
        assert!(found.is_published());
    }

    #[tokio::test]
    async fn test_cover_reference_roundtrip() {
        let repo = repo().await;

        let mut book = Book::new(BookId::new(), "a", "b");
        repo.store(&book).await.unwrap();
        assert!(repo
            .find_by_id(book.id())
            .await
            .unwrap()
            .unwrap()
            .cover_id()
            .is_none());

        let cover = ImageId::from_uuid(Uuid::new_v4());
        book.set_cover_id(Some(cover));
        repo.store(&book).await.unwrap();

        let found = repo.find_by_id(book.id()).await.unwrap().unwrap();
        assert_eq!(found.cover_id(), Some(cover));
    }

    #[tokio::test]
    async fn test_delete_missing_book_is_not_found() {
        let repo = repo().await;

        let err = repo.delete(BookId::new()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }
}
