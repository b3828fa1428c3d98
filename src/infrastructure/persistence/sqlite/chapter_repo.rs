//! SQLite Chapter Repository

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{ChapterRepositoryPort, RepositoryError};
use crate::domain::book::{BookChapter, BookChapterId, BookId};

/// SQLite Chapter Repository
pub struct SqliteChapterRepository {
    pool: DbPool,
}

impl SqliteChapterRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ChapterRow {
    id: String,
    book_id: String,
    chapter_index: i64,
    title: String,
}

impl TryFrom<ChapterRow> for BookChapter {
    type Error = RepositoryError;

    fn try_from(row: ChapterRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        let book_id = Uuid::parse_str(&row.book_id)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        Ok(BookChapter::new(
            BookChapterId::from_uuid(id),
            BookId::from_uuid(book_id),
            row.chapter_index as usize,
            row.title,
        ))
    }
}

#[async_trait]
impl ChapterRepositoryPort for SqliteChapterRepository {
    async fn store(&self, chapter: &BookChapter) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO book_chapters (id, book_id, chapter_index, title)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                book_id = excluded.book_id,
                chapter_index = excluded.chapter_index,
                title = excluded.title
            "#,
        )
        .bind(chapter.id().as_uuid().to_string())
        .bind(chapter.book_id().as_uuid().to_string())
        .bind(chapter.index() as i64)
        .bind(chapter.title())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        chapter_id: BookChapterId,
    ) -> Result<Option<BookChapter>, RepositoryError> {
        let row: Option<ChapterRow> = sqlx::query_as(
            "SELECT id, book_id, chapter_index, title FROM book_chapters WHERE id = ?",
        )
        .bind(chapter_id.as_uuid().to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(BookChapter::try_from).transpose()
    }

    async fn list_by_book(&self, book_id: BookId) -> Result<Vec<BookChapter>, RepositoryError> {
        let rows: Vec<ChapterRow> = sqlx::query_as(
            "SELECT id, book_id, chapter_index, title FROM book_chapters WHERE book_id = ? ORDER BY chapter_index ASC",
        )
        .bind(book_id.as_uuid().to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(BookChapter::try_from).collect()
    }

    async fn delete(&self, chapter_id: BookChapterId) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let id = chapter_id.as_uuid().to_string();

        sqlx::query("DELETE FROM book_chapter_translations WHERE chapter_id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let result = sqlx::query("DELETE FROM book_chapters WHERE id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("chapter {}", chapter_id)));
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
