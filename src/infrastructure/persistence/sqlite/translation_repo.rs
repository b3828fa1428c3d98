//! SQLite Translation Repository

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{RepositoryError, TranslationRepositoryPort};
use crate::domain::book::{BookChapterId, BookChapterTranslation, UserId};

/// SQLite Translation Repository
pub struct SqliteTranslationRepository {
    pool: DbPool,
}

impl SqliteTranslationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct TranslationRow {
    chapter_id: String,
    translator_id: String,
    text: String,
}

impl TryFrom<TranslationRow> for BookChapterTranslation {
    type Error = RepositoryError;

    fn try_from(row: TranslationRow) -> Result<Self, Self::Error> {
        let chapter_id = Uuid::parse_str(&row.chapter_id)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        let translator_id = Uuid::parse_str(&row.translator_id)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        Ok(BookChapterTranslation::new(
            BookChapterId::from_uuid(chapter_id),
            UserId::from_uuid(translator_id),
            row.text,
        ))
    }
}

#[async_trait]
impl TranslationRepositoryPort for SqliteTranslationRepository {
    async fn store(&self, translation: &BookChapterTranslation) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO book_chapter_translations (chapter_id, translator_id, text)
            VALUES (?, ?, ?)
            ON CONFLICT(chapter_id, translator_id) DO UPDATE SET
                text = excluded.text
            "#,
        )
        .bind(translation.chapter_id().as_uuid().to_string())
        .bind(translation.translator_id().as_uuid().to_string())
        .bind(translation.text())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find(
        &self,
        chapter_id: BookChapterId,
        translator_id: UserId,
    ) -> Result<Option<BookChapterTranslation>, RepositoryError> {
        let row: Option<TranslationRow> = sqlx::query_as(
            "SELECT chapter_id, translator_id, text FROM book_chapter_translations WHERE chapter_id = ? AND translator_id = ?",
        )
        .bind(chapter_id.as_uuid().to_string())
        .bind(translator_id.as_uuid().to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(BookChapterTranslation::try_from).transpose()
    }

    async fn list_by_chapter(
        &self,
        chapter_id: BookChapterId,
    ) -> Result<Vec<BookChapterTranslation>, RepositoryError> {
        let rows: Vec<TranslationRow> = sqlx::query_as(
            "SELECT chapter_id, translator_id, text FROM book_chapter_translations WHERE chapter_id = ?",
        )
        .bind(chapter_id.as_uuid().to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter()
            .map(BookChapterTranslation::try_from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::{create_pool, run_migrations, DatabaseConfig};
    use super::*;

    async fn repo() -> SqliteTranslationRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteTranslationRepository::new(pool)
    }

    #[tokio::test]
    async fn test_upsert_on_composite_key() {
        let repo = repo().await;
        let chapter_id = BookChapterId::new();
        let translator = UserId::from_uuid(Uuid::new_v4());

        repo.store(&BookChapterTranslation::new(chapter_id, translator, "草稿"))
            .await
            .unwrap();
        repo.store(&BookChapterTranslation::new(chapter_id, translator, "定稿"))
            .await
            .unwrap();

        let found = repo.find(chapter_id, translator).await.unwrap().unwrap();
        assert_eq!(found.text(), "定稿");
        assert_eq!(repo.list_by_chapter(chapter_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_one_translation_per_translator() {
        let repo = repo().await;
        let chapter_id = BookChapterId::new();
        let first = UserId::from_uuid(Uuid::new_v4());
        let second = UserId::from_uuid(Uuid::new_v4());

        repo.store(&BookChapterTranslation::new(chapter_id, first, "译文甲"))
            .await
            .unwrap();
        repo.store(&BookChapterTranslation::new(chapter_id, second, "译文乙"))
            .await
            .unwrap();

        assert_eq!(repo.list_by_chapter(chapter_id).await.unwrap().len(), 2);
        assert!(repo
            .find(chapter_id, UserId::from_uuid(Uuid::new_v4()))
            .await
            .unwrap()
            .is_none());
    }
}
