//! Translation Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::TranslationRepositoryPort;
use crate::application::queries::{GetChapterTranslations, GetTranslation};
use crate::domain::book::{BookChapterTranslation, UserId};

/// 译文视图
#[derive(Debug, Clone)]
pub struct TranslationView {
    pub translator_id: UserId,
    pub text: String,
}

impl From<BookChapterTranslation> for TranslationView {
    fn from(translation: BookChapterTranslation) -> Self {
        Self {
            translator_id: translation.translator_id(),
            text: translation.text().to_string(),
        }
    }
}

/// GetTranslation Handler
pub struct GetTranslationHandler {
    translation_repo: Arc<dyn TranslationRepositoryPort>,
}

impl GetTranslationHandler {
    pub fn new(translation_repo: Arc<dyn TranslationRepositoryPort>) -> Self {
        Self { translation_repo }
    }

    pub async fn handle(&self, query: GetTranslation) -> Result<TranslationView, ApplicationError> {
        self.translation_repo
            .find(query.chapter_id, query.translator_id)
            .await?
            .map(TranslationView::from)
            .ok_or_else(|| {
                ApplicationError::not_found(
                    "BookChapterTranslation",
                    *query.chapter_id.as_uuid(),
                )
            })
    }
}

/// GetChapterTranslations Handler
pub struct GetChapterTranslationsHandler {
    translation_repo: Arc<dyn TranslationRepositoryPort>,
}

impl GetChapterTranslationsHandler {
    pub fn new(translation_repo: Arc<dyn TranslationRepositoryPort>) -> Self {
        Self { translation_repo }
    }

    pub async fn handle(
        &self,
        query: GetChapterTranslations,
    ) -> Result<Vec<TranslationView>, ApplicationError> {
        let translations = self
            .translation_repo
            .list_by_chapter(query.chapter_id)
            .await?;

        Ok(translations.into_iter().map(TranslationView::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::handlers::{AppendChapterHandler, BookChapterLocks, StoreTranslationHandler};
    use crate::application::commands::{AppendChapter, StoreTranslation};
    use crate::application::ports::{
        BookRepositoryPort, ChapterRepositoryPort,
    };
    use crate::domain::book::{Book, BookChapterId, BookId};
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteBookRepository,
        SqliteChapterRepository, SqliteTranslationRepository,
    };
    use uuid::Uuid;

    #[tokio::test]
    async fn test_store_then_query_roundtrip() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let book_repo: Arc<dyn BookRepositoryPort> =
            Arc::new(SqliteBookRepository::new(pool.clone()));
        let chapter_repo: Arc<dyn ChapterRepositoryPort> =
            Arc::new(SqliteChapterRepository::new(pool.clone()));
        let translation_repo: Arc<dyn TranslationRepositoryPort> =
            Arc::new(SqliteTranslationRepository::new(pool));

        let book = Book::new(BookId::new(), "待译书", "");
        book_repo.store(&book).await.unwrap();
        let appended = AppendChapterHandler::new(
            book_repo,
            chapter_repo.clone(),
            Arc::new(BookChapterLocks::new()),
        )
        .handle(AppendChapter {
            book_id: book.id(),
            title: "第一章".to_string(),
        })
        .await
        .unwrap();

        let store = StoreTranslationHandler::new(chapter_repo, translation_repo.clone());
        let translator = UserId::from_uuid(Uuid::new_v4());
        store
            .handle(StoreTranslation {
                chapter_id: appended.chapter_id,
                translator_id: translator,
                text: "译文正文".to_string(),
            })
            .await
            .unwrap();

        let get = GetTranslationHandler::new(translation_repo.clone());
        let view = get
            .handle(GetTranslation {
                chapter_id: appended.chapter_id,
                translator_id: translator,
            })
            .await
            .unwrap();
        assert_eq!(view.text, "译文正文");

        let list = GetChapterTranslationsHandler::new(translation_repo);
        assert_eq!(
            list.handle(GetChapterTranslations {
                chapter_id: appended.chapter_id,
            })
            .await
            .unwrap()
            .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_missing_translation_is_not_found() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        let translation_repo: Arc<dyn TranslationRepositoryPort> =
            Arc::new(SqliteTranslationRepository::new(pool));

        let err = GetTranslationHandler::new(translation_repo)
            .handle(GetTranslation {
                chapter_id: BookChapterId::new(),
                translator_id: UserId::from_uuid(Uuid::new_v4()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }
}
