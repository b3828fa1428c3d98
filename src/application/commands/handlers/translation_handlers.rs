//! Translation Command Handlers

use std::sync::Arc;

use crate::application::commands::StoreTranslation;
use crate::application::error::ApplicationError;
use crate::application::ports::{ChapterRepositoryPort, TranslationRepositoryPort};
use crate::domain::book::BookChapterTranslation;

/// StoreTranslation Handler
///
/// 按 (chapter, translator) upsert；每个译者对每个章节至多一份译文。
pub struct StoreTranslationHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    translation_repo: Arc<dyn TranslationRepositoryPort>,
}

impl StoreTranslationHandler {
    pub fn new(
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
        translation_repo: Arc<dyn TranslationRepositoryPort>,
    ) -> Self {
        Self {
            chapter_repo,
            translation_repo,
        }
    }

    pub async fn handle(&self, command: StoreTranslation) -> Result<(), ApplicationError> {
        self.chapter_repo
            .find_by_id(command.chapter_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::not_found("BookChapter", *command.chapter_id.as_uuid())
            })?;

        let translation = BookChapterTranslation::new(
            command.chapter_id,
            command.translator_id,
            command.text,
        );

        self.translation_repo.store(&translation).await?;

        tracing::info!(
            chapter_id = %command.chapter_id,
            translator_id = %command.translator_id,
            "Chapter translation stored"
        );

        Ok(())
    }
}
