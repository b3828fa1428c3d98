//! Rating Command Handlers

use std::sync::Arc;

use crate::application::commands::{DeleteRating, StoreRating};
use crate::application::error::ApplicationError;
use crate::application::ports::RatingRepositoryPort;
use crate::domain::book::BookRating;

/// StoreRating Handler
///
/// 同一 (book, user) 重复提交覆盖旧值，不保留历史。
pub struct StoreRatingHandler {
    rating_repo: Arc<dyn RatingRepositoryPort>,
}

impl StoreRatingHandler {
    pub fn new(rating_repo: Arc<dyn RatingRepositoryPort>) -> Self {
        Self { rating_repo }
    }

    pub async fn handle(&self, command: StoreRating) -> Result<(), ApplicationError> {
        let rating = BookRating::new(command.book_id, command.user_id, command.value);

        self.rating_repo.store(&rating).await?;

        Ok(())
    }
}

/// DeleteRating Handler
///
/// 评分不存在时为空操作。
pub struct DeleteRatingHandler {
    rating_repo: Arc<dyn RatingRepositoryPort>,
}

impl DeleteRatingHandler {
    pub fn new(rating_repo: Arc<dyn RatingRepositoryPort>) -> Self {
        Self { rating_repo }
    }

    pub async fn handle(&self, command: DeleteRating) -> Result<(), ApplicationError> {
        self.rating_repo
            .delete(command.book_id, command.user_id)
            .await?;

        Ok(())
    }
}
