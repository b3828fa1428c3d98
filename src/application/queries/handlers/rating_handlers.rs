//! Rating Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::RatingRepositoryPort;
use crate::application::queries::GetRatingStatistics;

/// 评分统计
///
/// 无评分时 average = 0、count = 0；user_rating 只在查询带
/// user_id 且该用户评过分时出现。
#[derive(Debug, Clone, PartialEq)]
pub struct RatingStatistics {
    pub average: f64,
    pub count: u32,
    pub user_rating: Option<i32>,
}

/// GetRatingStatistics Handler
pub struct GetRatingStatisticsHandler {
    rating_repo: Arc<dyn RatingRepositoryPort>,
}

impl GetRatingStatisticsHandler {
    pub fn new(rating_repo: Arc<dyn RatingRepositoryPort>) -> Self {
        Self { rating_repo }
    }

    pub async fn handle(
        &self,
        query: GetRatingStatistics,
    ) -> Result<RatingStatistics, ApplicationError> {
        let average = self.rating_repo.average_by_book(query.book_id).await?;
        let count = self.rating_repo.count_by_book(query.book_id).await?;

        let user_rating = match query.user_id {
            Some(user_id) => self
                .rating_repo
                .find(query.book_id, user_id)
                .await?
                .map(|rating| rating.value()),
            None => None,
        };

        Ok(RatingStatistics {
            average,
            count,
            user_rating,
        })
    }
}
