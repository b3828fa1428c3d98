//! Rating Queries

use crate::domain::book::{BookId, UserId};

/// 评分统计查询
///
/// user_id 给定且该用户评过分时，结果才携带该用户的评分值。
#[derive(Debug, Clone)]
pub struct GetRatingStatistics {
    pub book_id: BookId,
    pub user_id: Option<UserId>,
}
