//! Rating Commands

use crate::domain::book::{BookId, UserId};

/// 提交评分命令（重复提交覆盖旧值）
#[derive(Debug, Clone)]
pub struct StoreRating {
    pub book_id: BookId,
    pub user_id: UserId,
    pub value: i32,
}

/// 删除评分命令（不存在时为空操作）
#[derive(Debug, Clone)]
pub struct DeleteRating {
    pub book_id: BookId,
    pub user_id: UserId,
}
