//! Chapter Commands

use crate::domain::book::{BookChapterId, BookId};

/// 追加章节命令（序号 = 当前最大序号 + 1，空书为 0）
#[derive(Debug, Clone)]
pub struct AppendChapter {
    pub book_id: BookId,
    pub title: String,
}

/// 重命名章节命令（不触碰序号）
#[derive(Debug, Clone)]
pub struct RenameChapter {
    pub chapter_id: BookChapterId,
    pub title: String,
}

/// 删除章节命令（删除后对剩余章节做全量重排）
#[derive(Debug, Clone)]
pub struct DeleteChapter {
    pub chapter_id: BookChapterId,
}
