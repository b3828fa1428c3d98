//! Translation Queries

use crate::domain::book::{BookChapterId, UserId};

/// 获取某译者对某章节的译文查询
#[derive(Debug, Clone)]
pub struct GetTranslation {
    pub chapter_id: BookChapterId,
    pub translator_id: UserId,
}

/// 获取某章节全部译文查询
#[derive(Debug, Clone)]
pub struct GetChapterTranslations {
    pub chapter_id: BookChapterId,
}
