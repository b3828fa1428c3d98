//! Translation Commands

use crate::domain::book::{BookChapterId, UserId};

/// 提交译文命令（按 (chapter, translator) upsert）
#[derive(Debug, Clone)]
pub struct StoreTranslation {
    pub chapter_id: BookChapterId,
    pub translator_id: UserId,
    pub text: String,
}
