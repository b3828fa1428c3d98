//! Book Context - Entities

use super::{BookChapterId, BookId, UserId};

/// 书籍章节
///
/// 不变量:
/// - 同一 book 下的 index 集合恒为 {0..n-1}，无空洞无重复
/// - 重命名只改标题，不触碰 index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookChapter {
    id: BookChapterId,
    book_id: BookId,
    index: usize,
    title: String,
}

impl BookChapter {
    pub fn new(id: BookChapterId, book_id: BookId, index: usize, title: impl Into<String>) -> Self {
        Self {
            id,
            book_id,
            index,
            title: title.into(),
        }
    }

    pub fn id(&self) -> BookChapterId {
        self.id
    }

    pub fn book_id(&self) -> BookId {
        self.book_id
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }
}

/// 章节译文
///
/// 复合标识 (chapter, translator)：每个译者对每个章节至多一份译文，
/// 重复提交按 upsert 处理。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookChapterTranslation {
    chapter_id: BookChapterId,
    translator_id: UserId,
    text: String,
}

impl BookChapterTranslation {
    pub fn new(chapter_id: BookChapterId, translator_id: UserId, text: impl Into<String>) -> Self {
        Self {
            chapter_id,
            translator_id,
            text: text.into(),
        }
    }

    pub fn chapter_id(&self) -> BookChapterId {
        self.chapter_id
    }

    pub fn translator_id(&self) -> UserId {
        self.translator_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

/// 用户评分
///
/// 复合标识 (book, user)：每个用户对每本书至多一条评分，不保留历史。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookRating {
    book_id: BookId,
    user_id: UserId,
    value: i32,
}

impl BookRating {
    pub fn new(book_id: BookId, user_id: UserId, value: i32) -> Self {
        Self {
            book_id,
            user_id,
            value,
        }
    }

    pub fn book_id(&self) -> BookId {
        self.book_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn value(&self) -> i32 {
        self.value
    }
}
