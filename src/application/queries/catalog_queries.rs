//! Catalog Queries

use crate::application::ports::BookSearchSpec;
use crate::domain::book::BookId;

/// 目录检索查询
#[derive(Debug, Clone)]
pub struct SearchBooks {
    pub spec: BookSearchSpec,
}

/// 获取单本书籍查询
#[derive(Debug, Clone)]
pub struct GetBook {
    pub book_id: BookId,
}

/// 批量获取书籍查询
#[derive(Debug, Clone)]
pub struct GetBooksByIds {
    pub book_ids: Vec<BookId>,
}

/// 获取某书章节列表查询（按序号升序）
#[derive(Debug, Clone)]
pub struct GetBookChapters {
    pub book_id: BookId,
}
