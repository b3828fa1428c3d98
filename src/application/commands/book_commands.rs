//! Book Commands

use crate::domain::book::{BookId, ImageId, UserId};

/// 创建书籍命令
///
/// 创建动作同时以提交者身份开启一条审核请求。
#[derive(Debug, Clone)]
pub struct CreateBook {
    pub title: String,
    pub description: String,
    pub translator_id: UserId,
}

/// 编辑书籍命令
#[derive(Debug, Clone)]
pub struct EditBook {
    pub book_id: BookId,
    pub title: String,
    pub description: String,
}

/// 设置封面引用命令
#[derive(Debug, Clone)]
pub struct EditBookCover {
    pub book_id: BookId,
    pub cover_id: ImageId,
}

/// 删除书籍命令
#[derive(Debug, Clone)]
pub struct DeleteBook {
    pub book_id: BookId,
}
