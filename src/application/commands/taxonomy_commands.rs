//! Taxonomy Commands

use crate::domain::book::BookId;
use crate::domain::taxonomy::{AuthorId, GenreId};

/// 创建作者命令
#[derive(Debug, Clone)]
pub struct CreateAuthor {
    pub first_name: String,
    pub second_name: String,
    pub middle_name: Option<String>,
    pub nickname: Option<String>,
}

/// 编辑作者命令
#[derive(Debug, Clone)]
pub struct EditAuthor {
    pub author_id: AuthorId,
    pub first_name: String,
    pub second_name: String,
    pub middle_name: Option<String>,
    pub nickname: Option<String>,
}

/// 删除作者命令
#[derive(Debug, Clone)]
pub struct DeleteAuthor {
    pub author_id: AuthorId,
}

/// 创建体裁命令
#[derive(Debug, Clone)]
pub struct CreateGenre {
    pub name: String,
}

/// 编辑体裁命令
#[derive(Debug, Clone)]
pub struct EditGenre {
    pub genre_id: GenreId,
    pub name: String,
}

/// 删除体裁命令
#[derive(Debug, Clone)]
pub struct DeleteGenre {
    pub genre_id: GenreId,
}

/// 建立书籍-作者关联
#[derive(Debug, Clone)]
pub struct AssignBookAuthor {
    pub book_id: BookId,
    pub author_id: AuthorId,
}

/// 解除书籍-作者关联
#[derive(Debug, Clone)]
pub struct UnassignBookAuthor {
    pub book_id: BookId,
    pub author_id: AuthorId,
}

/// 建立书籍-体裁关联
#[derive(Debug, Clone)]
pub struct AssignBookGenre {
    pub book_id: BookId,
    pub genre_id: GenreId,
}

/// 解除书籍-体裁关联
#[derive(Debug, Clone)]
pub struct UnassignBookGenre {
    pub book_id: BookId,
    pub genre_id: GenreId,
}
