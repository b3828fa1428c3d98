//! Taxonomy Context - Entities

use super::{AuthorId, GenreId};
use crate::domain::book::{BookId, ImageId};

/// 作者
///
/// middle_name 与 nickname 为可选字段，未设置与空字符串是不同的状态。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    id: AuthorId,
    avatar_id: Option<ImageId>,
    first_name: String,
    second_name: String,
    middle_name: Option<String>,
    nickname: Option<String>,
}

impl Author {
    pub fn new(
        id: AuthorId,
        avatar_id: Option<ImageId>,
        first_name: impl Into<String>,
        second_name: impl Into<String>,
        middle_name: Option<String>,
        nickname: Option<String>,
    ) -> Self {
        Self {
            id,
            avatar_id,
            first_name: first_name.into(),
            second_name: second_name.into(),
            middle_name,
            nickname,
        }
    }

    pub fn id(&self) -> AuthorId {
        self.id
    }

    pub fn avatar_id(&self) -> Option<ImageId> {
        self.avatar_id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn second_name(&self) -> &str {
        &self.second_name
    }

    pub fn middle_name(&self) -> Option<&str> {
        self.middle_name.as_deref()
    }

    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref()
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) {
        self.first_name = first_name.into();
    }

    pub fn set_second_name(&mut self, second_name: impl Into<String>) {
        self.second_name = second_name.into();
    }

    pub fn set_middle_name(&mut self, middle_name: Option<String>) {
        self.middle_name = middle_name;
    }

    pub fn set_nickname(&mut self, nickname: Option<String>) {
        self.nickname = nickname;
    }

    pub fn set_avatar_id(&mut self, avatar_id: Option<ImageId>) {
        self.avatar_id = avatar_id;
    }
}

/// 体裁
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    id: GenreId,
    name: String,
}

impl Genre {
    pub fn new(id: GenreId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> GenreId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

/// 书籍-作者关联行
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookAuthor {
    book_id: BookId,
    author_id: AuthorId,
}

impl BookAuthor {
    pub fn new(book_id: BookId, author_id: AuthorId) -> Self {
        Self { book_id, author_id }
    }

    pub fn book_id(&self) -> BookId {
        self.book_id
    }

    pub fn author_id(&self) -> AuthorId {
        self.author_id
    }
}

/// 书籍-体裁关联行
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookGenre {
    book_id: BookId,
    genre_id: GenreId,
}

impl BookGenre {
    pub fn new(book_id: BookId, genre_id: GenreId) -> Self {
        Self { book_id, genre_id }
    }

    pub fn book_id(&self) -> BookId {
        self.book_id
    }

    pub fn genre_id(&self) -> GenreId {
        self.genre_id
    }
}
