//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（如 SQLite）
//!
//! 删除语义的非对称性是有意为之:
//! - 评分与关联行的删除为幂等空操作
//! - 书籍/章节/作者/体裁/审核请求的删除在行不存在时返回 NotFound

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::book::{
    Book, BookChapter, BookChapterId, BookChapterTranslation, BookId, BookRating, UserId,
};
use crate::domain::review::{VerifyBookRequest, VerifyBookRequestId};
use crate::domain::taxonomy::{Author, AuthorId, BookAuthor, BookGenre, Genre, GenreId};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Book Repository
// ============================================================================

/// Book Repository Port
#[async_trait]
pub trait BookRepositoryPort: Send + Sync {
    /// 保存书籍（upsert）
    async fn store(&self, book: &Book) -> Result<(), RepositoryError>;

    /// 根据 ID 查找书籍
    async fn find_by_id(&self, book_id: BookId) -> Result<Option<Book>, RepositoryError>;

    /// 删除书籍及其级联数据（章节、译文、评分、关联、审核请求）
    async fn delete(&self, book_id: BookId) -> Result<(), RepositoryError>;
}

// ============================================================================
// Chapter Repository
// ============================================================================

/// Chapter Repository Port
#[async_trait]
pub trait ChapterRepositoryPort: Send + Sync {
    /// 保存章节（upsert，含序号变更）
    async fn store(&self, chapter: &BookChapter) -> Result<(), RepositoryError>;

    /// 根据 ID 查找章节
    async fn find_by_id(
        &self,
        chapter_id: BookChapterId,
    ) -> Result<Option<BookChapter>, RepositoryError>;

    /// 获取某书的全部章节，按序号升序
    async fn list_by_book(&self, book_id: BookId) -> Result<Vec<BookChapter>, RepositoryError>;

    /// 删除章节；行不存在时返回 NotFound
    async fn delete(&self, chapter_id: BookChapterId) -> Result<(), RepositoryError>;
}

// ============================================================================
// Translation Repository
// ============================================================================

/// Translation Repository Port
#[async_trait]
pub trait TranslationRepositoryPort: Send + Sync {
    /// 保存译文（按 (chapter, translator) 复合键 upsert）
    async fn store(&self, translation: &BookChapterTranslation) -> Result<(), RepositoryError>;

    /// 查找某译者对某章节的译文
    async fn find(
        &self,
        chapter_id: BookChapterId,
        translator_id: UserId,
    ) -> Result<Option<BookChapterTranslation>, RepositoryError>;

    /// 获取某章节的全部译文
    async fn list_by_chapter(
        &self,
        chapter_id: BookChapterId,
    ) -> Result<Vec<BookChapterTranslation>, RepositoryError>;
}

// ============================================================================
// Rating Repository
// ============================================================================

/// Rating Repository Port
#[async_trait]
pub trait RatingRepositoryPort: Send + Sync {
    /// 保存评分（按 (book, user) 复合键 upsert，不保留历史）
    async fn store(&self, rating: &BookRating) -> Result<(), RepositoryError>;

    /// 删除评分；行不存在时为幂等空操作
    async fn delete(&self, book_id: BookId, user_id: UserId) -> Result<(), RepositoryError>;

    /// 查找某用户对某书的评分
    async fn find(
        &self,
        book_id: BookId,
        user_id: UserId,
    ) -> Result<Option<BookRating>, RepositoryError>;

    /// 某书评分的算术平均值；无评分时为 0
    async fn average_by_book(&self, book_id: BookId) -> Result<f64, RepositoryError>;

    /// 某书评分行数
    async fn count_by_book(&self, book_id: BookId) -> Result<u32, RepositoryError>;
}

// ============================================================================
// Verify Book Request Repository
// ============================================================================

/// Verify Book Request Repository Port
#[async_trait]
pub trait VerifyBookRequestRepositoryPort: Send + Sync {
    /// 保存审核请求（upsert，含结论写入）
    async fn store(&self, request: &VerifyBookRequest) -> Result<(), RepositoryError>;

    /// 根据 ID 查找审核请求
    async fn find_by_id(
        &self,
        request_id: VerifyBookRequestId,
    ) -> Result<Option<VerifyBookRequest>, RepositoryError>;

    /// 全部审核请求，按提交时间降序
    async fn list(&self) -> Result<Vec<VerifyBookRequest>, RepositoryError>;

    /// 删除审核请求；行不存在时返回 NotFound
    async fn delete(&self, request_id: VerifyBookRequestId) -> Result<(), RepositoryError>;
}

// ============================================================================
// Author / Genre Repositories
// ============================================================================

/// Author Repository Port
#[async_trait]
pub trait AuthorRepositoryPort: Send + Sync {
    async fn store(&self, author: &Author) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, author_id: AuthorId) -> Result<Option<Author>, RepositoryError>;

    /// 删除作者；行不存在时返回 NotFound
    async fn delete(&self, author_id: AuthorId) -> Result<(), RepositoryError>;
}

/// Genre Repository Port
#[async_trait]
pub trait GenreRepositoryPort: Send + Sync {
    async fn store(&self, genre: &Genre) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, genre_id: GenreId) -> Result<Option<Genre>, RepositoryError>;

    /// 删除体裁；行不存在时返回 NotFound
    async fn delete(&self, genre_id: GenreId) -> Result<(), RepositoryError>;
}

// ============================================================================
// Association Repositories
// ============================================================================

/// Book-Author 关联 Repository Port
#[async_trait]
pub trait BookAuthorRepositoryPort: Send + Sync {
    /// 建立关联（重复建立为 upsert 空操作）
    async fn store(&self, book_author: &BookAuthor) -> Result<(), RepositoryError>;

    /// 解除关联；行不存在时为幂等空操作
    async fn delete(&self, book_id: BookId, author_id: AuthorId) -> Result<(), RepositoryError>;
}

/// Book-Genre 关联 Repository Port
#[async_trait]
pub trait BookGenreRepositoryPort: Send + Sync {
    /// 建立关联（重复建立为 upsert 空操作）
    async fn store(&self, book_genre: &BookGenre) -> Result<(), RepositoryError>;

    /// 解除关联；行不存在时为幂等空操作
    async fn delete(&self, book_id: BookId, genre_id: GenreId) -> Result<(), RepositoryError>;
}
