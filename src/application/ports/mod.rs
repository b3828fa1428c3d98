//! Ports - 出站端口定义
//!
//! 持久化边界的抽象接口，具体实现在 infrastructure 层（SQLite）。
//! 每个实体一个仓储能力接口，目录查询单独成端口。

mod catalog;
mod repositories;

pub use catalog::{BookSearchSpec, BookSummary, CatalogQueryPort, SortDirection, SortKey};
pub use repositories::{
    AuthorRepositoryPort, BookAuthorRepositoryPort, BookGenreRepositoryPort, BookRepositoryPort,
    ChapterRepositoryPort, GenreRepositoryPort, RatingRepositoryPort, RepositoryError,
    TranslationRepositoryPort, VerifyBookRequestRepositoryPort,
};
