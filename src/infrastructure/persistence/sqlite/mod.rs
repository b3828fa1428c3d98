//! SQLite 持久化适配器
//!
//! 实现 application/ports 中定义的仓储端口与目录查询端口。
//! 存储约定:
//! - UUID 以 TEXT 存储
//! - 时间戳以 RFC3339 TEXT 存储
//! - 可选字段以 NULLable 列存储，读取时还原为 Option

mod author_repo;
mod book_repo;
mod catalog_query;
mod chapter_repo;
mod database;
mod genre_repo;
mod rating_repo;
mod review_repo;
mod translation_repo;

pub use author_repo::{SqliteAuthorRepository, SqliteBookAuthorRepository};
pub use book_repo::SqliteBookRepository;
pub use catalog_query::SqliteCatalogQuery;
pub use chapter_repo::SqliteChapterRepository;
pub use database::{create_pool, run_migrations, DatabaseConfig, DbPool};
pub use genre_repo::{SqliteBookGenreRepository, SqliteGenreRepository};
pub use rating_repo::SqliteRatingRepository;
pub use review_repo::SqliteVerifyBookRequestRepository;
pub use translation_repo::SqliteTranslationRepository;
