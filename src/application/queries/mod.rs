//! Queries - 查询定义与处理器

pub mod handlers;

mod catalog_queries;
mod rating_queries;
mod review_queries;
mod translation_queries;

pub use catalog_queries::{GetBook, GetBookChapters, GetBooksByIds, SearchBooks};
pub use rating_queries::GetRatingStatistics;
pub use review_queries::ListVerifyRequests;
pub use translation_queries::{GetChapterTranslations, GetTranslation};
