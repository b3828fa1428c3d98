//! Query Handlers

mod catalog_handlers;
mod rating_handlers;
mod review_handlers;
mod translation_handlers;

pub use catalog_handlers::{
    ChapterView, GetBookChaptersHandler, GetBookHandler, GetBooksByIdsHandler, SearchBooksHandler,
    SearchBooksResponse,
};
pub use rating_handlers::{GetRatingStatisticsHandler, RatingStatistics};
pub use review_handlers::{ListVerifyRequestsHandler, VerifyRequestView};
pub use translation_handlers::{
    GetChapterTranslationsHandler, GetTranslationHandler, TranslationView,
};
