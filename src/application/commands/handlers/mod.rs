//! Command Handlers

mod book_handlers;
mod chapter_handlers;
mod rating_handlers;
mod review_handlers;
mod taxonomy_handlers;
mod translation_handlers;

pub use book_handlers::{
    CreateBookHandler, CreateBookResponse, DeleteBookHandler, EditBookCoverHandler,
    EditBookHandler,
};
pub use chapter_handlers::{
    AppendChapterHandler, AppendChapterResponse, BookChapterLocks, DeleteChapterHandler,
    RenameChapterHandler,
};
pub use rating_handlers::{DeleteRatingHandler, StoreRatingHandler};
pub use review_handlers::{
    DecideVerificationHandler, DecideVerificationResponse, DeleteVerifyRequestHandler,
    SubmitBookHandler, SubmitBookResponse,
};
pub use taxonomy_handlers::{
    AssignBookAuthorHandler, AssignBookGenreHandler, CreateAuthorHandler, CreateAuthorResponse,
    CreateGenreHandler, CreateGenreResponse, DeleteAuthorHandler, DeleteGenreHandler,
    EditAuthorHandler, EditGenreHandler, UnassignBookAuthorHandler, UnassignBookGenreHandler,
};
pub use translation_handlers::StoreTranslationHandler;
