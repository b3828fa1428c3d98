//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 出站端口定义（各实体仓储、目录查询）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Book commands
    CreateBook,
    DeleteBook,
    EditBook,
    EditBookCover,
    // Chapter commands
    AppendChapter,
    DeleteChapter,
    RenameChapter,
    // Translation commands
    StoreTranslation,
    // Rating commands
    DeleteRating,
    StoreRating,
    // Review commands
    DecideVerification,
    DeleteVerifyRequest,
    SubmitBook,
    // Taxonomy commands
    AssignBookAuthor,
    AssignBookGenre,
    CreateAuthor,
    CreateGenre,
    DeleteAuthor,
    DeleteGenre,
    EditAuthor,
    EditGenre,
    UnassignBookAuthor,
    UnassignBookGenre,
    // Handlers
    handlers::{
        AppendChapterHandler, AppendChapterResponse, AssignBookAuthorHandler,
        AssignBookGenreHandler, BookChapterLocks, CreateAuthorHandler, CreateAuthorResponse,
        CreateBookHandler, CreateBookResponse, CreateGenreHandler, CreateGenreResponse,
        DecideVerificationHandler, DecideVerificationResponse, DeleteAuthorHandler,
        DeleteBookHandler, DeleteChapterHandler, DeleteGenreHandler, DeleteRatingHandler,
        DeleteVerifyRequestHandler, EditAuthorHandler, EditBookCoverHandler, EditBookHandler,
        EditGenreHandler, RenameChapterHandler, StoreRatingHandler, StoreTranslationHandler,
        SubmitBookHandler, SubmitBookResponse, UnassignBookAuthorHandler,
        UnassignBookGenreHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Catalog query
    BookSearchSpec,
    BookSummary,
    CatalogQueryPort,
    SortDirection,
    SortKey,
    // Repositories
    AuthorRepositoryPort,
    BookAuthorRepositoryPort,
    BookGenreRepositoryPort,
    BookRepositoryPort,
    ChapterRepositoryPort,
    GenreRepositoryPort,
    RatingRepositoryPort,
    RepositoryError,
    TranslationRepositoryPort,
    VerifyBookRequestRepositoryPort,
};

pub use queries::{
    // Catalog queries
    GetBook,
    GetBookChapters,
    GetBooksByIds,
    SearchBooks,
    // Rating queries
    GetRatingStatistics,
    // Review queries
    ListVerifyRequests,
    // Translation queries
    GetChapterTranslations,
    GetTranslation,
    // Handlers
    handlers::{
        ChapterView, GetBookChaptersHandler, GetBookHandler, GetBooksByIdsHandler,
        GetChapterTranslationsHandler, GetRatingStatisticsHandler, GetTranslationHandler,
        ListVerifyRequestsHandler, RatingStatistics, SearchBooksHandler, SearchBooksResponse,
        TranslationView, VerifyRequestView,
    },
};
