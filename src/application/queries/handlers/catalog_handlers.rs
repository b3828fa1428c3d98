//! Catalog Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    BookRepositoryPort, BookSummary, CatalogQueryPort, ChapterRepositoryPort,
};
use crate::application::queries::{GetBook, GetBookChapters, GetBooksByIds, SearchBooks};
use crate::domain::book::{BookChapter, BookChapterId};

// ============================================================================
// SearchBooks
// ============================================================================

/// 检索响应
///
/// total_pages = ceil(命中总数 / 页大小)；请求越界页返回空列表，
/// total_pages 与第一页一致。
#[derive(Debug, Clone)]
pub struct SearchBooksResponse {
    pub books: Vec<BookSummary>,
    pub total_pages: u32,
}

/// SearchBooks Handler
pub struct SearchBooksHandler {
    catalog: Arc<dyn CatalogQueryPort>,
}

impl SearchBooksHandler {
    pub fn new(catalog: Arc<dyn CatalogQueryPort>) -> Self {
        Self { catalog }
    }

    pub async fn handle(&self, query: SearchBooks) -> Result<SearchBooksResponse, ApplicationError> {
        let spec = query.spec;

        if spec.page == 0 || spec.size == 0 {
            return Err(ApplicationError::validation(
                "page and size must be positive",
            ));
        }

        let books = self.catalog.search(&spec).await?;
        let total = self.catalog.count_matching(&spec).await?;
        let total_pages = total.div_ceil(spec.size as u64) as u32;

        Ok(SearchBooksResponse { books, total_pages })
    }
}

// ============================================================================
// GetBook
// ============================================================================

/// GetBook Handler
pub struct GetBookHandler {
    catalog: Arc<dyn CatalogQueryPort>,
}

impl GetBookHandler {
    pub fn new(catalog: Arc<dyn CatalogQueryPort>) -> Self {
        Self { catalog }
    }

    pub async fn handle(&self, query: GetBook) -> Result<BookSummary, ApplicationError> {
        self.catalog
            .find_by_id(query.book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", *query.book_id.as_uuid()))
    }
}

// ============================================================================
// GetBooksByIds
// ============================================================================

/// GetBooksByIds Handler
///
/// 空输入返回空结果而非错误。
pub struct GetBooksByIdsHandler {
    catalog: Arc<dyn CatalogQueryPort>,
}

impl GetBooksByIdsHandler {
    pub fn new(catalog: Arc<dyn CatalogQueryPort>) -> Self {
        Self { catalog }
    }

    pub async fn handle(&self, query: GetBooksByIds) -> Result<Vec<BookSummary>, ApplicationError> {
        if query.book_ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self.catalog.list_by_ids(&query.book_ids).await?)
    }
}

// ============================================================================
// GetBookChapters
// ============================================================================

/// 章节视图
#[derive(Debug, Clone)]
pub struct ChapterView {
    pub chapter_id: BookChapterId,
    pub index: usize,
    pub title: String,
}

impl From<BookChapter> for ChapterView {
    fn from(chapter: BookChapter) -> Self {
        Self {
            chapter_id: chapter.id(),
            index: chapter.index(),
            title: chapter.title().to_string(),
        }
    }
}

/// GetBookChapters Handler
pub struct GetBookChaptersHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
}

impl GetBookChaptersHandler {
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
    ) -> Self {
        Self {
            book_repo,
            chapter_repo,
        }
    }

    pub async fn handle(&self, query: GetBookChapters) -> Result<Vec<ChapterView>, ApplicationError> {
        self.book_repo
            .find_by_id(query.book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", *query.book_id.as_uuid()))?;

        let chapters = self.chapter_repo.list_by_book(query.book_id).await?;

        Ok(chapters.into_iter().map(ChapterView::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::BookSearchSpec;
    use crate::domain::book::{Book, BookId};
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteBookRepository, SqliteCatalogQuery,
    };

    async fn handler_with_books(count: usize) -> SearchBooksHandler {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let book_repo = SqliteBookRepository::new(pool.clone());
        for i in 0..count {
            let mut book = Book::new(BookId::new(), format!("book-{:02}", i), "");
            book.set_is_published(true);
            book_repo.store(&book).await.unwrap();
        }

        SearchBooksHandler::new(Arc::new(SqliteCatalogQuery::new(pool)))
    }

    #[tokio::test]
    async fn test_total_pages_rounds_up() {
        let handler = handler_with_books(5).await;

        let resp = handler
            .handle(SearchBooks {
                spec: BookSearchSpec::first_page(2),
            })
            .await
            .unwrap();
        assert_eq!(resp.books.len(), 2);
        assert_eq!(resp.total_pages, 3);
    }

    #[tokio::test]
    async fn test_page_beyond_last_is_empty_with_same_total() {
        let handler = handler_with_books(5).await;

        let resp = handler
            .handle(SearchBooks {
                spec: BookSearchSpec {
                    page: 7,
                    ..BookSearchSpec::first_page(2)
                },
            })
            .await
            .unwrap();
        assert!(resp.books.is_empty());
        assert_eq!(resp.total_pages, 3);
    }

    #[tokio::test]
    async fn test_no_matches_means_zero_pages() {
        let handler = handler_with_books(0).await;

        let resp = handler
            .handle(SearchBooks {
                spec: BookSearchSpec::first_page(10),
            })
            .await
            .unwrap();
        assert!(resp.books.is_empty());
        assert_eq!(resp.total_pages, 0);
    }

    #[tokio::test]
    async fn test_zero_page_or_size_is_rejected() {
        let handler = handler_with_books(1).await;

        for spec in [
            BookSearchSpec {
                page: 0,
                size: 10,
                ..BookSearchSpec::default()
            },
            BookSearchSpec {
                page: 1,
                size: 0,
                ..BookSearchSpec::default()
            },
        ] {
            let err = handler.handle(SearchBooks { spec }).await.unwrap_err();
            assert!(matches!(err, ApplicationError::ValidationError(_)));
        }
    }
}
