//! Book Command Handlers

use chrono::Utc;
use std::sync::Arc;

use crate::application::commands::{CreateBook, DeleteBook, EditBook, EditBookCover};
use crate::application::error::ApplicationError;
use crate::application::ports::{BookRepositoryPort, VerifyBookRequestRepositoryPort};
use crate::domain::book::{Book, BookId};
use crate::domain::review::{VerifyBookRequest, VerifyBookRequestId};

// ============================================================================
// CreateBook
// ============================================================================

/// 创建书籍响应
#[derive(Debug, Clone)]
pub struct CreateBookResponse {
    pub book_id: BookId,
    pub request_id: VerifyBookRequestId,
}

/// CreateBook Handler
///
/// 书籍以未发布状态落库，并在同一调用内开启一条未决审核请求。
pub struct CreateBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    verify_repo: Arc<dyn VerifyBookRequestRepositoryPort>,
}

impl CreateBookHandler {
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        verify_repo: Arc<dyn VerifyBookRequestRepositoryPort>,
    ) -> Self {
        Self {
            book_repo,
            verify_repo,
        }
    }

    pub async fn handle(&self, command: CreateBook) -> Result<CreateBookResponse, ApplicationError> {
        let book = Book::new(BookId::new(), command.title, command.description);
        self.book_repo.store(&book).await?;

        let request = VerifyBookRequest::new(
            VerifyBookRequestId::new(),
            command.translator_id,
            book.id(),
            Utc::now(),
        );
        self.verify_repo.store(&request).await?;

        tracing::info!(
            book_id = %book.id(),
            request_id = %request.id(),
            title = %book.title(),
            "Book created (unpublished), verify request opened"
        );

        Ok(CreateBookResponse {
            book_id: book.id(),
            request_id: request.id(),
        })
    }
}

// ============================================================================
// EditBook
// ============================================================================

/// EditBook Handler
pub struct EditBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl EditBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, command: EditBook) -> Result<(), ApplicationError> {
        let mut book = self
            .book_repo
            .find_by_id(command.book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", *command.book_id.as_uuid()))?;

        book.set_title(command.title);
        book.set_description(command.description);

        self.book_repo.store(&book).await?;

        Ok(())
    }
}

// ============================================================================
// EditBookCover
// ============================================================================

/// EditBookCover Handler
pub struct EditBookCoverHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl EditBookCoverHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, command: EditBookCover) -> Result<(), ApplicationError> {
        let mut book = self
            .book_repo
            .find_by_id(command.book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", *command.book_id.as_uuid()))?;

        book.set_cover_id(Some(command.cover_id));

        self.book_repo.store(&book).await?;

        Ok(())
    }
}

// ============================================================================
// DeleteBook
// ============================================================================

/// DeleteBook Handler
pub struct DeleteBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl DeleteBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, command: DeleteBook) -> Result<(), ApplicationError> {
        let book = self
            .book_repo
            .find_by_id(command.book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", *command.book_id.as_uuid()))?;

        self.book_repo.delete(command.book_id).await?;

        tracing::info!(book_id = %command.book_id, title = %book.title(), "Book deleted");

        Ok(())
    }
}
