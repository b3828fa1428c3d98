//! Taxonomy Command Handlers

use std::sync::Arc;

use crate::application::commands::{
    AssignBookAuthor, AssignBookGenre, CreateAuthor, CreateGenre, DeleteAuthor, DeleteGenre,
    EditAuthor, EditGenre, UnassignBookAuthor, UnassignBookGenre,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AuthorRepositoryPort, BookAuthorRepositoryPort, BookGenreRepositoryPort, GenreRepositoryPort,
};
use crate::domain::taxonomy::{Author, AuthorId, BookAuthor, BookGenre, Genre, GenreId};

// ============================================================================
// Author
// ============================================================================

/// 创建作者响应
#[derive(Debug, Clone)]
pub struct CreateAuthorResponse {
    pub author_id: AuthorId,
}

/// CreateAuthor Handler
pub struct CreateAuthorHandler {
    author_repo: Arc<dyn AuthorRepositoryPort>,
}

impl CreateAuthorHandler {
    pub fn new(author_repo: Arc<dyn AuthorRepositoryPort>) -> Self {
        Self { author_repo }
    }

    pub async fn handle(
        &self,
        command: CreateAuthor,
    ) -> Result<CreateAuthorResponse, ApplicationError> {
        let author = Author::new(
            AuthorId::new(),
            None,
            command.first_name,
            command.second_name,
            command.middle_name,
            command.nickname,
        );

        self.author_repo.store(&author).await?;

        Ok(CreateAuthorResponse {
            author_id: author.id(),
        })
    }
}

/// EditAuthor Handler
pub struct EditAuthorHandler {
    author_repo: Arc<dyn AuthorRepositoryPort>,
}

impl EditAuthorHandler {
    pub fn new(author_repo: Arc<dyn AuthorRepositoryPort>) -> Self {
        Self { author_repo }
    }

    pub async fn handle(&self, command: EditAuthor) -> Result<(), ApplicationError> {
        let mut author = self
            .author_repo
            .find_by_id(command.author_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Author", *command.author_id.as_uuid()))?;

        author.set_first_name(command.first_name);
        author.set_second_name(command.second_name);
        author.set_middle_name(command.middle_name);
        author.set_nickname(command.nickname);

        self.author_repo.store(&author).await?;

        Ok(())
    }
}

/// DeleteAuthor Handler
pub struct DeleteAuthorHandler {
    author_repo: Arc<dyn AuthorRepositoryPort>,
}

impl DeleteAuthorHandler {
    pub fn new(author_repo: Arc<dyn AuthorRepositoryPort>) -> Self {
        Self { author_repo }
    }

    pub async fn handle(&self, command: DeleteAuthor) -> Result<(), ApplicationError> {
        self.author_repo
            .find_by_id(command.author_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Author", *command.author_id.as_uuid()))?;

        self.author_repo.delete(command.author_id).await?;

        Ok(())
    }
}

// ============================================================================
// Genre
// ============================================================================

/// 创建体裁响应
#[derive(Debug, Clone)]
pub struct CreateGenreResponse {
    pub genre_id: GenreId,
}

/// CreateGenre Handler
pub struct CreateGenreHandler {
    genre_repo: Arc<dyn GenreRepositoryPort>,
}

impl CreateGenreHandler {
    pub fn new(genre_repo: Arc<dyn GenreRepositoryPort>) -> Self {
        Self { genre_repo }
    }

    pub async fn handle(
        &self,
        command: CreateGenre,
    ) -> Result<CreateGenreResponse, ApplicationError> {
        let genre = Genre::new(GenreId::new(), command.name);

        self.genre_repo.store(&genre).await?;

        Ok(CreateGenreResponse {
            genre_id: genre.id(),
        })
    }
}

/// EditGenre Handler
pub struct EditGenreHandler {
    genre_repo: Arc<dyn GenreRepositoryPort>,
}

impl EditGenreHandler {
    pub fn new(genre_repo: Arc<dyn GenreRepositoryPort>) -> Self {
        Self { genre_repo }
    }

    pub async fn handle(&self, command: EditGenre) -> Result<(), ApplicationError> {
        let mut genre = self
            .genre_repo
            .find_by_id(command.genre_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Genre", *command.genre_id.as_uuid()))?;

        genre.set_name(command.name);

        self.genre_repo.store(&genre).await?;

        Ok(())
    }
}

/// DeleteGenre Handler
pub struct DeleteGenreHandler {
    genre_repo: Arc<dyn GenreRepositoryPort>,
}

impl DeleteGenreHandler {
    pub fn new(genre_repo: Arc<dyn GenreRepositoryPort>) -> Self {
        Self { genre_repo }
    }

    pub async fn handle(&self, command: DeleteGenre) -> Result<(), ApplicationError> {
        self.genre_repo
            .find_by_id(command.genre_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Genre", *command.genre_id.as_uuid()))?;

        self.genre_repo.delete(command.genre_id).await?;

        Ok(())
    }
}

// ============================================================================
// Associations
// ============================================================================

/// AssignBookAuthor Handler
pub struct AssignBookAuthorHandler {
    book_author_repo: Arc<dyn BookAuthorRepositoryPort>,
}

impl AssignBookAuthorHandler {
    pub fn new(book_author_repo: Arc<dyn BookAuthorRepositoryPort>) -> Self {
        Self { book_author_repo }
    }

    pub async fn handle(&self, command: AssignBookAuthor) -> Result<(), ApplicationError> {
        let link = BookAuthor::new(command.book_id, command.author_id);
        self.book_author_repo.store(&link).await?;
        Ok(())
    }
}

/// UnassignBookAuthor Handler
pub struct UnassignBookAuthorHandler {
    book_author_repo: Arc<dyn BookAuthorRepositoryPort>,
}

impl UnassignBookAuthorHandler {
    pub fn new(book_author_repo: Arc<dyn BookAuthorRepositoryPort>) -> Self {
        Self { book_author_repo }
    }

    pub async fn handle(&self, command: UnassignBookAuthor) -> Result<(), ApplicationError> {
        self.book_author_repo
            .delete(command.book_id, command.author_id)
            .await?;
        Ok(())
    }
}

/// AssignBookGenre Handler
pub struct AssignBookGenreHandler {
    book_genre_repo: Arc<dyn BookGenreRepositoryPort>,
}

impl AssignBookGenreHandler {
    pub fn new(book_genre_repo: Arc<dyn BookGenreRepositoryPort>) -> Self {
        Self { book_genre_repo }
    }

    pub async fn handle(&self, command: AssignBookGenre) -> Result<(), ApplicationError> {
        let link = BookGenre::new(command.book_id, command.genre_id);
        self.book_genre_repo.store(&link).await?;
        Ok(())
    }
}

/// UnassignBookGenre Handler
pub struct UnassignBookGenreHandler {
    book_genre_repo: Arc<dyn BookGenreRepositoryPort>,
}

impl UnassignBookGenreHandler {
    pub fn new(book_genre_repo: Arc<dyn BookGenreRepositoryPort>) -> Self {
        Self { book_genre_repo }
    }

    pub async fn handle(&self, command: UnassignBookGenre) -> Result<(), ApplicationError> {
        self.book_genre_repo
            .delete(command.book_id, command.genre_id)
            .await?;
        Ok(())
    }
}
