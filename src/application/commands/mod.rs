//! Commands - 命令定义与处理器

pub mod handlers;

mod book_commands;
mod chapter_commands;
mod rating_commands;
mod review_commands;
mod taxonomy_commands;
mod translation_commands;

pub use book_commands::{CreateBook, DeleteBook, EditBook, EditBookCover};
pub use chapter_commands::{AppendChapter, DeleteChapter, RenameChapter};
pub use rating_commands::{DeleteRating, StoreRating};
pub use review_commands::{DecideVerification, DeleteVerifyRequest, SubmitBook};
pub use taxonomy_commands::{
    AssignBookAuthor, AssignBookGenre, CreateAuthor, CreateGenre, DeleteAuthor, DeleteGenre,
    EditAuthor, EditGenre, UnassignBookAuthor, UnassignBookGenre,
};
pub use translation_commands::StoreTranslation;
