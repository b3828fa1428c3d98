//! Taxonomy Context - 分类限界上下文
//!
//! 职责:
//! - 作者与体裁实体
//! - 书籍与作者/体裁的多对多关联行（无独立负载）

mod entities;
mod value_objects;

pub use entities::{Author, BookAuthor, BookGenre, Genre};
pub use value_objects::{AuthorId, GenreId};
