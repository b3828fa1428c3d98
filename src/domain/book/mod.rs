//! Book Context - 书籍限界上下文
//!
//! 职责:
//! - 书籍聚合（标题、描述、封面引用、发布标志）
//! - 章节实体及其连续序号不变量
//! - 章节译文（按译者维度的 upsert）
//! - 用户评分

mod aggregate;
mod entities;
mod value_objects;

pub use aggregate::Book;
pub use entities::{BookChapter, BookChapterTranslation, BookRating};
pub use value_objects::{BookChapterId, BookId, ImageId, UserId};
