//! 领域层
//!
//! 按限界上下文划分:
//! - Book Context: 书籍、章节、译文、评分
//! - Review Context: 出版审核请求
//! - Taxonomy Context: 作者、体裁及其与书籍的关联

pub mod book;
pub mod review;
pub mod taxonomy;
