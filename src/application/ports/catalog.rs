//! Catalog Query Port - 目录查询端口
//!
//! 动态过滤/排序/分页的书籍检索。只有已发布的书籍对检索可见。
//! 所有谓词取合取（AND）；缺省谓词不施加约束；
//! 空的作者/体裁 id 集合视为"无约束"而非"匹配空集"。

use async_trait::async_trait;

use super::repositories::RepositoryError;
use crate::domain::book::{BookId, ImageId};
use crate::domain::taxonomy::{AuthorId, GenreId};

/// 排序键
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Rating,
    RatingCount,
    ChaptersCount,
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// 检索规格
///
/// page 为 1 起始；page 与 size 必须为正。
#[derive(Debug, Clone, Default)]
pub struct BookSearchSpec {
    pub page: u32,
    pub size: u32,
    pub title: Option<String>,
    pub author_ids: Option<Vec<AuthorId>>,
    pub genre_ids: Option<Vec<GenreId>>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub min_chapters_count: Option<u32>,
    pub max_chapters_count: Option<u32>,
    pub min_rating_count: Option<u32>,
    pub max_rating_count: Option<u32>,
    pub sort_by: Option<SortKey>,
    pub sort_direction: Option<SortDirection>,
}

impl BookSearchSpec {
    /// 第一页、给定页大小、无过滤条件
    pub fn first_page(size: u32) -> Self {
        Self {
            page: 1,
            size,
            ..Self::default()
        }
    }
}

/// 带评分聚合的书籍记录
#[derive(Debug, Clone, PartialEq)]
pub struct BookSummary {
    pub id: BookId,
    pub cover_id: Option<ImageId>,
    pub title: String,
    pub description: String,
    /// 评分算术平均值；无评分时为 0
    pub average_rating: f64,
    /// 评分行数
    pub rating_count: u32,
}

/// Catalog Query Port
#[async_trait]
pub trait CatalogQueryPort: Send + Sync {
    /// 按规格检索一页已发布书籍
    async fn search(&self, spec: &BookSearchSpec) -> Result<Vec<BookSummary>, RepositoryError>;

    /// 与 search 共享同一组谓词的命中总数
    async fn count_matching(&self, spec: &BookSearchSpec) -> Result<u64, RepositoryError>;

    /// 单本书籍记录（含聚合）
    async fn find_by_id(&self, book_id: BookId) -> Result<Option<BookSummary>, RepositoryError>;

    /// 批量解析书籍记录；空输入返回空结果
    async fn list_by_ids(&self, book_ids: &[BookId]) -> Result<Vec<BookSummary>, RepositoryError>;
}
