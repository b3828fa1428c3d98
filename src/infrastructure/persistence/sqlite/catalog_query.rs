//! SQLite Catalog Query - 目录检索适配器
//!
//! 动态过滤先收集为结构化谓词列表，再一次性编译为完整 SQL，
//! 保证所有谓词都在执行前生效。计数查询与检索查询共享同一组
//! 谓词，total_pages 因此按命中集计算。

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{
    BookSearchSpec, BookSummary, CatalogQueryPort, RepositoryError, SortDirection, SortKey,
};
use crate::domain::book::{BookId, ImageId};

/// 评分聚合表达式；无评分的书平均分为 0
const AVERAGE_EXPR: &str = "COALESCE(AVG(br.value), 0.0)";

const SUMMARY_COLUMNS: &str = "b.id, b.cover_id, b.title, b.description, \
     COALESCE(AVG(br.value), 0.0) AS average_rating, \
     COUNT(br.value) AS rating_count";

const GROUP_BY: &str = "GROUP BY b.id, b.cover_id, b.title, b.description";

/// SQLite Catalog Query
pub struct SqliteCatalogQuery {
    pool: DbPool,
}

impl SqliteCatalogQuery {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct BookSummaryRow {
    id: String,
    cover_id: Option<String>,
    title: String,
    description: String,
    average_rating: f64,
    rating_count: i64,
}

impl TryFrom<BookSummaryRow> for BookSummary {
    type Error = RepositoryError;

    fn try_from(row: BookSummaryRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        let cover_id = row
            .cover_id
            .map(|raw| {
                Uuid::parse_str(&raw)
                    .map(ImageId::from_uuid)
                    .map_err(|e| RepositoryError::SerializationError(e.to_string()))
            })
            .transpose()?;

        Ok(BookSummary {
            id: BookId::from_uuid(id),
            cover_id,
            title: row.title,
            description: row.description,
            average_rating: row.average_rating,
            rating_count: row.rating_count as u32,
        })
    }
}

/// 谓词参数
enum QueryArg {
    Text(String),
    Int(i64),
    Real(f64),
}

/// 编译后的谓词集
///
/// WHERE 与 HAVING 分开保存；参数顺序与占位符在最终 SQL 中的
/// 出现顺序一致（先 WHERE 后 HAVING）。
struct PredicateSet {
    where_clauses: Vec<String>,
    having_clauses: Vec<String>,
    where_args: Vec<QueryArg>,
    having_args: Vec<QueryArg>,
}

impl PredicateSet {
    fn where_sql(&self) -> String {
        format!("WHERE {}", self.where_clauses.join(" AND "))
    }

    fn having_sql(&self) -> String {
        if self.having_clauses.is_empty() {
            String::new()
        } else {
            format!(" HAVING {}", self.having_clauses.join(" AND "))
        }
    }

    fn into_args(self) -> Vec<QueryArg> {
        let mut args = self.where_args;
        args.extend(self.having_args);
        args
    }
}

fn placeholders(count: usize) -> String {
    let marks: Vec<&str> = (0..count).map(|_| "?").collect();
    marks.join(", ")
}

/// 把检索规格编译为谓词集；缺省谓词不产生子句，
/// 空的作者/体裁 id 集合视为无约束
fn compile_predicates(spec: &BookSearchSpec) -> PredicateSet {
    let mut set = PredicateSet {
        where_clauses: vec!["b.is_published = 1".to_string()],
        having_clauses: Vec::new(),
        where_args: Vec::new(),
        having_args: Vec::new(),
    };

    if let Some(title) = &spec.title {
        set.where_clauses.push("b.title LIKE ?".to_string());
        set.where_args.push(QueryArg::Text(format!("%{}%", title)));
    }

    if let Some(author_ids) = &spec.author_ids {
        if !author_ids.is_empty() {
            set.where_clauses.push(format!(
                "b.id IN (SELECT ba.book_id FROM book_authors ba WHERE ba.author_id IN ({}))",
                placeholders(author_ids.len())
            ));
            for author_id in author_ids {
                set.where_args
                    .push(QueryArg::Text(author_id.as_uuid().to_string()));
            }
        }
    }

    if let Some(genre_ids) = &spec.genre_ids {
        if !genre_ids.is_empty() {
            set.where_clauses.push(format!(
                "b.id IN (SELECT bg.book_id FROM book_genres bg WHERE bg.genre_id IN ({}))",
                placeholders(genre_ids.len())
            ));
            for genre_id in genre_ids {
                set.where_args
                    .push(QueryArg::Text(genre_id.as_uuid().to_string()));
            }
        }
    }

    if let Some(min_chapters) = spec.min_chapters_count {
        set.where_clauses.push(
            "(SELECT COUNT(*) FROM book_chapters c WHERE c.book_id = b.id) >= ?".to_string(),
        );
        set.where_args.push(QueryArg::Int(min_chapters as i64));
    }
    if let Some(max_chapters) = spec.max_chapters_count {
        set.where_clauses.push(
            "(SELECT COUNT(*) FROM book_chapters c WHERE c.book_id = b.id) <= ?".to_string(),
        );
        set.where_args.push(QueryArg::Int(max_chapters as i64));
    }

    if let Some(min_rating_count) = spec.min_rating_count {
        set.where_clauses.push(
            "(SELECT COUNT(*) FROM book_ratings r WHERE r.book_id = b.id) >= ?".to_string(),
        );
        set.where_args.push(QueryArg::Int(min_rating_count as i64));
    }
    if let Some(max_rating_count) = spec.max_rating_count {
        set.where_clauses.push(
            "(SELECT COUNT(*) FROM book_ratings r WHERE r.book_id = b.id) <= ?".to_string(),
        );
        set.where_args.push(QueryArg::Int(max_rating_count as i64));
    }

    // 评分上下限作用于聚合后的平均分
    if let Some(min_rating) = spec.min_rating {
        set.having_clauses.push(format!("{} >= ?", AVERAGE_EXPR));
        set.having_args.push(QueryArg::Real(min_rating));
    }
    if let Some(max_rating) = spec.max_rating {
        set.having_clauses.push(format!("{} <= ?", AVERAGE_EXPR));
        set.having_args.push(QueryArg::Real(max_rating));
    }

    set
}

/// 排序子句；数值排序键按书名升序决胜，保证确定性
fn order_clause(spec: &BookSearchSpec) -> String {
    let Some(sort_by) = spec.sort_by else {
        return "b.title ASC".to_string();
    };

    let expr = match sort_by {
        SortKey::Title => "b.title",
        SortKey::Rating => "average_rating",
        SortKey::RatingCount => "rating_count",
        SortKey::ChaptersCount => "(SELECT COUNT(*) FROM book_chapters c WHERE c.book_id = b.id)",
    };
    let direction = match spec.sort_direction {
        Some(SortDirection::Descending) => "DESC",
        _ => "ASC",
    };

    match sort_by {
        SortKey::Title => format!("{} {}", expr, direction),
        _ => format!("{} {}, b.title ASC", expr, direction),
    }
}

#[async_trait]
impl CatalogQueryPort for SqliteCatalogQuery {
    async fn search(&self, spec: &BookSearchSpec) -> Result<Vec<BookSummary>, RepositoryError> {
        let predicates = compile_predicates(spec);

        let sql = format!(
            "SELECT {} FROM books b \
             LEFT JOIN book_ratings br ON br.book_id = b.id \
             {} {}{} ORDER BY {} LIMIT ? OFFSET ?",
            SUMMARY_COLUMNS,
            predicates.where_sql(),
            GROUP_BY,
            predicates.having_sql(),
            order_clause(spec),
        );

        let offset = (spec.page as i64 - 1) * spec.size as i64;

        let mut query = sqlx::query_as::<_, BookSummaryRow>(&sql);
        for arg in predicates.into_args() {
            query = match arg {
                QueryArg::Text(value) => query.bind(value),
                QueryArg::Int(value) => query.bind(value),
                QueryArg::Real(value) => query.bind(value),
            };
        }
        query = query.bind(spec.size as i64).bind(offset);

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(BookSummary::try_from).collect()
    }

    async fn count_matching(&self, spec: &BookSearchSpec) -> Result<u64, RepositoryError> {
        let predicates = compile_predicates(spec);

        let sql = format!(
            "SELECT COUNT(*) FROM (SELECT b.id FROM books b \
             LEFT JOIN book_ratings br ON br.book_id = b.id \
             {} GROUP BY b.id{})",
            predicates.where_sql(),
            predicates.having_sql(),
        );

        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for arg in predicates.into_args() {
            query = match arg {
                QueryArg::Text(value) => query.bind(value),
                QueryArg::Int(value) => query.bind(value),
                QueryArg::Real(value) => query.bind(value),
            };
        }

        let count = query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(count as u64)
    }

    async fn find_by_id(&self, book_id: BookId) -> Result<Option<BookSummary>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM books b \
             LEFT JOIN book_ratings br ON br.book_id = b.id \
             WHERE b.id = ? {}",
            SUMMARY_COLUMNS, GROUP_BY,
        );

        let row: Option<BookSummaryRow> = sqlx::query_as(&sql)
            .bind(book_id.as_uuid().to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(BookSummary::try_from).transpose()
    }

    async fn list_by_ids(&self, book_ids: &[BookId]) -> Result<Vec<BookSummary>, RepositoryError> {
        if book_ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {} FROM books b \
             LEFT JOIN book_ratings br ON br.book_id = b.id \
             WHERE b.id IN ({}) {}",
            SUMMARY_COLUMNS,
            placeholders(book_ids.len()),
            GROUP_BY,
        );

        let mut query = sqlx::query_as::<_, BookSummaryRow>(&sql);
        for book_id in book_ids {
            query = query.bind(book_id.as_uuid().to_string());
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(BookSummary::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::{
        create_pool, run_migrations, DatabaseConfig, SqliteBookAuthorRepository,
        SqliteBookGenreRepository, SqliteBookRepository, SqliteChapterRepository,
        SqliteRatingRepository,
    };
    use super::*;
    use crate::application::ports::{
        BookAuthorRepositoryPort, BookGenreRepositoryPort, BookRepositoryPort,
        ChapterRepositoryPort, RatingRepositoryPort,
    };
    use crate::domain::book::{Book, BookChapter, BookChapterId, BookRating, UserId};
    use crate::domain::taxonomy::{AuthorId, BookAuthor, BookGenre, GenreId};

    struct Fixture {
        books: SqliteBookRepository,
        chapters: SqliteChapterRepository,
        ratings: SqliteRatingRepository,
        book_authors: SqliteBookAuthorRepository,
        book_genres: SqliteBookGenreRepository,
        catalog: SqliteCatalogQuery,
    }

    async fn fixture() -> Fixture {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        Fixture {
            books: SqliteBookRepository::new(pool.clone()),
            chapters: SqliteChapterRepository::new(pool.clone()),
            ratings: SqliteRatingRepository::new(pool.clone()),
            book_authors: SqliteBookAuthorRepository::new(pool.clone()),
            book_genres: SqliteBookGenreRepository::new(pool.clone()),
            catalog: SqliteCatalogQuery::new(pool),
        }
    }

    impl Fixture {
        async fn seed_book(&self, title: &str, published: bool, rating_values: &[i32]) -> BookId {
            let mut book = Book::new(BookId::new(), title, "");
            book.set_is_published(published);
            self.books.store(&book).await.unwrap();

            for value in rating_values {
                let rating = BookRating::new(book.id(), UserId::from_uuid(Uuid::new_v4()), *value);
                self.ratings.store(&rating).await.unwrap();
            }

            book.id()
        }

        async fn seed_chapters(&self, book_id: BookId, count: usize) {
            for index in 0..count {
                let chapter = BookChapter::new(
                    BookChapterId::new(),
                    book_id,
                    index,
                    format!("第{}章", index + 1),
                );
                self.chapters.store(&chapter).await.unwrap();
            }
        }

        fn titles(books: &[BookSummary]) -> Vec<&str> {
            books.iter().map(|b| b.title.as_str()).collect()
        }
    }

    #[tokio::test]
    async fn test_search_only_returns_published() {
        let fx = fixture().await;
        fx.seed_book("公开的书", true, &[]).await;
        fx.seed_book("未公开的书", false, &[]).await;

        let books = fx
            .catalog
            .search(&BookSearchSpec::first_page(10))
            .await
            .unwrap();
        assert_eq!(Fixture::titles(&books), vec!["公开的书"]);
        assert_eq!(
            fx.catalog
                .count_matching(&BookSearchSpec::first_page(10))
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_default_sort_is_title_ascending() {
        let fx = fixture().await;
        fx.seed_book("Charlie", true, &[]).await;
        fx.seed_book("Alpha", true, &[]).await;
        fx.seed_book("Bravo", true, &[]).await;

        let books = fx
            .catalog
            .search(&BookSearchSpec::first_page(10))
            .await
            .unwrap();
        assert_eq!(Fixture::titles(&books), vec!["Alpha", "Bravo", "Charlie"]);
    }

    #[tokio::test]
    async fn test_title_filter_with_min_rating() {
        let fx = fixture().await;
        fx.seed_book("Dragon Tales", true, &[4, 4]).await;
        fx.seed_book("Dracula", true, &[2, 2]).await;
        fx.seed_book("Dragonfly", false, &[5]).await;
        fx.seed_book("Moby Dick", true, &[5]).await;

        let spec = BookSearchSpec {
            title: Some("Dra".to_string()),
            min_rating: Some(3.0),
            ..BookSearchSpec::first_page(10)
        };

        let books = fx.catalog.search(&spec).await.unwrap();
        assert_eq!(Fixture::titles(&books), vec!["Dragon Tales"]);
        assert_eq!(books[0].average_rating, 4.0);
        assert_eq!(books[0].rating_count, 2);
    }

    #[tokio::test]
    async fn test_unrated_book_passes_max_rating_filter() {
        let fx = fixture().await;
        fx.seed_book("无人评分", true, &[]).await;
        fx.seed_book("高分书", true, &[5]).await;

        let spec = BookSearchSpec {
            max_rating: Some(3.0),
            ..BookSearchSpec::first_page(10)
        };

        // 无评分的书平均分按 0 参与过滤
        let books = fx.catalog.search(&spec).await.unwrap();
        assert_eq!(Fixture::titles(&books), vec!["无人评分"]);
    }

    #[tokio::test]
    async fn test_author_and_genre_filters_are_conjunctive() {
        let fx = fixture().await;
        let fantasy = GenreId::new();
        let author = AuthorId::new();

        let matching = fx.seed_book("都满足", true, &[]).await;
        let genre_only = fx.seed_book("只有体裁", true, &[]).await;
        fx.seed_book("都没有", true, &[]).await;

        fx.book_genres
            .store(&BookGenre::new(matching, fantasy))
            .await
            .unwrap();
        fx.book_genres
            .store(&BookGenre::new(genre_only, fantasy))
            .await
            .unwrap();
        fx.book_authors
            .store(&BookAuthor::new(matching, author))
            .await
            .unwrap();

        let spec = BookSearchSpec {
            author_ids: Some(vec![author]),
            genre_ids: Some(vec![fantasy]),
            ..BookSearchSpec::first_page(10)
        };
        let books = fx.catalog.search(&spec).await.unwrap();
        assert_eq!(Fixture::titles(&books), vec!["都满足"]);
    }

    #[tokio::test]
    async fn test_empty_id_sets_impose_no_constraint() {
        let fx = fixture().await;
        fx.seed_book("a", true, &[]).await;
        fx.seed_book("b", true, &[]).await;

        let spec = BookSearchSpec {
            author_ids: Some(Vec::new()),
            genre_ids: Some(Vec::new()),
            ..BookSearchSpec::first_page(10)
        };
        assert_eq!(fx.catalog.count_matching(&spec).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_chapters_count_bounds() {
        let fx = fixture().await;
        let short = fx.seed_book("短篇", true, &[]).await;
        let medium = fx.seed_book("中篇", true, &[]).await;
        let long = fx.seed_book("长篇", true, &[]).await;
        fx.seed_chapters(short, 1).await;
        fx.seed_chapters(medium, 3).await;
        fx.seed_chapters(long, 8).await;

        let spec = BookSearchSpec {
            min_chapters_count: Some(2),
            max_chapters_count: Some(5),
            ..BookSearchSpec::first_page(10)
        };
        let books = fx.catalog.search(&spec).await.unwrap();
        assert_eq!(Fixture::titles(&books), vec!["中篇"]);
    }

    #[tokio::test]
    async fn test_rating_count_bounds_apply_before_execution() {
        let fx = fixture().await;
        fx.seed_book("零评", true, &[]).await;
        fx.seed_book("两评", true, &[3, 3]).await;
        fx.seed_book("四评", true, &[3, 3, 3, 3]).await;

        let spec = BookSearchSpec {
            min_rating_count: Some(1),
            max_rating_count: Some(3),
            ..BookSearchSpec::first_page(10)
        };
        let books = fx.catalog.search(&spec).await.unwrap();
        assert_eq!(Fixture::titles(&books), vec!["两评"]);
        assert_eq!(fx.catalog.count_matching(&spec).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_sort_by_rating_descending_breaks_ties_by_title() {
        let fx = fixture().await;
        fx.seed_book("乙", true, &[4]).await;
        fx.seed_book("甲", true, &[4]).await;
        fx.seed_book("丙", true, &[5]).await;

        let spec = BookSearchSpec {
            sort_by: Some(SortKey::Rating),
            sort_direction: Some(SortDirection::Descending),
            ..BookSearchSpec::first_page(10)
        };
        let books = fx.catalog.search(&spec).await.unwrap();
        // 同分书按标题升序
        assert_eq!(Fixture::titles(&books), vec!["丙", "乙", "甲"]);
    }

    #[tokio::test]
    async fn test_sort_by_chapters_count() {
        let fx = fixture().await;
        let thin = fx.seed_book("薄", true, &[]).await;
        let thick = fx.seed_book("厚", true, &[]).await;
        fx.seed_chapters(thin, 1).await;
        fx.seed_chapters(thick, 5).await;

        let spec = BookSearchSpec {
            sort_by: Some(SortKey::ChaptersCount),
            sort_direction: Some(SortDirection::Descending),
            ..BookSearchSpec::first_page(10)
        };
        let books = fx.catalog.search(&spec).await.unwrap();
        assert_eq!(Fixture::titles(&books), vec!["厚", "薄"]);
    }

    #[tokio::test]
    async fn test_pagination_pages_and_boundary() {
        let fx = fixture().await;
        for title in ["a", "b", "c", "d", "e"] {
            fx.seed_book(title, true, &[]).await;
        }

        let page1 = BookSearchSpec::first_page(2);
        let books = fx.catalog.search(&page1).await.unwrap();
        assert_eq!(Fixture::titles(&books), vec!["a", "b"]);
        assert_eq!(fx.catalog.count_matching(&page1).await.unwrap(), 5);

        let page3 = BookSearchSpec {
            page: 3,
            ..page1.clone()
        };
        let books = fx.catalog.search(&page3).await.unwrap();
        assert_eq!(Fixture::titles(&books), vec!["e"]);

        // 越界页返回空集而非错误；命中总数不变
        let page9 = BookSearchSpec {
            page: 9,
            ..page1.clone()
        };
        assert!(fx.catalog.search(&page9).await.unwrap().is_empty());
        assert_eq!(fx.catalog.count_matching(&page9).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_find_by_id_carries_aggregates() {
        let fx = fixture().await;
        let rated = fx.seed_book("有评分", true, &[4, 2]).await;
        let unpublished = fx.seed_book("未发布", false, &[]).await;

        let summary = fx.catalog.find_by_id(rated).await.unwrap().unwrap();
        assert_eq!(summary.average_rating, 3.0);
        assert_eq!(summary.rating_count, 2);

        // 可见性规则由调用方按角色裁决，这里不过滤发布状态
        assert!(fx.catalog.find_by_id(unpublished).await.unwrap().is_some());
        assert!(fx.catalog.find_by_id(BookId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_by_ids_tolerates_empty_and_missing() {
        let fx = fixture().await;
        let known = fx.seed_book("已知", true, &[5]).await;

        assert!(fx.catalog.list_by_ids(&[]).await.unwrap().is_empty());

        let listed = fx
            .catalog
            .list_by_ids(&[known, BookId::new()])
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, known);
        assert_eq!(listed[0].average_rating, 5.0);
    }
}
