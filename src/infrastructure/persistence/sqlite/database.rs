//! SQLite Database - 数据库连接和迁移

use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};
use std::path::Path;

/// 数据库配置
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    pub database_url: String,
    /// 最大连接数
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:./data/libram.db?mode=rwc".to_string(),
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            database_url: format!("sqlite:{}?mode=rwc", path.as_ref().display()),
            max_connections: 5,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

/// 数据库连接池
pub type DbPool = Pool<Sqlite>;

/// 创建数据库连接池
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    // 启用 WAL 模式，允许并发读写
    sqlx::query("PRAGMA journal_mode=WAL")
        .execute(&pool)
        .await?;

    // 设置 busy_timeout=5000ms，遇到锁时等待而不是立即失败
    sqlx::query("PRAGMA busy_timeout=5000")
        .execute(&pool)
        .await?;

    // 设置同步模式为 NORMAL（平衡性能和安全性）
    sqlx::query("PRAGMA synchronous=NORMAL")
        .execute(&pool)
        .await?;

    tracing::info!("SQLite pool created with WAL mode and busy_timeout=5000ms");

    Ok(pool)
}

/// 运行数据库迁移
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    // 创建 books 表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id TEXT PRIMARY KEY,
            cover_id TEXT,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            is_published INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 book_chapters 表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS book_chapters (
            id TEXT PRIMARY KEY,
            book_id TEXT NOT NULL,
            chapter_index INTEGER NOT NULL,
            title TEXT NOT NULL,
            FOREIGN KEY (book_id) REFERENCES books(id) ON DELETE CASCADE,
            UNIQUE (book_id, chapter_index)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 book_chapter_translations 表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS book_chapter_translations (
            chapter_id TEXT NOT NULL,
            translator_id TEXT NOT NULL,
            text TEXT NOT NULL,
            PRIMARY KEY (chapter_id, translator_id),
            FOREIGN KEY (chapter_id) REFERENCES book_chapters(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 book_ratings 表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS book_ratings (
            book_id TEXT NOT NULL,
            user_id TEXT NOT NULL,
            value INTEGER NOT NULL,
            PRIMARY KEY (book_id, user_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 verify_book_requests 表（is_verified 为 NULL 表示未决）
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS verify_book_requests (
            id TEXT PRIMARY KEY,
            translator_id TEXT NOT NULL,
            book_id TEXT NOT NULL,
            is_verified INTEGER,
            send_date TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 authors 表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS authors (
            id TEXT PRIMARY KEY,
            avatar_id TEXT,
            first_name TEXT NOT NULL,
            second_name TEXT NOT NULL,
            middle_name TEXT,
            nickname TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 genres 表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS genres (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 book_authors 关联表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS book_authors (
            book_id TEXT NOT NULL,
            author_id TEXT NOT NULL,
            PRIMARY KEY (book_id, author_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 book_genres 关联表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS book_genres (
            book_id TEXT NOT NULL,
            genre_id TEXT NOT NULL,
            PRIMARY KEY (book_id, genre_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建索引
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_book_chapters_book_id
        ON book_chapters(book_id)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_book_ratings_book_id
        ON book_ratings(book_id)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_verify_book_requests_send_date
        ON verify_book_requests(send_date)
        "#,
    )
    .execute(pool)
    .await?;

    // 索引: verify_book_requests.book_id (用于级联删除)
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_verify_book_requests_book_id
        ON verify_book_requests(book_id)
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database migrations completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_in_memory_db() {
        let config = DatabaseConfig::in_memory();
        let pool = create_pool(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let config = DatabaseConfig::in_memory();
        let pool = create_pool(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
        run_migrations(&pool).await.unwrap();
    }
}
