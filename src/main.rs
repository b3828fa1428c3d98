//! Libram - 书籍目录与出版审核核心
//!
//! 引导入口: 加载配置、初始化日志、建立连接池并执行迁移。
//! 传输层（HTTP 路由、鉴权）由外部宿主挂载，不在本仓库内。

use libram::config::{load_config, print_config};
use libram::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!("{},libram={}", config.log.level, config.log.level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Libram - 书籍目录与出版审核核心");
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    tracing::info!("Catalog database ready at {}", config.database.path);

    Ok(())
}
