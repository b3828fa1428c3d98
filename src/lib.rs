//! Libram - 书籍目录与出版审核核心
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Book Context: 书籍、章节、译文、评分
//! - Review Context: 出版审核请求
//! - Taxonomy Context: 作者、体裁与关联
//!
//! 应用层 (application/):
//! - Ports: 端口定义（各实体 Repository、Catalog Query）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - Persistence: SQLite 存储适配器
//!
//! 三个带有非平凡不变量的核心:
//! - 目录检索: 动态谓词 + 评分聚合 + 分页
//! - 章节序号: 增删后保持 {0..n-1} 连续
//! - 出版审核: 结论写入联动书籍的发布标志

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
