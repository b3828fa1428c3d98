//! 基础设施层
//!
//! 包含：
//! - persistence: SQLite 持久化适配器

pub mod persistence;
