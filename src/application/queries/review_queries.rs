//! Review Queries

/// 审核请求列表查询（按提交时间降序，附带书籍目录记录）
#[derive(Debug, Clone)]
pub struct ListVerifyRequests;
