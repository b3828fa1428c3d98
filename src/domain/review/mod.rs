//! Review Context - 出版审核限界上下文
//!
//! 职责:
//! - 审核请求聚合：译者提交书籍，审核结论决定发布状态
//! - 结论为三态：未决（无值）/ 通过 / 驳回

mod aggregate;
mod value_objects;

pub use aggregate::VerifyBookRequest;
pub use value_objects::VerifyBookRequestId;
