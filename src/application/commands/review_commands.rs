//! Review Commands

use crate::domain::book::{BookId, UserId};
use crate::domain::review::VerifyBookRequestId;

/// 提交书籍进入审核命令
///
/// 每次提交产生一条新的未决请求；一本书可以跨多次重新提交
/// 累积多条请求记录。
#[derive(Debug, Clone)]
pub struct SubmitBook {
    pub translator_id: UserId,
    pub book_id: BookId,
}

/// 审核裁决命令
///
/// 先写入请求结论，再将所属书籍的发布标志更新为 accept 的值。
#[derive(Debug, Clone)]
pub struct DecideVerification {
    pub request_id: VerifyBookRequestId,
    pub accept: bool,
}

/// 删除审核请求命令（不影响书籍的发布标志）
#[derive(Debug, Clone)]
pub struct DeleteVerifyRequest {
    pub request_id: VerifyBookRequestId,
}
