//! Review Context - Aggregate Root

use chrono::{DateTime, Utc};

use super::VerifyBookRequestId;
use crate::domain::book::{BookId, UserId};

/// 出版审核请求
///
/// 不变量:
/// - 新建请求的结论为 None（未决）
/// - 结论一旦写入即为终态；再次提交产生新的请求实例
/// - 记录在得出结论后仍然保留，可供查询
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyBookRequest {
    id: VerifyBookRequestId,
    translator_id: UserId,
    book_id: BookId,
    is_verified: Option<bool>,
    send_date: DateTime<Utc>,
}

impl VerifyBookRequest {
    /// 创建未决请求
    pub fn new(
        id: VerifyBookRequestId,
        translator_id: UserId,
        book_id: BookId,
        send_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            translator_id,
            book_id,
            is_verified: None,
            send_date,
        }
    }

    /// 从持久化状态还原
    pub fn restore(
        id: VerifyBookRequestId,
        translator_id: UserId,
        book_id: BookId,
        is_verified: Option<bool>,
        send_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            translator_id,
            book_id,
            is_verified,
            send_date,
        }
    }

    pub fn id(&self) -> VerifyBookRequestId {
        self.id
    }

    pub fn translator_id(&self) -> UserId {
        self.translator_id
    }

    pub fn book_id(&self) -> BookId {
        self.book_id
    }

    /// None = 未决, Some(true) = 通过, Some(false) = 驳回
    pub fn is_verified(&self) -> Option<bool> {
        self.is_verified
    }

    pub fn send_date(&self) -> DateTime<Utc> {
        self.send_date
    }

    pub fn is_pending(&self) -> bool {
        self.is_verified.is_none()
    }

    pub fn set_is_verified(&mut self, is_verified: Option<bool>) {
        self.is_verified = is_verified;
    }
}
