//! Review Command Handlers
//!
//! 审核状态机: Pending（无结论）→ Accepted / Rejected。
//! 终态不再迁移；重新送审产生新的请求实例。

use chrono::Utc;
use std::sync::Arc;

use crate::application::commands::{DecideVerification, DeleteVerifyRequest, SubmitBook};
use crate::application::error::ApplicationError;
use crate::application::ports::{BookRepositoryPort, VerifyBookRequestRepositoryPort};
use crate::domain::book::BookId;
use crate::domain::review::{VerifyBookRequest, VerifyBookRequestId};

// ============================================================================
// SubmitBook
// ============================================================================

/// 送审响应
#[derive(Debug, Clone)]
pub struct SubmitBookResponse {
    pub request_id: VerifyBookRequestId,
}

/// SubmitBook Handler
///
/// 创建未决请求；不触碰书籍的发布标志。
pub struct SubmitBookHandler {
    verify_repo: Arc<dyn VerifyBookRequestRepositoryPort>,
}

impl SubmitBookHandler {
    pub fn new(verify_repo: Arc<dyn VerifyBookRequestRepositoryPort>) -> Self {
        Self { verify_repo }
    }

    pub async fn handle(&self, command: SubmitBook) -> Result<SubmitBookResponse, ApplicationError> {
        let request = VerifyBookRequest::new(
            VerifyBookRequestId::new(),
            command.translator_id,
            command.book_id,
            Utc::now(),
        );

        self.verify_repo.store(&request).await?;

        tracing::info!(
            request_id = %request.id(),
            book_id = %command.book_id,
            translator_id = %command.translator_id,
            "Verify request submitted"
        );

        Ok(SubmitBookResponse {
            request_id: request.id(),
        })
    }
}

// ============================================================================
// DecideVerification
// ============================================================================

/// 裁决响应
#[derive(Debug, Clone)]
pub struct DecideVerificationResponse {
    pub request_id: VerifyBookRequestId,
    pub book_id: BookId,
    pub accepted: bool,
}

/// DecideVerification Handler
///
/// 两步走: 先写请求结论，再更新所属书籍的发布标志。
/// 两步之间没有跨实体事务；第二步失败时结论已经落库，
/// 以 PublishNotApplied 报告给调用方重新驱动发布。
pub struct DecideVerificationHandler {
    verify_repo: Arc<dyn VerifyBookRequestRepositoryPort>,
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl DecideVerificationHandler {
    pub fn new(
        verify_repo: Arc<dyn VerifyBookRequestRepositoryPort>,
        book_repo: Arc<dyn BookRepositoryPort>,
    ) -> Self {
        Self {
            verify_repo,
            book_repo,
        }
    }

    pub async fn handle(
        &self,
        command: DecideVerification,
    ) -> Result<DecideVerificationResponse, ApplicationError> {
        let mut request = self
            .verify_repo
            .find_by_id(command.request_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::not_found("VerifyBookRequest", *command.request_id.as_uuid())
            })?;

        if !request.is_pending() {
            return Err(ApplicationError::invalid_state(format!(
                "verify request {} already decided",
                request.id()
            )));
        }

        request.set_is_verified(Some(command.accept));
        self.verify_repo.store(&request).await?;

        let book_id = request.book_id();
        self.apply_publish(command.request_id, book_id, command.accept)
            .await?;

        tracing::info!(
            request_id = %command.request_id,
            book_id = %book_id,
            accepted = command.accept,
            "Verify request decided, book publish flag updated"
        );

        Ok(DecideVerificationResponse {
            request_id: command.request_id,
            book_id,
            accepted: command.accept,
        })
    }

    /// 发布步骤；任何失败都折叠为 PublishNotApplied
    async fn apply_publish(
        &self,
        request_id: VerifyBookRequestId,
        book_id: BookId,
        accept: bool,
    ) -> Result<(), ApplicationError> {
        let publish_not_applied = |reason: String| ApplicationError::PublishNotApplied {
            request_id: *request_id.as_uuid(),
            book_id: *book_id.as_uuid(),
            reason,
        };

        let mut book = self
            .book_repo
            .find_by_id(book_id)
            .await
            .map_err(|e| publish_not_applied(e.to_string()))?
            .ok_or_else(|| publish_not_applied("book not found".to_string()))?;

        book.set_is_published(accept);

        self.book_repo
            .store(&book)
            .await
            .map_err(|e| publish_not_applied(e.to_string()))?;

        Ok(())
    }
}

// ============================================================================
// DeleteVerifyRequest
// ============================================================================

/// DeleteVerifyRequest Handler
///
/// 任何状态下都可删除；不影响书籍的发布标志。
pub struct DeleteVerifyRequestHandler {
    verify_repo: Arc<dyn VerifyBookRequestRepositoryPort>,
}

impl DeleteVerifyRequestHandler {
    pub fn new(verify_repo: Arc<dyn VerifyBookRequestRepositoryPort>) -> Self {
        Self { verify_repo }
    }

    pub async fn handle(&self, command: DeleteVerifyRequest) -> Result<(), ApplicationError> {
        self.verify_repo
            .find_by_id(command.request_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::not_found("VerifyBookRequest", *command.request_id.as_uuid())
            })?;

        self.verify_repo.delete(command.request_id).await?;

        tracing::info!(request_id = %command.request_id, "Verify request deleted");

        Ok(())
    }
}
