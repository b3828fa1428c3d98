//! Review Query Handlers

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::ports::{BookSummary, CatalogQueryPort, VerifyBookRequestRepositoryPort};
use crate::application::queries::ListVerifyRequests;
use crate::domain::book::{BookId, UserId};
use crate::domain::review::VerifyBookRequestId;

/// 审核请求视图
///
/// book 为 None 表示所属书籍已被删除，列表行仍然可渲染。
#[derive(Debug, Clone)]
pub struct VerifyRequestView {
    pub request_id: VerifyBookRequestId,
    pub translator_id: UserId,
    pub book_id: BookId,
    /// None = 未决, Some(true) = 通过, Some(false) = 驳回
    pub is_verified: Option<bool>,
    pub send_date: DateTime<Utc>,
    pub book: Option<BookSummary>,
}

/// ListVerifyRequests Handler
///
/// 按提交时间降序列出全部请求，并通过批量目录查询附带
/// 每条请求所属书籍的当前记录。
pub struct ListVerifyRequestsHandler {
    verify_repo: Arc<dyn VerifyBookRequestRepositoryPort>,
    catalog: Arc<dyn CatalogQueryPort>,
}

impl ListVerifyRequestsHandler {
    pub fn new(
        verify_repo: Arc<dyn VerifyBookRequestRepositoryPort>,
        catalog: Arc<dyn CatalogQueryPort>,
    ) -> Self {
        Self {
            verify_repo,
            catalog,
        }
    }

    pub async fn handle(
        &self,
        _query: ListVerifyRequests,
    ) -> Result<Vec<VerifyRequestView>, ApplicationError> {
        let requests = self.verify_repo.list().await?;

        let mut book_ids: Vec<BookId> = Vec::new();
        for request in &requests {
            if !book_ids.contains(&request.book_id()) {
                book_ids.push(request.book_id());
            }
        }

        let mut books_by_id: HashMap<Uuid, BookSummary> = HashMap::new();
        if !book_ids.is_empty() {
            for book in self.catalog.list_by_ids(&book_ids).await? {
                books_by_id.insert(*book.id.as_uuid(), book);
            }
        }

        Ok(requests
            .into_iter()
            .map(|request| VerifyRequestView {
                request_id: request.id(),
                translator_id: request.translator_id(),
                book_id: request.book_id(),
                is_verified: request.is_verified(),
                send_date: request.send_date(),
                book: books_by_id.get(request.book_id().as_uuid()).cloned(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::handlers::{
        CreateBookHandler, DecideVerificationHandler, DeleteBookHandler,
    };
    use crate::application::commands::{CreateBook, DecideVerification, DeleteBook};
    use crate::application::ports::BookRepositoryPort;
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteBookRepository, SqliteCatalogQuery,
        SqliteVerifyBookRequestRepository,
    };

    #[tokio::test]
    async fn test_list_is_newest_first_and_hydrated() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let book_repo: Arc<dyn BookRepositoryPort> =
            Arc::new(SqliteBookRepository::new(pool.clone()));
        let verify_repo: Arc<dyn VerifyBookRequestRepositoryPort> =
            Arc::new(SqliteVerifyBookRequestRepository::new(pool.clone()));
        let catalog: Arc<dyn CatalogQueryPort> = Arc::new(SqliteCatalogQuery::new(pool));

        let create = CreateBookHandler::new(book_repo.clone(), verify_repo.clone());
        let decide = DecideVerificationHandler::new(verify_repo.clone(), book_repo.clone());
        let delete_book = DeleteBookHandler::new(book_repo.clone());
        let list = ListVerifyRequestsHandler::new(verify_repo, catalog);

        let translator = UserId::from_uuid(Uuid::new_v4());
        let first = create
            .handle(CreateBook {
                title: "第一本".to_string(),
                description: String::new(),
                translator_id: translator,
            })
            .await
            .unwrap();
        let second = create
            .handle(CreateBook {
                title: "第二本".to_string(),
                description: String::new(),
                translator_id: translator,
            })
            .await
            .unwrap();

        decide
            .handle(DecideVerification {
                request_id: first.request_id,
                accept: true,
            })
            .await
            .unwrap();

        let views = list.handle(ListVerifyRequests).await.unwrap();
        assert_eq!(views.len(), 2);
        // 最近提交在前
        assert!(views[0].send_date >= views[1].send_date);

        let first_view = views
            .iter()
            .find(|v| v.request_id == first.request_id)
            .unwrap();
        assert_eq!(first_view.is_verified, Some(true));
        assert_eq!(
            first_view.book.as_ref().map(|b| b.title.as_str()),
            Some("第一本")
        );

        let second_view = views
            .iter()
            .find(|v| v.request_id == second.request_id)
            .unwrap();
        assert_eq!(second_view.is_verified, None);

        // 删除书籍级联清掉它的请求
        delete_book
            .handle(DeleteBook {
                book_id: second.book_id,
            })
            .await
            .unwrap();

        let views = list.handle(ListVerifyRequests).await.unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].request_id, first.request_id);
    }

    #[tokio::test]
    async fn test_request_for_missing_book_hydrates_to_none() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let verify_repo: Arc<dyn VerifyBookRequestRepositoryPort> =
            Arc::new(SqliteVerifyBookRequestRepository::new(pool.clone()));
        let catalog: Arc<dyn CatalogQueryPort> = Arc::new(SqliteCatalogQuery::new(pool));

        let submit = crate::application::commands::handlers::SubmitBookHandler::new(
            verify_repo.clone(),
        );
        let list = ListVerifyRequestsHandler::new(verify_repo, catalog);

        submit
            .handle(crate::application::commands::SubmitBook {
                translator_id: UserId::from_uuid(Uuid::new_v4()),
                book_id: BookId::new(),
            })
            .await
            .unwrap();

        let views = list.handle(ListVerifyRequests).await.unwrap();
        assert_eq!(views.len(), 1);
        assert!(views[0].book.is_none());
        assert!(views[0].is_verified.is_none());
    }
}
