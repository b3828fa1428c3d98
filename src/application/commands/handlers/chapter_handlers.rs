//! Chapter Command Handlers
//!
//! 维护章节序号不变量: 同一 book 下的 index 集合恒为 {0..n-1}。
//! 追加与删除-重排都要先读后写，并发时会看到彼此的中间状态，
//! 因此这两类操作按 book 维度串行化。

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::application::commands::{AppendChapter, DeleteChapter, RenameChapter};
use crate::application::error::ApplicationError;
use crate::application::ports::{BookRepositoryPort, ChapterRepositoryPort};
use crate::domain::book::{BookChapter, BookChapterId, BookId};

/// 按 book 维度的章节操作锁
///
/// 锁表按需增长；书籍数量有限，不做回收。
#[derive(Default)]
pub struct BookChapterLocks {
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl BookChapterLocks {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    async fn acquire(&self, book_id: BookId) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(*book_id.as_uuid())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}

// ============================================================================
// AppendChapter
// ============================================================================

/// 追加章节响应
#[derive(Debug, Clone)]
pub struct AppendChapterResponse {
    pub chapter_id: BookChapterId,
    pub index: usize,
}

/// AppendChapter Handler
///
/// 新章节序号 = 末尾序号 + 1，空书为 0。
pub struct AppendChapterHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    locks: Arc<BookChapterLocks>,
}

impl AppendChapterHandler {
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
        locks: Arc<BookChapterLocks>,
    ) -> Self {
        Self {
            book_repo,
            chapter_repo,
            locks,
        }
    }

    pub async fn handle(
        &self,
        command: AppendChapter,
    ) -> Result<AppendChapterResponse, ApplicationError> {
        self.book_repo
            .find_by_id(command.book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", *command.book_id.as_uuid()))?;

        let _guard = self.locks.acquire(command.book_id).await;

        let chapters = self.chapter_repo.list_by_book(command.book_id).await?;
        let next_index = match chapters.last() {
            Some(last) => last.index() + 1,
            None => 0,
        };

        let chapter = BookChapter::new(
            BookChapterId::new(),
            command.book_id,
            next_index,
            command.title,
        );
        self.chapter_repo.store(&chapter).await?;

        tracing::info!(
            book_id = %command.book_id,
            chapter_id = %chapter.id(),
            index = next_index,
            "Chapter appended"
        );

        Ok(AppendChapterResponse {
            chapter_id: chapter.id(),
            index: next_index,
        })
    }
}

// ============================================================================
// RenameChapter
// ============================================================================

/// RenameChapter Handler
///
/// 只改标题，序号不动，不需要 book 级锁。
pub struct RenameChapterHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
}

impl RenameChapterHandler {
    pub fn new(chapter_repo: Arc<dyn ChapterRepositoryPort>) -> Self {
        Self { chapter_repo }
    }

    pub async fn handle(&self, command: RenameChapter) -> Result<(), ApplicationError> {
        let mut chapter = self
            .chapter_repo
            .find_by_id(command.chapter_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::not_found("BookChapter", *command.chapter_id.as_uuid())
            })?;

        chapter.set_title(command.title);

        self.chapter_repo.store(&chapter).await?;

        Ok(())
    }
}

// ============================================================================
// DeleteChapter
// ============================================================================

/// DeleteChapter Handler
///
/// 删除目标行后，按原有升序遍历剩余章节，把每章的序号改写为它在
/// 该序列中的位置。按最终序号升序持久化，避免 (book, index)
/// 唯一约束下的瞬时冲突。
pub struct DeleteChapterHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    locks: Arc<BookChapterLocks>,
}

impl DeleteChapterHandler {
    pub fn new(chapter_repo: Arc<dyn ChapterRepositoryPort>, locks: Arc<BookChapterLocks>) -> Self {
        Self {
            chapter_repo,
            locks,
        }
    }

    pub async fn handle(&self, command: DeleteChapter) -> Result<(), ApplicationError> {
        let chapter = self
            .chapter_repo
            .find_by_id(command.chapter_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::not_found("BookChapter", *command.chapter_id.as_uuid())
            })?;

        let _guard = self.locks.acquire(chapter.book_id()).await;

        let chapters = self.chapter_repo.list_by_book(chapter.book_id()).await?;

        self.chapter_repo.delete(command.chapter_id).await?;

        let mut next_index = 0;
        for mut remaining in chapters {
            if remaining.id() == command.chapter_id {
                continue;
            }

            if remaining.index() != next_index {
                remaining.set_index(next_index);
                self.chapter_repo.store(&remaining).await?;
            }
            next_index += 1;
        }

        tracing::info!(
            book_id = %chapter.book_id(),
            chapter_id = %command.chapter_id,
            remaining = next_index,
            "Chapter deleted, remaining chapters renumbered"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteBookRepository,
        SqliteChapterRepository,
    };
    use crate::domain::book::Book;

    struct Fixture {
        book_id: BookId,
        append: AppendChapterHandler,
        delete: DeleteChapterHandler,
        rename: RenameChapterHandler,
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
    }

    async fn fixture() -> Fixture {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let book_repo: Arc<dyn BookRepositoryPort> = Arc::new(SqliteBookRepository::new(pool.clone()));
        let chapter_repo: Arc<dyn ChapterRepositoryPort> =
            Arc::new(SqliteChapterRepository::new(pool));
        let locks = Arc::new(BookChapterLocks::new());

        let book = Book::new(BookId::new(), "测试书", "");
        book_repo.store(&book).await.unwrap();

        Fixture {
            book_id: book.id(),
            append: AppendChapterHandler::new(
                book_repo.clone(),
                chapter_repo.clone(),
                locks.clone(),
            ),
            delete: DeleteChapterHandler::new(chapter_repo.clone(), locks),
            rename: RenameChapterHandler::new(chapter_repo.clone()),
            chapter_repo,
        }
    }

    async fn assert_contiguous(fx: &Fixture, expected_titles: &[&str]) {
        let chapters = fx.chapter_repo.list_by_book(fx.book_id).await.unwrap();
        let indices: Vec<usize> = chapters.iter().map(|c| c.index()).collect();
        let titles: Vec<&str> = chapters.iter().map(|c| c.title()).collect();
        assert_eq!(indices, (0..chapters.len()).collect::<Vec<_>>());
        assert_eq!(titles, expected_titles);
    }

    #[tokio::test]
    async fn test_append_assigns_sequential_indices() {
        let fx = fixture().await;

        for (i, title) in ["Ch0", "Ch1", "Ch2"].iter().enumerate() {
            let resp = fx
                .append
                .handle(AppendChapter {
                    book_id: fx.book_id,
                    title: title.to_string(),
                })
                .await
                .unwrap();
            assert_eq!(resp.index, i);
        }

        assert_contiguous(&fx, &["Ch0", "Ch1", "Ch2"]).await;
    }

    #[tokio::test]
    async fn test_append_to_missing_book_fails() {
        let fx = fixture().await;

        let err = fx
            .append
            .handle(AppendChapter {
                book_id: BookId::new(),
                title: "孤儿章节".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_middle_chapter_shifts_following_down() {
        let fx = fixture().await;

        let mut ids = Vec::new();
        for title in ["Ch0", "Ch1", "Ch2"] {
            let resp = fx
                .append
                .handle(AppendChapter {
                    book_id: fx.book_id,
                    title: title.to_string(),
                })
                .await
                .unwrap();
            ids.push(resp.chapter_id);
        }

        fx.delete
            .handle(DeleteChapter { chapter_id: ids[1] })
            .await
            .unwrap();
        assert_contiguous(&fx, &["Ch0", "Ch2"]).await;

        // 删除后追加回到连续序列末尾
        let resp = fx
            .append
            .handle(AppendChapter {
                book_id: fx.book_id,
                title: "Ch3".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(resp.index, 2);
        assert_contiguous(&fx, &["Ch0", "Ch2", "Ch3"]).await;
    }

    #[tokio::test]
    async fn test_delete_first_and_last_keep_invariant() {
        let fx = fixture().await;

        let mut ids = Vec::new();
        for title in ["a", "b", "c", "d"] {
            let resp = fx
                .append
                .handle(AppendChapter {
                    book_id: fx.book_id,
                    title: title.to_string(),
                })
                .await
                .unwrap();
            ids.push(resp.chapter_id);
        }

        fx.delete
            .handle(DeleteChapter { chapter_id: ids[0] })
            .await
            .unwrap();
        assert_contiguous(&fx, &["b", "c", "d"]).await;

        fx.delete
            .handle(DeleteChapter { chapter_id: ids[3] })
            .await
            .unwrap();
        assert_contiguous(&fx, &["b", "c"]).await;
    }

    #[tokio::test]
    async fn test_delete_until_empty() {
        let fx = fixture().await;

        let resp = fx
            .append
            .handle(AppendChapter {
                book_id: fx.book_id,
                title: "唯一章节".to_string(),
            })
            .await
            .unwrap();

        fx.delete
            .handle(DeleteChapter {
                chapter_id: resp.chapter_id,
            })
            .await
            .unwrap();

        let chapters = fx.chapter_repo.list_by_book(fx.book_id).await.unwrap();
        assert!(chapters.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_chapter_is_hard_error() {
        let fx = fixture().await;

        let err = fx
            .delete
            .handle(DeleteChapter {
                chapter_id: BookChapterId::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_rename_does_not_touch_index() {
        let fx = fixture().await;

        for title in ["x", "y"] {
            fx.append
                .handle(AppendChapter {
                    book_id: fx.book_id,
                    title: title.to_string(),
                })
                .await
                .unwrap();
        }
        let chapters = fx.chapter_repo.list_by_book(fx.book_id).await.unwrap();

        fx.rename
            .handle(RenameChapter {
                chapter_id: chapters[0].id(),
                title: "重命名".to_string(),
            })
            .await
            .unwrap();

        assert_contiguous(&fx, &["重命名", "y"]).await;
    }

    #[tokio::test]
    async fn test_concurrent_deletes_keep_indices_contiguous() {
        let fx = fixture().await;

        let mut ids = Vec::new();
        for i in 0..6 {
            let resp = fx
                .append
                .handle(AppendChapter {
                    book_id: fx.book_id,
                    title: format!("ch-{}", i),
                })
                .await
                .unwrap();
            ids.push(resp.chapter_id);
        }

        let delete = Arc::new(fx.delete);
        let mut tasks = Vec::new();
        for chapter_id in [ids[1], ids[3], ids[4]] {
            let delete = delete.clone();
            tasks.push(tokio::spawn(async move {
                delete.handle(DeleteChapter { chapter_id }).await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let chapters = fx.chapter_repo.list_by_book(fx.book_id).await.unwrap();
        let indices: Vec<usize> = chapters.iter().map(|c| c.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
