//! In-process [`BoardStore`] backed by a map of whole thread documents.
//!
//! Mirrors the document semantics of the MongoDB backend: every operation
//! touches exactly one thread under a single write lock, so a thread and its
//! replies change atomically. Used by the test suites and for local runs
//! without a database.

use std::collections::HashMap;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::error::{PersistError, Result};
use crate::models::{timestamp, NewReply, NewThread, Reply, Thread};
use crate::store::BoardStore;

#[derive(Debug, Default)]
pub struct MemoryBoardStore {
    threads: RwLock<HashMap<String, Thread>>,
}

impl MemoryBoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored threads across all boards.
    pub async fn len(&self) -> usize {
        self.threads.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.threads.read().await.is_empty()
    }

    async fn with_thread<T>(
        &self,
        thread_id: &str,
        f: impl FnOnce(&mut Thread) -> Result<T>,
    ) -> Result<T> {
        let mut threads = self.threads.write().await;
        let thread = threads
            .get_mut(thread_id)
            .ok_or_else(|| PersistError::ThreadNotFound(thread_id.to_string()))?;
        f(thread)
    }
}

fn new_id() -> String {
    ObjectId::new().to_hex()
}

#[async_trait]
impl BoardStore for MemoryBoardStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn create_thread(&self, new: NewThread) -> Result<Thread> {
        let thread = Thread::new(new_id(), new, timestamp());
        self.threads
            .write()
            .await
            .insert(thread.id.clone(), thread.clone());
        tracing::debug!(thread_id = %thread.id, board = %thread.board, "Thread stored in memory");
        Ok(thread)
    }

    async fn list_threads(&self, board: &str, limit: i64) -> Result<Vec<Thread>> {
        let threads = self.threads.read().await;
        let mut selected: Vec<Thread> = threads
            .values()
            .filter(|t| t.board == board)
            .cloned()
            .collect();
        // ObjectIds grow monotonically, so the id breaks bump ties newest-first.
        selected.sort_by(|a, b| {
            b.bumped_on
                .cmp(&a.bumped_on)
                .then_with(|| b.id.cmp(&a.id))
        });
        selected.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(selected)
    }

    async fn get_thread(&self, thread_id: &str) -> Result<Thread> {
        self.threads
            .read()
            .await
            .get(thread_id)
            .cloned()
            .ok_or_else(|| PersistError::ThreadNotFound(thread_id.to_string()))
    }

    async fn report_thread(&self, thread_id: &str) -> Result<()> {
        self.with_thread(thread_id, |thread| {
            thread.reported = true;
            Ok(())
        })
        .await
    }

    async fn delete_thread(&self, thread_id: &str) -> Result<()> {
        self.threads
            .write()
            .await
            .remove(thread_id)
            .map(|_| ())
            .ok_or_else(|| PersistError::ThreadNotFound(thread_id.to_string()))
    }

    async fn push_reply(&self, thread_id: &str, new: NewReply) -> Result<Reply> {
        self.with_thread(thread_id, |thread| {
            Ok(thread.push_reply(new_id(), new, timestamp()).clone())
        })
        .await
    }

    async fn report_reply(&self, thread_id: &str, reply_id: &str) -> Result<()> {
        self.with_thread(thread_id, |thread| {
            let reply = thread
                .reply_mut(reply_id)
                .ok_or_else(|| PersistError::ReplyNotFound(reply_id.to_string()))?;
            reply.reported = true;
            Ok(())
        })
        .await
    }

    async fn set_reply_text(&self, thread_id: &str, reply_id: &str, text: &str) -> Result<()> {
        self.with_thread(thread_id, |thread| {
            let reply = thread
                .reply_mut(reply_id)
                .ok_or_else(|| PersistError::ReplyNotFound(reply_id.to_string()))?;
            reply.text = text.to_string();
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DELETED_REPLY_TEXT;

    fn new_thread(board: &str, text: &str) -> NewThread {
        NewThread {
            board: board.to_string(),
            text: text.to_string(),
            delete_password: "pw".to_string(),
        }
    }

    fn new_reply(text: &str) -> NewReply {
        NewReply {
            text: text.to_string(),
            delete_password: "rpw".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_thread() {
        let store = MemoryBoardStore::new();
        let created = store.create_thread(new_thread("general", "hello")).await.unwrap();

        let fetched = store.get_thread(&created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_list_is_board_scoped_and_bump_ordered() {
        let store = MemoryBoardStore::new();
        let first = store.create_thread(new_thread("general", "first")).await.unwrap();
        let second = store.create_thread(new_thread("general", "second")).await.unwrap();
        store.create_thread(new_thread("other", "elsewhere")).await.unwrap();

        // Replying to the older thread bumps it back to the top.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        store.push_reply(&first.id, new_reply("bump")).await.unwrap();

        let listed = store.list_threads("general", 10).await.unwrap();
        let ids: Vec<&str> = listed.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec![first.id.as_str(), second.id.as_str()]);

        assert!(store.list_threads("nobody", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_respects_limit() {
        let store = MemoryBoardStore::new();
        for i in 0..12 {
            store
                .create_thread(new_thread("busy", &format!("thread {i}")))
                .await
                .unwrap();
        }
        assert_eq!(store.list_threads("busy", 10).await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_report_thread_sets_flag_idempotently() {
        let store = MemoryBoardStore::new();
        let thread = store.create_thread(new_thread("general", "op")).await.unwrap();
        assert!(!thread.reported);

        store.report_thread(&thread.id).await.unwrap();
        store.report_thread(&thread.id).await.unwrap();

        let stored = store.get_thread(&thread.id).await.unwrap();
        assert!(stored.reported);
        assert_eq!(stored.text, thread.text);
        assert_eq!(stored.bumped_on, thread.bumped_on);

        let err = store.report_thread("missing").await.unwrap_err();
        assert!(matches!(err, PersistError::ThreadNotFound(_)));
    }

    #[tokio::test]
    async fn test_push_reply_to_missing_thread() {
        let store = MemoryBoardStore::new();
        let err = store.push_reply("nope", new_reply("x")).await.unwrap_err();
        assert!(matches!(err, PersistError::ThreadNotFound(_)));
    }

    #[tokio::test]
    async fn test_reply_report_and_text_replacement() {
        let store = MemoryBoardStore::new();
        let thread = store.create_thread(new_thread("general", "op")).await.unwrap();
        let reply = store.push_reply(&thread.id, new_reply("hi")).await.unwrap();

        store.report_reply(&thread.id, &reply.id).await.unwrap();
        store.report_reply(&thread.id, &reply.id).await.unwrap();
        store
            .set_reply_text(&thread.id, &reply.id, DELETED_REPLY_TEXT)
            .await
            .unwrap();

        let stored = store.get_thread(&thread.id).await.unwrap();
        let stored_reply = stored.reply(&reply.id).unwrap();
        assert!(stored_reply.reported);
        assert!(stored_reply.is_deleted());
        assert_eq!(stored_reply.created_on, reply.created_on);
        assert_eq!(stored.replies.len(), 1);

        let err = store.report_reply(&thread.id, "missing").await.unwrap_err();
        assert!(matches!(err, PersistError::ReplyNotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_thread_removes_replies() {
        let store = MemoryBoardStore::new();
        let thread = store.create_thread(new_thread("general", "op")).await.unwrap();
        store.push_reply(&thread.id, new_reply("r")).await.unwrap();

        store.delete_thread(&thread.id).await.unwrap();
        assert!(store.is_empty().await);
        assert!(store.get_thread(&thread.id).await.unwrap_err().is_not_found());
        assert!(store.delete_thread(&thread.id).await.unwrap_err().is_not_found());
    }
}
