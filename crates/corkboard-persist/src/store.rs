use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewReply, NewThread, Reply, Thread};

/// Persistence contract for board threads and their embedded replies.
///
/// Ids are opaque strings handed out by the implementation. An id that does
/// not name a stored record (including one that is malformed for the backend)
/// yields [`PersistError::ThreadNotFound`](crate::PersistError::ThreadNotFound)
/// or [`PersistError::ReplyNotFound`](crate::PersistError::ReplyNotFound).
#[async_trait]
pub trait BoardStore: Send + Sync {
    /// Cheap round trip used by health checks.
    async fn ping(&self) -> Result<()>;

    /// Persist a new thread with no replies.
    async fn create_thread(&self, new: NewThread) -> Result<Thread>;

    /// Threads on `board`, most recently bumped first, at most `limit`.
    async fn list_threads(&self, board: &str, limit: i64) -> Result<Vec<Thread>>;

    async fn get_thread(&self, thread_id: &str) -> Result<Thread>;

    /// Set `reported` on a thread. Reporting twice is not an error.
    async fn report_thread(&self, thread_id: &str) -> Result<()>;

    /// Remove a thread together with its replies.
    async fn delete_thread(&self, thread_id: &str) -> Result<()>;

    /// Append a reply and bump the thread in one update; returns the stored reply.
    async fn push_reply(&self, thread_id: &str, new: NewReply) -> Result<Reply>;

    async fn report_reply(&self, thread_id: &str, reply_id: &str) -> Result<()>;

    /// Overwrite a reply's text in place, leaving every other field untouched.
    async fn set_reply_text(&self, thread_id: &str, reply_id: &str, text: &str) -> Result<()>;
}
