use async_trait::async_trait;
use mongodb::{Client, bson::doc, bson::oid::ObjectId};

use crate::dbs::mongo::models::{MongoReply, MongoThread};
use crate::dbs::mongo::repositories::{MongoReplyRepository, MongoThreadRepository};
use crate::error::{PersistError, Result};
use crate::models::{timestamp, NewReply, NewThread, Reply, Thread};
use crate::store::BoardStore;

/// [`BoardStore`] over a single MongoDB `threads` collection.
///
/// Holds one `mongodb::Client`, which pools connections internally; clone
/// the surrounding `Arc` rather than connecting per request.
pub struct MongoBoardStore {
    client: Client,
    database: String,
    thread_repo: MongoThreadRepository,
    reply_repo: MongoReplyRepository,
}

impl MongoBoardStore {
    /// Connect to MongoDB and create the store
    pub async fn connect(mongodb_uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        let thread_repo = MongoThreadRepository::new(&client, database);
        let reply_repo = MongoReplyRepository::new(&client, database);

        Ok(Self {
            client,
            database: database.to_string(),
            thread_repo,
            reply_repo,
        })
    }

    /// Tell the thread-or-reply miss apart after a positional update matched nothing.
    async fn reply_miss(&self, thread_id: ObjectId, raw_thread: &str, raw_reply: &str) -> PersistError {
        match self.thread_repo.exists(thread_id).await {
            Ok(true) => PersistError::ReplyNotFound(raw_reply.to_string()),
            Ok(false) => PersistError::ThreadNotFound(raw_thread.to_string()),
            Err(e) => e,
        }
    }

    /// Parse both ids. A malformed reply id still reports a missing thread first.
    async fn parse_reply_ids(&self, thread_id: &str, reply_id: &str) -> Result<(ObjectId, ObjectId)> {
        let thread_oid = parse_thread_id(thread_id)?;
        match ObjectId::parse_str(reply_id) {
            Ok(reply_oid) => Ok((thread_oid, reply_oid)),
            Err(_) => Err(self.reply_miss(thread_oid, thread_id, reply_id).await),
        }
    }
}

fn parse_thread_id(thread_id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(thread_id).map_err(|_| PersistError::ThreadNotFound(thread_id.to_string()))
}


#[async_trait]
impl BoardStore for MongoBoardStore {
    async fn ping(&self) -> Result<()> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    async fn create_thread(&self, new: NewThread) -> Result<Thread> {
        let thread = MongoThread::new(new, timestamp());
        self.thread_repo.insert_thread(&thread).await?;
        tracing::debug!(thread_id = %thread.id, board = %thread.board, "Thread inserted");
        Ok(thread.into())
    }

    async fn list_threads(&self, board: &str, limit: i64) -> Result<Vec<Thread>> {
        let threads = self.thread_repo.list_threads(board, limit).await?;
        Ok(threads.into_iter().map(Thread::from).collect())
    }

    async fn get_thread(&self, thread_id: &str) -> Result<Thread> {
        let object_id = parse_thread_id(thread_id)?;
        self.thread_repo
            .get_thread(object_id)
            .await?
            .map(Thread::from)
            .ok_or_else(|| PersistError::ThreadNotFound(thread_id.to_string()))
    }

    async fn report_thread(&self, thread_id: &str) -> Result<()> {
        let object_id = parse_thread_id(thread_id)?;
        if !self.thread_repo.mark_reported(object_id).await? {
            return Err(PersistError::ThreadNotFound(thread_id.to_string()));
        }
        Ok(())
    }

    async fn delete_thread(&self, thread_id: &str) -> Result<()> {
        let object_id = parse_thread_id(thread_id)?;
        if !self.thread_repo.delete_thread(object_id).await? {
            return Err(PersistError::ThreadNotFound(thread_id.to_string()));
        }
        Ok(())
    }

    async fn push_reply(&self, thread_id: &str, new: NewReply) -> Result<Reply> {
        let object_id = parse_thread_id(thread_id)?;
        let reply = MongoReply::new(new, timestamp());

        let updated = self
            .reply_repo
            .push_reply(object_id, &reply)
            .await?
            .ok_or_else(|| PersistError::ThreadNotFound(thread_id.to_string()))?;

        // Read the reply back from the updated document rather than trusting the input.
        updated
            .replies
            .into_iter()
            .find(|r| r.id == reply.id)
            .map(Reply::from)
            .ok_or_else(|| {
                PersistError::Internal(format!(
                    "reply {} missing from thread {} after append",
                    reply.id, thread_id
                ))
            })
    }

    async fn report_reply(&self, thread_id: &str, reply_id: &str) -> Result<()> {
        let (thread_oid, reply_oid) = self.parse_reply_ids(thread_id, reply_id).await?;
        if !self.reply_repo.mark_reported(thread_oid, reply_oid).await? {
            return Err(self.reply_miss(thread_oid, thread_id, reply_id).await);
        }
        Ok(())
    }

    async fn set_reply_text(&self, thread_id: &str, reply_id: &str, text: &str) -> Result<()> {
        let (thread_oid, reply_oid) = self.parse_reply_ids(thread_id, reply_id).await?;
        if !self.reply_repo.set_text(thread_oid, reply_oid, text).await? {
            return Err(self.reply_miss(thread_oid, thread_id, reply_id).await);
        }
        Ok(())
    }
}
