use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::models::{NewReply, NewThread, Reply, Thread};

/// MongoDB-specific thread document. Replies are embedded, so a thread and
/// everything posted to it live and die as one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoThread {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub board: String,
    pub text: String,
    pub delete_password: String,
    #[serde(default)]
    pub reported: bool,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_on: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub bumped_on: DateTime<Utc>,
    #[serde(default)]
    pub replies: Vec<MongoReply>,
}

/// MongoDB-specific embedded reply (uses ObjectId)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoReply {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub text: String,
    pub delete_password: String,
    #[serde(default)]
    pub reported: bool,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_on: DateTime<Utc>,
}

impl MongoThread {
    pub fn new(new: NewThread, now: DateTime<Utc>) -> Self {
        Self {
            id: ObjectId::new(),
            board: new.board,
            text: new.text,
            delete_password: new.delete_password,
            reported: false,
            created_on: now,
            bumped_on: now,
            replies: Vec::new(),
        }
    }
}

impl MongoReply {
    pub fn new(new: NewReply, now: DateTime<Utc>) -> Self {
        Self {
            id: ObjectId::new(),
            text: new.text,
            delete_password: new.delete_password,
            reported: false,
            created_on: now,
        }
    }
}

// Conversions from MongoDB-specific to database-agnostic models

impl From<MongoReply> for Reply {
    fn from(reply: MongoReply) -> Self {
        Self {
            id: reply.id.to_hex(),
            text: reply.text,
            delete_password: reply.delete_password,
            reported: reply.reported,
            created_on: reply.created_on,
        }
    }
}

impl From<MongoThread> for Thread {
    fn from(thread: MongoThread) -> Self {
        Self {
            id: thread.id.to_hex(),
            board: thread.board,
            text: thread.text,
            delete_password: thread.delete_password,
            reported: thread.reported,
            created_on: thread.created_on,
            bumped_on: thread.bumped_on,
            replies: thread.replies.into_iter().map(Reply::from).collect(),
        }
    }
}
