use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Text a deleted reply is left holding.
pub const DELETED_REPLY_TEXT: &str = "[deleted]";

/// Database-agnostic reply model. Only ever lives inside a [`Thread`](super::Thread).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub id: String,
    pub text: String,
    pub delete_password: String,
    pub reported: bool,
    pub created_on: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReply {
    pub text: String,
    pub delete_password: String,
}

impl Reply {
    pub fn new(id: String, new: NewReply, now: DateTime<Utc>) -> Self {
        Self {
            id,
            text: new.text,
            delete_password: new.delete_password,
            reported: false,
            created_on: now,
        }
    }

    pub fn password_matches(&self, candidate: &str) -> bool {
        self.delete_password == candidate
    }

    pub fn is_deleted(&self) -> bool {
        self.text == DELETED_REPLY_TEXT
    }
}
