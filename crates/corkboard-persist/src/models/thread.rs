use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use super::reply::{NewReply, Reply};

/// Database-agnostic thread model. Owns its replies in posting order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    pub id: String,
    pub board: String,
    pub text: String,
    pub delete_password: String,
    pub reported: bool,
    pub created_on: DateTime<Utc>,
    pub bumped_on: DateTime<Utc>,
    pub replies: Vec<Reply>,
}

/// Input for creating a thread on a board.
#[derive(Debug, Clone)]
pub struct NewThread {
    pub board: String,
    pub text: String,
    pub delete_password: String,
}

impl Thread {
    pub fn new(id: String, new: NewThread, now: DateTime<Utc>) -> Self {
        Self {
            id,
            board: new.board,
            text: new.text,
            delete_password: new.delete_password,
            reported: false,
            created_on: now,
            bumped_on: now,
            replies: Vec::new(),
        }
    }

    pub fn reply(&self, reply_id: &str) -> Option<&Reply> {
        self.replies.iter().find(|r| r.id == reply_id)
    }

    pub fn reply_mut(&mut self, reply_id: &str) -> Option<&mut Reply> {
        self.replies.iter_mut().find(|r| r.id == reply_id)
    }

    /// Plain string equality; passwords are stored as given.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.delete_password == candidate
    }

    /// Append a reply and bump the thread to the reply's creation time.
    pub fn push_reply(&mut self, id: String, new: NewReply, now: DateTime<Utc>) -> &Reply {
        if now > self.bumped_on {
            self.bumped_on = now;
        }
        self.replies.push(Reply::new(id, new, now));
        &self.replies[self.replies.len() - 1]
    }
}
