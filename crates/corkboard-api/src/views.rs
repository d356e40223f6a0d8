//! Response shapes. These never carry `delete_password` or `reported`.

use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use corkboard_persist::{Reply, Thread};

/// Threads returned by a board listing.
pub const THREAD_LISTING_LIMIT: i64 = 10;

/// Replies previewed per thread in a board listing.
pub const REPLY_PREVIEW_LIMIT: usize = 3;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReplyView {
    #[serde(rename = "_id")]
    pub id: String,
    pub text: String,
    pub created_on: DateTime<Utc>,
}

impl From<&Reply> for ReplyView {
    fn from(reply: &Reply) -> Self {
        Self {
            id: reply.id.clone(),
            text: reply.text.clone(),
            created_on: reply.created_on,
        }
    }
}

/// A thread as it appears in a board listing: newest replies only, plus the full count.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ThreadSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub board: String,
    pub text: String,
    pub created_on: DateTime<Utc>,
    pub bumped_on: DateTime<Utc>,
    pub replies: Vec<ReplyView>,
    pub replycount: usize,
}

impl From<&Thread> for ThreadSummary {
    fn from(thread: &Thread) -> Self {
        Self {
            id: thread.id.clone(),
            board: thread.board.clone(),
            text: thread.text.clone(),
            created_on: thread.created_on,
            bumped_on: thread.bumped_on,
            replies: latest_replies(&thread.replies, REPLY_PREVIEW_LIMIT),
            replycount: thread.replies.len(),
        }
    }
}

/// A single thread with every reply, in posting order.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ThreadDetail {
    #[serde(rename = "_id")]
    pub id: String,
    pub text: String,
    pub created_on: DateTime<Utc>,
    pub bumped_on: DateTime<Utc>,
    pub replies: Vec<ReplyView>,
}

impl From<&Thread> for ThreadDetail {
    fn from(thread: &Thread) -> Self {
        Self {
            id: thread.id.clone(),
            text: thread.text.clone(),
            created_on: thread.created_on,
            bumped_on: thread.bumped_on,
            replies: thread.replies.iter().map(ReplyView::from).collect(),
        }
    }
}

/// Body returned after posting a reply.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreatedReply {
    pub thread_id: String,
    #[serde(rename = "_id")]
    pub id: String,
    pub text: String,
    pub created_on: DateTime<Utc>,
}

impl CreatedReply {
    pub fn new(thread_id: &str, reply: &Reply) -> Self {
        Self {
            thread_id: thread_id.to_string(),
            id: reply.id.clone(),
            text: reply.text.clone(),
            created_on: reply.created_on,
        }
    }
}

/// Newest `limit` replies, newest first. Replies sharing a timestamp keep
/// reverse posting order.
pub fn latest_replies(replies: &[Reply], limit: usize) -> Vec<ReplyView> {
    let mut newest: Vec<&Reply> = replies.iter().rev().collect();
    newest.sort_by(|a, b| b.created_on.cmp(&a.created_on));
    newest.into_iter().take(limit).map(ReplyView::from).collect()
}

/// Result of a delete request that reached a stored record.
///
/// Both outcomes answer 200 so a caller cannot probe passwords by status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Success,
    IncorrectPassword,
}

impl DeleteOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeleteOutcome::Success => "success",
            DeleteOutcome::IncorrectPassword => "incorrect password",
        }
    }
}

impl IntoResponse for DeleteOutcome {
    fn into_response(self) -> Response {
        self.as_str().into_response()
    }
}

/// Body of a successful report.
pub const REPORTED: &str = "reported";

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn reply(id: &str, created_on: DateTime<Utc>) -> Reply {
        Reply {
            id: id.to_string(),
            text: format!("text {id}"),
            delete_password: "secret".to_string(),
            reported: true,
            created_on,
        }
    }

    fn thread_with(replies: Vec<Reply>) -> Thread {
        let now = Utc::now();
        Thread {
            id: "t1".to_string(),
            board: "general".to_string(),
            text: "op".to_string(),
            delete_password: "secret".to_string(),
            reported: true,
            created_on: now,
            bumped_on: now,
            replies,
        }
    }

    #[test]
    fn test_summary_keeps_three_newest_and_full_count() {
        let base = Utc::now();
        let replies = (0..5)
            .map(|i| reply(&format!("r{i}"), base + Duration::seconds(i)))
            .collect();
        let summary = ThreadSummary::from(&thread_with(replies));

        assert_eq!(summary.replycount, 5);
        let ids: Vec<&str> = summary.replies.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r4", "r3", "r2"]);
    }

    #[test]
    fn test_summary_with_no_replies() {
        let summary = ThreadSummary::from(&thread_with(Vec::new()));
        assert_eq!(summary.replycount, 0);
        assert!(summary.replies.is_empty());
    }

    #[test]
    fn test_latest_replies_tie_breaks_by_posting_order() {
        let at = Utc::now();
        let replies = vec![reply("a", at), reply("b", at), reply("c", at), reply("d", at)];
        let ids: Vec<String> = latest_replies(&replies, 3).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["d", "c", "b"]);
    }

    #[test]
    fn test_detail_keeps_every_reply_in_order() {
        let base = Utc::now();
        let replies = (0..5)
            .map(|i| reply(&format!("r{i}"), base + Duration::seconds(i)))
            .collect();
        let detail = ThreadDetail::from(&thread_with(replies));
        let ids: Vec<&str> = detail.replies.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r0", "r1", "r2", "r3", "r4"]);
    }

    #[test]
    fn test_views_never_serialize_secrets() {
        let thread = thread_with(vec![reply("r0", Utc::now())]);

        for value in [
            serde_json::to_value(ThreadSummary::from(&thread)).unwrap(),
            serde_json::to_value(ThreadDetail::from(&thread)).unwrap(),
        ] {
            let text = value.to_string();
            assert!(!text.contains("delete_password"));
            assert!(!text.contains("reported"));
            assert!(!text.contains("secret"));
            assert_eq!(value["_id"], "t1");
            assert_eq!(value["replies"][0]["_id"], "r0");
        }
    }

    #[test]
    fn test_delete_outcome_text() {
        assert_eq!(DeleteOutcome::Success.as_str(), "success");
        assert_eq!(DeleteOutcome::IncorrectPassword.as_str(), "incorrect password");
    }
}
