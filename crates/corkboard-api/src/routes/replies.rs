use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use corkboard_persist::{NewReply, DELETED_REPLY_TEXT};
use crate::{
    error::{ApiError, ApiResult},
    extract::{required, BoardForm},
    state::AppState,
    views::{CreatedReply, DeleteOutcome, ThreadDetail, REPORTED},
};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListRepliesQuery {
    /// Thread whose replies to return
    pub thread_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateReplyRequest {
    pub thread_id: Option<String>,
    pub text: Option<String>,
    pub delete_password: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ReportReplyRequest {
    pub thread_id: Option<String>,
    pub reply_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DeleteReplyRequest {
    pub thread_id: Option<String>,
    pub reply_id: Option<String>,
    pub delete_password: Option<String>,
}

/// Get a thread with every reply
#[utoipa::path(
    get,
    path = "/api/replies/{board}",
    params(
        ("board" = String, Path, description = "Board name"),
        ListRepliesQuery
    ),
    responses(
        (status = 200, description = "Thread with all replies", body = ThreadDetail),
        (status = 400, description = "Missing thread_id"),
        (status = 404, description = "Thread not found")
    ),
    tag = "replies"
)]
pub async fn list_replies(
    State(state): State<Arc<AppState>>,
    Path(_board): Path<String>,
    Query(query): Query<ListRepliesQuery>,
) -> ApiResult<Json<ThreadDetail>> {
    let thread_id = required(query.thread_id)
        .ok_or_else(|| ApiError::BadRequest("Thread ID is required.".to_string()))?;

    let thread = state.store.get_thread(&thread_id).await?;

    Ok(Json(ThreadDetail::from(&thread)))
}

/// Reply to a thread, bumping it to the top of its board
#[utoipa::path(
    post,
    path = "/api/replies/{board}",
    params(
        ("board" = String, Path, description = "Board name")
    ),
    request_body = CreateReplyRequest,
    responses(
        (status = 201, description = "Reply created", body = CreatedReply),
        (status = 400, description = "Missing thread_id, text or delete_password"),
        (status = 404, description = "Thread not found")
    ),
    tag = "replies"
)]
pub async fn create_reply(
    State(state): State<Arc<AppState>>,
    Path(board): Path<String>,
    BoardForm(req): BoardForm<CreateReplyRequest>,
) -> ApiResult<(StatusCode, [(header::HeaderName, String); 1], Json<CreatedReply>)> {
    let (Some(thread_id), Some(text), Some(delete_password)) = (
        required(req.thread_id),
        required(req.text),
        required(req.delete_password),
    ) else {
        return Err(ApiError::BadRequest(
            "Thread ID, Text, and Delete Password are required.".to_string(),
        ));
    };

    let reply = state
        .store
        .push_reply(&thread_id, NewReply { text, delete_password })
        .await?;

    tracing::info!(thread_id = %thread_id, reply_id = %reply.id, "Reply created");

    let location = format!(
        "/b/{}/{}?new_reply_id={}",
        urlencoding::encode(&board),
        thread_id,
        reply.id
    );
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(CreatedReply::new(&thread_id, &reply)),
    ))
}

/// Flag a reply for moderation
#[utoipa::path(
    put,
    path = "/api/replies/{board}",
    params(
        ("board" = String, Path, description = "Board name")
    ),
    request_body = ReportReplyRequest,
    responses(
        (status = 200, description = "Always the text `reported`", body = String),
        (status = 400, description = "Missing thread_id or reply_id"),
        (status = 404, description = "Thread or reply not found")
    ),
    tag = "replies"
)]
pub async fn report_reply(
    State(state): State<Arc<AppState>>,
    Path(_board): Path<String>,
    BoardForm(req): BoardForm<ReportReplyRequest>,
) -> ApiResult<&'static str> {
    let (Some(thread_id), Some(reply_id)) = (required(req.thread_id), required(req.reply_id))
    else {
        return Err(ApiError::BadRequest(
            "Thread ID and Reply ID are required.".to_string(),
        ));
    };

    state.store.report_reply(&thread_id, &reply_id).await?;

    tracing::info!(thread_id = %thread_id, reply_id = %reply_id, "Reply reported");
    Ok(REPORTED)
}

/// Blank out a reply's text, keeping its place in the thread
#[utoipa::path(
    delete,
    path = "/api/replies/{board}",
    params(
        ("board" = String, Path, description = "Board name")
    ),
    request_body = DeleteReplyRequest,
    responses(
        (status = 200, description = "`success` or `incorrect password`", body = String),
        (status = 400, description = "Missing thread_id, reply_id or delete_password"),
        (status = 404, description = "Thread or reply not found")
    ),
    tag = "replies"
)]
pub async fn delete_reply(
    State(state): State<Arc<AppState>>,
    Path(_board): Path<String>,
    BoardForm(req): BoardForm<DeleteReplyRequest>,
) -> ApiResult<DeleteOutcome> {
    let (Some(thread_id), Some(reply_id), Some(delete_password)) = (
        required(req.thread_id),
        required(req.reply_id),
        required(req.delete_password),
    ) else {
        return Err(ApiError::BadRequest(
            "Thread ID, Reply ID and Delete Password are required.".to_string(),
        ));
    };

    let thread = state.store.get_thread(&thread_id).await?;
    let reply = thread
        .reply(&reply_id)
        .ok_or_else(|| ApiError::ReplyNotFound(reply_id.clone()))?;

    if !reply.password_matches(&delete_password) {
        tracing::info!(thread_id = %thread_id, reply_id = %reply_id, "Reply delete refused: incorrect password");
        return Ok(DeleteOutcome::IncorrectPassword);
    }

    if reply.is_deleted() {
        tracing::debug!(thread_id = %thread_id, reply_id = %reply_id, "Reply already deleted");
        return Ok(DeleteOutcome::Success);
    }

    state
        .store
        .set_reply_text(&thread_id, &reply_id, DELETED_REPLY_TEXT)
        .await?;

    tracing::info!(thread_id = %thread_id, reply_id = %reply_id, "Reply deleted");
    Ok(DeleteOutcome::Success)
}
