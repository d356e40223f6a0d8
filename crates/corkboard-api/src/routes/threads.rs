use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use corkboard_persist::NewThread;
use crate::{
    error::{ApiError, ApiResult},
    extract::{required, BoardForm},
    state::AppState,
    views::{DeleteOutcome, ThreadSummary, REPORTED, THREAD_LISTING_LIMIT},
};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateThreadRequest {
    pub text: Option<String>,
    pub delete_password: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ReportThreadRequest {
    pub thread_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DeleteThreadRequest {
    pub thread_id: Option<String>,
    pub delete_password: Option<String>,
}

/// List the most recently bumped threads on a board
#[utoipa::path(
    get,
    path = "/api/threads/{board}",
    params(
        ("board" = String, Path, description = "Board name")
    ),
    responses(
        (status = 200, description = "Up to 10 threads, each with its 3 newest replies", body = [ThreadSummary]),
        (status = 500, description = "Storage failure")
    ),
    tag = "threads"
)]
pub async fn list_threads(
    State(state): State<Arc<AppState>>,
    Path(board): Path<String>,
) -> ApiResult<Json<Vec<ThreadSummary>>> {
    let threads = state
        .store
        .list_threads(&board, THREAD_LISTING_LIMIT)
        .await?;

    Ok(Json(threads.iter().map(ThreadSummary::from).collect()))
}

/// Start a new thread on a board
#[utoipa::path(
    post,
    path = "/api/threads/{board}",
    params(
        ("board" = String, Path, description = "Board name")
    ),
    request_body = CreateThreadRequest,
    responses(
        (status = 201, description = "Thread created", body = ThreadSummary),
        (status = 400, description = "Missing text or delete_password")
    ),
    tag = "threads"
)]
pub async fn create_thread(
    State(state): State<Arc<AppState>>,
    Path(board): Path<String>,
    BoardForm(req): BoardForm<CreateThreadRequest>,
) -> ApiResult<(StatusCode, [(header::HeaderName, String); 1], Json<ThreadSummary>)> {
    let (Some(text), Some(delete_password)) = (required(req.text), required(req.delete_password))
    else {
        return Err(ApiError::BadRequest(
            "Text and Delete Password are required.".to_string(),
        ));
    };

    let thread = state
        .store
        .create_thread(NewThread {
            board: board.clone(),
            text,
            delete_password,
        })
        .await?;

    tracing::info!(thread_id = %thread.id, board = %board, "Thread created");

    let location = format!("/b/{}/{}", urlencoding::encode(&board), thread.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ThreadSummary::from(&thread)),
    ))
}

/// Flag a thread for moderation
#[utoipa::path(
    put,
    path = "/api/threads/{board}",
    params(
        ("board" = String, Path, description = "Board name")
    ),
    request_body = ReportThreadRequest,
    responses(
        (status = 200, description = "Always the text `reported`", body = String),
        (status = 400, description = "Missing thread_id"),
        (status = 404, description = "Thread not found")
    ),
    tag = "threads"
)]
pub async fn report_thread(
    State(state): State<Arc<AppState>>,
    Path(_board): Path<String>,
    BoardForm(req): BoardForm<ReportThreadRequest>,
) -> ApiResult<&'static str> {
    let thread_id = required(req.thread_id)
        .ok_or_else(|| ApiError::BadRequest("Thread ID is required.".to_string()))?;

    state.store.report_thread(&thread_id).await?;

    tracing::info!(thread_id = %thread_id, "Thread reported");
    Ok(REPORTED)
}

/// Delete a thread and all of its replies
#[utoipa::path(
    delete,
    path = "/api/threads/{board}",
    params(
        ("board" = String, Path, description = "Board name")
    ),
    request_body = DeleteThreadRequest,
    responses(
        (status = 200, description = "`success` or `incorrect password`", body = String),
        (status = 400, description = "Missing thread_id or delete_password"),
        (status = 404, description = "Thread not found")
    ),
    tag = "threads"
)]
pub async fn delete_thread(
    State(state): State<Arc<AppState>>,
    Path(_board): Path<String>,
    BoardForm(req): BoardForm<DeleteThreadRequest>,
) -> ApiResult<DeleteOutcome> {
    let (Some(thread_id), Some(delete_password)) =
        (required(req.thread_id), required(req.delete_password))
    else {
        return Err(ApiError::BadRequest(
            "Thread ID and Delete Password are required.".to_string(),
        ));
    };

    let thread = state.store.get_thread(&thread_id).await?;

    if !thread.password_matches(&delete_password) {
        tracing::info!(thread_id = %thread_id, "Thread delete refused: incorrect password");
        return Ok(DeleteOutcome::IncorrectPassword);
    }

    state.store.delete_thread(&thread_id).await?;

    tracing::info!(thread_id = %thread_id, replies = thread.replies.len(), "Thread deleted");
    Ok(DeleteOutcome::Success)
}
