use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use corkboard_persist::PersistError;

/// Failures surfaced to API callers.
///
/// Every variant renders as a short plain-text body. A wrong delete password
/// is not represented here: it is a normal outcome, see
/// [`DeleteOutcome`](crate::views::DeleteOutcome).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Thread not found")]
    ThreadNotFound(String),

    #[error("Reply not found")]
    ReplyNotFound(String),

    #[error("Persistence error: {0}")]
    Persist(PersistError),
}

impl From<PersistError> for ApiError {
    fn from(err: PersistError) -> Self {
        match err {
            PersistError::ThreadNotFound(id) => ApiError::ThreadNotFound(id),
            PersistError::ReplyNotFound(id) => ApiError::ReplyNotFound(id),
            other => ApiError::Persist(other),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ThreadNotFound(_) | ApiError::ReplyNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Persist(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match self {
            ApiError::BadRequest(ref msg) => {
                tracing::debug!("Rejected request: {}", msg);
                msg.clone()
            }
            ApiError::ThreadNotFound(ref id) => {
                tracing::debug!(thread_id = %id, "Thread not found");
                self.to_string()
            }
            ApiError::ReplyNotFound(ref id) => {
                tracing::debug!(reply_id = %id, "Reply not found");
                self.to_string()
            }
            ApiError::Persist(ref e) => {
                tracing::error!("Persistence error: {}", e);
                "Storage error".to_string()
            }
        };

        (self.status(), message).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
