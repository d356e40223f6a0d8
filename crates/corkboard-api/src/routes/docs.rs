use axum::Json;
use utoipa::OpenApi;

use crate::routes::{health, replies, threads};
use crate::views::{CreatedReply, ReplyView, ThreadDetail, ThreadSummary};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        threads::list_threads,
        threads::create_thread,
        threads::report_thread,
        threads::delete_thread,
        replies::list_replies,
        replies::create_reply,
        replies::report_reply,
        replies::delete_reply,
    ),
    components(schemas(
        health::HealthResponse,
        threads::CreateThreadRequest,
        threads::ReportThreadRequest,
        threads::DeleteThreadRequest,
        replies::CreateReplyRequest,
        replies::ReportReplyRequest,
        replies::DeleteReplyRequest,
        ThreadSummary,
        ThreadDetail,
        ReplyView,
        CreatedReply,
    )),
    tags(
        (name = "threads", description = "Board threads"),
        (name = "replies", description = "Replies within a thread"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

/// Serve the generated OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_board_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/api/threads/{board}"));
        assert!(paths.contains_key("/api/replies/{board}"));
        assert!(paths.contains_key("/health"));
    }
}
