use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::Config,
    middleware::logging,
    routes::{docs, health, replies, threads},
    state::AppState,
};

/// Assemble every route and middleware layer around the shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Threads
        .route(
            "/threads/:board",
            get(threads::list_threads)
                .post(threads::create_thread)
                .put(threads::report_thread)
                .delete(threads::delete_thread),
        )
        // Replies
        .route(
            "/replies/:board",
            get(replies::list_replies)
                .post(replies::create_reply)
                .put(replies::report_reply)
                .delete(replies::delete_reply),
        )
        .route("/openapi.json", get(docs::openapi_json));

    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer(&state.config))
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(timeout))
                .layer(middleware::from_fn(logging::log_request)),
        )
        .with_state(state)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    if !config.cors.enabled {
        // No allowed origins: browsers get no CORS headers back.
        return CorsLayer::new();
    }

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    if config.cors.origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let parsed_origins: Vec<HeaderValue> = config
            .cors
            .origins
            .iter()
            .filter_map(|o| o.parse::<HeaderValue>().ok())
            .collect();

        cors.allow_origin(parsed_origins)
    }
}
