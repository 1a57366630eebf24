//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, tracing), and creates
//! the axum router ready for serving.

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::config::HttpConfig;
use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState, config: &HttpConfig) -> Router {
    let api = Router::new()
        .route(
            "/posts",
            get(handlers::get_all_posts).post(handlers::create_post),
        )
        .route(
            "/posts/{id}",
            get(handlers::get_post_by_id)
                .put(handlers::update_post)
                .delete(handlers::delete_post),
        )
        .route("/posts/{id}/render", get(handlers::render_markdown));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.allowed_origins))
        .with_state(state)
}

/// Build the CORS layer from the configured origin allow-list.
///
/// An empty list falls back to a permissive policy for local development.
/// Preflight OPTIONS requests are answered by this layer.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];
    let headers = [header::CONTENT_TYPE, header::AUTHORIZATION];

    if allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(headers);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers)
}
