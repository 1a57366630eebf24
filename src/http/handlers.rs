//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic. Handlers own the translation of service errors
//! into HTTP status codes.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Html,
    Json,
};

use super::dto::{CreatePostRequest, HealthResponse, PostDto, UpdatePostRequest};
use super::error::AppError;
use super::state::AppState;
use crate::models::PostId;
use crate::render;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Parse a path segment as a non-negative post ID.
fn parse_id(raw: &str) -> Result<PostId, AppError> {
    raw.parse::<i64>()
        .ok()
        .filter(|v| *v >= 0)
        .map(PostId::new)
        .ok_or_else(|| AppError::BadRequest("Invalid ID".to_string()))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is
/// reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let database = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database,
    }))
}

// =============================================================================
// Post CRUD
// =============================================================================

/// GET /api/posts
///
/// List all posts in insertion order.
pub async fn get_all_posts(State(state): State<AppState>) -> HandlerResult<Vec<PostDto>> {
    let posts = state.service.get_all_posts().await?;
    Ok(Json(posts.into_iter().map(Into::into).collect()))
}

/// GET /api/posts/{id}
pub async fn get_post_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> HandlerResult<PostDto> {
    let id = parse_id(&raw_id)?;
    let post = state.service.get_post_by_id(id).await?;
    Ok(Json(post.into()))
}

/// POST /api/posts
pub async fn create_post(
    State(state): State<AppState>,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PostDto>), AppError> {
    let Json(request) = payload
        .map_err(|e| AppError::BadRequest(format!("Invalid request payload: {}", e)))?;

    let post = state.service.create_post(request.into()).await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> HandlerResult<PostDto> {
    let id = parse_id(&raw_id)?;
    let Json(request) = payload
        .map_err(|e| AppError::BadRequest(format!("Invalid request payload: {}", e)))?;

    // Every service failure on this path, including a missing id, is
    // reported as a plain 500.
    let post = state
        .service
        .update_post(id, request.into())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(post.into()))
}

/// DELETE /api/posts/{id}
///
/// Responds 204 No Content on success.
pub async fn delete_post(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&raw_id)?;
    state.service.delete_post(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Markdown Rendering
// =============================================================================

/// GET /api/posts/{id}/render
///
/// Render the post's markdown content as an HTML fragment.
pub async fn render_markdown(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&raw_id)?;

    let post = state.service.get_post_by_id(id).await.map_err(|e| {
        if e.is_not_found() {
            AppError::NotFound("Post not found".to_string())
        } else {
            AppError::Repository(e)
        }
    })?;

    Ok(Html(render::markdown_to_html(&post.content)))
}
