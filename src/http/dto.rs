//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! The soft-delete marker never appears in responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Post, PostDraft};

/// Request body for creating a new post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    /// Post title
    pub title: String,
    /// Markdown source (may be empty)
    pub content: String,
    /// Optional author name
    #[serde(default)]
    pub author: Option<String>,
}

/// Request body for updating a post.
///
/// `author` is accepted for wire compatibility but the update path does not
/// apply it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
}

impl From<CreatePostRequest> for PostDraft {
    fn from(req: CreatePostRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            author: req.author,
        }
    }
}

impl From<UpdatePostRequest> for PostDraft {
    fn from(req: UpdatePostRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            author: req.author,
        }
    }
}

/// Post representation in API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDto {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.value(),
            title: post.title,
            content: post.content,
            author: post.author,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Store connection status
    pub database: String,
}
