//! The `Post` entity and its identifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a stored post.
///
/// Assigned by the repository on creation and immutable afterwards.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PostId(i64);

impl PostId {
    /// Create a new post ID from a raw value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw ID value.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single blog post as stored in the repository.
///
/// `deleted_at` marks the record as soft-deleted: the row stays in the
/// store but is invisible to all normal read, update, and delete paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Store-assigned identifier
    pub id: PostId,
    /// Post title
    pub title: String,
    /// Markdown source of the post body (may be empty)
    pub content: String,
    /// Optional author name
    pub author: Option<String>,
    /// Set once at creation
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful modification; always >= `created_at`
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker, never exposed through the API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Whether this record is soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Caller-supplied fields for creating or updating a post.
///
/// The update path only consumes `title` and `content`; `author` is applied
/// on creation only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_id_roundtrip() {
        let id = PostId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_deleted_at_not_serialized_when_absent() {
        let post = Post {
            id: PostId::new(1),
            title: "t".to_string(),
            content: "c".to_string(),
            author: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        };
        let json = serde_json::to_value(&post).unwrap();
        assert!(json.get("deleted_at").is_none());
    }

    #[test]
    fn test_is_deleted() {
        let mut post = Post {
            id: PostId::new(1),
            title: "t".to_string(),
            content: String::new(),
            author: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        };
        assert!(!post.is_deleted());
        post.deleted_at = Some(Utc::now());
        assert!(post.is_deleted());
    }
}
