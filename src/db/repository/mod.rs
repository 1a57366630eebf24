//! Repository trait defining the persistence interface for posts.
//!
//! The trait is the only seam between business logic and storage; alternate
//! backends (in-memory, Postgres) implement it without the service layer
//! knowing which one is in use.

mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

use crate::models::{Post, PostId};

/// Repository trait for post persistence.
///
/// Implementations own all store access and contain no business logic.
/// Soft-deleted rows are invisible through every method here.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Fetch all non-deleted posts in insertion order (ascending ID).
    async fn find_all(&self) -> RepositoryResult<Vec<Post>>;

    /// Fetch a single non-deleted post by ID.
    ///
    /// # Returns
    /// * `Ok(Post)` if a matching row exists
    /// * `Err(RepositoryError::NotFound)` if no non-deleted row matches
    async fn find_by_id(&self, id: PostId) -> RepositoryResult<Post>;

    /// Persist a new post and return it with the store-assigned ID.
    async fn create(&self, post: NewPost) -> RepositoryResult<Post>;

    /// Persist all current fields of `post`, keyed by its ID.
    ///
    /// # Returns
    /// * `Ok(Post)` with the stored state
    /// * `Err(RepositoryError::NotFound)` if the row is missing or deleted
    async fn update(&self, post: Post) -> RepositoryResult<Post>;

    /// Soft-delete a post by setting its deletion timestamp.
    ///
    /// The row is not physically removed.
    async fn delete(&self, id: PostId) -> RepositoryResult<()>;

    /// Probe store connectivity. Backs the health endpoint.
    async fn health_check(&self) -> RepositoryResult<bool>;
}

/// Fields for a post that has not been assigned an ID yet.
///
/// Timestamps are set by the service layer before the draft reaches the
/// repository.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
