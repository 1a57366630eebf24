//! Post service: business rules on top of the repository.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

use crate::db::repository::{NewPost, PostRepository, RepositoryResult};
use crate::models::{Post, PostDraft, PostId};

/// Business-rule layer between HTTP and persistence.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait PostService: Send + Sync {
    /// Fetch all posts in insertion order.
    async fn get_all_posts(&self) -> RepositoryResult<Vec<Post>>;

    /// Fetch a single post by ID. Propagates `NotFound` unchanged.
    async fn get_post_by_id(&self, id: PostId) -> RepositoryResult<Post>;

    /// Create a post from caller-supplied fields.
    ///
    /// Sets `created_at` and `updated_at` to the current time before
    /// delegating to the repository.
    async fn create_post(&self, draft: PostDraft) -> RepositoryResult<Post>;

    /// Update a post's title and content.
    ///
    /// Loads the existing post (`NotFound` if absent), overwrites only
    /// `title` and `content` from the draft, and refreshes `updated_at`.
    /// `author` and `created_at` are left untouched; an author value in the
    /// draft is ignored on this path.
    async fn update_post(&self, id: PostId, draft: PostDraft) -> RepositoryResult<Post>;

    /// Soft-delete a post. Loads the existing post first (`NotFound` if
    /// absent), then delegates to the repository.
    async fn delete_post(&self, id: PostId) -> RepositoryResult<()>;
}

/// Default [`PostService`] implementation over any repository backend.
pub struct DefaultPostService {
    repo: Arc<dyn PostRepository>,
}

impl DefaultPostService {
    /// Create a service over the given repository.
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl PostService for DefaultPostService {
    async fn get_all_posts(&self) -> RepositoryResult<Vec<Post>> {
        self.repo.find_all().await
    }

    async fn get_post_by_id(&self, id: PostId) -> RepositoryResult<Post> {
        self.repo.find_by_id(id).await
    }

    async fn create_post(&self, draft: PostDraft) -> RepositoryResult<Post> {
        let now = Utc::now();
        let post = self
            .repo
            .create(NewPost {
                title: draft.title,
                content: draft.content,
                author: draft.author,
                created_at: now,
                updated_at: now,
            })
            .await?;
        debug!(id = %post.id, "Created post");
        Ok(post)
    }

    async fn update_post(&self, id: PostId, draft: PostDraft) -> RepositoryResult<Post> {
        let mut post = self.repo.find_by_id(id).await?;

        post.title = draft.title;
        post.content = draft.content;
        post.updated_at = Utc::now();

        let updated = self.repo.update(post).await?;
        debug!(id = %updated.id, "Updated post");
        Ok(updated)
    }

    async fn delete_post(&self, id: PostId) -> RepositoryResult<()> {
        self.repo.find_by_id(id).await?;
        self.repo.delete(id).await?;
        debug!(id = %id, "Soft-deleted post");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;

    fn service() -> DefaultPostService {
        DefaultPostService::new(Arc::new(LocalRepository::new()))
    }

    fn draft(title: &str, content: &str, author: Option<&str>) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            content: content.to_string(),
            author: author.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_create_sets_both_timestamps() {
        let svc = service();
        let post = svc
            .create_post(draft("Title", "Body", Some("alice")))
            .await
            .unwrap();

        assert_eq!(post.created_at, post.updated_at);
        assert_eq!(post.author.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_update_ignores_author_in_draft() {
        let svc = service();
        let post = svc
            .create_post(draft("Title", "Body", Some("alice")))
            .await
            .unwrap();

        let updated = svc
            .update_post(post.id, draft("New title", "New body", Some("mallory")))
            .await
            .unwrap();

        assert_eq!(updated.title, "New title");
        assert_eq!(updated.content, "New body");
        assert_eq!(updated.author.as_deref(), Some("alice"));
        assert_eq!(updated.created_at, post.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_post_is_not_found() {
        let svc = service();
        let err = svc
            .update_post(PostId::new(999_999), draft("t", "c", None))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let svc = service();
        let post = svc.create_post(draft("t", "c", None)).await.unwrap();

        svc.delete_post(post.id).await.unwrap();

        let err = svc.get_post_by_id(post.id).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
