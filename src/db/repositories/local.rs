//! In-memory repository implementation.
//!
//! Used for unit tests and local development. Posts live in a `BTreeMap`
//! keyed by ID, so iteration order matches insertion order (IDs are
//! assigned monotonically).

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::BTreeMap;

use crate::db::repository::{
    ErrorContext, NewPost, PostRepository, RepositoryError, RepositoryResult,
};
use crate::models::{Post, PostId};

#[derive(Debug, Default)]
struct LocalStore {
    posts: BTreeMap<i64, Post>,
    next_id: i64,
}

/// In-memory implementation of [`PostRepository`].
#[derive(Debug, Default)]
pub struct LocalRepository {
    store: RwLock<LocalStore>,
}

impl LocalRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently stored, including soft-deleted ones.
    pub fn row_count(&self) -> usize {
        self.store.read().posts.len()
    }

    fn not_found(operation: &str, id: PostId) -> RepositoryError {
        RepositoryError::not_found_with_context(
            format!("post {} not found", id),
            ErrorContext::new(operation).with_entity_id(id),
        )
    }
}

#[async_trait]
impl PostRepository for LocalRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Post>> {
        let store = self.store.read();
        Ok(store
            .posts
            .values()
            .filter(|post| !post.is_deleted())
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: PostId) -> RepositoryResult<Post> {
        let store = self.store.read();
        store
            .posts
            .get(&id.value())
            .filter(|post| !post.is_deleted())
            .cloned()
            .ok_or_else(|| Self::not_found("find_by_id", id))
    }

    async fn create(&self, post: NewPost) -> RepositoryResult<Post> {
        let mut store = self.store.write();
        store.next_id += 1;
        let id = store.next_id;
        let stored = Post {
            id: PostId::new(id),
            title: post.title,
            content: post.content,
            author: post.author,
            created_at: post.created_at,
            updated_at: post.updated_at,
            deleted_at: None,
        };
        store.posts.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, post: Post) -> RepositoryResult<Post> {
        let mut store = self.store.write();
        let id = post.id;
        match store.posts.get_mut(&id.value()) {
            Some(existing) if !existing.is_deleted() => {
                *existing = post.clone();
                Ok(post)
            }
            _ => Err(Self::not_found("update", id)),
        }
    }

    async fn delete(&self, id: PostId) -> RepositoryResult<()> {
        let mut store = self.store.write();
        match store.posts.get_mut(&id.value()) {
            Some(existing) if !existing.is_deleted() => {
                existing.deleted_at = Some(Utc::now());
                Ok(())
            }
            _ => Err(Self::not_found("delete", id)),
        }
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> NewPost {
        let now = Utc::now();
        NewPost {
            title: title.to_string(),
            content: format!("content of {}", title),
            author: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_ids_are_assigned_monotonically() {
        let repo = LocalRepository::new();
        let first = repo.create(draft("a")).await.unwrap();
        let second = repo.create(draft("b")).await.unwrap();
        assert!(second.id.value() > first.id.value());
    }

    #[tokio::test]
    async fn test_soft_delete_keeps_row() {
        let repo = LocalRepository::new();
        let post = repo.create(draft("a")).await.unwrap();

        repo.delete(post.id).await.unwrap();

        let err = repo.find_by_id(post.id).await.unwrap_err();
        assert!(err.is_not_found());
        // Row still physically present
        assert_eq!(repo.row_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_twice_reports_not_found() {
        let repo = LocalRepository::new();
        let post = repo.create(draft("a")).await.unwrap();
        repo.delete(post.id).await.unwrap();

        let err = repo.delete(post.id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_deleted_row_reports_not_found() {
        let repo = LocalRepository::new();
        let mut post = repo.create(draft("a")).await.unwrap();
        repo.delete(post.id).await.unwrap();

        post.title = "changed".to_string();
        let err = repo.update(post).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
