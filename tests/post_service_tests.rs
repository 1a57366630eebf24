//! Service-layer tests over the in-memory repository.

use std::sync::Arc;
use std::time::Duration;

use blog_backend::db::repositories::LocalRepository;
use blog_backend::db::PostRepository;
use blog_backend::models::{PostDraft, PostId};
use blog_backend::services::{DefaultPostService, PostService};

fn setup() -> (Arc<LocalRepository>, DefaultPostService) {
    let repo = Arc::new(LocalRepository::new());
    let service = DefaultPostService::new(repo.clone());
    (repo, service)
}

fn draft(title: &str, content: &str, author: Option<&str>) -> PostDraft {
    PostDraft {
        title: title.to_string(),
        content: content.to_string(),
        author: author.map(str::to_string),
    }
}

#[tokio::test]
async fn test_create_and_fetch_roundtrip() {
    let (_, service) = setup();
    let created = service
        .create_post(draft("Title", "Content", Some("alice")))
        .await
        .unwrap();

    let fetched = service.get_post_by_id(created.id).await.unwrap();
    assert_eq!(fetched.title, "Title");
    assert_eq!(fetched.content, "Content");
    assert_eq!(fetched.author.as_deref(), Some("alice"));
    assert_eq!(fetched.created_at, fetched.updated_at);
}

#[tokio::test]
async fn test_get_all_posts_in_insertion_order() {
    let (_, service) = setup();
    for title in ["a", "b", "c"] {
        service.create_post(draft(title, "", None)).await.unwrap();
    }

    let posts = service.get_all_posts().await.unwrap();
    let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_updated_at_strictly_increases() {
    let (_, service) = setup();
    let created = service.create_post(draft("t", "c", None)).await.unwrap();

    tokio::time::sleep(Duration::from_millis(5)).await;

    let updated = service
        .update_post(created.id, draft("t2", "c2", None))
        .await
        .unwrap();
    assert!(updated.updated_at > created.updated_at);
    assert!(updated.updated_at >= updated.created_at);
}

#[tokio::test]
async fn test_update_preserves_author_and_created_at() {
    let (_, service) = setup();
    let created = service
        .create_post(draft("t", "c", Some("alice")))
        .await
        .unwrap();

    let updated = service
        .update_post(created.id, draft("t2", "c2", Some("bob")))
        .await
        .unwrap();
    assert_eq!(updated.author.as_deref(), Some("alice"));
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn test_delete_hides_post_but_keeps_row() {
    let (repo, service) = setup();
    let created = service.create_post(draft("t", "c", None)).await.unwrap();

    service.delete_post(created.id).await.unwrap();

    assert!(service
        .get_post_by_id(created.id)
        .await
        .unwrap_err()
        .is_not_found());
    assert!(service.get_all_posts().await.unwrap().is_empty());
    // Soft delete: the row still exists in the store
    assert_eq!(repo.row_count(), 1);
}

#[tokio::test]
async fn test_operations_on_missing_id_are_not_found() {
    let (_, service) = setup();
    let missing = PostId::new(999_999);

    assert!(service.get_post_by_id(missing).await.unwrap_err().is_not_found());
    assert!(service
        .update_post(missing, draft("t", "c", None))
        .await
        .unwrap_err()
        .is_not_found());
    assert!(service.delete_post(missing).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_repository_delete_direct() {
    // Deleting through the repository alone must behave like the service path.
    let (repo, _) = setup();
    let now = chrono::Utc::now();
    let post = repo
        .create(blog_backend::db::NewPost {
            title: "t".to_string(),
            content: "c".to_string(),
            author: None,
            created_at: now,
            updated_at: now,
        })
        .await
        .unwrap();

    repo.delete(post.id).await.unwrap();
    assert!(repo.find_by_id(post.id).await.unwrap_err().is_not_found());
}
