use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::posts;
use crate::db::repository::NewPost;
use crate::models::{Post, PostId};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PostRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub struct NewPostRow {
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = posts)]
pub struct PostChangeset {
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: PostId::new(row.id),
            title: row.title,
            content: row.content,
            author: row.author,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

impl From<NewPost> for NewPostRow {
    fn from(post: NewPost) -> Self {
        Self {
            title: post.title,
            content: post.content,
            author: post.author,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl From<Post> for PostChangeset {
    fn from(post: Post) -> Self {
        Self {
            title: post.title,
            content: post.content,
            author: post.author,
            updated_at: post.updated_at,
        }
    }
}
