//! Postgres repository implementation using Diesel.
//!
//! This module implements [`PostRepository`] against a Postgres database.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic migration execution at startup
//! - Soft delete via the `deleted_at` column
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)

use async_trait::async_trait;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;
use tokio::task;

use crate::db::repository::{
    ErrorContext, NewPost, PostRepository, RepositoryError, RepositoryResult,
};
use crate::models::{Post, PostId};

mod models;
mod schema;

use models::{NewPostRow, PostChangeset, PostRow};
use schema::posts::dsl;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
    /// - `PG_POOL_MAX`: Maximum pool size (default: 10)
    /// - `PG_POOL_MIN`: Minimum pool size (default: 1)
    /// - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
    /// - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let max_pool_size = std::env::var("PG_POOL_MAX")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let min_pool_size = std::env::var("PG_POOL_MIN")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(1);

        let connection_timeout_sec = std::env::var("PG_CONN_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let idle_timeout_sec = std::env::var("PG_IDLE_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(600);

        Ok(Self {
            database_url,
            max_pool_size,
            min_pool_size,
            connection_timeout_sec,
            idle_timeout_sec,
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Diesel-backed repository for Postgres.
#[derive(Clone)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    ///
    /// # Arguments
    /// * `config` - Database configuration
    ///
    /// # Returns
    /// * `Ok(PostgresRepository)` on success
    /// * `Err(RepositoryError)` if connection or migration fails
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool"),
                )
            })?;

        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self { pool })
    }

    /// Run pending database migrations.
    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal(format!("Migration failed: {}", e))
        })?;

        Ok(())
    }

    /// Run a blocking Diesel operation on a pooled connection.
    ///
    /// `diesel::result::Error::NotFound` is mapped to
    /// `RepositoryError::NotFound`; everything else becomes a query error.
    async fn with_conn<T, F>(&self, operation: &'static str, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> Result<T, diesel::result::Error> + Send + 'static,
    {
        let pool = self.pool.clone();
        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new(operation),
                )
            })?;
            f(&mut conn).map_err(|e| match e {
                diesel::result::Error::NotFound => RepositoryError::not_found_with_context(
                    "post not found",
                    ErrorContext::new(operation),
                ),
                other => RepositoryError::query_with_context(
                    other.to_string(),
                    ErrorContext::new(operation),
                ),
            })
        })
        .await
        .map_err(|e| RepositoryError::internal(format!("Task join error: {}", e)))?
    }
}

#[async_trait]
impl PostRepository for PostgresRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Post>> {
        let rows = self
            .with_conn("find_all", |conn| {
                dsl::posts
                    .filter(dsl::deleted_at.is_null())
                    .order(dsl::id.asc())
                    .select(PostRow::as_select())
                    .load(conn)
            })
            .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn find_by_id(&self, post_id: PostId) -> RepositoryResult<Post> {
        let row = self
            .with_conn("find_by_id", move |conn| {
                dsl::posts
                    .filter(dsl::id.eq(post_id.value()))
                    .filter(dsl::deleted_at.is_null())
                    .select(PostRow::as_select())
                    .first(conn)
            })
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound { .. } => RepositoryError::not_found_with_context(
                    format!("post {} not found", post_id),
                    ErrorContext::new("find_by_id").with_entity_id(post_id),
                ),
                other => other,
            })?;

        Ok(row.into())
    }

    async fn create(&self, post: NewPost) -> RepositoryResult<Post> {
        let new_row = NewPostRow::from(post);
        let row = self
            .with_conn("create", move |conn| {
                diesel::insert_into(dsl::posts)
                    .values(&new_row)
                    .returning(PostRow::as_returning())
                    .get_result(conn)
            })
            .await?;

        Ok(row.into())
    }

    async fn update(&self, post: Post) -> RepositoryResult<Post> {
        let post_id = post.id;
        let changeset = PostChangeset::from(post);
        let row = self
            .with_conn("update", move |conn| {
                diesel::update(
                    dsl::posts
                        .filter(dsl::id.eq(post_id.value()))
                        .filter(dsl::deleted_at.is_null()),
                )
                .set(&changeset)
                .returning(PostRow::as_returning())
                .get_result(conn)
            })
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound { .. } => RepositoryError::not_found_with_context(
                    format!("post {} not found", post_id),
                    ErrorContext::new("update").with_entity_id(post_id),
                ),
                other => other,
            })?;

        Ok(row.into())
    }

    async fn delete(&self, post_id: PostId) -> RepositoryResult<()> {
        let affected = self
            .with_conn("delete", move |conn| {
                diesel::update(
                    dsl::posts
                        .filter(dsl::id.eq(post_id.value()))
                        .filter(dsl::deleted_at.is_null()),
                )
                .set(dsl::deleted_at.eq(Some(Utc::now())))
                .execute(conn)
            })
            .await?;

        if affected == 0 {
            return Err(RepositoryError::not_found_with_context(
                format!("post {} not found", post_id),
                ErrorContext::new("delete").with_entity_id(post_id),
            ));
        }

        Ok(())
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn("health_check", |conn| {
            sql_query("SELECT 1").execute(conn).map(|_| true)
        })
        .await
    }
}
