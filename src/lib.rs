//! # Blog Backend
//!
//! A small CRUD backend for blog posts, exposed as a REST API via Axum.
//!
//! The crate follows a layered architecture: every request flows through the
//! router into an HTTP handler, which delegates to the service layer for
//! business rules, which in turn talks to a repository for persistence.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: The `Post` entity and its identifier types
//! - [`db`]: Repository trait, error types, and storage backends
//! - [`services`]: Business rules (timestamps, partial updates, soft delete)
//! - [`render`]: Markdown to HTML conversion for post content
//! - [`http`]: Axum-based HTTP server, handlers, and request/response DTOs
//!
//! ## Storage backends
//!
//! Two repository implementations are provided behind the same trait:
//! an in-memory [`db::repositories::LocalRepository`] used for tests and
//! local development, and a Diesel-backed Postgres repository enabled with
//! the `postgres-repo` feature.

pub mod db;
pub mod models;
pub mod render;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
