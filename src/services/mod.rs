//! Service layer for business rules.
//!
//! Services sit between the HTTP handlers and the repository. They own the
//! field-level rules: creation timestamps, the partial-update merge, and the
//! load-then-delete flow for soft deletion.

pub mod post_service;

pub use post_service::{DefaultPostService, PostService};
