//! Domain model types for the blog backend.

pub mod post;

pub use post::{Post, PostDraft, PostId};
