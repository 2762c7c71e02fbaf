use serde::Deserialize;

use crate::types::id::{marker::UserMarker, Id};

#[derive(Debug, Deserialize)]
pub struct CreatePost {
  pub title: String,
  pub content: String,
  pub user_id: Id<UserMarker>,
}

/// Only the content may change after creation; title and author
/// are immutable.
#[derive(Debug, Deserialize)]
pub struct UpdatePost {
  pub content: String,
}
