use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use crate::{
  database::{Connection, ErrorExt, Result},
  types::id::{
    marker::{PostMarker, UserMarker},
    Id,
  },
};

#[derive(Debug, Clone, FromRow, Serialize, PartialEq, Eq)]
pub struct Post {
  pub id: Id<PostMarker>,
  pub created_at: NaiveDateTime,
  pub title: String,
  pub content: String,
  pub user_id: Id<UserMarker>,
  pub updated_at: Option<NaiveDateTime>,
}

/// Borrowed field set for inserting a new post row.
pub struct NewPost<'a> {
  pub title: &'a str,
  pub content: &'a str,
  pub user_id: Id<UserMarker>,
}

impl Post {
  /// Lists posts in storage order. The ordering is whatever the
  /// database hands back; it is not guaranteed to be stable.
  #[tracing::instrument(skip(conn), name = "db.posts.list")]
  pub async fn list(conn: &mut Connection, skip: i64, limit: i64) -> Result<Vec<Self>> {
    sqlx::query_as::<_, Self>(r#"SELECT * FROM "posts" OFFSET $1 LIMIT $2"#)
      .bind(skip)
      .bind(limit)
      .fetch_all(conn)
      .await
      .into_db_error()
  }

  /// All posts owned by one user. Yields an empty list both for a
  /// user without posts and for an id that matches no user at all.
  #[tracing::instrument(skip(conn), name = "db.posts.by_user")]
  pub async fn by_user(conn: &mut Connection, user_id: Id<UserMarker>) -> Result<Vec<Self>> {
    sqlx::query_as::<_, Self>(r#"SELECT * FROM "posts" WHERE user_id = $1"#)
      .bind(user_id)
      .fetch_all(conn)
      .await
      .into_db_error()
  }

  /// Inserting relies on the foreign key to reject authors that do
  /// not exist; there is no separate existence check.
  #[tracing::instrument(skip_all, name = "db.posts.insert")]
  pub async fn insert(conn: &mut Connection, form: &NewPost<'_>) -> Result<Self> {
    sqlx::query_as::<_, Self>(
      r#"INSERT INTO "posts" (title, content, user_id)
         VALUES ($1, $2, $3)
         RETURNING *"#,
    )
    .bind(form.title)
    .bind(form.content)
    .bind(form.user_id)
    .fetch_one(conn)
    .await
    .into_db_error()
  }

  /// Replaces the post's content. Returns `None` when no row
  /// matches the id.
  #[tracing::instrument(skip(conn, content), name = "db.posts.update_content")]
  pub async fn update_content(
    conn: &mut Connection,
    id: Id<PostMarker>,
    content: &str,
  ) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(
      r#"UPDATE "posts" SET content = $2, updated_at = now()
         WHERE id = $1
         RETURNING *"#,
    )
    .bind(id)
    .bind(content)
    .fetch_optional(conn)
    .await
    .into_db_error()
  }

  /// Deletes the post. Returns `None` when no row matches the id.
  #[tracing::instrument(skip(conn), name = "db.posts.delete")]
  pub async fn delete(
    conn: &mut Connection,
    id: Id<PostMarker>,
  ) -> Result<Option<Id<PostMarker>>> {
    sqlx::query_scalar::<_, Id<PostMarker>>(r#"DELETE FROM "posts" WHERE id = $1 RETURNING id"#)
      .bind(id)
      .fetch_optional(conn)
      .await
      .into_db_error()
  }
}
