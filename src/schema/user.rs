use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use crate::{
  database::{Connection, ErrorExt, Result},
  types::{
    id::{marker::UserMarker, Id},
    Sensitive,
  },
};

#[derive(Debug, Clone, FromRow, Serialize, PartialEq, Eq)]
pub struct User {
  pub id: Id<UserMarker>,
  pub created_at: NaiveDateTime,
  pub username: String,
  pub email: String,
  // The source system stores and echoes the raw password. Kept
  // behind [`Sensitive`] so it never shows up in logs at least.
  pub password: Sensitive<String>,
  pub updated_at: Option<NaiveDateTime>,
}

/// Borrowed field set for inserting a new user row.
pub struct NewUser<'a> {
  pub username: &'a str,
  pub email: &'a str,
  pub password: Sensitive<&'a str>,
}

impl User {
  /// Lists users in storage order. The ordering is whatever the
  /// database hands back; it is not guaranteed to be stable.
  #[tracing::instrument(skip(conn), name = "db.users.list")]
  pub async fn list(conn: &mut Connection, skip: i64, limit: i64) -> Result<Vec<Self>> {
    sqlx::query_as::<_, Self>(r#"SELECT * FROM "users" OFFSET $1 LIMIT $2"#)
      .bind(skip)
      .bind(limit)
      .fetch_all(conn)
      .await
      .into_db_error()
  }

  #[tracing::instrument(skip_all, name = "db.users.insert")]
  pub async fn insert(conn: &mut Connection, form: &NewUser<'_>) -> Result<Self> {
    sqlx::query_as::<_, Self>(
      r#"INSERT INTO "users" (username, email, password)
         VALUES ($1, $2, $3)
         RETURNING *"#,
    )
    .bind(form.username)
    .bind(form.email)
    .bind(form.password.as_str())
    .fetch_one(conn)
    .await
    .into_db_error()
  }

  /// Replaces the user's e-mail address. Returns `None` when no row
  /// matches the id.
  #[tracing::instrument(skip(conn, email), name = "db.users.update_email")]
  pub async fn update_email(
    conn: &mut Connection,
    id: Id<UserMarker>,
    email: &str,
  ) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(
      r#"UPDATE "users" SET email = $2, updated_at = now()
         WHERE id = $1
         RETURNING *"#,
    )
    .bind(id)
    .bind(email)
    .fetch_optional(conn)
    .await
    .into_db_error()
  }

  /// Deletes the user; owned posts go with it through the cascade
  /// on `posts.user_id`. Returns `None` when no row matches the id.
  #[tracing::instrument(skip(conn), name = "db.users.delete")]
  pub async fn delete(
    conn: &mut Connection,
    id: Id<UserMarker>,
  ) -> Result<Option<Id<UserMarker>>> {
    sqlx::query_scalar::<_, Id<UserMarker>>(r#"DELETE FROM "users" WHERE id = $1 RETURNING id"#)
      .bind(id)
      .fetch_optional(conn)
      .await
      .into_db_error()
  }
}
