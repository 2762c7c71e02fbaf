use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::{
  http::Error,
  schema::User,
  types::{
    id::{marker::UserMarker, Id},
    Resource,
  },
  App,
};

/// `DELETE /users/{id}`
///
/// The cascade on `posts.user_id` removes every post the user owns
/// in the same statement.
#[tracing::instrument]
pub async fn delete(app: web::Data<App>, path: web::Path<i64>) -> Result<HttpResponse, Error> {
  let Some(id) = u64::try_from(*path).ok().and_then(Id::<UserMarker>::new_checked) else {
    return Err(Error::not_found(Resource::User));
  };

  let mut conn = app.db_write().await?;
  if User::delete(&mut conn, id).await?.is_none() {
    return Err(Error::not_found(Resource::User));
  }

  Ok(HttpResponse::Ok().json(json!({ "message": "User deleted" })))
}
