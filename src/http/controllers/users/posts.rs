use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::{
  http::Error,
  schema::Post,
  types::id::{marker::UserMarker, Id},
  App,
};

/// `GET /users/{id}/posts/`
///
/// An unknown user id and a user without posts both produce `[]`;
/// the response shape does not tell them apart.
#[tracing::instrument]
pub async fn posts(app: web::Data<App>, path: web::Path<i64>) -> Result<HttpResponse, Error> {
  let Some(user_id) = u64::try_from(*path).ok().and_then(Id::<UserMarker>::new_checked) else {
    return Ok(HttpResponse::Ok().json(json!([])));
  };

  let mut conn = app.db_read().await?;
  let posts = Post::by_user(&mut conn, user_id).await?;

  Ok(HttpResponse::Ok().json(posts))
}
