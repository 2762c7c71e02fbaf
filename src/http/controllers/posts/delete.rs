use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::{
  http::Error,
  schema::Post,
  types::{
    id::{marker::PostMarker, Id},
    Resource,
  },
  App,
};

/// `DELETE /posts/{id}`
#[tracing::instrument]
pub async fn delete(app: web::Data<App>, path: web::Path<i64>) -> Result<HttpResponse, Error> {
  let Some(id) = u64::try_from(*path).ok().and_then(Id::<PostMarker>::new_checked) else {
    return Err(Error::not_found(Resource::Post));
  };

  let mut conn = app.db_write().await?;
  if Post::delete(&mut conn, id).await?.is_none() {
    return Err(Error::not_found(Resource::Post));
  }

  Ok(HttpResponse::Ok().json(json!({ "message": "Post deleted" })))
}
