use actix_web::{
  web::{self, Json},
  HttpResponse,
};

use crate::{
  http::Error,
  schema::Post,
  types::{
    form::posts::UpdatePost,
    id::{marker::PostMarker, Id},
    Resource,
  },
  App,
};

/// `PUT /posts/{id}`
#[tracing::instrument]
pub async fn update(
  app: web::Data<App>,
  path: web::Path<i64>,
  form: Json<UpdatePost>,
) -> Result<HttpResponse, Error> {
  // Row ids are positive, so anything else cannot match a post.
  let Some(id) = u64::try_from(*path).ok().and_then(Id::<PostMarker>::new_checked) else {
    return Err(Error::not_found(Resource::Post));
  };

  let mut conn = app.db_write().await?;
  let Some(post) = Post::update_content(&mut conn, id, &form.content).await? else {
    return Err(Error::not_found(Resource::Post));
  };

  Ok(HttpResponse::Ok().json(post))
}
