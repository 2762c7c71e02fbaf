use actix_web::{
  web::{self, Json},
  HttpResponse,
};

use crate::{
  http::Error,
  schema::{NewPost, Post},
  types::form::posts::CreatePost,
  App,
};

/// `POST /posts/`
///
/// The author is not looked up beforehand; a `user_id` that matches
/// no user trips the foreign key and is classified on the way out.
#[tracing::instrument]
pub async fn create(app: web::Data<App>, form: Json<CreatePost>) -> Result<HttpResponse, Error> {
  let mut conn = app.db_write().await?;
  let post = Post::insert(
    &mut conn,
    &NewPost {
      title: &form.title,
      content: &form.content,
      user_id: form.user_id,
    },
  )
  .await?;

  Ok(HttpResponse::Ok().json(post))
}
