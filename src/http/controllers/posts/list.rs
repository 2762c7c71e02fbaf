use actix_web::{web, HttpResponse};

use crate::{http::Error, schema::Post, types::form::Pagination, App};

/// `GET /posts/?skip=&limit=`
#[tracing::instrument]
pub async fn list(
  app: web::Data<App>,
  query: web::Query<Pagination>,
) -> Result<HttpResponse, Error> {
  let mut conn = app.db_read().await?;
  let posts = Post::list(&mut conn, query.skip(), query.limit()).await?;

  Ok(HttpResponse::Ok().json(posts))
}
