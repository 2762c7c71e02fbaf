use actix_web::{web, HttpResponse};

use crate::{http::Error, schema::User, types::form::Pagination, App};

/// `GET /users/?skip=&limit=`
#[tracing::instrument]
pub async fn list(
  app: web::Data<App>,
  query: web::Query<Pagination>,
) -> Result<HttpResponse, Error> {
  let mut conn = app.db_read().await?;
  let users = User::list(&mut conn, query.skip(), query.limit()).await?;

  Ok(HttpResponse::Ok().json(users))
}
