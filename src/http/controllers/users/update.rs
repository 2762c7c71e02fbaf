use actix_web::{
  web::{self, Json},
  HttpResponse,
};

use crate::{
  http::Error,
  schema::User,
  types::{
    form::users::UpdateUser,
    id::{marker::UserMarker, Id},
    Resource,
  },
  App,
};

/// `PUT /users/{id}`
#[tracing::instrument]
pub async fn update(
  app: web::Data<App>,
  path: web::Path<i64>,
  form: Json<UpdateUser>,
) -> Result<HttpResponse, Error> {
  // Row ids are positive, so anything else cannot match a user.
  let Some(id) = u64::try_from(*path).ok().and_then(Id::<UserMarker>::new_checked) else {
    return Err(Error::not_found(Resource::User));
  };

  let mut conn = app.db_write().await?;
  let Some(user) = User::update_email(&mut conn, id, &form.email).await? else {
    return Err(Error::not_found(Resource::User));
  };

  Ok(HttpResponse::Ok().json(user))
}
