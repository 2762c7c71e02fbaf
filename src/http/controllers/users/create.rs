use actix_web::{
  web::{self, Json},
  HttpResponse,
};

use crate::{
  http::Error,
  schema::{NewUser, User},
  types::form::users::CreateUser,
  App,
};

/// `POST /users/`
///
/// No uniqueness pre-check happens here; a duplicate username or
/// e-mail is rejected by the storage constraints and classified on
/// the way back out. The response echoes the stored row, password
/// included, exactly as the storage returned it.
#[tracing::instrument]
pub async fn create(app: web::Data<App>, form: Json<CreateUser>) -> Result<HttpResponse, Error> {
  let mut conn = app.db_write().await?;
  let user = User::insert(
    &mut conn,
    &NewUser {
      username: &form.username,
      email: &form.email,
      password: form.password.as_str().into(),
    },
  )
  .await?;

  Ok(HttpResponse::Ok().json(user))
}
