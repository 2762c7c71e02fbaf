use serde::Deserialize;

use crate::types::Sensitive;

#[derive(Debug, Deserialize)]
pub struct CreateUser {
  pub username: String,
  pub email: String,
  pub password: Sensitive<String>,
}

/// Only the e-mail address may change after creation; every other
/// field is immutable.
#[derive(Debug, Deserialize)]
pub struct UpdateUser {
  pub email: String,
}
