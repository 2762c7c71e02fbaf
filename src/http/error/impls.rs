use actix_web::{body::BoxBody, http::StatusCode, HttpResponse};
use error_stack::Report;
use tracing::error;

use super::Error;
use crate::{database, types::Error as ErrorType};

impl actix_web::ResponseError for Error {
  fn status_code(&self) -> StatusCode {
    match self.error_type {
      ErrorType::Internal => StatusCode::INTERNAL_SERVER_ERROR,
      ErrorType::NotFound(..) => StatusCode::NOT_FOUND,
      ErrorType::AlreadyExists(..) => StatusCode::CONFLICT,
      ErrorType::InvalidReference => StatusCode::UNPROCESSABLE_ENTITY,
      ErrorType::ReadonlyMode => StatusCode::SERVICE_UNAVAILABLE,
    }
  }

  fn error_response(&self) -> HttpResponse<BoxBody> {
    // The report never leaves the process; clients only get the
    // `{"detail": ...}` body.
    if self.status_code().is_server_error() {
      error!("{self}");
    }
    HttpResponse::build(self.status_code()).json(&self.error_type)
  }
}

impl From<Report<database::Error>> for Error {
  fn from(value: Report<database::Error>) -> Self {
    let error_type = match value.current_context() {
      database::Error::Readonly => ErrorType::ReadonlyMode,
      database::Error::UniqueViolation(constraint) => {
        ErrorType::AlreadyExists(field_from_constraint(constraint.as_deref()))
      }
      database::Error::ForeignKeyViolation(..) => ErrorType::InvalidReference,
      _ => ErrorType::Internal,
    };
    Error::from_report(error_type, value)
  }
}

/// Postgres names single-column unique constraints `<table>_<column>_key`;
/// recover the column so the client learns which field collided.
fn field_from_constraint(constraint: Option<&str>) -> Option<&'static str> {
  match constraint {
    Some("users_username_key") => Some("username"),
    Some("users_email_key") => Some("email"),
    _ => None,
  }
}
