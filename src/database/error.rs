use error_stack::Report;
use thiserror::Error;

pub type Result<T, E = Error> = error_stack::Result<T, E>;

// SQLSTATE codes worth telling apart from a generic driver error.
const READ_ONLY_TRANSACTION: &str = "25006";
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, Error)]
pub enum Error {
  #[error("Invalid Postgres connection URL")]
  InvalidUrl,
  #[error("Database pool is unhealthy")]
  UnhealthyPool,
  #[error("Attempted to write into a read-only database")]
  Readonly,
  #[error("Unique constraint violation")]
  UniqueViolation(Option<String>),
  #[error("Foreign key constraint violation")]
  ForeignKeyViolation(Option<String>),
  #[error(transparent)]
  Internal(sqlx::Error),
}

#[derive(Debug, Error)]
#[error("Failed to perform database migrations")]
pub struct MigrationError;

pub trait ErrorExt<T> {
  /// Classifies a raw sqlx error into the [`Error`] taxonomy,
  /// wrapped in an [`error_stack::Report`].
  fn into_db_error(self) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, sqlx::Error> {
  fn into_db_error(self) -> Result<T> {
    self.map_err(|error| {
      let code = error
        .as_database_error()
        .and_then(|e| e.code().map(|code| code.into_owned()));

      let constraint = error
        .as_database_error()
        .and_then(|e| e.constraint().map(str::to_owned));

      match code.as_deref() {
        Some(READ_ONLY_TRANSACTION) => Report::new(Error::Readonly),
        Some(UNIQUE_VIOLATION) => Report::new(Error::UniqueViolation(constraint)),
        Some(FOREIGN_KEY_VIOLATION) => Report::new(Error::ForeignKeyViolation(constraint)),
        _ => Report::new(Error::Internal(error)),
      }
    })
  }
}

pub trait ErrorExt2 {
  fn is_unhealthy(&self) -> bool;
}

impl ErrorExt2 for Report<Error> {
  fn is_unhealthy(&self) -> bool {
    matches!(self.current_context(), Error::UnhealthyPool)
  }
}
