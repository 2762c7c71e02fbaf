use serde::Deserialize;
use std::borrow::Cow;
use std::num::{NonZeroU32, NonZeroU64};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::types::Sensitive;

#[derive(Debug, Deserialize)]
pub struct Database {
  /// Writable primary database.
  pub primary: DbPoolConfig,
  /// A read-only replica database used for accessing the data
  /// without interacting with the main database.
  pub replica: Option<DbPoolConfig>,
  /// Forces all database connections are encrypted with TLS
  /// (if possible).
  ///
  /// **Environment variables**:
  /// - `QUILL_DB_ENFORCE_TLS`
  #[serde(default = "DbPoolConfig::default_enforce_tls")]
  pub enforce_tls: bool,
  /// How long this server can wait until its time limit where the
  /// database connection takes a while to acknowledge or
  /// successfully established.
  ///
  /// **Environment variables**:
  /// - `QUILL_DB_TIMEOUT_SECS`
  #[serde(default = "DbPoolConfig::default_pool_timeout_secs")]
  pub timeout_secs: NonZeroU64,
}

/// Configuration for connecting to any Postgres database
#[derive(Debug, Deserialize)]
pub struct DbPoolConfig {
  /// Database pool must be in read-only mode.
  ///
  /// **Environment variables**:
  /// - `QUILL_DB_PRIMARY_READONLY`
  /// - `QUILL_DB_REPLICA_READONLY`
  #[serde(default)]
  pub readonly: bool,
  /// Minimum idle database connections just to avoid wasting
  /// hardware resources from the database server.
  ///
  /// **Environment variables**:
  /// - `QUILL_DB_PRIMARY_MIN_IDLE`
  /// - `QUILL_DB_REPLICA_MIN_IDLE`
  pub min_idle: Option<NonZeroU32>,
  /// Maximum amount of pool size that database can handle
  ///
  /// **Environment variables**:
  /// - `QUILL_DB_PRIMARY_POOL_SIZE`
  /// - `QUILL_DB_REPLICA_POOL_SIZE`
  #[serde(default = "DbPoolConfig::default_pool_size")]
  pub pool_size: NonZeroU32,
  /// Connection URL connecting to the Postgres database.
  ///
  /// **Environment variables**:
  /// - `QUILL_DB_PRIMARY_URL` or `DATABASE_URL`
  /// - `QUILL_DB_REPLICA_URL`
  pub url: Sensitive<String>,
}

impl Validate for Database {
  fn validate(&self) -> Result<(), ValidationErrors> {
    let mut result = ValidationErrors::merge(Ok(()), "primary", self.primary.validate());
    if let Some(replica) = self.replica.as_ref() {
      result = ValidationErrors::merge(result, "replica", replica.validate());
    }
    result
  }
}

impl Validate for DbPoolConfig {
  fn validate(&self) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if url::Url::parse(self.url.as_str()).is_err() {
      let mut error = ValidationError::new("url");
      error.message = Some(Cow::Borrowed("Invalid Postgres connection URL"));
      errors.add("url", error);
    }

    if errors.is_empty() {
      Ok(())
    } else {
      Err(errors)
    }
  }
}

impl DbPoolConfig {
  const DEFAULT_POOL_SIZE: u32 = 5;
  const DEFAULT_POOL_TIMEOUT_SECS: u64 = 5;

  // Required by serde
  const fn default_pool_size() -> NonZeroU32 {
    match NonZeroU32::new(Self::DEFAULT_POOL_SIZE) {
      Some(n) => n,
      None => panic!("DEFAULT_POOL_SIZE is accidentally set to 0"),
    }
  }

  const fn default_pool_timeout_secs() -> NonZeroU64 {
    match NonZeroU64::new(Self::DEFAULT_POOL_TIMEOUT_SECS) {
      Some(n) => n,
      None => panic!("DEFAULT_POOL_TIMEOUT_SECS is accidentally set to 0"),
    }
  }

  const fn default_enforce_tls() -> bool {
    true
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn pool_config(url: &str) -> DbPoolConfig {
    DbPoolConfig {
      readonly: false,
      min_idle: None,
      pool_size: DbPoolConfig::default_pool_size(),
      url: url.to_string().into(),
    }
  }

  #[test]
  fn validate_rejects_malformed_urls() {
    assert!(pool_config("postgres://quill@localhost:5432/quill")
      .validate()
      .is_ok());
    assert!(pool_config("not a url").validate().is_err());
  }

  #[test]
  fn validate_reports_nested_field() {
    let config = Database {
      primary: pool_config("postgres://quill@localhost:5432/quill"),
      replica: Some(pool_config("???")),
      enforce_tls: true,
      timeout_secs: DbPoolConfig::default_pool_timeout_secs(),
    };

    let errors = config.validate().unwrap_err();
    assert!(errors.errors().contains_key("replica"));
    assert!(!errors.errors().contains_key("primary"));
  }
}
