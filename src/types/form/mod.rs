use serde::Deserialize;

pub mod posts;
pub mod users;

/// Offset/limit parameters shared by every list endpoint.
#[derive(Debug, Deserialize)]
pub struct Pagination {
  #[serde(default)]
  skip: i64,
  #[serde(default = "Pagination::default_limit")]
  limit: i64,
}

impl Pagination {
  const DEFAULT_LIMIT: i64 = 100;

  // Required by serde
  const fn default_limit() -> i64 {
    Self::DEFAULT_LIMIT
  }

  #[must_use]
  pub fn skip(&self) -> i64 {
    self.skip.max(0)
  }

  #[must_use]
  pub fn limit(&self) -> i64 {
    self.limit.max(0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let value: Pagination = serde_json::from_value(serde_json::json!({})).unwrap();
    assert_eq!(value.skip(), 0);
    assert_eq!(value.limit(), 100);
  }

  #[test]
  fn test_negative_values_are_clamped() {
    let value: Pagination =
      serde_json::from_value(serde_json::json!({ "skip": -5, "limit": -1 })).unwrap();
    assert_eq!(value.skip(), 0);
    assert_eq!(value.limit(), 0);
  }
}
