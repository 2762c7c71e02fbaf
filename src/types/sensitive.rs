use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};

/// Keeps the raw sensitive data in memory but it cannot be
/// accidentally leaked through the console or logs.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
  #[must_use]
  pub const fn new(value: T) -> Self {
    Self(value)
  }

  #[must_use]
  pub fn into_inner(self) -> T {
    self.0
  }
}

impl<T> Debug for Sensitive<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("<hidden>").finish()
  }
}

impl<T> Display for Sensitive<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("<hidden>").finish()
  }
}

impl<T> AsRef<T> for Sensitive<T> {
  fn as_ref(&self) -> &T {
    &self.0
  }
}

impl<T: AsRef<str>> Sensitive<T> {
  #[must_use]
  pub fn as_str(&self) -> &str {
    self.0.as_ref()
  }
}

impl<T> From<T> for Sensitive<T> {
  fn from(value: T) -> Self {
    Self(value)
  }
}

impl<T> std::borrow::Borrow<T> for Sensitive<T> {
  fn borrow(&self) -> &T {
    &self.0
  }
}

impl<T: sqlx::Type<sqlx::Postgres>> sqlx::Type<sqlx::Postgres> for Sensitive<T> {
  fn type_info() -> <sqlx::Postgres as sqlx::Database>::TypeInfo {
    T::type_info()
  }

  fn compatible(ty: &<sqlx::Postgres as sqlx::Database>::TypeInfo) -> bool {
    T::compatible(ty)
  }
}

impl<'q, T: sqlx::Encode<'q, sqlx::Postgres>> sqlx::Encode<'q, sqlx::Postgres> for Sensitive<T> {
  fn encode_by_ref(
    &self,
    buf: &mut <sqlx::Postgres as sqlx::database::HasArguments<'q>>::ArgumentBuffer,
  ) -> sqlx::encode::IsNull {
    self.0.encode_by_ref(buf)
  }
}

impl<'r, T: sqlx::Decode<'r, sqlx::Postgres>> sqlx::Decode<'r, sqlx::Postgres> for Sensitive<T> {
  fn decode(
    value: <sqlx::Postgres as sqlx::database::HasValueRef<'r>>::ValueRef,
  ) -> Result<Self, sqlx::error::BoxDynError> {
    T::decode(value).map(Self)
  }
}

#[cfg(test)]
mod tests {
  use super::Sensitive;
  use serde_test::Token;

  #[test]
  fn test_serde_impl() {
    let value = Sensitive::new("hunter2".to_string());
    serde_test::assert_tokens(&value, &[Token::Str("hunter2")]);
  }

  #[test]
  fn test_fmt() {
    let value = Sensitive::new("hello");
    assert_eq!(value.to_string(), "<hidden>");
    assert_eq!(format!("{value:?}"), "<hidden>");
  }
}
