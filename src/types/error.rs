use serde::ser::SerializeMap;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt::Display;

/// The two kinds of entities an id lookup can miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
  User,
  Post,
}

impl Resource {
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::User => "User",
      Self::Post => "Post",
    }
  }
}

/// Client-facing error taxonomy.
///
/// Every variant serializes to the wire shape `{"detail": "<message>"}`;
/// the HTTP layer decides the status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
  Internal,
  ReadonlyMode,
  NotFound(Resource),
  AlreadyExists(Option<&'static str>),
  InvalidReference,
}

impl Error {
  /// The message placed into the response body.
  #[must_use]
  pub fn detail(&self) -> Cow<'static, str> {
    match self {
      Self::Internal => Cow::Borrowed("Internal server error"),
      Self::ReadonlyMode => {
        Cow::Borrowed("This service is currently in read-only mode. Please try again later.")
      }
      Self::NotFound(resource) => Cow::Owned(format!("{} not found", resource.name())),
      Self::AlreadyExists(Some(field)) => Cow::Owned(format!("{field} already exists")),
      Self::AlreadyExists(None) => Cow::Borrowed("Resource already exists"),
      Self::InvalidReference => Cow::Borrowed("Referenced user does not exist"),
    }
  }
}

impl Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Internal => f.write_str("Failed to perform request"),
      Self::ReadonlyMode => f.write_str("Attempt to write to a read-only database"),
      Self::NotFound(resource) => {
        write!(f, "Requested {} does not exist", resource.name())
      }
      Self::AlreadyExists(..) => f.write_str("Attempt to insert a duplicate row"),
      Self::InvalidReference => f.write_str("Attempt to reference a missing user"),
    }
  }
}

impl Serialize for Error {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry("detail", &self.detail())?;
    map.end()
  }
}
