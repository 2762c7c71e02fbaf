use error_stack::{Context, Report};
use thiserror::Error as ThisError;
use tracing_error::SpanTrace;

use crate::types::{self, Resource};

mod impls;

/// An error on its way out of a request handler.
///
/// Carries the client-facing [`types::Error`] (which decides the
/// status code and response body), the full [`Report`] for the logs,
/// and the span trace captured where the error was raised.
pub struct Error {
  error_type: types::Error,
  report: Report<Box<dyn Context>>,
  trace: SpanTrace,
}

impl Error {
  #[must_use]
  pub fn from_context(error_type: types::Error, context: impl Context) -> Self {
    Self {
      error_type,
      report: to_any_report(context),
      trace: SpanTrace::capture(),
    }
  }

  #[must_use]
  pub fn from_report(error_type: types::Error, report: Report<impl Context>) -> Self {
    Self {
      error_type,
      report: cast_to_any_report(report),
      trace: SpanTrace::capture(),
    }
  }

  /// An id lookup came up empty.
  #[must_use]
  pub fn not_found(resource: Resource) -> Self {
    #[derive(Debug, ThisError)]
    #[error("requested entity does not exist")]
    struct NotFoundError;

    Self::from_context(types::Error::NotFound(resource), NotFoundError)
  }
}

impl Error {
  #[must_use]
  pub fn as_type(&self) -> &types::Error {
    &self.error_type
  }
}

impl std::fmt::Debug for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Error")
      .field("type", &self.error_type)
      .field("report", &self.report)
      .field("trace", &self.trace)
      .finish()
  }
}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}: ", &self.error_type)?;
    writeln!(f, "{:?}", self.report)?;
    std::fmt::Display::fmt(&self.trace, f)
  }
}

fn cast_to_any_report(report: Report<impl Context>) -> Report<Box<dyn Context>> {
  unsafe { std::mem::transmute::<_, Report<Box<dyn Context>>>(report) }
}

fn to_any_report(context: impl Context) -> Report<Box<dyn Context>> {
  unsafe { std::mem::transmute::<_, Report<Box<dyn Context>>>(Report::new(context)) }
}
