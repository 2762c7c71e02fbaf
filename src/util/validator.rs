use std::borrow::Cow;

use error_stack::Report;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

#[derive(Debug, Error)]
#[error("Invalid given data occurred")]
pub struct Wrapper;

pub trait IntoValidatorReport<T> {
  fn into_validator_report(self) -> error_stack::Result<T, Wrapper>;
}

impl<T> IntoValidatorReport<T> for Result<T, ValidationErrors> {
  fn into_validator_report(self) -> error_stack::Result<T, Wrapper> {
    self.map_err(|errors| {
      fn read_errors(
        errors: &ValidationErrors,
        fields_queue: &mut Vec<Cow<'static, str>>,
        mut report: Report<Wrapper>,
      ) -> Report<Wrapper> {
        for (field, kind) in errors.errors() {
          fields_queue.push(Cow::Borrowed(*field));
          match kind {
            ValidationErrorsKind::Struct(nested) => {
              report = read_errors(nested, fields_queue, report);
            }
            ValidationErrorsKind::List(elements) => {
              for (index, nested) in elements {
                fields_queue.push(Cow::Owned(index.to_string()));
                report = read_errors(nested, fields_queue, report);
                fields_queue.pop();
              }
            }
            ValidationErrorsKind::Field(messages) => {
              let field_str = fields_queue.join(".");
              for error in messages {
                let message = error.message.clone().unwrap_or_else(|| error.code.clone());
                report = report.attach_printable(format!("{field_str}: {message}"));
              }
            }
          }
          fields_queue.pop();
        }
        report
      }

      read_errors(&errors, &mut Vec::new(), Report::new(Wrapper))
    })
  }
}
