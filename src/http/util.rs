use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{self, ContentType};
use actix_web::middleware::ErrorHandlerResponse;
use actix_web::HttpResponse;
use tracing::Span;
use tracing_actix_web::{DefaultRootSpanBuilder, RootSpanBuilder};

/// Emits request root spans at DEBUG so routine traffic does not
/// drown the logs at the default level.
pub struct QuieterRootSpanBuilder;

impl RootSpanBuilder for QuieterRootSpanBuilder {
  fn on_request_start(request: &ServiceRequest) -> Span {
    tracing_actix_web::root_span!(level = tracing::Level::DEBUG, request)
  }

  fn on_request_end<B: MessageBody>(
    span: Span,
    outcome: &Result<ServiceResponse<B>, actix_web::Error>,
  ) {
    DefaultRootSpanBuilder::on_request_end(span, outcome);
  }
}

/// Rewrites error responses generated outside our handlers (unmatched
/// routes, malformed JSON bodies and so on) into the same
/// `{"detail": ...}` shape the rest of the API speaks.
///
/// Responses that already carry a JSON body pass through untouched.
pub fn handle_actix_web_error<B>(
  res: ServiceResponse<B>,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
  let already_json = res
    .headers()
    .get(header::CONTENT_TYPE)
    .map(|value| value.as_bytes().starts_with(b"application/json"))
    .unwrap_or(false);

  if already_json {
    return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
  }

  let status = res.status();
  let detail = status.canonical_reason().unwrap_or("Unknown error");

  let (req, _) = res.into_parts();
  let body = serde_json::json!({ "detail": detail }).to_string();
  let response = HttpResponse::build(status)
    .insert_header(ContentType::json())
    .body(body);

  Ok(ErrorHandlerResponse::Response(
    ServiceResponse::new(req, response).map_into_right_body(),
  ))
}
