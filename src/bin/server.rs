use actix_web::{middleware::ErrorHandlers, web, App, HttpServer};
use error_stack::{Result, ResultExt};
use thiserror::Error;
use tracing_actix_web::TracingLogger;

use quill::{config, database, http};

#[derive(Debug, Error)]
#[error("Failed to start the server")]
struct StartServerError;

#[tokio::main]
async fn main() -> Result<(), StartServerError> {
  tracing_subscriber::fmt()
    .pretty()
    .with_max_level(tracing::Level::DEBUG)
    .init();

  let config = config::Server::load().change_context(StartServerError)?;
  let app = quill::App::new(config).await.change_context(StartServerError)?;

  {
    let mut conn = app.db_write().await.change_context(StartServerError)?;
    database::migrations::run_pending(&mut conn)
      .await
      .change_context(StartServerError)?;
  }

  let ip = app.config.http.ip;
  let port = app.config.http.port;
  let workers = app.config.http.workers;

  tracing::info!("Starting HTTP server at http://{ip}:{port}");

  let state = app.clone();
  let mut server = HttpServer::new(move || {
    App::new()
      .app_data(web::Data::new(state.clone()))
      .wrap(TracingLogger::<http::util::QuieterRootSpanBuilder>::new())
      .wrap(ErrorHandlers::new().default_handler(http::util::handle_actix_web_error))
      .configure(http::controllers::configure)
  });

  if let Some(workers) = workers {
    server = server.workers(workers.get());
  }

  server
    .bind((ip, port))
    .change_context(StartServerError)
    .attach_printable("could not bind the HTTP listener")?
    .run()
    .await
    .change_context(StartServerError)?;

  app.primary_db.close().await;
  if let Some(replica) = app.replica_db.as_ref() {
    replica.close().await;
  }

  Ok(())
}
