use error_stack::ResultExt;
use sqlx::migrate::Migrator;
use tokio::time::Instant;
use tracing::info;

use super::{Connection, MigrationError, Result};

/// Embedded SQL migrations, compiled in from the `migrations/` directory.
pub static MIGRATIONS: Migrator = sqlx::migrate!();

/// Applies any migrations that have not run yet.
///
/// The server calls this on startup before it starts accepting
/// requests, so a fresh database gets its schema automatically.
#[tracing::instrument(skip_all, name = "db.migrations.run_pending")]
pub async fn run_pending(conn: &mut Connection) -> Result<(), MigrationError> {
  let now = Instant::now();
  info!("Performing database migrations... (this may take a while)");

  MIGRATIONS
    .run(&mut *conn)
    .await
    .change_context(MigrationError)?;

  let elapsed = now.elapsed();
  info!("Successfully performed database migrations! took {elapsed:.2?}");

  Ok(())
}
