use thiserror::Error;

mod database;
mod http;
mod server;

pub use database::{Database, DbPoolConfig};
pub use http::Http;
pub use server::Server;

#[derive(Debug, Error)]
#[error("Failed to load configuration")]
pub struct ParseError;
