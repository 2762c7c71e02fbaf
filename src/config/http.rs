use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::num::NonZeroUsize;

#[derive(Debug, Deserialize)]
pub struct Http {
  /// Address where the HTTP server should listen from.
  ///
  /// **Environment variables**:
  /// - `QUILL_HTTP_IP`
  #[serde(default = "Http::default_ip")]
  pub ip: IpAddr,
  /// Port where the HTTP server should listen from.
  ///
  /// **Environment variables**:
  /// - `QUILL_HTTP_PORT`
  #[serde(default = "Http::default_port")]
  pub port: u16,
  /// How many HTTP worker threads should be spawned.
  ///
  /// Defaults to the amount of physical CPUs available if not set.
  ///
  /// **Environment variables**:
  /// - `QUILL_HTTP_WORKERS`
  pub workers: Option<NonZeroUsize>,
}

impl Http {
  const DEFAULT_PORT: u16 = 8000;

  // Required by serde
  const fn default_ip() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
  }

  const fn default_port() -> u16 {
    Self::DEFAULT_PORT
  }
}

impl Default for Http {
  fn default() -> Self {
    Self {
      ip: Self::default_ip(),
      port: Self::default_port(),
      workers: None,
    }
  }
}
