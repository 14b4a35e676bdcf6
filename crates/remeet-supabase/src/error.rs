//! Error type for `remeet-supabase`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A required setting is absent or empty. The client cannot work without
  /// it, so this is fatal at startup.
  #[error("missing required setting: {0}")]
  MissingSetting(&'static str),

  #[error("config error: {0}")]
  Config(#[from] config::ConfigError),

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("{method} {path} → {status}: {body}")]
  Status {
    method: &'static str,
    path:   String,
    status: reqwest::StatusCode,
    body:   String,
  },

  #[error("decode error: {0}")]
  Decode(#[from] remeet_core::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
