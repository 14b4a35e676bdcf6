//! Error types for `remeet-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The `contacts` payload did not match the expected row shape. A single
  /// bad row fails the whole batch.
  #[error("malformed contact rows: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
