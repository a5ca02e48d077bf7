//! Error types for `waymark-core`.

use thiserror::Error;

/// Why the factory refused to build a workout from raw input.
///
/// Nothing is constructed and no state is touched when one of these is
/// returned; the caller decides how to tell the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
  #[error("inputs have to be finite numbers ({field} was {value})")]
  NotFinite { field: &'static str, value: f64 },

  #[error("inputs have to be positive numbers ({field} was {value})")]
  NotPositive { field: &'static str, value: f64 },

  #[error("unknown workout type: {0:?}")]
  UnknownKind(String),
}

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("unknown workout type discriminant: {0:?}")]
  UnknownWorkoutType(String),

  #[error("persisted entry has no workout type")]
  MissingWorkoutType,

  #[error("malformed persisted data: {0}")]
  MalformedBlob(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("persistence error: {0}")]
  Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a gateway error.
  pub fn persistence<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Persistence(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
