//! Service error type — what the collaborating chat layer sees.
//!
//! The façade translates store failures into one boxed variant; validation
//! and permission failures keep their own variants because the chat layer
//! renders targeted messages for them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Malformed caller input; the message is user-displayable.
  #[error(transparent)]
  Validation(#[from] classdesk_core::Error),

  /// A non-representative (or non-admin) initiated a gated action.
  #[error("user {0} is not allowed to perform this action")]
  PermissionDenied(i64),

  /// A write addressed a user that does not exist.
  #[error("user not found: {0}")]
  UserNotFound(i64),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Error::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
