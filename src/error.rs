//! Error types for the CodeTrack server

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] sea_orm::DbErr),

  #[error("{0}")]
  Validation(String),

  #[error("unauthorized")]
  Unauthorized,

  #[error("invalid username or password")]
  InvalidCredentials,

  #[error("username or email already in use")]
  UserExists,

  #[error("unknown platform: {0}")]
  UnknownPlatform(String),

  #[error("platform already connected")]
  AlreadyConnected,

  #[error("platform not connected")]
  PlatformNotConnected,

  #[error("username \"{0}\" not found on the platform")]
  UsernameNotFound(String),

  #[error("platform data unavailable")]
  PlatformUnavailable,

  #[error("internal error: {0}")]
  Internal(String),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = match &self {
      Error::Database(_) | Error::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
      Error::Validation(_)
      | Error::UserExists
      | Error::UnknownPlatform(_)
      | Error::AlreadyConnected
      | Error::UsernameNotFound(_) => StatusCode::BAD_REQUEST,
      Error::Unauthorized | Error::InvalidCredentials => {
        StatusCode::UNAUTHORIZED
      }
      Error::PlatformNotConnected => StatusCode::NOT_FOUND,
      Error::PlatformUnavailable => StatusCode::BAD_GATEWAY,
    };

    // Database details stay in the logs, not in responses.
    let message = match &self {
      Error::Database(err) => {
        tracing::error!("database error: {err}");
        "Database error".to_string()
      }
      Error::Internal(err) => {
        tracing::error!("internal error: {err}");
        "Internal error".to_string()
      }
      other => other.to_string(),
    };

    let body = json::json!({
      "success": false,
      "message": message,
    });

    (status, axum::Json(body)).into_response()
  }
}

pub type Result<T> = std::result::Result<T, Error>;
