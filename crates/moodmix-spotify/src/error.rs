use moodmix_core::ports::{CatalogError, PublishError};
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpotifyError {
  #[error("no access token configured")]
  MissingToken,

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("unauthorized")]
  Unauthorized,

  #[error("rate limited")]
  RateLimited,

  #[error("spotify returned {status}: {message}")]
  Status { status: u16, message: String },

  #[error("unexpected response: {0}")]
  Decode(String),
}

impl SpotifyError {
  /// Clasifica una respuesta no exitosa.
  pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
    match status {
      StatusCode::UNAUTHORIZED => SpotifyError::Unauthorized,
      StatusCode::TOO_MANY_REQUESTS => SpotifyError::RateLimited,
      other => SpotifyError::Status { status: other.as_u16(), message: error_message(body) },
    }
  }
}

/// Extrae `error.message` del cuerpo JSON de Spotify, o devuelve el cuerpo tal cual.
fn error_message(body: &str) -> String {
  serde_json::from_str::<serde_json::Value>(body)
    .ok()
    .and_then(|v| v.pointer("/error/message").and_then(|m| m.as_str()).map(str::to_string))
    .unwrap_or_else(|| body.trim().chars().take(200).collect())
}

impl From<SpotifyError> for CatalogError {
  fn from(e: SpotifyError) -> Self {
    match e {
      SpotifyError::MissingToken | SpotifyError::Unauthorized => CatalogError::Unauthorized,
      SpotifyError::RateLimited => CatalogError::RateLimited,
      SpotifyError::Http(e) if e.is_timeout() => CatalogError::Connection(format!("request timed out: {e}")),
      SpotifyError::Http(e) if e.is_decode() => CatalogError::InvalidResponse(e.to_string()),
      SpotifyError::Http(e) => CatalogError::Connection(e.to_string()),
      SpotifyError::Status { status, message } => CatalogError::Api { status, message },
      SpotifyError::Decode(message) => CatalogError::InvalidResponse(message),
    }
  }
}

impl From<SpotifyError> for PublishError {
  fn from(e: SpotifyError) -> Self {
    match e {
      SpotifyError::MissingToken | SpotifyError::Unauthorized => PublishError::Unauthorized,
      other => PublishError::Provider(other.to_string()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn statuses_map_to_port_errors() {
    assert!(matches!(
      CatalogError::from(SpotifyError::from_status(StatusCode::UNAUTHORIZED, "")),
      CatalogError::Unauthorized
    ));
    assert!(matches!(
      CatalogError::from(SpotifyError::from_status(StatusCode::TOO_MANY_REQUESTS, "")),
      CatalogError::RateLimited
    ));
    assert!(matches!(PublishError::from(SpotifyError::MissingToken), PublishError::Unauthorized));
  }

  #[test]
  fn api_error_message_is_extracted() {
    let body = r#"{"error":{"status":404,"message":"Not found."}}"#;
    match SpotifyError::from_status(StatusCode::NOT_FOUND, body) {
      SpotifyError::Status { status, message } => {
        assert_eq!(status, 404);
        assert_eq!(message, "Not found.");
      }
      other => panic!("unexpected {other:?}"),
    }

    match SpotifyError::from_status(StatusCode::BAD_GATEWAY, "  upstream down \n") {
      SpotifyError::Status { message, .. } => assert_eq!(message, "upstream down"),
      other => panic!("unexpected {other:?}"),
    }
  }
}
