use moodmix_core::ports::InterpreterError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnthropicError {
  #[error("no api key configured")]
  MissingKey,

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("anthropic returned {status}: {message}")]
  Status { status: u16, message: String },

  #[error("response has no text content")]
  EmptyResponse,

  #[error("{0}")]
  Malformed(String),
}

impl From<AnthropicError> for InterpreterError {
  fn from(e: AnthropicError) -> Self {
    match e {
      AnthropicError::Http(e) if e.is_timeout() => InterpreterError::Timeout,
      AnthropicError::Http(e) if e.is_decode() => InterpreterError::Malformed(e.to_string()),
      AnthropicError::EmptyResponse => InterpreterError::Malformed("response has no text content".into()),
      AnthropicError::Malformed(message) => InterpreterError::Malformed(message),
      other => InterpreterError::Unavailable(other.to_string()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn transport_problems_mean_unavailable() {
    assert!(matches!(InterpreterError::from(AnthropicError::MissingKey), InterpreterError::Unavailable(_)));
    assert!(matches!(
      InterpreterError::from(AnthropicError::Status { status: 529, message: "overloaded".into() }),
      InterpreterError::Unavailable(_)
    ));
    assert!(matches!(InterpreterError::from(AnthropicError::EmptyResponse), InterpreterError::Malformed(_)));
  }
}
