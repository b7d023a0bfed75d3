use crate::domain::{AudioFeatureTargets, Track};

#[derive(Debug, thiserror::Error)]
pub enum InterpreterError {
  #[error("interpreter unavailable: {0}")]
  Unavailable(String),

  #[error("interpreter timed out")]
  Timeout,

  #[error("malformed interpreter output: {0}")]
  Malformed(String),
}

/// Port del intérprete de lenguaje natural (un LLM en la práctica).
///
/// Puede fallar o tardar demasiado; el núcleo siempre tiene un camino
/// determinista de reserva, así que estos errores nunca salen de él.
#[async_trait::async_trait]
pub trait NlInterpreter: Send + Sync {
  /// Traduce una descripción emocional a rangos objetivo.
  async fn interpret_emotional_text(&self, text: &str) -> Result<AudioFeatureTargets, InterpreterError>;

  /// Frase creativa corta para una playlist ya seleccionada.
  async fn describe_playlist(&self, mood_summary: &str, sample: &[Track]) -> Result<String, InterpreterError>;
}
