// crates/moodmix-core/src/errors.rs
use thiserror::Error;

use crate::domain::MoodInputError;

/// Errores que una generación de playlist puede devolver al llamador.
///
/// Los fallos del intérprete, de la caché y de la publicación externa se
/// recuperan dentro del núcleo y nunca aparecen aquí. Las capas superiores
/// (CLI, HTTP, ...) deberían mapear cada variante a un mensaje de usuario.
#[derive(Debug, Error)]
pub enum CoreError {
  #[error("invalid mood input: {0}")]
  InvalidMoodInput(#[from] MoodInputError),

  #[error("invalid request: {0}")]
  InvalidRequest(String),

  #[error("no compatible tracks found for this mood, try a different one")]
  NoCompatibleTracks,

  #[error("catalog query failed: {0}")]
  CatalogQueryFailed(String),
}
