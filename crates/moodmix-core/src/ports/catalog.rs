use crate::domain::{AudioFeatures, CatalogTrack, FeatureQuery, TrackId};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
  #[error("connection error: {0}")]
  Connection(String),

  #[error("unauthorized: access token missing or expired")]
  Unauthorized,

  #[error("rate limited")]
  RateLimited,

  #[error("api error ({status}): {message}")]
  Api { status: u16, message: String },

  #[error("invalid response: {0}")]
  InvalidResponse(String),
}

/// Port del catálogo de pistas (búsqueda + descriptores de audio).
///
/// Paginación, límites de tasa y autenticación son asunto del adapter.
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
  /// Búsqueda por rangos de características. Cero resultados no es un error.
  async fn search_by_features(&self, query: &FeatureQuery) -> Result<Vec<CatalogTrack>, CatalogError>;

  /// Búsqueda por texto libre, como mucho `limit` resultados.
  async fn search_by_text(&self, query: &str, limit: usize) -> Result<Vec<CatalogTrack>, CatalogError>;

  /// Descriptores de audio alineados por posición con `ids`.
  ///
  /// Una entrada desconocida para el proveedor es `None` en su posición,
  /// no un error. El núcleo nunca pide más de
  /// [`PROVIDER_PAGE_LIMIT`](crate::domain::PROVIDER_PAGE_LIMIT) ids a la vez.
  async fn get_audio_features(&self, ids: &[TrackId]) -> Result<Vec<Option<AudioFeatures>>, CatalogError>;
}
