use crate::domain::Playlist;

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
  #[error("unauthorized: access token missing or expired")]
  Unauthorized,

  #[error("playlist has no publishable tracks")]
  NothingToPublish,

  #[error("provider write failed: {0}")]
  Provider(String),
}

/// Publica una playlist en el proveedor externo de música.
#[async_trait::async_trait]
pub trait PlaylistPublisher: Send + Sync {
  /// Crea la playlist remota y devuelve su id en el proveedor.
  async fn publish(&self, playlist: &Playlist) -> Result<String, PublishError>;
}
