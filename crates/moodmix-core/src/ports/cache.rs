use crate::domain::{AudioFeatureTargets, Playlist, Track};

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
  #[error("storage error: {0}")]
  Storage(String),

  #[error("serialization error: {0}")]
  Serialization(String),
}

/// Caché de escritura diferida para pistas y playlists.
///
/// El núcleo la alimenta pero nunca depende de ella: cualquier fallo se
/// registra y se ignora.
#[async_trait::async_trait]
pub trait PlaylistCache: Send + Sync {
  async fn upsert_tracks(&self, tracks: &[Track]) -> Result<(), CacheError>;

  /// Guarda la playlist junto con los objetivos que la generaron.
  async fn save_playlist(&self, playlist: &Playlist, targets: &AudioFeatureTargets) -> Result<(), CacheError>;
}
