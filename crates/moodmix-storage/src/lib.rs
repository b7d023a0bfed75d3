pub mod config;
pub mod connection;
pub mod error;
pub mod models;
pub mod repo;
pub mod schema;

use std::path::Path;

use async_trait::async_trait;
use diesel::sqlite::SqliteConnection;
use tracing::debug;

use moodmix_core::domain::{AudioFeatureTargets, Playlist, PlaylistId, Track};
use moodmix_core::ports::{CacheError, PlaylistCache};

pub use config::StorageConfig;
pub use connection::{ConnectionPool, open_pool};
pub use error::StorageError;
pub use repo::PlaylistSummary;

/// Caché de pistas y playlists sobre SQLite.
///
/// Diesel es síncrono: cada operación toma una conexión del pool dentro de
/// `spawn_blocking` para no bloquear el runtime.
#[derive(Clone)]
pub struct SqlitePlaylistCache {
  pool: ConnectionPool,
}

impl SqlitePlaylistCache {
  pub fn new(pool: ConnectionPool) -> Self {
    Self { pool }
  }

  pub fn open(path: &Path, config: &StorageConfig) -> Result<Self, StorageError> {
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).map_err(|e| StorageError::Connection(e.to_string()))?;
    }
    let url = path.to_string_lossy();
    Ok(Self::new(open_pool(&url, config)?))
  }

  async fn with_conn<T, F>(&self, op: F) -> Result<T, StorageError>
  where
    T: Send + 'static,
    F: FnOnce(&mut SqliteConnection) -> Result<T, StorageError> + Send + 'static,
  {
    let pool = self.pool.clone();
    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get()?;
      op(&mut *conn)
    })
    .await
    .map_err(|e| StorageError::Task(e.to_string()))?
  }

  pub async fn list_playlists(&self, limit: usize) -> Result<Vec<PlaylistSummary>, StorageError> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    self.with_conn(move |conn| repo::list_playlists(conn, limit)).await
  }

  pub async fn find_playlist(&self, id: PlaylistId) -> Result<Option<(Playlist, AudioFeatureTargets)>, StorageError> {
    self.with_conn(move |conn| repo::find_playlist(conn, id)).await
  }

  /// Pistas guardadas en la caché.
  pub async fn count_tracks(&self) -> Result<i64, StorageError> {
    self.with_conn(repo::count_tracks).await
  }
}

#[async_trait]
impl PlaylistCache for SqlitePlaylistCache {
  async fn upsert_tracks(&self, tracks: &[Track]) -> Result<(), CacheError> {
    let tracks = tracks.to_vec();
    let written = self.with_conn(move |conn| repo::upsert_tracks(conn, &tracks)).await?;
    debug!(tracks = written, "tracks upserted");
    Ok(())
  }

  async fn save_playlist(&self, playlist: &Playlist, targets: &AudioFeatureTargets) -> Result<(), CacheError> {
    let playlist = playlist.clone();
    let targets = targets.clone();
    let id = playlist.id;
    self.with_conn(move |conn| repo::save_playlist(conn, &playlist, &targets)).await?;
    debug!(%id, "playlist saved");
    Ok(())
  }
}
