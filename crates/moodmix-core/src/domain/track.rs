use std::fmt;

use serde::{Deserialize, Serialize};

use super::audio_features::AudioFeatures;

/// Identificador de pista asignado por el proveedor del catálogo.
///
/// Es la identidad de la pista: dos pistas con el mismo id son la misma
/// pista aunque lleguen desde búsquedas distintas.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
  pub fn new(id: impl Into<String>) -> Self {
    TrackId(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<&str> for TrackId {
  fn from(s: &str) -> Self {
    TrackId(s.to_string())
  }
}

impl From<String> for TrackId {
  fn from(s: String) -> Self {
    TrackId(s)
  }
}

impl fmt::Display for TrackId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Pista tal como sale de una búsqueda, todavía sin descriptores de audio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogTrack {
  pub id: TrackId,
  pub name: String,
  pub artists: Vec<String>,
  pub album: String,
  pub duration_ms: u64,
  /// 0–100.
  pub popularity: u8,
  pub preview_url: Option<String>,
  pub spotify_uri: Option<String>,
  pub album_image: Option<String>,
}

/// Pista candidata con sus descriptores de audio ya resueltos.
///
/// Inmutable una vez construida; una pista sin descriptores nunca llega a
/// existir como `Track`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
  pub id: TrackId,
  pub name: String,
  pub artists: Vec<String>,
  pub album: String,
  pub audio_features: AudioFeatures,
  pub duration_ms: u64,
  pub popularity: u8,
  pub preview_url: Option<String>,
  pub spotify_uri: Option<String>,
  pub album_image: Option<String>,
}

impl Track {
  pub fn from_catalog(track: CatalogTrack, audio_features: AudioFeatures) -> Self {
    Self {
      id: track.id,
      name: track.name,
      artists: track.artists,
      album: track.album,
      audio_features,
      duration_ms: track.duration_ms,
      popularity: track.popularity,
      preview_url: track.preview_url,
      spotify_uri: track.spotify_uri,
      album_image: track.album_image,
    }
  }

  /// Duración en formato `m:ss`.
  pub fn duration_string(&self) -> String {
    let minutes = self.duration_ms / 60_000;
    let seconds = (self.duration_ms % 60_000) / 1_000;
    format!("{minutes}:{seconds:02}")
  }

  pub fn artists_string(&self) -> String {
    self.artists.join(", ")
  }

  pub fn shares_artist_with(&self, other: &Track) -> bool {
    self.artists.iter().any(|a| other.artists.contains(a))
  }
}

/// Pista con su puntuación de compatibilidad en `[0, 1]`.
///
/// Sólo vive durante el ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTrack {
  pub track: Track,
  pub score: f64,
}
