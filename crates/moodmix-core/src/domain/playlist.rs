use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::audio_features::AudioFeatures;
use super::mood::MoodInput;
use super::track::{Track, TrackId};

/// Identificador de una playlist generada.
///
/// Se genera con UUID v4; no depende del proveedor externo, que asigna su
/// propio id al publicar (ver [`Playlist::external_id`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaylistId(Uuid);

impl PlaylistId {
  pub fn new() -> Self {
    PlaylistId(Uuid::new_v4())
  }

  pub fn from_uuid(u: Uuid) -> Self {
    PlaylistId(u)
  }

  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl Default for PlaylistId {
  fn default() -> Self {
    Self::new()
  }
}

impl From<Uuid> for PlaylistId {
  fn from(u: Uuid) -> Self {
    PlaylistId(u)
  }
}

impl fmt::Display for PlaylistId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// Resultado de una generación: lista ordenada y definitiva de pistas.
///
/// Pertenece a la petición que la creó; no se comparte entre peticiones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
  pub id: PlaylistId,
  pub name: String,
  pub description: String,
  pub tracks: Vec<Track>,
  pub mood_input: MoodInput,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  /// Id de la playlist en el proveedor externo, si se publicó.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub external_id: Option<String>,
}

impl Playlist {
  pub fn new(name: String, description: String, tracks: Vec<Track>, mood_input: MoodInput) -> Self {
    let now = Utc::now();
    Self {
      id: PlaylistId::new(),
      name,
      description,
      tracks,
      mood_input,
      created_at: now,
      updated_at: now,
      external_id: None,
    }
  }

  pub fn total_duration_ms(&self) -> u64 {
    self.tracks.iter().map(|t| t.duration_ms).sum()
  }

  /// `"1h 5m"` o `"42m"`.
  pub fn total_duration_string(&self) -> String {
    let total = self.total_duration_ms();
    let hours = total / 3_600_000;
    let minutes = (total % 3_600_000) / 60_000;

    if hours > 0 { format!("{hours}h {minutes}m") } else { format!("{minutes}m") }
  }

  /// Media de cada descriptor sobre todas las pistas. `None` si está vacía.
  pub fn average_audio_features(&self) -> Option<AudioFeatures> {
    if self.tracks.is_empty() {
      return None;
    }

    let n = self.tracks.len() as f64;
    let mean = |f: fn(&AudioFeatures) -> f64| self.tracks.iter().map(|t| f(&t.audio_features)).sum::<f64>() / n;

    Some(AudioFeatures {
      danceability: mean(|a| a.danceability),
      energy: mean(|a| a.energy),
      valence: mean(|a| a.valence),
      acousticness: mean(|a| a.acousticness),
      instrumentalness: mean(|a| a.instrumentalness),
      speechiness: mean(|a| a.speechiness),
      tempo: mean(|a| a.tempo),
      loudness: mean(|a| a.loudness),
      key: None,
      mode: None,
      time_signature: None,
    })
  }

  /// Descripción corta del carácter medio ("Uplifting, High-energy", ...).
  pub fn mood_descriptor(&self) -> String {
    let Some(avg) = self.average_audio_features() else {
      return "Empty playlist".to_string();
    };

    let mut descriptors = Vec::new();

    if avg.valence > 0.7 {
      descriptors.push("Uplifting");
    } else if avg.valence < 0.3 {
      descriptors.push("Melancholic");
    }

    if avg.energy > 0.7 {
      descriptors.push("High-energy");
    } else if avg.energy < 0.3 {
      descriptors.push("Chill");
    }

    if avg.danceability > 0.7 {
      descriptors.push("Danceable");
    }
    if avg.acousticness > 0.7 {
      descriptors.push("Acoustic");
    }

    if descriptors.is_empty() { "Balanced".to_string() } else { descriptors.join(", ") }
  }

  pub fn add_track(&mut self, track: Track) {
    self.tracks.push(track);
    self.updated_at = Utc::now();
  }

  /// Quita todas las apariciones de `id`. Devuelve `true` si quitó alguna.
  pub fn remove_track(&mut self, id: &TrackId) -> bool {
    let before = self.tracks.len();
    self.tracks.retain(|t| &t.id != id);
    let removed = self.tracks.len() != before;
    if removed {
      self.updated_at = Utc::now();
    }
    removed
  }
}
