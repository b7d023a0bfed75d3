//! Formas JSON de la Web API, reducidas a los campos que se usan.

use moodmix_core::domain::{AudioFeatures, CatalogTrack, TrackId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(crate) struct SpotifyArtist {
  pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpotifyImage {
  pub url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpotifyAlbum {
  pub name: String,
  #[serde(default)]
  pub images: Vec<SpotifyImage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpotifyTrack {
  pub id: Option<String>,
  pub name: String,
  #[serde(default)]
  pub artists: Vec<SpotifyArtist>,
  pub album: Option<SpotifyAlbum>,
  #[serde(default)]
  pub duration_ms: u64,
  #[serde(default)]
  pub popularity: u8,
  pub preview_url: Option<String>,
  pub uri: Option<String>,
}

impl SpotifyTrack {
  /// Las pistas locales o retiradas llegan sin id y se descartan.
  pub fn into_catalog(self) -> Option<CatalogTrack> {
    let id = self.id.filter(|id| !id.is_empty())?;
    let (album, album_image) = match self.album {
      Some(album) => (album.name, album.images.into_iter().next().map(|i| i.url)),
      None => (String::new(), None),
    };

    Some(CatalogTrack {
      id: TrackId::new(id),
      name: self.name,
      artists: self.artists.into_iter().map(|a| a.name).collect(),
      album,
      duration_ms: self.duration_ms,
      popularity: self.popularity.min(100),
      preview_url: self.preview_url,
      spotify_uri: self.uri,
      album_image,
    })
  }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Paging<T> {
  #[serde(default = "Vec::new")]
  pub items: Vec<Option<T>>,
  pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
  pub tracks: Option<Paging<SpotifyTrack>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationsResponse {
  #[serde(default)]
  pub tracks: Vec<Option<SpotifyTrack>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpotifyAudioFeatures {
  pub danceability: f64,
  pub energy: f64,
  pub valence: f64,
  pub acousticness: f64,
  pub instrumentalness: f64,
  pub speechiness: f64,
  pub tempo: f64,
  pub loudness: f64,
  pub key: Option<i32>,
  pub mode: Option<i32>,
  pub time_signature: Option<i32>,
}

impl From<SpotifyAudioFeatures> for AudioFeatures {
  fn from(f: SpotifyAudioFeatures) -> Self {
    AudioFeatures {
      danceability: f.danceability,
      energy: f.energy,
      valence: f.valence,
      acousticness: f.acousticness,
      instrumentalness: f.instrumentalness,
      speechiness: f.speechiness,
      tempo: f.tempo,
      loudness: f.loudness,
      // -1 significa tonalidad no detectada.
      key: f.key.filter(|k| *k >= 0),
      mode: f.mode,
      time_signature: f.time_signature,
    }
  }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AudioFeaturesResponse {
  #[serde(default)]
  pub audio_features: Vec<Option<SpotifyAudioFeatures>>,
}

impl AudioFeaturesResponse {
  /// Exactamente `len` posiciones, una por id pedido.
  pub fn aligned(self, len: usize) -> Vec<Option<AudioFeatures>> {
    let mut slots: Vec<Option<AudioFeatures>> =
      self.audio_features.into_iter().take(len).map(|f| f.map(AudioFeatures::from)).collect();
    slots.resize_with(len, || None);
    slots
  }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentUser {
  pub id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreatePlaylistBody<'a> {
  pub name: &'a str,
  pub description: &'a str,
  pub public: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedPlaylist {
  pub id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddTracksBody<'a> {
  pub uris: &'a [String],
}
