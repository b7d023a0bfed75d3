use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use moodmix_core::domain::{AudioFeatures, CatalogTrack, FeatureQuery, PROVIDER_PAGE_LIMIT, Playlist, TrackId};
use moodmix_core::ports::{CatalogError, CatalogProvider, PlaylistPublisher, PublishError};

use crate::config::SpotifyConfig;
use crate::dto::{
  AddTracksBody, AudioFeaturesResponse, CreatePlaylistBody, CreatedPlaylist, CurrentUser, RecommendationsResponse,
  SearchResponse, SpotifyTrack,
};
use crate::error::SpotifyError;

/// Máximo de resultados por página de `/search`.
const SEARCH_PAGE_LIMIT: usize = 50;

/// Cliente de la Web API. Un único `reqwest::Client` compartido por todas
/// las llamadas del proceso.
pub struct SpotifyClient {
  http: Client,
  config: SpotifyConfig,
}

impl SpotifyClient {
  pub fn new(config: SpotifyConfig) -> Result<Self, SpotifyError> {
    let http = Client::builder().timeout(config.request_timeout()).build()?;
    Ok(Self { http, config })
  }

  pub fn has_token(&self) -> bool {
    self.config.access_token.is_some()
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.api_base_url.trim_end_matches('/'), path)
  }

  fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, SpotifyError> {
    let token = self.config.access_token.as_deref().ok_or(SpotifyError::MissingToken)?;
    Ok(request.bearer_auth(token))
  }

  async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, SpotifyError> {
    let response = self.authorized(request)?.send().await?;
    Self::decode(response).await
  }

  async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, SpotifyError> {
    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(SpotifyError::from_status(status, &body));
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| SpotifyError::Decode(e.to_string()))
  }

  async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(String, String)]) -> Result<T, SpotifyError> {
    self.send(self.http.get(self.url(path)).query(query)).await
  }

  async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, SpotifyError> {
    self.send(self.http.post(self.url(path)).json(body)).await
  }

  fn recommendation_params(&self, query: &FeatureQuery) -> Vec<(String, String)> {
    let mut params = vec![
      ("seed_genres".to_string(), self.config.seed_genres.join(",")),
      ("market".to_string(), self.config.market.clone()),
    ];
    params.extend(query.to_params());
    params
  }

  async fn search_page(&self, text: &str, limit: usize, offset: usize) -> Result<(Vec<SpotifyTrack>, bool), SpotifyError> {
    let params = [
      ("q".to_string(), text.to_string()),
      ("type".to_string(), "track".to_string()),
      ("limit".to_string(), limit.to_string()),
      ("offset".to_string(), offset.to_string()),
      ("market".to_string(), self.config.market.clone()),
    ];
    let response: SearchResponse = self.get("/search", &params).await?;
    let Some(page) = response.tracks else {
      return Ok((Vec::new(), false));
    };
    let has_more = page.next.is_some();
    Ok((page.items.into_iter().flatten().collect(), has_more))
  }

  async fn current_user_id(&self) -> Result<String, SpotifyError> {
    let user: CurrentUser = self.get("/me", &[]).await?;
    Ok(user.id)
  }
}

fn into_catalog(tracks: impl IntoIterator<Item = SpotifyTrack>) -> Vec<CatalogTrack> {
  tracks.into_iter().filter_map(SpotifyTrack::into_catalog).collect()
}

/// Reparte `limit` resultados en páginas de `/search`: pares `(limit, offset)`.
fn search_pages(limit: usize) -> Vec<(usize, usize)> {
  let limit = limit.clamp(1, PROVIDER_PAGE_LIMIT);
  (0..limit).step_by(SEARCH_PAGE_LIMIT).map(|offset| ((limit - offset).min(SEARCH_PAGE_LIMIT), offset)).collect()
}

/// URIs publicables, en el orden de la playlist.
fn publishable_uris(playlist: &Playlist) -> Vec<String> {
  playlist.tracks.iter().filter_map(|t| t.spotify_uri.clone()).filter(|uri| !uri.is_empty()).collect()
}

#[async_trait]
impl CatalogProvider for SpotifyClient {
  async fn search_by_features(&self, query: &FeatureQuery) -> Result<Vec<CatalogTrack>, CatalogError> {
    let params = self.recommendation_params(query);
    let response: RecommendationsResponse = self.get("/recommendations", &params).await?;
    let tracks = into_catalog(response.tracks.into_iter().flatten());
    debug!(relaxed = query.is_relaxed(), tracks = tracks.len(), "recommendations fetched");
    Ok(tracks)
  }

  async fn search_by_text(&self, query: &str, limit: usize) -> Result<Vec<CatalogTrack>, CatalogError> {
    let mut tracks = Vec::new();
    for (page_limit, offset) in search_pages(limit) {
      let (items, has_more) = self.search_page(query, page_limit, offset).await?;
      tracks.extend(into_catalog(items));
      if !has_more {
        break;
      }
    }
    debug!(term = query, tracks = tracks.len(), "search fetched");
    Ok(tracks)
  }

  async fn get_audio_features(&self, ids: &[TrackId]) -> Result<Vec<Option<AudioFeatures>>, CatalogError> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }
    let joined = ids.iter().map(TrackId::as_str).collect::<Vec<_>>().join(",");
    let response: AudioFeaturesResponse = self.get("/audio-features", &[("ids".to_string(), joined)]).await?;
    Ok(response.aligned(ids.len()))
  }
}

#[async_trait]
impl PlaylistPublisher for SpotifyClient {
  async fn publish(&self, playlist: &Playlist) -> Result<String, PublishError> {
    let uris = publishable_uris(playlist);
    if uris.is_empty() {
      return Err(PublishError::NothingToPublish);
    }

    let user_id = self.current_user_id().await?;
    let body = CreatePlaylistBody { name: &playlist.name, description: &playlist.description, public: false };
    let created: CreatedPlaylist = self.post(&format!("/users/{user_id}/playlists"), &body).await?;

    let path = format!("/playlists/{}/tracks", created.id);
    for batch in uris.chunks(PROVIDER_PAGE_LIMIT) {
      let _: serde_json::Value = self.post(&path, &AddTracksBody { uris: batch }).await?;
    }

    info!(playlist = %created.id, tracks = uris.len(), "playlist created on spotify");
    Ok(created.id)
  }
}

#[cfg(test)]
mod tests {
  use moodmix_core::domain::{AudioFeature, AudioFeatureTargets, AudioFeatures, FeatureRange, MoodInput, Track};

  use super::*;

  fn client(token: Option<&str>) -> SpotifyClient {
    SpotifyClient::new(SpotifyConfig { access_token: token.map(str::to_string), ..SpotifyConfig::default() }).unwrap()
  }

  fn track(id: &str, uri: Option<&str>) -> Track {
    Track {
      id: TrackId::from(id),
      name: id.into(),
      artists: vec![],
      album: String::new(),
      audio_features: AudioFeatures {
        danceability: 0.5,
        energy: 0.5,
        valence: 0.5,
        acousticness: 0.5,
        instrumentalness: 0.0,
        speechiness: 0.0,
        tempo: 100.0,
        loudness: -6.0,
        key: None,
        mode: None,
        time_signature: None,
      },
      duration_ms: 1000,
      popularity: 1,
      preview_url: None,
      spotify_uri: uri.map(str::to_string),
      album_image: None,
    }
  }

  #[test]
  fn recommendations_carry_seeds_market_and_ranges() {
    let targets = AudioFeatureTargets::new().with(AudioFeature::Energy, FeatureRange::new(0.7, 1.0, 0.85));
    let params = client(None).recommendation_params(&FeatureQuery::from_targets(&targets, 30));

    assert_eq!(params[0], ("seed_genres".to_string(), "pop,rock".to_string()));
    assert!(params.contains(&("market".to_string(), "US".to_string())));
    assert!(params.contains(&("min_energy".to_string(), "0.7".to_string())));
    assert!(params.contains(&("target_energy".to_string(), "0.85".to_string())));
    assert_eq!(params.last(), Some(&("limit".to_string(), "30".to_string())));
  }

  #[test]
  fn search_limit_is_split_in_pages() {
    assert_eq!(search_pages(20), vec![(20, 0)]);
    assert_eq!(search_pages(50), vec![(50, 0)]);
    assert_eq!(search_pages(75), vec![(50, 0), (25, 50)]);
    assert_eq!(search_pages(500), vec![(50, 0), (50, 50)]);
    assert_eq!(search_pages(0), vec![(1, 0)]);
  }

  #[test]
  fn tracks_without_uri_are_not_published() {
    let playlist = Playlist::new(
      "p".into(),
      String::new(),
      vec![track("a", Some("spotify:track:a")), track("b", None), track("c", Some("spotify:track:c"))],
      MoodInput::Emotion("calm".into()),
    );
    assert_eq!(publishable_uris(&playlist), vec!["spotify:track:a", "spotify:track:c"]);
  }

  #[tokio::test]
  async fn missing_token_fails_before_any_request() {
    let res = client(None).search_by_text("chill", 10).await;
    assert!(matches!(res, Err(CatalogError::Unauthorized)));

    let empty = Playlist::new("p".into(), String::new(), vec![track("b", None)], MoodInput::Emotion("x".into()));
    assert!(matches!(client(None).publish(&empty).await, Err(PublishError::NothingToPublish)));
  }

  #[tokio::test]
  async fn empty_id_list_needs_no_request() {
    assert!(client(None).get_audio_features(&[]).await.unwrap().is_empty());
  }
}
