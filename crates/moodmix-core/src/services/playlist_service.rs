use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::{MoodInput, Playlist, Track};
use crate::errors::CoreError;
use crate::ports::{CatalogProvider, InterpreterError, NlInterpreter, PlaylistCache, PlaylistPublisher};
use crate::services::catalog_query::CatalogQuery;
use crate::services::mood_interpreter::MoodInterpreter;
use crate::services::settings::GenerationSettings;
use crate::services::{diversifier, scorer};

pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_DESCRIPTION_CHARS: usize = 300;
/// Caracteres del texto emocional que entran en el nombre generado.
const NAME_TEXT_CHARS: usize = 60;

/// Petición de generación.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
  pub mood: MoodInput,
  /// `None` usa el tamaño por defecto de la configuración.
  pub target_size: Option<usize>,
  pub name: Option<String>,
  pub description: Option<String>,
  pub save_to_external_provider: bool,
}

impl GenerateRequest {
  pub fn new(mood: MoodInput) -> Self {
    Self { mood, target_size: None, name: None, description: None, save_to_external_provider: false }
  }
}

/// Orquesta la generación completa de una playlist:
///
/// interpretar → pedir candidatos (sobremuestreo) → puntuar → ordenar →
/// diversificar → nombrar y describir.
///
/// La persistencia y la publicación externa son efectos secundarios de
/// mejor esfuerzo: se registran si fallan y nunca invalidan el resultado.
pub struct PlaylistService<C, N, K, P>
where
  C: CatalogProvider,
  N: NlInterpreter,
  K: PlaylistCache + 'static,
  P: PlaylistPublisher,
{
  interpreter: MoodInterpreter<N>,
  query: CatalogQuery<C>,
  nl: Arc<N>,
  cache: Arc<K>,
  publisher: Arc<P>,
  settings: GenerationSettings,
}

impl<C, N, K, P> PlaylistService<C, N, K, P>
where
  C: CatalogProvider,
  N: NlInterpreter,
  K: PlaylistCache + 'static,
  P: PlaylistPublisher,
{
  pub fn new(catalog: Arc<C>, nl: Arc<N>, cache: Arc<K>, publisher: Arc<P>, settings: GenerationSettings) -> Self {
    Self {
      interpreter: MoodInterpreter::new(Arc::clone(&nl), settings.interpreter_timeout()),
      query: CatalogQuery::new(catalog),
      nl,
      cache,
      publisher,
      settings,
    }
  }

  pub fn settings(&self) -> &GenerationSettings {
    &self.settings
  }

  pub async fn generate(&self, request: GenerateRequest) -> Result<Playlist, CoreError> {
    let target_size = self.validate(&request)?;

    let profile = self.interpreter.interpret(&request.mood).await;
    debug!(kind = request.mood.kind(), facets = profile.facets().len(), "mood interpreted");

    let desired = target_size.saturating_mul(self.settings.overfetch_factor.max(1));
    let candidates = self.query.fetch_candidates(&profile, desired).await?;

    if !candidates.is_empty() {
      self.cache_tracks_in_background(candidates.clone());
    }

    let ranked: Vec<Track> = scorer::rank(candidates, &profile).into_iter().map(|s| s.track).collect();
    let tracks = diversifier::select(ranked, target_size, self.settings.anchor_count);

    if tracks.is_empty() {
      return Err(CoreError::NoCompatibleTracks);
    }

    let name = match request.name {
      Some(name) => name.trim().to_string(),
      None => generate_name(&request.mood, Utc::now()),
    };
    let description = match request.description {
      Some(description) => description.trim().to_string(),
      None => self.describe(&request.mood, &tracks).await,
    };

    let mut playlist = Playlist::new(name, description, tracks, request.mood);
    info!(id = %playlist.id, name = %playlist.name, tracks = playlist.tracks.len(), "playlist generated");

    if request.save_to_external_provider {
      match self.publisher.publish(&playlist).await {
        Ok(external_id) => {
          info!(%external_id, "playlist published to external provider");
          playlist.external_id = Some(external_id);
        }
        Err(error) => warn!(%error, "failed to publish playlist, keeping local result"),
      }
    }

    if self.settings.persist {
      if let Err(error) = self.cache.save_playlist(&playlist, profile.primary()).await {
        warn!(%error, "failed to persist playlist");
      }
    }

    Ok(playlist)
  }

  /// Devuelve el tamaño objetivo ya resuelto.
  fn validate(&self, request: &GenerateRequest) -> Result<usize, CoreError> {
    request.mood.validate()?;

    let size = request.target_size.unwrap_or(self.settings.default_target_size);
    let (min, max) = (self.settings.min_target_size, self.settings.max_target_size);
    if size < min || size > max {
      return Err(CoreError::InvalidRequest(format!("target size must be between {min} and {max}, got {size}")));
    }

    if let Some(name) = &request.name {
      if name.trim().is_empty() {
        return Err(CoreError::InvalidRequest("playlist name is empty".into()));
      }
      if name.chars().count() > MAX_NAME_CHARS {
        return Err(CoreError::InvalidRequest(format!("playlist name exceeds {MAX_NAME_CHARS} characters")));
      }
    }

    if let Some(description) = &request.description {
      if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(CoreError::InvalidRequest(format!(
          "playlist description exceeds {MAX_DESCRIPTION_CHARS} characters"
        )));
      }
    }

    Ok(size)
  }

  fn cache_tracks_in_background(&self, tracks: Vec<Track>) {
    let cache = Arc::clone(&self.cache);
    tokio::spawn(async move {
      match cache.upsert_tracks(&tracks).await {
        Ok(()) => debug!(tracks = tracks.len(), "candidate tracks cached"),
        Err(error) => warn!(%error, "failed to cache candidate tracks"),
      }
    });
  }

  async fn describe(&self, mood: &MoodInput, tracks: &[Track]) -> String {
    let sample = &tracks[..tracks.len().min(self.settings.description_sample_size)];
    let timeout = self.settings.interpreter_timeout();

    let outcome = match tokio::time::timeout(timeout, self.nl.describe_playlist(&mood.summary(), sample)).await {
      Ok(Ok(text)) if !text.trim().is_empty() => Ok(text),
      Ok(Ok(_)) => Err(InterpreterError::Malformed("empty description".into())),
      Ok(Err(e)) => Err(e),
      Err(_) => Err(InterpreterError::Timeout),
    };

    match outcome {
      Ok(text) => truncate_chars(text.trim(), MAX_DESCRIPTION_CHARS),
      Err(error) => {
        warn!(%error, "description generation failed, using template");
        fallback_description(mood)
      }
    }
  }
}

/// Nombre por plantilla según el tipo de ánimo, fechado en UTC.
pub fn generate_name(mood: &MoodInput, now: DateTime<Utc>) -> String {
  let date = now.format("%Y-%m-%d");
  match mood {
    MoodInput::Color(_) => format!("Color Mood - {date}"),
    MoodInput::Emoji(emojis) => format!("{} Vibes - {date}", emojis.concat()),
    MoodInput::Emotion(text) => format!("{} Mood - {date}", truncate_chars(text.trim(), NAME_TEXT_CHARS)),
    MoodInput::Coordinate(_) => format!("Custom Mood - {date}"),
  }
}

pub fn fallback_description(mood: &MoodInput) -> String {
  truncate_chars(&format!("Playlist crafted from your mood: {}", mood.raw_value()), MAX_DESCRIPTION_CHARS)
}

fn truncate_chars(s: &str, max: usize) -> String {
  s.chars().take(max).collect()
}
