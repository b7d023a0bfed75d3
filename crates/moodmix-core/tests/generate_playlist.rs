use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use moodmix_core::CoreError;
use moodmix_core::domain::{
  AudioFeature, AudioFeatureTargets, AudioFeatures, CatalogTrack, FeatureQuery, HexColor, MoodInput, Playlist, Track,
  TrackId,
};
use moodmix_core::ports::{
  CacheError, CatalogError, CatalogProvider, InterpreterError, NlInterpreter, PlaylistCache, PlaylistPublisher,
  PublishError,
};
use moodmix_core::services::mood_interpreter::color_targets;
use moodmix_core::services::scorer;
use moodmix_core::services::{GenerateRequest, GenerationSettings, PlaylistService};

// ---------------------------------------------------------------------------
// fakes
// ---------------------------------------------------------------------------

fn catalog_track(i: usize) -> CatalogTrack {
  CatalogTrack {
    id: TrackId::new(format!("track-{i}")),
    name: format!("Song {i}"),
    artists: vec![format!("Artist {}", i % 7)],
    album: format!("Album {}", i % 3),
    duration_ms: 180_000 + i as u64 * 1_000,
    popularity: 50,
    preview_url: None,
    spotify_uri: Some(format!("spotify:track:{i}")),
    album_image: None,
  }
}

/// Descriptores deterministas pero variados a partir del índice.
fn features_for(id: &TrackId) -> AudioFeatures {
  let i: usize = id.as_str().trim_start_matches("track-").parse().unwrap_or(0);
  let wave = |k: usize| ((i * k) % 100) as f64 / 100.0;
  AudioFeatures {
    danceability: wave(37),
    energy: wave(53),
    valence: wave(71),
    acousticness: wave(19),
    instrumentalness: wave(11),
    speechiness: wave(7) / 2.0,
    tempo: 70.0 + wave(29) * 120.0,
    loudness: -20.0 + wave(13) * 18.0,
    key: Some((i % 12) as i32),
    mode: Some((i % 2) as i32),
    time_signature: Some(4),
  }
}

#[derive(Default)]
struct FakeCatalog {
  feature_results: Vec<usize>,
  term_results: Vec<(&'static str, Vec<usize>)>,
  calls: AtomicUsize,
  feature_queries: Mutex<Vec<FeatureQuery>>,
}

impl FakeCatalog {
  fn with_pool(n: usize) -> Self {
    Self { feature_results: (0..n).collect(), ..Default::default() }
  }

  fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl CatalogProvider for FakeCatalog {
  async fn search_by_features(&self, query: &FeatureQuery) -> Result<Vec<CatalogTrack>, CatalogError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    self.feature_queries.lock().unwrap().push(query.clone());
    Ok(self.feature_results.iter().map(|i| catalog_track(*i)).collect())
  }

  async fn search_by_text(&self, query: &str, _limit: usize) -> Result<Vec<CatalogTrack>, CatalogError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    let ids = self.term_results.iter().find(|(term, _)| *term == query).map(|(_, ids)| ids.clone()).unwrap_or_default();
    Ok(ids.into_iter().map(catalog_track).collect())
  }

  async fn get_audio_features(&self, ids: &[TrackId]) -> Result<Vec<Option<AudioFeatures>>, CatalogError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    Ok(ids.iter().map(|id| Some(features_for(id))).collect())
  }
}

enum Script {
  Fail,
  Hang,
  Describe(&'static str),
}

struct FakeInterpreter {
  script: Script,
  calls: AtomicUsize,
}

impl FakeInterpreter {
  fn new(script: Script) -> Self {
    Self { script, calls: AtomicUsize::new(0) }
  }
}

#[async_trait]
impl NlInterpreter for FakeInterpreter {
  async fn interpret_emotional_text(&self, _text: &str) -> Result<AudioFeatureTargets, InterpreterError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    match self.script {
      Script::Hang => std::future::pending().await,
      _ => Err(InterpreterError::Unavailable("scripted".into())),
    }
  }

  async fn describe_playlist(&self, _summary: &str, sample: &[Track]) -> Result<String, InterpreterError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    assert!(sample.len() <= 10);
    match self.script {
      Script::Hang => std::future::pending().await,
      Script::Fail => Err(InterpreterError::Unavailable("scripted".into())),
      Script::Describe(text) => Ok(text.to_string()),
    }
  }
}

#[derive(Default)]
struct RecordingCache {
  fail: bool,
  saved: Mutex<Vec<(Playlist, AudioFeatureTargets)>>,
}

#[async_trait]
impl PlaylistCache for RecordingCache {
  async fn upsert_tracks(&self, _tracks: &[Track]) -> Result<(), CacheError> {
    if self.fail { Err(CacheError::Storage("disk full".into())) } else { Ok(()) }
  }

  async fn save_playlist(&self, playlist: &Playlist, targets: &AudioFeatureTargets) -> Result<(), CacheError> {
    if self.fail {
      return Err(CacheError::Storage("disk full".into()));
    }
    self.saved.lock().unwrap().push((playlist.clone(), targets.clone()));
    Ok(())
  }
}

struct FakePublisher {
  fail: bool,
  calls: AtomicUsize,
}

impl FakePublisher {
  fn ok() -> Self {
    Self { fail: false, calls: AtomicUsize::new(0) }
  }

  fn failing() -> Self {
    Self { fail: true, calls: AtomicUsize::new(0) }
  }
}

#[async_trait]
impl PlaylistPublisher for FakePublisher {
  async fn publish(&self, _playlist: &Playlist) -> Result<String, PublishError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    if self.fail { Err(PublishError::Provider("503".into())) } else { Ok("remote-123".into()) }
  }
}

struct Harness {
  catalog: Arc<FakeCatalog>,
  interpreter: Arc<FakeInterpreter>,
  cache: Arc<RecordingCache>,
  publisher: Arc<FakePublisher>,
  service: PlaylistService<FakeCatalog, FakeInterpreter, RecordingCache, FakePublisher>,
}

fn harness(catalog: FakeCatalog, interpreter: FakeInterpreter, cache: RecordingCache, publisher: FakePublisher) -> Harness {
  let catalog = Arc::new(catalog);
  let interpreter = Arc::new(interpreter);
  let cache = Arc::new(cache);
  let publisher = Arc::new(publisher);
  let service = PlaylistService::new(
    catalog.clone(),
    interpreter.clone(),
    cache.clone(),
    publisher.clone(),
    GenerationSettings::default(),
  );
  Harness { catalog, interpreter, cache, publisher, service }
}

fn request(mood: MoodInput, size: usize) -> GenerateRequest {
  GenerateRequest { target_size: Some(size), ..GenerateRequest::new(mood) }
}

fn ids(tracks: &[Track]) -> Vec<String> {
  tracks.iter().map(|t| t.id.to_string()).collect()
}

// ---------------------------------------------------------------------------
// scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn red_color_yields_ten_tracks_including_the_top_five() {
  let h = harness(
    FakeCatalog::with_pool(30),
    FakeInterpreter::new(Script::Describe("Bright and loud.")),
    RecordingCache::default(),
    FakePublisher::ok(),
  );
  let mood = MoodInput::color("#FF0000").unwrap();

  let playlist = h.service.generate(request(mood, 10)).await.unwrap();

  assert_eq!(playlist.tracks.len(), 10);
  assert_eq!(playlist.description, "Bright and loud.");
  assert!(playlist.name.starts_with("Color Mood - "));
  assert!(playlist.external_id.is_none());

  let targets = color_targets(&HexColor::parse("#FF0000").unwrap());
  assert_eq!(targets.get(AudioFeature::Energy).unwrap().target, Some(0.85));
  assert_eq!(targets.get(AudioFeature::Valence).unwrap().target, Some(0.8));

  // las cinco mejores, calculadas por separado, encabezan la playlist
  let mut pool: Vec<(String, f64)> = (0..30)
    .map(|i| {
      let id = TrackId::new(format!("track-{i}"));
      (id.to_string(), scorer::score(&features_for(&id), &targets))
    })
    .collect();
  pool.sort_by(|a, b| b.1.total_cmp(&a.1));
  let top: Vec<String> = pool.iter().take(5).map(|(id, _)| id.clone()).collect();
  assert_eq!(ids(&playlist.tracks[..5]), top);

  // sobremuestreo x3 en la consulta por rangos
  let queries = h.catalog.feature_queries.lock().unwrap();
  assert_eq!(queries[0].limit, 30);

  let saved = h.cache.saved.lock().unwrap();
  assert_eq!(saved.len(), 1);
  assert_eq!(saved[0].1, targets);
}

#[tokio::test]
async fn empty_emotion_is_rejected_before_any_call() {
  let h =
    harness(FakeCatalog::with_pool(30), FakeInterpreter::new(Script::Fail), RecordingCache::default(), FakePublisher::ok());

  let err = h.service.generate(request(MoodInput::Emotion(String::new()), 10)).await.unwrap_err();

  assert!(matches!(err, CoreError::InvalidMoodInput(_)));
  assert_eq!(h.catalog.calls(), 0);
  assert_eq!(h.interpreter.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn interpreter_timeout_falls_back_to_keywords() {
  let h =
    harness(FakeCatalog::with_pool(40), FakeInterpreter::new(Script::Hang), RecordingCache::default(), FakePublisher::ok());
  let mood = MoodInput::Emotion("estou muito feliz e animado".into());

  let playlist = h.service.generate(request(mood, 10)).await.unwrap();

  let queries = h.catalog.feature_queries.lock().unwrap();
  let valence = queries[0].constraints.iter().find(|c| c.feature == AudioFeature::Valence).unwrap();
  assert_eq!(valence.target, 0.85);

  assert_eq!(playlist.tracks.len(), 10);
  assert_eq!(playlist.description, "Playlist crafted from your mood: estou muito feliz e animado");
}

#[tokio::test]
async fn empty_catalog_means_no_compatible_tracks() {
  let h =
    harness(FakeCatalog::default(), FakeInterpreter::new(Script::Fail), RecordingCache::default(), FakePublisher::ok());

  let err = h.service.generate(request(MoodInput::coordinate(0.3, 0.7).unwrap(), 10)).await.unwrap_err();

  assert!(matches!(err, CoreError::NoCompatibleTracks));
  assert!(h.cache.saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn overlapping_emoji_terms_are_deduplicated() {
  let catalog = FakeCatalog {
    term_results: vec![("intense", (0..20).collect()), ("chill", (10..30).collect())],
    ..Default::default()
  };
  let h = harness(catalog, FakeInterpreter::new(Script::Fail), RecordingCache::default(), FakePublisher::ok());
  let mood = MoodInput::Emoji(vec!["🔥".into(), "🌊".into()]);

  let playlist = h.service.generate(request(mood, 25)).await.unwrap();

  let unique: HashSet<String> = ids(&playlist.tracks).into_iter().collect();
  assert_eq!(unique.len(), playlist.tracks.len());
  assert_eq!(playlist.tracks.len(), 25);
  assert!(playlist.name.starts_with("🔥🌊 Vibes - "));
}

#[tokio::test]
async fn target_size_outside_limits_is_an_invalid_request() {
  let h =
    harness(FakeCatalog::with_pool(30), FakeInterpreter::new(Script::Fail), RecordingCache::default(), FakePublisher::ok());

  for size in [0, 9, 101] {
    let err = h.service.generate(request(MoodInput::color("#0000FF").unwrap(), size)).await.unwrap_err();
    assert!(matches!(err, CoreError::InvalidRequest(_)), "size {size}");
  }
  assert_eq!(h.catalog.calls(), 0);
}

#[tokio::test]
async fn overrides_replace_generated_name_and_description() {
  let h = harness(
    FakeCatalog::with_pool(30),
    FakeInterpreter::new(Script::Describe("unused")),
    RecordingCache::default(),
    FakePublisher::ok(),
  );
  let req = GenerateRequest {
    name: Some("Sunday".into()),
    description: Some("For slow mornings".into()),
    ..request(MoodInput::color("#FFFFFF").unwrap(), 10)
  };

  let playlist = h.service.generate(req).await.unwrap();

  assert_eq!(playlist.name, "Sunday");
  assert_eq!(playlist.description, "For slow mornings");
  assert_eq!(h.interpreter.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn publishing_sets_the_external_id_and_is_persisted() {
  let h =
    harness(FakeCatalog::with_pool(30), FakeInterpreter::new(Script::Fail), RecordingCache::default(), FakePublisher::ok());
  let req = GenerateRequest { save_to_external_provider: true, ..request(MoodInput::color("#FFA500").unwrap(), 10) };

  let playlist = h.service.generate(req).await.unwrap();

  assert_eq!(playlist.external_id.as_deref(), Some("remote-123"));
  assert_eq!(h.cache.saved.lock().unwrap()[0].0.external_id.as_deref(), Some("remote-123"));
}

#[tokio::test]
async fn side_effect_failures_do_not_fail_generation() {
  let h = harness(
    FakeCatalog::with_pool(30),
    FakeInterpreter::new(Script::Fail),
    RecordingCache { fail: true, ..Default::default() },
    FakePublisher::failing(),
  );
  let req = GenerateRequest { save_to_external_provider: true, ..request(MoodInput::color("#008000").unwrap(), 10) };

  let playlist = h.service.generate(req).await.unwrap();

  assert_eq!(playlist.tracks.len(), 10);
  assert!(playlist.external_id.is_none());
  assert_eq!(h.publisher.calls.load(Ordering::SeqCst), 1);
}
