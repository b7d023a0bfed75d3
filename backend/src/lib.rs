pub mod cli;
mod config;
mod infrastructure;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use moodmix_anthropic::{AnthropicConfig, ClaudeInterpreter};
use moodmix_config::{MoodmixPaths, config_backend, paths};
use moodmix_core::services::{GenerateRequest, PlaylistService};
use moodmix_spotify::{SpotifyClient, SpotifyConfig};
use moodmix_storage::{SqlitePlaylistCache, StorageConfig};

use crate::cli::{Cli, Command, GenerateArgs};
use crate::infrastructure::render;

pub use infrastructure::telemetry;

/// Alias para simplificar la firma genérica del servicio.
type ConcretePlaylistService = PlaylistService<SpotifyClient, ClaudeInterpreter, SqlitePlaylistCache, SpotifyClient>;

/// Ejecuta un comando ya parseado. La salida va a stdout.
pub async fn run(cli: Cli) -> Result<()> {
  let paths = paths().context("resolving application directories")?;

  match cli.command {
    Command::Generate(args) => generate(paths, args).await,
    Command::History { limit } => history(paths, limit).await,
  }
}

fn open_cache(paths: &MoodmixPaths) -> Result<SqlitePlaylistCache> {
  let config = StorageConfig::load().context("loading [storage] config")?;
  let db_path = config.database_path(paths);
  SqlitePlaylistCache::open(&db_path, &config).with_context(|| format!("opening database {}", db_path.display()))
}

/// --- Inyección de dependencias ---
///
/// Cada adapter se construye una sola vez y el servicio los recibe ya listos.
fn build_service(paths: &MoodmixPaths) -> Result<ConcretePlaylistService> {
  let backend = config_backend().context("opening configuration")?;

  // 1. Parámetros del motor ([engine]).
  let settings = config::load_engine_settings(backend).context("loading [engine] config")?;

  // 2. Catálogo + publicador (Spotify). Un mismo cliente para ambos puertos.
  let spotify = Arc::new(
    SpotifyClient::new(SpotifyConfig::load().context("loading [spotify] config")?)
      .context("building spotify client")?,
  );
  if !spotify.has_token() {
    warn!(env = moodmix_spotify::TOKEN_ENV, "no spotify token configured, catalog requests will fail");
  }

  // 3. Intérprete de lenguaje natural (Claude). Sin clave se usan las reglas locales.
  let claude = Arc::new(
    ClaudeInterpreter::new(AnthropicConfig::load().context("loading [anthropic] config")?)
      .context("building anthropic client")?,
  );
  if !claude.has_key() {
    info!(env = moodmix_anthropic::API_KEY_ENV, "no anthropic key configured, using keyword interpretation");
  }

  // 4. Caché persistente (SQLite).
  let cache = Arc::new(open_cache(paths)?);

  Ok(PlaylistService::new(Arc::clone(&spotify), claude, cache, spotify, settings))
}

async fn generate(paths: &MoodmixPaths, args: GenerateArgs) -> Result<()> {
  let service = build_service(paths)?;

  let mut request = GenerateRequest::new(args.mood()?);
  request.target_size = args.size;
  request.name = args.name.clone();
  request.description = args.description.clone();
  request.save_to_external_provider = args.save_to_spotify;

  let playlist = service.generate(request).await?;

  if args.json {
    println!("{}", render::playlist_json(&playlist)?);
  } else {
    print!("{}", render::playlist_text(&playlist));
  }
  Ok(())
}

async fn history(paths: &MoodmixPaths, limit: usize) -> Result<()> {
  let cache = open_cache(paths)?;
  let entries = cache.list_playlists(limit).await.context("reading playlist history")?;
  let cached_tracks = cache.count_tracks().await.context("counting cached tracks")?;
  print!("{}", render::history_text(&entries, cached_tracks));
  Ok(())
}
