use std::time::Duration;

use moodmix_config::{ConfigError, config_backend};
use serde::{Deserialize, Serialize};

const SECTION: &str = "spotify";

/// Variable de entorno con el bearer token. Tiene prioridad sobre el archivo.
pub const TOKEN_ENV: &str = "MOODMIX_SPOTIFY_TOKEN";

/// Sección `[spotify]` de `moodmix.toml`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpotifyConfig {
  pub api_base_url: String,
  pub market: String,
  /// Semillas obligatorias de `/recommendations`.
  pub seed_genres: Vec<String>,
  pub request_timeout_secs: u64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub access_token: Option<String>,
}

impl Default for SpotifyConfig {
  fn default() -> Self {
    SpotifyConfig {
      api_base_url: "https://api.spotify.com/v1".to_string(),
      market: "US".to_string(),
      seed_genres: vec!["pop".to_string(), "rock".to_string()],
      request_timeout_secs: 10,
      access_token: None,
    }
  }
}

impl SpotifyConfig {
  /// Carga la sección y aplica `MOODMIX_SPOTIFY_TOKEN` si está definida.
  pub fn load() -> Result<Self, ConfigError> {
    let config: Self = config_backend()?.load_or_init_section(SECTION)?;
    Ok(config.with_token_override(std::env::var(TOKEN_ENV).ok()))
  }

  pub fn with_token_override(mut self, token: Option<String>) -> Self {
    if let Some(token) = token.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
      self.access_token = Some(token);
    }
    self
  }

  pub fn request_timeout(&self) -> Duration {
    Duration::from_secs(self.request_timeout_secs.max(1))
  }
}
