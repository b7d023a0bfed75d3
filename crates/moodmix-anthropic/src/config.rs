use std::time::Duration;

use moodmix_config::{ConfigError, config_backend};
use serde::{Deserialize, Serialize};

const SECTION: &str = "anthropic";

pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Sección `[anthropic]` de `moodmix.toml`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AnthropicConfig {
  pub api_base_url: String,
  pub api_version: String,
  pub model: String,
  /// Límite de tokens para la interpretación de texto emocional.
  pub interpret_max_tokens: u32,
  /// Límite de tokens para la descripción de la playlist.
  pub describe_max_tokens: u32,
  pub request_timeout_secs: u64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub api_key: Option<String>,
}

impl Default for AnthropicConfig {
  fn default() -> Self {
    AnthropicConfig {
      api_base_url: "https://api.anthropic.com/v1".to_string(),
      api_version: "2023-06-01".to_string(),
      model: "claude-sonnet-4-5-20250929".to_string(),
      interpret_max_tokens: 1000,
      describe_max_tokens: 200,
      request_timeout_secs: 30,
      api_key: None,
    }
  }
}

impl AnthropicConfig {
  /// Carga la sección y aplica `ANTHROPIC_API_KEY` si está definida.
  pub fn load() -> Result<Self, ConfigError> {
    let config: Self = config_backend()?.load_or_init_section(SECTION)?;
    Ok(config.with_key_override(std::env::var(API_KEY_ENV).ok()))
  }

  pub fn with_key_override(mut self, key: Option<String>) -> Self {
    if let Some(key) = key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
      self.api_key = Some(key);
    }
    self
  }

  pub fn request_timeout(&self) -> Duration {
    Duration::from_secs(self.request_timeout_secs.max(1))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn env_key_overrides_and_blank_is_ignored() {
    let cfg = AnthropicConfig::default();
    assert_eq!(cfg.clone().with_key_override(Some(" sk-test ".into())).api_key.as_deref(), Some("sk-test"));
    assert_eq!(cfg.with_key_override(Some(String::new())).api_key, None);
  }
}
