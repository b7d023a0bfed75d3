use moodmix_config::{ConfigError, MoodmixPaths, config_backend};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const SECTION: &str = "storage";

/// Sección `[storage]` de `moodmix.toml`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
  /// Relativo al directorio de datos, o una ruta absoluta.
  pub db_path: PathBuf,
  pub journal_mode: String,
  pub busy_timeout_ms: u32,
  pub pool_size: u32,
}

impl Default for StorageConfig {
  fn default() -> Self {
    StorageConfig {
      db_path: PathBuf::from("moodmix.db"),
      journal_mode: "WAL".to_string(),
      busy_timeout_ms: 5_000,
      pool_size: 4,
    }
  }
}

impl StorageConfig {
  pub fn load() -> Result<Self, ConfigError> {
    config_backend()?.load_or_init_section(SECTION)
  }

  pub fn database_path(&self, paths: &MoodmixPaths) -> PathBuf {
    paths.data_dir.join(&self.db_path)
  }
}
