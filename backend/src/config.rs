use moodmix_config::{ConfigError, TomlConfigBackend};
use moodmix_core::services::GenerationSettings;

const ENGINE_SECTION: &str = "engine";

/// Sección `[engine]`: parámetros del motor de generación.
pub fn load_engine_settings(backend: &TomlConfigBackend) -> Result<GenerationSettings, ConfigError> {
  backend.load_or_init_section(ENGINE_SECTION)
}
