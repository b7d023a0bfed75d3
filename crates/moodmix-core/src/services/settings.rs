use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::services::diversifier::DEFAULT_ANCHOR_COUNT;

/// Parámetros del motor de generación (sección `[engine]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
  /// Candidatos pedidos por cada pista final.
  pub overfetch_factor: usize,
  /// Mejores pistas que siempre encabezan la playlist.
  pub anchor_count: usize,
  /// Tiempo máximo para cada llamada al intérprete de lenguaje natural.
  pub interpreter_timeout_secs: u64,
  pub min_target_size: usize,
  pub max_target_size: usize,
  pub default_target_size: usize,
  /// Guardar cada playlist generada en la caché local.
  pub persist: bool,
  /// Pistas que se enseñan al intérprete para escribir la descripción.
  pub description_sample_size: usize,
}

impl Default for GenerationSettings {
  fn default() -> Self {
    Self {
      overfetch_factor: 3,
      anchor_count: DEFAULT_ANCHOR_COUNT,
      interpreter_timeout_secs: 15,
      min_target_size: 10,
      max_target_size: 100,
      default_target_size: 30,
      persist: true,
      description_sample_size: 10,
    }
  }
}

impl GenerationSettings {
  pub fn interpreter_timeout(&self) -> Duration {
    Duration::from_secs(self.interpreter_timeout_secs)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_keys_fall_back_to_defaults() {
    let parsed: GenerationSettings = serde_json::from_str(r#"{ "overfetch_factor": 4 }"#).unwrap();
    assert_eq!(parsed.overfetch_factor, 4);
    assert_eq!(parsed.anchor_count, 5);
    assert_eq!(parsed.interpreter_timeout(), Duration::from_secs(15));
  }
}
