//! Lectura de la respuesta del modelo: el texto puede traer prosa o bloques
//! markdown alrededor del JSON, pero el JSON en sí se valida de forma estricta.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Deserialize;

use moodmix_core::domain::{AudioFeature, AudioFeatureTargets, FeatureRange};

use crate::error::AnthropicError;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRange {
  min: f64,
  max: f64,
  #[serde(default)]
  target: Option<f64>,
}

/// Primer objeto JSON con llaves balanceadas dentro de `text`.
///
/// Las llaves dentro de cadenas (con escapes) no cuentan.
pub fn first_json_object(text: &str) -> Option<&str> {
  let start = text.find('{')?;
  let mut depth = 0usize;
  let mut in_string = false;
  let mut escaped = false;

  for (i, c) in text[start..].char_indices() {
    if in_string {
      match c {
        _ if escaped => escaped = false,
        '\\' => escaped = true,
        '"' => in_string = false,
        _ => {}
      }
      continue;
    }

    match c {
      '"' => in_string = true,
      '{' => depth += 1,
      '}' => {
        depth -= 1;
        if depth == 0 {
          return Some(&text[start..start + i + 1]);
        }
      }
      _ => {}
    }
  }

  None
}

/// Objetivos de audio a partir de la respuesta del modelo.
///
/// Claves desconocidas, campos extra o rangos fuera de dominio invalidan
/// la respuesta entera.
pub fn parse_targets(text: &str) -> Result<AudioFeatureTargets, AnthropicError> {
  let json = first_json_object(text).ok_or_else(|| AnthropicError::Malformed("no JSON object in response".into()))?;

  let raw: BTreeMap<String, RawRange> =
    serde_json::from_str(json).map_err(|e| AnthropicError::Malformed(format!("invalid targets JSON: {e}")))?;

  let mut targets = AudioFeatureTargets::new();
  for (key, range) in raw {
    let feature =
      AudioFeature::from_str(&key).map_err(|_| AnthropicError::Malformed(format!("unknown feature {key:?}")))?;
    let range = match range.target {
      Some(target) => FeatureRange::new(range.min, range.max, target),
      None => FeatureRange::without_target(range.min, range.max),
    };
    targets.insert(feature, range);
  }

  targets.validate().map_err(|e| AnthropicError::Malformed(e.to_string()))?;
  Ok(targets)
}
