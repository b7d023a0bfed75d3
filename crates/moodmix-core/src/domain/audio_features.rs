use std::collections::BTreeMap;
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Las ocho dimensiones numéricas que el catálogo adjunta a cada pista.
///
/// El orden de declaración es también el orden de iteración de
/// [`AudioFeatureTargets`], lo que mantiene estable cualquier cálculo
/// que recorra los objetivos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioFeature {
  Danceability,
  Energy,
  Valence,
  Acousticness,
  Instrumentalness,
  Speechiness,
  /// Pulsos por minuto.
  Tempo,
  /// Decibelios (negativos).
  Loudness,
}

impl AudioFeature {
  pub const ALL: [AudioFeature; 8] = [
    AudioFeature::Danceability,
    AudioFeature::Energy,
    AudioFeature::Valence,
    AudioFeature::Acousticness,
    AudioFeature::Instrumentalness,
    AudioFeature::Speechiness,
    AudioFeature::Tempo,
    AudioFeature::Loudness,
  ];

  /// Nombre canónico, el mismo que usa el proveedor en sus parámetros
  /// (`min_energy`, `target_tempo`, ...).
  pub fn as_str(&self) -> &'static str {
    match self {
      AudioFeature::Danceability => "danceability",
      AudioFeature::Energy => "energy",
      AudioFeature::Valence => "valence",
      AudioFeature::Acousticness => "acousticness",
      AudioFeature::Instrumentalness => "instrumentalness",
      AudioFeature::Speechiness => "speechiness",
      AudioFeature::Tempo => "tempo",
      AudioFeature::Loudness => "loudness",
    }
  }

  /// Dominio natural de la característica.
  ///
  /// - proporciones: `[0, 1]`
  /// - tempo: `[0, 300]` BPM (en la práctica 60–200)
  /// - loudness: `[-60, 0]` dB
  pub fn domain(&self) -> (f64, f64) {
    match self {
      AudioFeature::Tempo => (0.0, 300.0),
      AudioFeature::Loudness => (-60.0, 0.0),
      _ => (0.0, 1.0),
    }
  }
}

impl fmt::Display for AudioFeature {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown audio feature: {input}")]
pub struct FeatureParseError {
  pub input: String,
}

impl FromStr for AudioFeature {
  type Err = FeatureParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let normalized = s.trim().to_lowercase();
    AudioFeature::ALL
      .into_iter()
      .find(|f| f.as_str() == normalized)
      .ok_or_else(|| FeatureParseError { input: s.to_string() })
  }
}

/// Rango objetivo `{min, max, target}` para una característica.
///
/// `target` es opcional; cuando falta se usa el punto medio del rango.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRange {
  pub min: f64,
  pub max: f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub target: Option<f64>,
}

impl FeatureRange {
  pub const fn new(min: f64, max: f64, target: f64) -> Self {
    Self { min, max, target: Some(target) }
  }

  pub const fn without_target(min: f64, max: f64) -> Self {
    Self { min, max, target: None }
  }

  /// Banda simétrica `target ± tolerance`, recortada a `[lo, hi]`.
  pub fn around(target: f64, tolerance: f64, lo: f64, hi: f64) -> Self {
    let target = target.clamp(lo, hi);
    Self { min: (target - tolerance).max(lo), max: (target + tolerance).min(hi), target: Some(target) }
  }

  pub fn target_or_midpoint(&self) -> f64 {
    self.target.unwrap_or((self.min + self.max) / 2.0)
  }

  pub fn contains(&self, value: f64) -> bool {
    value >= self.min && value <= self.max
  }

  /// Distancia desde `value` hasta el borde más cercano del rango.
  pub fn distance_outside(&self, value: f64) -> f64 {
    if value < self.min {
      self.min - value
    } else if value > self.max {
      value - self.max
    } else {
      0.0
    }
  }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TargetsError {
  #[error("{feature}: min {min} is greater than max {max}")]
  Inverted { feature: AudioFeature, min: f64, max: f64 },

  #[error("{feature}: [{min}, {max}] lies outside the feature domain")]
  OutOfDomain { feature: AudioFeature, min: f64, max: f64 },

  #[error("{feature}: target {target} is outside [{min}, {max}]")]
  TargetOutOfRange { feature: AudioFeature, target: f64, min: f64, max: f64 },

  #[error("{feature}: non-finite bound")]
  NotFinite { feature: AudioFeature },

  #[error("no feature constrained")]
  Empty,
}

/// Conjunto de rangos objetivo por característica.
///
/// Una clave ausente significa "sin restricción" para esa característica.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioFeatureTargets(BTreeMap<AudioFeature, FeatureRange>);

impl AudioFeatureTargets {
  pub fn new() -> Self {
    Self(BTreeMap::new())
  }

  /// Variante encadenable de [`insert`](Self::insert), cómoda para las tablas estáticas.
  pub fn with(mut self, feature: AudioFeature, range: FeatureRange) -> Self {
    self.0.insert(feature, range);
    self
  }

  pub fn insert(&mut self, feature: AudioFeature, range: FeatureRange) -> Option<FeatureRange> {
    self.0.insert(feature, range)
  }

  pub fn get(&self, feature: AudioFeature) -> Option<&FeatureRange> {
    self.0.get(&feature)
  }

  pub fn iter(&self) -> impl Iterator<Item = (AudioFeature, &FeatureRange)> {
    self.0.iter().map(|(f, r)| (*f, r))
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Valida cada rango contra el dominio de su característica.
  ///
  /// Un conjunto vacío se considera inválido: puntuar contra él daría 0
  /// para cualquier pista.
  pub fn validate(&self) -> Result<(), TargetsError> {
    if self.0.is_empty() {
      return Err(TargetsError::Empty);
    }

    for (feature, range) in self.iter() {
      let finite = range.min.is_finite() && range.max.is_finite() && range.target.is_none_or(f64::is_finite);
      if !finite {
        return Err(TargetsError::NotFinite { feature });
      }
      if range.min > range.max {
        return Err(TargetsError::Inverted { feature, min: range.min, max: range.max });
      }
      let (lo, hi) = feature.domain();
      if range.min < lo || range.max > hi {
        return Err(TargetsError::OutOfDomain { feature, min: range.min, max: range.max });
      }
      if let Some(target) = range.target {
        if !range.contains(target) {
          return Err(TargetsError::TargetOutOfRange { feature, target, min: range.min, max: range.max });
        }
      }
    }

    Ok(())
  }
}

impl FromIterator<(AudioFeature, FeatureRange)> for AudioFeatureTargets {
  fn from_iter<I: IntoIterator<Item = (AudioFeature, FeatureRange)>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}

/// Descriptores de audio de una pista, tal como los entrega el catálogo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
  pub danceability: f64,
  pub energy: f64,
  pub valence: f64,
  pub acousticness: f64,
  pub instrumentalness: f64,
  pub speechiness: f64,
  pub tempo: f64,
  pub loudness: f64,
  /// Tonalidad en notación de clase de altura (0 = C), si el proveedor la conoce.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub key: Option<i32>,
  /// 1 = mayor, 0 = menor.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub mode: Option<i32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub time_signature: Option<i32>,
}

impl AudioFeatures {
  pub fn value(&self, feature: AudioFeature) -> f64 {
    match feature {
      AudioFeature::Danceability => self.danceability,
      AudioFeature::Energy => self.energy,
      AudioFeature::Valence => self.valence,
      AudioFeature::Acousticness => self.acousticness,
      AudioFeature::Instrumentalness => self.instrumentalness,
      AudioFeature::Speechiness => self.speechiness,
      AudioFeature::Tempo => self.tempo,
      AudioFeature::Loudness => self.loudness,
    }
  }

  /// `true` si las ocho dimensiones son números finitos.
  pub fn is_complete(&self) -> bool {
    AudioFeature::ALL.iter().all(|f| self.value(*f).is_finite())
  }

  /// Etiqueta legible del carácter emocional ("Happy, Energetic", ... o "Neutral").
  pub fn emotional_profile(&self) -> String {
    let mut labels = Vec::new();

    if self.valence > 0.7 {
      labels.push("Happy");
    } else if self.valence < 0.3 {
      labels.push("Sad");
    }

    if self.energy > 0.7 {
      labels.push("Energetic");
    } else if self.energy < 0.3 {
      labels.push("Calm");
    }

    if self.danceability > 0.7 {
      labels.push("Danceable");
    }
    if self.acousticness > 0.7 {
      labels.push("Acoustic");
    }

    if labels.is_empty() { "Neutral".to_string() } else { labels.join(", ") }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn features() -> AudioFeatures {
    AudioFeatures {
      danceability: 0.8,
      energy: 0.9,
      valence: 0.75,
      acousticness: 0.1,
      instrumentalness: 0.0,
      speechiness: 0.05,
      tempo: 128.0,
      loudness: -5.0,
      key: Some(5),
      mode: Some(1),
      time_signature: Some(4),
    }
  }

  #[test]
  fn parses_feature_names_case_insensitively() {
    assert_eq!("Energy".parse::<AudioFeature>().unwrap(), AudioFeature::Energy);
    assert_eq!(" tempo ".parse::<AudioFeature>().unwrap(), AudioFeature::Tempo);
    assert!("liveness".parse::<AudioFeature>().is_err());
  }

  #[test]
  fn target_defaults_to_midpoint() {
    assert_eq!(FeatureRange::without_target(0.2, 0.6).target_or_midpoint(), 0.4);
    assert_eq!(FeatureRange::new(0.2, 0.6, 0.5).target_or_midpoint(), 0.5);
  }

  #[test]
  fn band_is_clamped_to_domain() {
    let range = FeatureRange::around(0.95, 0.15, 0.0, 1.0);
    assert_eq!(range.max, 1.0);
    assert!((range.min - 0.8).abs() < 1e-9);
    assert_eq!(range.target, Some(0.95));
  }

  #[test]
  fn validate_rejects_bad_shapes() {
    let inverted = AudioFeatureTargets::new().with(AudioFeature::Energy, FeatureRange::new(0.8, 0.2, 0.5));
    assert!(matches!(inverted.validate(), Err(TargetsError::Inverted { .. })));

    let out_of_domain = AudioFeatureTargets::new().with(AudioFeature::Valence, FeatureRange::new(0.0, 1.5, 0.5));
    assert!(matches!(out_of_domain.validate(), Err(TargetsError::OutOfDomain { .. })));

    let stray_target = AudioFeatureTargets::new().with(AudioFeature::Energy, FeatureRange::new(0.2, 0.4, 0.9));
    assert!(matches!(stray_target.validate(), Err(TargetsError::TargetOutOfRange { .. })));

    assert_eq!(AudioFeatureTargets::new().validate(), Err(TargetsError::Empty));
  }

  #[test]
  fn tempo_and_loudness_use_their_own_domains() {
    let targets = AudioFeatureTargets::new()
      .with(AudioFeature::Tempo, FeatureRange::new(120.0, 180.0, 150.0))
      .with(AudioFeature::Loudness, FeatureRange::new(-10.0, 0.0, -5.0));
    assert!(targets.validate().is_ok());
  }

  #[test]
  fn targets_serialize_as_a_plain_map() {
    let targets = AudioFeatureTargets::new().with(AudioFeature::Energy, FeatureRange::new(0.7, 1.0, 0.85));
    let json = serde_json::to_value(&targets).unwrap();
    assert_eq!(json, serde_json::json!({ "energy": { "min": 0.7, "max": 1.0, "target": 0.85 } }));
  }

  #[test]
  fn emotional_profile_labels() {
    assert_eq!(features().emotional_profile(), "Happy, Energetic, Danceable");

    let mut neutral = features();
    neutral.valence = 0.5;
    neutral.energy = 0.5;
    neutral.danceability = 0.5;
    assert_eq!(neutral.emotional_profile(), "Neutral");
  }

  #[test]
  fn incomplete_features_are_detected() {
    let mut f = features();
    assert!(f.is_complete());
    f.tempo = f64::NAN;
    assert!(!f.is_complete());
  }
}
