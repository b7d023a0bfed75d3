use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::{
  AudioFeature, AudioFeatureTargets, Emotion, FeatureRange, HexColor, MoodFacet, MoodInput, MoodPoint, MoodProfile,
};
use crate::ports::{InterpreterError, NlInterpreter};
use crate::services::mood_tables::{
  COLOR_TABLE, EMOJI_TABLE, FALLBACK_SEARCH_TERM, NEUTRAL_TARGETS, emotion_keywords, emotion_targets, normalize_emoji,
};

/// Banda alrededor de cada objetivo derivado de un color desconocido.
const COLOR_HEURISTIC_BAND: f64 = 0.25;
/// Tolerancia de danceability/acousticness en el plano de coordenadas.
const COORDINATE_TOLERANCE: f64 = 0.15;
/// Tolerancia (más estrecha) de energy/valence en el plano de coordenadas.
const COORDINATE_TIGHT_TOLERANCE: f64 = 0.075;

/// Traduce un [`MoodInput`] a un [`MoodProfile`].
///
/// Nunca falla para una entrada válida: cualquier problema del intérprete
/// externo (error, timeout o salida inválida) cae al detector por palabras
/// clave.
pub struct MoodInterpreter<N>
where
  N: NlInterpreter,
{
  nl: Arc<N>,
  timeout: Duration,
}

impl<N> MoodInterpreter<N>
where
  N: NlInterpreter,
{
  pub fn new(nl: Arc<N>, timeout: Duration) -> Self {
    Self { nl, timeout }
  }

  pub async fn interpret(&self, input: &MoodInput) -> MoodProfile {
    match input {
      MoodInput::Color(color) => MoodProfile::single(color_targets(color)),
      MoodInput::Emoji(emojis) => emoji_profile(emojis),
      MoodInput::Emotion(text) => MoodProfile::single(self.interpret_emotion(text).await),
      MoodInput::Coordinate(point) => MoodProfile::single(coordinate_targets(*point)),
    }
  }

  async fn interpret_emotion(&self, text: &str) -> AudioFeatureTargets {
    let outcome = match tokio::time::timeout(self.timeout, self.nl.interpret_emotional_text(text)).await {
      Ok(Ok(targets)) => match targets.validate() {
        Ok(()) => Ok(targets),
        Err(e) => Err(InterpreterError::Malformed(e.to_string())),
      },
      Ok(Err(e)) => Err(e),
      Err(_) => Err(InterpreterError::Timeout),
    };

    match outcome {
      Ok(targets) => {
        debug!(features = targets.len(), "emotion interpreted by language model");
        targets
      }
      Err(error) => {
        let emotion = detect_emotion(text);
        warn!(%error, fallback = %emotion, "emotion interpreter failed, using keyword detection");
        emotion_targets(emotion)
      }
    }
  }
}

/// Búsqueda exacta en la tabla de colores, o heurística brillo/saturación.
pub fn color_targets(color: &HexColor) -> AudioFeatureTargets {
  if let Some(targets) = COLOR_TABLE.get(color.as_str()) {
    return targets.clone();
  }

  let (r, g, b) = color.rgb();
  let (r, g, b) = (f64::from(r), f64::from(g), f64::from(b));

  let brightness = (0.299 * r + 0.587 * g + 0.114 * b) / 255.0;
  let max = r.max(g).max(b);
  let min = r.min(g).min(b);
  let saturation = if max == 0.0 { 0.0 } else { (max - min) / max };

  let band = |target: f64| FeatureRange::around(target, COLOR_HEURISTIC_BAND, 0.0, 1.0);

  AudioFeatureTargets::new()
    .with(AudioFeature::Energy, band(brightness))
    .with(AudioFeature::Valence, band(saturation))
    .with(AudioFeature::Danceability, band((brightness + saturation) / 2.0))
}

/// Una faceta por emoji distinto, en el orden recibido.
///
/// Los emojis fuera de la tabla aportan una faceta neutra.
pub fn emoji_profile(emojis: &[String]) -> MoodProfile {
  let mut seen = Vec::new();
  let mut facets = Vec::new();

  for raw in emojis {
    let key = normalize_emoji(raw);
    if key.is_empty() || seen.contains(&key) {
      continue;
    }

    let facet = match EMOJI_TABLE.get(&key) {
      Some(mood) => MoodFacet::term(mood.search_term, mood.targets.clone()),
      None => {
        debug!(emoji = %raw, "emoji not in table, using neutral targets");
        MoodFacet::term(FALLBACK_SEARCH_TERM, NEUTRAL_TARGETS.clone())
      }
    };

    seen.push(key);
    facets.push(facet);
  }

  MoodProfile::from_facets(facets).unwrap_or_else(|| MoodProfile::single(NEUTRAL_TARGETS.clone()))
}

/// `x` = eje bailable, `y` = eje acústico.
pub fn coordinate_targets(point: MoodPoint) -> AudioFeatureTargets {
  let x = point.x.clamp(0.0, 1.0);
  let y = point.y.clamp(0.0, 1.0);

  AudioFeatureTargets::new()
    .with(AudioFeature::Danceability, FeatureRange::around(x, COORDINATE_TOLERANCE, 0.0, 1.0))
    .with(AudioFeature::Acousticness, FeatureRange::around(y, COORDINATE_TOLERANCE, 0.0, 1.0))
    .with(AudioFeature::Energy, FeatureRange::around(x, COORDINATE_TIGHT_TOLERANCE, 0.0, 1.0))
    .with(AudioFeature::Valence, FeatureRange::around(y, COORDINATE_TIGHT_TOLERANCE, 0.0, 1.0))
}

/// Emoción con más palabras clave presentes en `text`.
///
/// Cada palabra del texto cuenta como mucho una vez por emoción, y una
/// palabra coincide si empieza por la clave ("relaxado" cuenta una vez para
/// `Calm`, "negativo" no cuenta como "ativo").
///
/// Empates: gana la primera en [`Emotion::ALL`]. Sin coincidencias: `Calm`.
pub fn detect_emotion(text: &str) -> Emotion {
  let lower = text.to_lowercase();
  let words: Vec<&str> = lower.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()).collect();
  let mut detected = Emotion::Calm;
  let mut best = 0;

  for emotion in Emotion::ALL {
    let keywords = emotion_keywords(emotion);
    let hits = words.iter().filter(|w| keywords.iter().any(|k| w.starts_with(k))).count();
    if hits > best {
      best = hits;
      detected = emotion;
    }
  }

  detected
}

#[cfg(test)]
mod tests {
  use async_trait::async_trait;

  use super::*;
  use crate::domain::Track;

  struct ScriptedInterpreter(Result<AudioFeatureTargets, &'static str>);

  #[async_trait]
  impl NlInterpreter for ScriptedInterpreter {
    async fn interpret_emotional_text(&self, _text: &str) -> Result<AudioFeatureTargets, InterpreterError> {
      self.0.clone().map_err(|e| InterpreterError::Unavailable(e.to_string()))
    }

    async fn describe_playlist(&self, _summary: &str, _sample: &[Track]) -> Result<String, InterpreterError> {
      Err(InterpreterError::Unavailable("offline".into()))
    }
  }

  fn interpreter(script: Result<AudioFeatureTargets, &'static str>) -> MoodInterpreter<ScriptedInterpreter> {
    MoodInterpreter::new(Arc::new(ScriptedInterpreter(script)), Duration::from_secs(5))
  }

  #[tokio::test]
  async fn canonical_colors_round_trip_the_table() {
    let interp = interpreter(Err("unused"));
    for (hex, expected) in COLOR_TABLE.iter() {
      let input = MoodInput::color(&hex.to_lowercase()).unwrap();
      let profile = interp.interpret(&input).await;
      assert_eq!(profile.primary(), expected, "color {hex}");
    }
  }

  #[test]
  fn red_has_high_energy_and_valence() {
    let red = color_targets(&HexColor::parse("#ff0000").unwrap());
    assert_eq!(red.get(AudioFeature::Energy).unwrap().target, Some(0.85));
    assert_eq!(red.get(AudioFeature::Valence).unwrap().target, Some(0.8));
  }

  #[test]
  fn unknown_color_uses_brightness_and_saturation() {
    // gris medio: brillo ~0.5, saturación 0
    let t = color_targets(&HexColor::parse("#808080").unwrap());
    let energy = t.get(AudioFeature::Energy).unwrap();
    let valence = t.get(AudioFeature::Valence).unwrap();
    let dance = t.get(AudioFeature::Danceability).unwrap();

    assert!((energy.target.unwrap() - 128.0 / 255.0).abs() < 1e-9);
    assert_eq!(valence.target, Some(0.0));
    assert_eq!(valence.min, 0.0);
    assert_eq!(valence.max, 0.25);
    assert!((dance.target.unwrap() - 64.0 / 255.0).abs() < 1e-9);
    assert!(t.validate().is_ok());
  }

  #[test]
  fn black_is_in_the_table_and_not_derived() {
    let black = color_targets(&HexColor::parse("#000000").unwrap());
    assert!(black.get(AudioFeature::Loudness).is_some());
  }

  #[test]
  fn coordinates_produce_four_clamped_constraints() {
    for (x, y) in [(0.0, 0.0), (1.0, 1.0), (0.5, 0.1), (0.93, 0.04), (0.2, 0.8)] {
      let t = coordinate_targets(MoodPoint::new(x, y).unwrap());
      assert_eq!(t.len(), 4);
      for (_, range) in t.iter() {
        let target = range.target.unwrap();
        assert!(range.min <= target && target <= range.max);
        assert!(range.min >= 0.0 && range.max <= 1.0);
      }
    }

    let t = coordinate_targets(MoodPoint::new(0.5, 0.5).unwrap());
    let energy = t.get(AudioFeature::Energy).unwrap();
    assert!((energy.max - energy.min - 0.15).abs() < 1e-9);
    let dance = t.get(AudioFeature::Danceability).unwrap();
    assert!((dance.max - dance.min - 0.3).abs() < 1e-9);
  }

  #[test]
  fn each_distinct_emoji_is_its_own_facet() {
    let profile = emoji_profile(&["🔥".into(), "🌊".into(), "🔥".into(), "🦄".into()]);
    assert_eq!(profile.search_terms().unwrap(), vec!["intense", "chill", FALLBACK_SEARCH_TERM]);
    assert_eq!(profile.facets()[2].targets, *NEUTRAL_TARGETS);
  }

  #[test]
  fn keyword_detection() {
    assert_eq!(detect_emotion("estou muito feliz e animado"), Emotion::Happy);
    assert_eq!(detect_emotion("Hoje estou TRISTE"), Emotion::Sad);
    assert_eq!(detect_emotion("preciso de foco para o estudo"), Emotion::Focused);
    assert_eq!(detect_emotion("nothing relevant here"), Emotion::Calm);
    // empate 1 a 1: gana la primera categoría
    assert_eq!(detect_emotion("feliz mas triste"), Emotion::Happy);
  }

  #[test]
  fn a_word_counts_once_even_if_several_keywords_match_it() {
    assert_eq!(detect_emotion("calmo e feliz"), Emotion::Happy);
    assert_eq!(detect_emotion("relaxado e feliz"), Emotion::Happy);
    assert_eq!(detect_emotion("relaxing, calm and happy"), Emotion::Calm);
  }

  #[test]
  fn keywords_inside_other_words_do_not_match() {
    assert_eq!(detect_emotion("um dia negativo"), Emotion::Calm);
    assert_eq!(detect_emotion("I need courage today"), Emotion::Calm);
    assert_eq!(detect_emotion("need to concentrate"), Emotion::Focused);
  }

  #[tokio::test]
  async fn valid_interpreter_output_is_used() {
    let custom = AudioFeatureTargets::new().with(AudioFeature::Energy, FeatureRange::new(0.1, 0.3, 0.2));
    let profile = interpreter(Ok(custom.clone())).interpret(&MoodInput::Emotion("whatever".into())).await;
    assert_eq!(profile.primary(), &custom);
  }

  #[tokio::test]
  async fn invalid_interpreter_output_falls_back_to_keywords() {
    let inverted = AudioFeatureTargets::new().with(AudioFeature::Energy, FeatureRange::new(0.9, 0.1, 0.5));
    let profile = interpreter(Ok(inverted)).interpret(&MoodInput::Emotion("so much rage".into())).await;
    assert_eq!(profile.primary(), &emotion_targets(Emotion::Angry));
  }

  #[tokio::test]
  async fn interpreter_failure_falls_back_to_keywords() {
    let profile = interpreter(Err("boom")).interpret(&MoodInput::Emotion("estou muito feliz e animado".into())).await;
    assert_eq!(profile.primary().get(AudioFeature::Valence).unwrap().target, Some(0.85));
  }
}
