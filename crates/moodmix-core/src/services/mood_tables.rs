//! Tablas estáticas de ánimo: colores, emojis, emociones y palabras clave.
//!
//! Se inicializan una sola vez por proceso y son de sólo lectura.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::domain::{AudioFeature, AudioFeatureTargets, Emotion, FeatureRange};

use AudioFeature::*;

/// Término usado para buscar emojis que no están en la tabla.
pub const FALLBACK_SEARCH_TERM: &str = "popular";

/// Objetivos "música popular, ampliamente positiva".
pub static NEUTRAL_TARGETS: Lazy<AudioFeatureTargets> = Lazy::new(|| {
  AudioFeatureTargets::new()
    .with(Energy, FeatureRange::new(0.3, 0.7, 0.5))
    .with(Valence, FeatureRange::new(0.4, 0.8, 0.6))
    .with(Danceability, FeatureRange::new(0.4, 0.8, 0.6))
});

fn targets(ranges: &[(AudioFeature, f64, f64, f64)]) -> AudioFeatureTargets {
  ranges.iter().map(|&(feature, min, max, target)| (feature, FeatureRange::new(min, max, target))).collect()
}

/// Colores canónicos, con la clave ya normalizada a `#RRGGBB` en mayúsculas.
pub static COLOR_TABLE: Lazy<HashMap<&'static str, AudioFeatureTargets>> = Lazy::new(|| {
  HashMap::from([
    // rojo: energía y valencia altas
    (
      "#FF0000",
      targets(&[
        (Energy, 0.7, 1.0, 0.85),
        (Valence, 0.6, 1.0, 0.8),
        (Danceability, 0.5, 1.0, 0.7),
        (Tempo, 120.0, 180.0, 150.0),
      ]),
    ),
    // azul: calmado, introspectivo
    (
      "#0000FF",
      targets(&[
        (Energy, 0.0, 0.4, 0.2),
        (Valence, 0.0, 0.5, 0.3),
        (Acousticness, 0.4, 1.0, 0.7),
        (Tempo, 60.0, 120.0, 90.0),
      ]),
    ),
    // amarillo: bailable, alegre
    (
      "#FFFF00",
      targets(&[
        (Danceability, 0.7, 1.0, 0.9),
        (Valence, 0.7, 1.0, 0.85),
        (Energy, 0.6, 0.9, 0.75),
        (Tempo, 110.0, 160.0, 135.0),
      ]),
    ),
    // morado: misterioso, electrónico
    (
      "#800080",
      targets(&[
        (Energy, 0.5, 0.8, 0.65),
        (Instrumentalness, 0.3, 0.8, 0.6),
        (Valence, 0.3, 0.7, 0.5),
        (Acousticness, 0.0, 0.4, 0.2),
      ]),
    ),
    // naranja: enérgico, cálido
    (
      "#FFA500",
      targets(&[
        (Energy, 0.6, 0.9, 0.75),
        (Valence, 0.5, 0.8, 0.7),
        (Tempo, 120.0, 180.0, 150.0),
        (Danceability, 0.4, 0.8, 0.6),
      ]),
    ),
    // verde: natural, equilibrado
    (
      "#008000",
      targets(&[
        (Energy, 0.4, 0.7, 0.55),
        (Valence, 0.4, 0.7, 0.55),
        (Acousticness, 0.3, 0.7, 0.5),
        (Tempo, 90.0, 140.0, 115.0),
      ]),
    ),
    // rosa: romántico, suave
    (
      "#FFC0CB",
      targets(&[
        (Valence, 0.6, 0.9, 0.75),
        (Energy, 0.2, 0.6, 0.4),
        (Acousticness, 0.3, 0.8, 0.6),
        (Tempo, 70.0, 130.0, 100.0),
      ]),
    ),
    // negro: intenso, dramático, fuerte
    (
      "#000000",
      targets(&[
        (Energy, 0.7, 1.0, 0.85),
        (Valence, 0.0, 0.4, 0.2),
        (Loudness, -10.0, 0.0, -5.0),
        (Tempo, 100.0, 200.0, 140.0),
      ]),
    ),
    // blanco: limpio, minimalista
    (
      "#FFFFFF",
      targets(&[
        (Acousticness, 0.5, 1.0, 0.8),
        (Energy, 0.2, 0.6, 0.4),
        (Valence, 0.4, 0.8, 0.6),
        (Instrumentalness, 0.3, 0.9, 0.6),
      ]),
    ),
  ])
});

/// Entrada de la tabla de emojis: término de búsqueda + objetivos.
#[derive(Debug, Clone)]
pub struct EmojiMood {
  pub search_term: &'static str,
  pub targets: AudioFeatureTargets,
}

/// Quita el selector de variación U+FE0F, de modo que `❤` y `❤️` sean la
/// misma clave.
pub fn normalize_emoji(raw: &str) -> String {
  raw.trim().chars().filter(|c| *c != '\u{FE0F}').collect()
}

pub static EMOJI_TABLE: Lazy<HashMap<String, EmojiMood>> = Lazy::new(|| {
  let entries: [(&str, &str, AudioFeatureTargets); 12] = [
    (
      "💃",
      "dance",
      targets(&[
        (Danceability, 0.8, 1.0, 0.9),
        (Energy, 0.6, 0.9, 0.8),
        (Valence, 0.6, 1.0, 0.8),
        (Tempo, 110.0, 170.0, 140.0),
      ]),
    ),
    (
      "😭",
      "sad",
      targets(&[
        (Valence, 0.0, 0.3, 0.15),
        (Energy, 0.0, 0.4, 0.2),
        (Acousticness, 0.4, 1.0, 0.7),
        (Tempo, 60.0, 100.0, 80.0),
      ]),
    ),
    (
      "🔥",
      "intense",
      targets(&[
        (Energy, 0.8, 1.0, 0.9),
        (Tempo, 140.0, 200.0, 170.0),
        (Loudness, -8.0, 0.0, -3.0),
        (Valence, 0.5, 1.0, 0.7),
      ]),
    ),
    (
      "🌊",
      "chill",
      targets(&[
        (Acousticness, 0.5, 1.0, 0.8),
        (Energy, 0.0, 0.5, 0.3),
        (Valence, 0.3, 0.7, 0.5),
        (Tempo, 60.0, 110.0, 85.0),
      ]),
    ),
    (
      "⚡",
      "electric",
      targets(&[
        (Energy, 0.8, 1.0, 0.9),
        (Danceability, 0.6, 1.0, 0.8),
        (Instrumentalness, 0.0, 0.3, 0.1),
        (Tempo, 120.0, 180.0, 150.0),
      ]),
    ),
    (
      "🌙",
      "night",
      targets(&[
        (Energy, 0.0, 0.4, 0.2),
        (Valence, 0.2, 0.6, 0.4),
        (Acousticness, 0.4, 0.9, 0.7),
        (Tempo, 60.0, 100.0, 80.0),
      ]),
    ),
    (
      "☀️",
      "sunny",
      targets(&[
        (Valence, 0.7, 1.0, 0.85),
        (Energy, 0.5, 0.8, 0.7),
        (Danceability, 0.5, 0.9, 0.7),
        (Tempo, 100.0, 150.0, 125.0),
      ]),
    ),
    (
      "🎭",
      "dramatic",
      targets(&[
        (Energy, 0.6, 0.9, 0.75),
        (Valence, 0.2, 0.8, 0.5),
        (Speechiness, 0.1, 0.4, 0.2),
        (Acousticness, 0.0, 0.5, 0.2),
      ]),
    ),
    (
      "❤️",
      "love",
      targets(&[
        (Valence, 0.5, 0.9, 0.7),
        (Energy, 0.2, 0.6, 0.4),
        (Acousticness, 0.3, 0.8, 0.6),
        (Tempo, 70.0, 120.0, 95.0),
      ]),
    ),
    (
      "🌈",
      "happy",
      targets(&[
        (Valence, 0.6, 1.0, 0.8),
        (Energy, 0.4, 0.8, 0.6),
        (Danceability, 0.4, 0.8, 0.6),
        (Tempo, 90.0, 140.0, 115.0),
      ]),
    ),
    (
      "🎵",
      "melodic",
      targets(&[
        (Acousticness, 0.3, 0.8, 0.6),
        (Instrumentalness, 0.0, 0.6, 0.3),
        (Energy, 0.3, 0.7, 0.5),
        (Valence, 0.4, 0.8, 0.6),
      ]),
    ),
    (
      "🚀",
      "space",
      targets(&[
        (Energy, 0.6, 0.9, 0.8),
        (Instrumentalness, 0.4, 0.9, 0.7),
        (Acousticness, 0.0, 0.3, 0.1),
        (Tempo, 110.0, 160.0, 135.0),
      ]),
    ),
  ];

  entries
    .into_iter()
    .map(|(emoji, search_term, targets)| (normalize_emoji(emoji), EmojiMood { search_term, targets }))
    .collect()
});

pub fn emotion_targets(emotion: Emotion) -> AudioFeatureTargets {
  match emotion {
    Emotion::Happy => targets(&[
      (Valence, 0.7, 1.0, 0.85),
      (Energy, 0.5, 0.9, 0.7),
      (Danceability, 0.6, 1.0, 0.8),
      (Tempo, 100.0, 160.0, 130.0),
    ]),
    Emotion::Sad => targets(&[
      (Valence, 0.0, 0.3, 0.15),
      (Energy, 0.0, 0.4, 0.2),
      (Acousticness, 0.4, 1.0, 0.7),
      (Tempo, 60.0, 100.0, 80.0),
    ]),
    Emotion::Energetic => targets(&[
      (Energy, 0.8, 1.0, 0.9),
      (Tempo, 120.0, 180.0, 150.0),
      (Danceability, 0.6, 1.0, 0.8),
      (Valence, 0.5, 1.0, 0.7),
    ]),
    Emotion::Calm => targets(&[
      (Energy, 0.0, 0.4, 0.2),
      (Acousticness, 0.5, 1.0, 0.8),
      (Valence, 0.3, 0.7, 0.5),
      (Tempo, 60.0, 110.0, 85.0),
    ]),
    Emotion::Romantic => targets(&[
      (Valence, 0.5, 0.8, 0.65),
      (Energy, 0.2, 0.6, 0.4),
      (Acousticness, 0.3, 0.8, 0.6),
      (Tempo, 70.0, 120.0, 95.0),
    ]),
    Emotion::Angry => targets(&[
      (Energy, 0.7, 1.0, 0.9),
      (Valence, 0.0, 0.4, 0.2),
      (Loudness, -10.0, 0.0, -3.0),
      (Tempo, 100.0, 200.0, 150.0),
    ]),
    Emotion::Focused => targets(&[
      (Energy, 0.3, 0.7, 0.5),
      (Instrumentalness, 0.5, 1.0, 0.8),
      (Speechiness, 0.0, 0.2, 0.1),
      (Acousticness, 0.0, 0.5, 0.2),
    ]),
    Emotion::Dreamy => targets(&[
      (Energy, 0.1, 0.5, 0.3),
      (Valence, 0.4, 0.7, 0.55),
      (Acousticness, 0.5, 0.9, 0.7),
      (Tempo, 60.0, 100.0, 80.0),
    ]),
    Emotion::Nostalgic => targets(&[
      (Valence, 0.3, 0.7, 0.5),
      (Energy, 0.2, 0.6, 0.4),
      (Acousticness, 0.4, 0.9, 0.7),
      (Tempo, 70.0, 120.0, 95.0),
    ]),
    Emotion::Excited => targets(&[
      (Energy, 0.7, 1.0, 0.85),
      (Valence, 0.7, 1.0, 0.85),
      (Danceability, 0.5, 1.0, 0.8),
      (Tempo, 120.0, 180.0, 150.0),
    ]),
  }
}

/// Palabras clave por emoción (portugués y inglés, en minúsculas).
pub fn emotion_keywords(emotion: Emotion) -> &'static [&'static str] {
  match emotion {
    Emotion::Happy => {
      &["feliz", "alegre", "animado", "contente", "eufórico", "festa", "celebrar", "happy", "joy", "cheerful", "party"]
    }
    Emotion::Sad => &["triste", "melancólico", "deprimido", "solitário", "chorar", "sad", "lonely", "cry", "heartbroken"],
    Emotion::Energetic => {
      &["energia", "agitado", "intenso", "ativo", "vibrante", "corrida", "treino", "energy", "workout", "pumped"]
    }
    Emotion::Calm => {
      &["calmo", "relaxado", "paz", "tranquilo", "sereno", "meditação", "zen", "calm", "relax", "peaceful"]
    }
    Emotion::Romantic => &["amor", "romântico", "paixão", "carinho", "íntimo", "coração", "love", "romantic", "passion"],
    Emotion::Angry => &["raiva", "irritado", "furioso", "bravo", "revoltado", "indignado", "angry", "rage", "furious"],
    Emotion::Focused => {
      &["foco", "concentração", "trabalho", "estudo", "produtivo", "atenção", "focus", "study", "concentrat"]
    }
    Emotion::Dreamy => &["sonhador", "fantasia", "imaginação", "etéreo", "flutuante", "celestial", "dream", "ethereal"],
    Emotion::Nostalgic => &["saudade", "nostalgia", "nostálgico", "memórias", "passado", "lembranças", "memories"],
    Emotion::Excited => &["empolgado", "excitado", "ansioso", "expectativa", "entusiasmado", "excited", "thrilled"],
  }
}
